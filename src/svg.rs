//! SVG rendering of a layout preview

use std::fmt::{self, Write};

use crate::layout::{Label, LayoutGeometry};

/// Drawing colours, matching the planner's green palette.
mod palette {
    pub const DECK_FILL: &str = "#f0fdf4";
    pub const DECK_STROKE: &str = "#15803d";
    pub const JOIST: &str = "#86efac";
    pub const BEAM: &str = "#166534";
    pub const POST: &str = "#14532d";
    pub const LABEL: &str = "#64748b";
}

/// Render the geometry as a standalone SVG document.
pub fn render_svg(layout: &LayoutGeometry) -> String {
    let mut out = String::new();
    write_svg(&mut out, layout).map(|()| out).unwrap_or_default()
}

fn write_svg(out: &mut impl Write, layout: &LayoutGeometry) -> fmt::Result {
    let (w, h) = (layout.area_width, layout.area_height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;

    if !layout.is_empty() {
        write_footprint(out, layout)?;
        for label in layout.width_label.iter().chain(layout.length_label.iter()) {
            write_label(out, label)?;
        }
    }

    writeln!(out, "</svg>")
}

fn write_footprint(out: &mut impl Write, layout: &LayoutGeometry) -> fmt::Result {
    let origin = layout.origin();
    writeln!(
        out,
        r#"  <g transform="translate({}, {})">"#,
        fmt_num(origin.x),
        fmt_num(origin.y)
    )?;

    writeln!(
        out,
        r#"    <rect x="0" y="0" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="3"/>"#,
        fmt_num(layout.pixel_length()),
        fmt_num(layout.pixel_width()),
        palette::DECK_FILL,
        palette::DECK_STROKE
    )?;

    writeln!(out, r#"    <g class="joists">"#)?;
    for joist in &layout.joists {
        writeln!(
            out,
            r#"      <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1" stroke-dasharray="4 2"/>"#,
            fmt_num(joist.start.x),
            fmt_num(joist.start.y),
            fmt_num(joist.end.x),
            fmt_num(joist.end.y),
            palette::JOIST
        )?;
    }
    writeln!(out, "    </g>")?;

    if let Some(beam) = &layout.beam {
        writeln!(
            out,
            r#"    <line class="beam" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="4" opacity="0.5"/>"#,
            fmt_num(beam.start.x),
            fmt_num(beam.start.y),
            fmt_num(beam.end.x),
            fmt_num(beam.end.y),
            palette::BEAM
        )?;
    }

    writeln!(out, r#"    <g class="posts">"#)?;
    for post in &layout.posts {
        let half = post.size / 2.0;
        writeln!(
            out,
            r#"      <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_num(post.center.x - half),
            fmt_num(post.center.y - half),
            fmt_num(post.size),
            fmt_num(post.size),
            palette::POST
        )?;
    }
    writeln!(out, "    </g>")?;
    writeln!(out, "  </g>")
}

fn write_label(out: &mut impl Write, label: &Label) -> fmt::Result {
    let (x, y) = (fmt_num(label.position.x), fmt_num(label.position.y));
    let transform = if label.rotation_deg == 0.0 {
        String::new()
    } else {
        format!(
            r#" transform="rotate({}, {x}, {y})""#,
            fmt_num(label.rotation_deg)
        )
    };

    writeln!(
        out,
        r#"  <text x="{x}" y="{y}" text-anchor="{}"{transform} font-family="monospace" font-size="12" fill="{}">{}</text>"#,
        label.anchor.as_str(),
        palette::LABEL,
        escape_text(&label.text)
    )
}

/// Two decimals, without trailing zeros.
fn fmt_num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DEFAULT_PADDING, compute_layout};
    use crate::models::DeckDimensions;

    #[test]
    fn test_renders_every_element() {
        let layout = compute_layout(&DeckDimensions::default(), 600.0, 450.0, DEFAULT_PADDING);
        let svg = render_svg(&layout);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 600 450""#));
        assert!(svg.contains(r#"translate(78, 40)"#));
        assert_eq!(svg.matches("stroke-dasharray").count(), layout.joists.len());
        assert_eq!(svg.matches(r##"fill="#14532d""##).count(), layout.posts.len());
        assert!(svg.contains(r#"class="beam""#));
        assert!(svg.contains(">10 ft</text>"));
        assert!(svg.contains(">12 ft</text>"));
        assert!(svg.contains("rotate(-90, 63, 225)"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_layout_renders_blank_canvas() {
        let svg = render_svg(&LayoutGeometry::empty(0.0, 0.0));
        assert!(!svg.contains("<rect"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(78.0), "78");
        assert_eq!(fmt_num(49.333333), "49.33");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
    }
}
