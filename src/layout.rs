//! Schematic layout of a deck, scaled into a drawing area
//!
//! Produces a top-down plan: the deck footprint, joists running across the
//! width at 16" on center, one beam set in from the far edge and the posts
//! that carry it. Length runs along the x axis, width along the y axis.

use std::fmt;

use tracing::debug;

use crate::models::DeckDimensions;

/// Joist spacing in feet (16" on center).
pub const JOIST_SPACING_FT: f64 = 16.0 / 12.0;
/// Nominal spacing between posts along the beam, in feet.
pub const POST_SPACING_FT: f64 = 8.0;
/// How far the beam sits in from the far edge, in feet.
pub const BEAM_INSET_FT: f64 = 1.0;
/// Padding kept clear around the footprint, in pixels.
pub const DEFAULT_PADDING: f64 = 40.0;
/// Side of a post marker square, in pixels.
pub const POST_SIZE: f64 = 8.0;

const WIDTH_LABEL_GAP: f64 = 15.0;
const LENGTH_LABEL_GAP: f64 = 10.0;
const PREVIEW_ASPECT: f64 = 0.75;
const MAX_PREVIEW_HEIGHT: f64 = 500.0;

// A remainder smaller than this counts as an exact multiple of the joist spacing.
const SNAP_TOLERANCE_FT: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostMarker {
    pub center: Point,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A dimension label, positioned in drawing-area coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub anchor: TextAnchor,
    /// Rotation about `position`, in degrees.
    pub rotation_deg: f64,
}

/// Scaled geometry for one frame of the preview.
///
/// The outline and labels are in drawing-area coordinates. Joists, the beam
/// and posts are relative to the outline's top-left corner, so a joist at
/// x = 0 sits on the near end and one at `pixel_length()` on the far end.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGeometry {
    pub area_width: f64,
    pub area_height: f64,
    /// Pixels per foot.
    pub scale: f64,
    pub outline: Rect,
    pub joists: Vec<Segment>,
    pub beam: Option<Segment>,
    pub posts: Vec<PostMarker>,
    pub width_label: Option<Label>,
    pub length_label: Option<Label>,
}

impl LayoutGeometry {
    /// Geometry with nothing to draw.
    pub fn empty(area_width: f64, area_height: f64) -> Self {
        Self {
            area_width: area_width.max(0.0),
            area_height: area_height.max(0.0),
            scale: 0.0,
            outline: Rect::default(),
            joists: Vec::new(),
            beam: None,
            posts: Vec::new(),
            width_label: None,
            length_label: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.joists.is_empty() && self.beam.is_none()
    }

    pub fn pixel_length(&self) -> f64 {
        self.outline.width
    }

    pub fn pixel_width(&self) -> f64 {
        self.outline.height
    }

    /// Top-left corner of the footprint in drawing-area coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.outline.x, self.outline.y)
    }

    /// Joist x positions relative to the footprint, near end first.
    pub fn joist_positions(&self) -> Vec<f64> {
        self.joists.iter().map(|j| j.start.x).collect()
    }

    /// Post x positions relative to the footprint, near end first.
    pub fn post_positions(&self) -> Vec<f64> {
        self.posts.iter().map(|p| p.center.x).collect()
    }
}

/// Size of the preview area for a container of the given width.
///
/// The preview keeps a 4:3 shape but never grows taller than 500 px.
pub fn preview_area(container_width: f64) -> (f64, f64) {
    let width = container_width.max(0.0);
    (width, (width * PREVIEW_ASPECT).min(MAX_PREVIEW_HEIGHT))
}

/// Lay out the deck so its footprint fits inside the padded drawing area.
///
/// `dimensions` must already hold positive length and width; the editing
/// boundary enforces that. A non-positive area (before or after padding)
/// yields empty geometry.
pub fn compute_layout(
    dimensions: &DeckDimensions,
    area_width: f64,
    area_height: f64,
    padding: f64,
) -> LayoutGeometry {
    let DeckDimensions { length, width, .. } = *dimensions;
    debug_assert!(length > 0.0 && width > 0.0, "deck dimensions must be positive");

    let usable_width = area_width - 2.0 * padding;
    let usable_height = area_height - 2.0 * padding;
    if !(area_width > 0.0 && area_height > 0.0 && usable_width > 0.0 && usable_height > 0.0) {
        debug!(area_width, area_height, padding, "drawing area too small, nothing to lay out");
        return LayoutGeometry::empty(area_width, area_height);
    }

    // Uniform scale so the aspect ratio survives.
    let scale_x = usable_width / length;
    let scale_y = usable_height / width;
    let scale = scale_x.min(scale_y);

    let pixel_length = length * scale;
    let pixel_width = width * scale;
    let outline = Rect {
        x: (area_width - pixel_length) / 2.0,
        y: (area_height - pixel_width) / 2.0,
        width: pixel_length,
        height: pixel_width,
    };

    let joists = joist_positions(length, scale, pixel_length)
        .into_iter()
        .map(|x| Segment {
            start: Point::new(x, 0.0),
            end: Point::new(x, pixel_width),
        })
        .collect::<Vec<_>>();

    let beam_y = pixel_width - BEAM_INSET_FT * scale;
    let beam = Segment {
        start: Point::new(0.0, beam_y),
        end: Point::new(pixel_length, beam_y),
    };

    let posts = post_positions(length, scale, pixel_length)
        .into_iter()
        .map(|x| PostMarker {
            center: Point::new(x, beam_y),
            size: POST_SIZE,
        })
        .collect::<Vec<_>>();

    let width_label = Label {
        text: format!("{width} ft"),
        position: Point::new(outline.x - WIDTH_LABEL_GAP, area_height / 2.0),
        anchor: TextAnchor::End,
        rotation_deg: -90.0,
    };
    let length_label = Label {
        text: format!("{length} ft"),
        position: Point::new(area_width / 2.0, outline.y - LENGTH_LABEL_GAP),
        anchor: TextAnchor::Middle,
        rotation_deg: 0.0,
    };

    debug!(
        scale,
        joists = joists.len(),
        posts = posts.len(),
        "laid out {length}x{width} ft deck"
    );

    LayoutGeometry {
        area_width,
        area_height,
        scale,
        outline,
        joists,
        beam: Some(beam),
        posts,
        width_label: Some(width_label),
        length_label: Some(length_label),
    }
}

/// Joist positions stepped at the joist spacing, always ending exactly on
/// the far edge.
fn joist_positions(length: f64, scale: f64, pixel_length: f64) -> Vec<f64> {
    let steps = (length / JOIST_SPACING_FT + 1e-9).floor() as usize;
    let mut positions: Vec<f64> = (0..=steps)
        .map(|i| (i as f64 * JOIST_SPACING_FT * scale).min(pixel_length))
        .collect();

    let remainder = length - steps as f64 * JOIST_SPACING_FT;
    if remainder > SNAP_TOLERANCE_FT {
        positions.push(pixel_length);
    } else if let Some(last) = positions.last_mut() {
        *last = pixel_length;
    }
    positions
}

/// Post positions evenly spread along the beam, one at each end.
fn post_positions(length: f64, scale: f64, pixel_length: f64) -> Vec<f64> {
    let count = (length / POST_SPACING_FT).ceil() as usize + 1;
    if count <= 1 {
        return vec![pixel_length / 2.0];
    }

    let spacing = length / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                pixel_length
            } else {
                (i as f64 * spacing * scale).min(pixel_length)
            }
        })
        .collect()
}

impl fmt::Display for LayoutGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Layout Preview ===")?;
        writeln!(f, "Area: {:.0} x {:.0} px", self.area_width, self.area_height)?;

        if self.is_empty() {
            writeln!(f, "Nothing to draw (drawing area too small)")?;
            return Ok(());
        }

        writeln!(f, "Scale: {:.2} px/ft", self.scale)?;
        writeln!(
            f,
            "Footprint: {:.1} x {:.1} px at ({:.1}, {:.1})",
            self.pixel_length(),
            self.pixel_width(),
            self.outline.x,
            self.outline.y
        )?;
        writeln!(f)?;

        writeln!(f, "Joists: {} @ 16\" o.c.", self.joists.len())?;
        if let Some(beam) = &self.beam {
            writeln!(f, "Beam:   y = {:.1} px", beam.start.y)?;
        }
        writeln!(f, "Posts:  {}", self.posts.len())?;
        for x in self.post_positions() {
            writeln!(f, "  x = {:.1} px", x)?;
        }

        Ok(())
    }
}
