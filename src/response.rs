//! Material response parsing and display
//!
//! The service's output is treated as untrusted: it must deserialize into the
//! catalog shape and then pass a structural check before it is accepted.

use std::fmt::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PlannerError, Result};
use crate::models::{MaterialCatalog, MaterialCategory};

/// Closing note shown under every generated bill of materials.
pub const DISCLAIMER: &str = "Note: These are AI-generated estimates based on general building practices. \
Always verify with local building codes and a professional engineer before purchasing materials or starting construction.";

/// A single Markdown code fence around the whole payload
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A```[A-Za-z]*\s*(.*?)\s*```\z").expect("code fence pattern is valid")
});

/// Parse raw service output into a material catalog.
///
/// Fails with `MalformedResponse` when the text is empty, is not JSON, does
/// not match the catalog shape, or carries unusable values.
pub fn parse_response(raw: &str) -> Result<MaterialCatalog> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(PlannerError::MalformedResponse("empty response".to_string()));
    }

    let catalog: MaterialCatalog = serde_json::from_str(body)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Remove a single Markdown code fence wrapped around the payload.
fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|cap| cap.get(1)) {
        Some(inner) => inner.as_str(),
        None => text,
    }
}

fn validate_catalog(catalog: &[MaterialCategory]) -> Result<()> {
    for (ci, category) in catalog.iter().enumerate() {
        if category.category_name.trim().is_empty() {
            return Err(PlannerError::MalformedResponse(format!(
                "category {ci} has a blank name"
            )));
        }

        for (ii, item) in category.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(PlannerError::MalformedResponse(format!(
                    "item {ii} in '{}' has a blank name",
                    category.category_name
                )));
            }
            if !item.quantity.is_finite() || item.quantity <= 0.0 {
                return Err(PlannerError::MalformedResponse(format!(
                    "'{}' has non-positive quantity {}",
                    item.name, item.quantity
                )));
            }
        }
    }
    Ok(())
}

/// Size of a catalog, for logs and headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub categories: usize,
    pub items: usize,
}

impl CatalogSummary {
    pub fn of(catalog: &[MaterialCategory]) -> Self {
        Self {
            categories: catalog.len(),
            items: catalog.iter().map(|c| c.items.len()).sum(),
        }
    }
}

/// Render a catalog for display, or the empty-state prompt when there is none.
pub fn render_catalog(catalog: Option<&MaterialCatalog>) -> String {
    let mut out = String::new();
    write_catalog(&mut out, catalog).map(|()| out).unwrap_or_default()
}

fn write_catalog(out: &mut impl Write, catalog: Option<&MaterialCatalog>) -> fmt::Result {
    let Some(catalog) = catalog else {
        writeln!(out, "Ready to Build?")?;
        return writeln!(
            out,
            "Enter your dimensions and click Generate to see your Bill of Materials."
        );
    };

    let summary = CatalogSummary::of(catalog);
    writeln!(
        out,
        "=== Bill of Materials === ({} categories, {} items)",
        summary.categories, summary.items
    )?;

    for category in catalog {
        writeln!(out)?;
        writeln!(out, "{}", category.category_name)?;
        writeln!(out, "{}", "-".repeat(category.category_name.chars().count()))?;
        for item in &category.items {
            writeln!(out, "  {:<40} {:>8} {}", item.name, item.quantity, item.unit)?;
            if !item.notes.trim().is_empty() {
                writeln!(out, "      {}", item.notes)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{DISCLAIMER}")
}
