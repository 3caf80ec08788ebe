//! Data models for deck dimensions and generated materials

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{PlannerError, Result};

/// Accepted deck length in feet at the editing boundary.
pub const LENGTH_RANGE_FT: RangeInclusive<f64> = 4.0..=100.0;
/// Accepted deck width in feet at the editing boundary.
pub const WIDTH_RANGE_FT: RangeInclusive<f64> = 4.0..=100.0;
/// Accepted deck height in inches at the editing boundary.
pub const HEIGHT_RANGE_IN: RangeInclusive<f64> = 4.0..=120.0;

/// Deck surface material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeckMaterial {
    #[default]
    #[serde(rename = "Pressure Treated Lumber")]
    PressureTreated,
    #[serde(rename = "Cedar")]
    Cedar,
    #[serde(rename = "Redwood")]
    Redwood,
    #[serde(rename = "Composite")]
    Composite,
}

impl DeckMaterial {
    /// All materials in the order they are offered to the user.
    pub const ALL: [DeckMaterial; 4] = [
        DeckMaterial::PressureTreated,
        DeckMaterial::Cedar,
        DeckMaterial::Redwood,
        DeckMaterial::Composite,
    ];

    /// Name used when describing the deck to the material service.
    pub fn label(self) -> &'static str {
        match self {
            DeckMaterial::PressureTreated => "Pressure Treated Lumber",
            DeckMaterial::Cedar => "Cedar",
            DeckMaterial::Redwood => "Redwood",
            DeckMaterial::Composite => "Composite",
        }
    }

    /// Name shown in the material picker.
    pub fn option_label(self) -> &'static str {
        match self {
            DeckMaterial::PressureTreated => "Pressure Treated (Standard)",
            DeckMaterial::Cedar => "Cedar (Premium Natural)",
            DeckMaterial::Redwood => "Redwood (Premium Natural)",
            DeckMaterial::Composite => "Composite (Low Maintenance)",
        }
    }
}

impl fmt::Display for DeckMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a material name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown deck material '{0}' (expected pressure-treated, cedar, redwood or composite)")]
pub struct UnknownMaterial(pub String);

impl FromStr for DeckMaterial {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "pt" | "pressuretreated" | "pressuretreatedlumber" => Ok(DeckMaterial::PressureTreated),
            "cedar" => Ok(DeckMaterial::Cedar),
            "redwood" => Ok(DeckMaterial::Redwood),
            "composite" => Ok(DeckMaterial::Composite),
            _ => Err(UnknownMaterial(s.to_string())),
        }
    }
}

/// The user's deck specification.
///
/// Replaced wholesale on every edit; never mutated field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDimensions {
    pub length: f64, // feet
    pub width: f64,  // feet
    pub height: f64, // inches
    pub material: DeckMaterial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

impl Default for DeckDimensions {
    fn default() -> Self {
        Self {
            length: 12.0,
            width: 10.0,
            height: 24.0,
            material: DeckMaterial::PressureTreated,
            additional_details: None,
        }
    }
}

impl DeckDimensions {
    /// Build dimensions, rejecting non-positive or non-finite values.
    pub fn new(length: f64, width: f64, height: f64, material: DeckMaterial) -> Result<Self> {
        let dimensions = Self {
            length,
            width,
            height,
            material,
            additional_details: None,
        };
        dimensions.validate()?;
        Ok(dimensions)
    }

    /// Build dimensions from raw user input, clamped into the practical ranges.
    pub fn clamped(length: f64, width: f64, height: f64, material: DeckMaterial) -> Self {
        Self {
            length: clamp_to(length, &LENGTH_RANGE_FT),
            width: clamp_to(width, &WIDTH_RANGE_FT),
            height: clamp_to(height, &HEIGHT_RANGE_IN),
            material,
            additional_details: None,
        }
    }

    /// Attach free-text notes; blank text clears them.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        self.additional_details = if details.trim().is_empty() {
            None
        } else {
            Some(details)
        };
        self
    }

    /// Same dimensions pulled back into the practical ranges.
    pub fn clamp_to_ranges(&self) -> Self {
        Self {
            additional_details: self.additional_details.clone(),
            ..Self::clamped(self.length, self.width, self.height, self.material)
        }
    }

    /// Check that every numeric field is a positive number.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::InvalidDimensions { field, value });
            }
        }
        Ok(())
    }

    /// Notes to pass along, if any were entered.
    pub fn details(&self) -> Option<&str> {
        self.additional_details
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// A single line of the bill of materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub notes: String, // why this quantity
}

/// A named group of material items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCategory {
    pub category_name: String,
    pub items: Vec<MaterialItem>,
}

/// A complete bill of materials, in the order the service returned it
pub type MaterialCatalog = Vec<MaterialCategory>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let dims = DeckDimensions::default();
        assert_eq!(dims.length, 12.0);
        assert_eq!(dims.width, 10.0);
        assert_eq!(dims.height, 24.0);
        assert_eq!(dims.material, DeckMaterial::PressureTreated);
        assert!(dims.details().is_none());
    }

    #[test]
    fn test_new_rejects_non_positive() {
        let err = DeckDimensions::new(0.0, 10.0, 24.0, DeckMaterial::Cedar).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidDimensions { field: "length", .. }
        ));

        let err = DeckDimensions::new(12.0, 10.0, -1.0, DeckMaterial::Cedar).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidDimensions { field: "height", .. }
        ));

        let err = DeckDimensions::new(12.0, f64::NAN, 24.0, DeckMaterial::Cedar).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidDimensions { field: "width", .. }
        ));
    }

    #[test]
    fn test_clamped_stays_in_range() {
        let dims = DeckDimensions::clamped(0.0, 500.0, f64::NAN, DeckMaterial::Redwood);
        assert_eq!(dims.length, 4.0);
        assert_eq!(dims.width, 100.0);
        assert_eq!(dims.height, 4.0);
        assert!(dims.validate().is_ok());
    }

    #[test]
    fn test_blank_details_are_dropped() {
        let dims = DeckDimensions::default().with_details("   ");
        assert!(dims.additional_details.is_none());

        let dims = DeckDimensions::default().with_details("add a stair on the east side");
        assert_eq!(dims.details(), Some("add a stair on the east side"));
    }

    #[test]
    fn test_material_from_str() {
        assert_eq!(
            "pressure-treated".parse::<DeckMaterial>(),
            Ok(DeckMaterial::PressureTreated)
        );
        assert_eq!("Cedar".parse::<DeckMaterial>(), Ok(DeckMaterial::Cedar));
        assert_eq!(
            "Pressure Treated Lumber".parse::<DeckMaterial>(),
            Ok(DeckMaterial::PressureTreated)
        );
        assert!("teak".parse::<DeckMaterial>().is_err());
    }

    #[test]
    fn test_unknown_material_message() {
        let err = "teak".parse::<DeckMaterial>().unwrap_err();
        assert_eq!(err, UnknownMaterial("teak".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown deck material 'teak' (expected pressure-treated, cedar, redwood or composite)"
        );
    }

    #[test]
    fn test_dimensions_json_uses_camel_case() {
        let dims = DeckDimensions::default().with_details("hot tub");
        let json = serde_json::to_value(&dims).unwrap();
        assert_eq!(json["material"], "Pressure Treated Lumber");
        assert_eq!(json["additionalDetails"], "hot tub");
    }

    #[test]
    fn test_category_json_shape() {
        let json = r#"{"categoryName":"Lumber","items":[
            {"name":"2x8x12 Joist","quantity":15,"unit":"boards","notes":"16oc spacing"}
        ]}"#;
        let category: MaterialCategory = serde_json::from_str(json).unwrap();
        assert_eq!(category.category_name, "Lumber");
        assert_eq!(category.items[0].quantity, 15.0);
    }
}
