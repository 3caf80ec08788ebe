//! Material request building
//!
//! Turns a deck specification into the prompt and output schema sent to the
//! generative material service. No quantities are computed here: the
//! framing rules below travel as instructions for the service to follow.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::models::DeckDimensions;

/// Joist spacing the service must assume, in inches on center.
pub const JOIST_SPACING_IN: u32 = 16;
/// Size of a concrete mix bag, in pounds.
pub const CONCRETE_BAG_LB: u32 = 60;
/// Waste allowance applied to quantities, in percent.
pub const WASTE_FACTOR_PERCENT: u32 = 10;
/// Deck height above which railing is mandatory, in inches.
pub const RAILING_THRESHOLD_IN: f64 = 30.0;
/// Sampling temperature; kept low so quantities stay consistent.
pub const REQUEST_TEMPERATURE: f64 = 0.2;

/// Everything the material service needs for one bill of materials
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRequest {
    pub prompt: String,
    pub schema: Value,
    pub temperature: f64,
    #[serde(skip)]
    railing_required: bool,
}

impl MaterialRequest {
    /// Whether the deck is high enough that railing must be included.
    pub fn railing_required(&self) -> bool {
        self.railing_required
    }
}

/// Build the material request for a deck.
pub fn build_request(dimensions: &DeckDimensions) -> MaterialRequest {
    let railing_required = dimensions.height > RAILING_THRESHOLD_IN;
    let prompt = build_prompt(dimensions, railing_required);

    debug!(
        length = dimensions.length,
        width = dimensions.width,
        height = dimensions.height,
        material = %dimensions.material,
        railing_required,
        "built material request"
    );

    MaterialRequest {
        prompt,
        schema: catalog_schema(),
        temperature: REQUEST_TEMPERATURE,
        railing_required,
    }
}

fn build_prompt(dimensions: &DeckDimensions, railing_required: bool) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Calculate a detailed Bill of Materials (BOM) for a residential deck with the following specifications:\n",
    );
    prompt.push_str(&format!(
        "- Dimensions: {} feet long by {} feet wide.\n",
        dimensions.length, dimensions.width
    ));
    prompt.push_str(&format!(
        "- Height off ground: {} inches.\n",
        dimensions.height
    ));
    prompt.push_str(&format!(
        "- Deck Surface Material: {}.\n",
        dimensions.material.label()
    ));
    prompt.push_str(&format!(
        "- Structure: Standard residential framing ({JOIST_SPACING_IN}\" o.c. joists, appropriate beams and posts based on load).\n"
    ));
    if let Some(details) = dimensions.details() {
        prompt.push_str(&format!(
            "- SPECIAL INSTRUCTIONS/USER NOTES: \"{details}\" (Please incorporate these requirements into the material list calculations).\n"
        ));
    }

    prompt.push_str("\nCRITICAL CONSTRAINTS:\n");
    prompt.push_str(
        "1. BEAMS: Do NOT use built-up 2x lumber (e.g., (2) 2x10) for beams. Use solid timber (4x or larger, e.g., 4x8, 4x10, 6x10) or appropriate engineered beams.\n",
    );
    prompt.push_str(&format!(
        "2. CONCRETE: Use {CONCRETE_BAG_LB}lb bags for all concrete footing calculations.\n"
    ));

    prompt.push_str("\nInclude estimations for:\n");
    prompt.push_str("1. Framing Lumber (Ledger boards, Joists, Beams, Posts, Rim Joists).\n");
    prompt.push_str("2. Decking Boards (Assume standard width for the chosen Deck Surface Material).\n");
    prompt.push_str(
        "3. Hardware (Joist hangers, Structural screws, Deck screws/fasteners, Bolts/Lags for ledger and posts).\n",
    );
    prompt.push_str(&format!(
        "4. Concrete (Bags of mix for footings, calculated in {CONCRETE_BAG_LB}lb bags).\n"
    ));
    if railing_required {
        prompt.push_str(&format!(
            "5. Railing (REQUIRED: the deck is more than {RAILING_THRESHOLD_IN} inches off the ground).\n"
        ));
    } else {
        prompt.push_str(&format!(
            "5. Railing (optional at or below {RAILING_THRESHOLD_IN} inches, but include it if good practice).\n"
        ));
    }

    prompt.push_str(&format!(
        "\nAdd a 'notes' field for each item explaining the calculation logic (e.g., \"15 joists needed for 12ft span @ {JOIST_SPACING_IN}oc + 1 end\").\n"
    ));
    prompt.push_str(&format!(
        "Ensure quantities include a {WASTE_FACTOR_PERCENT}% waste factor where appropriate.\n"
    ));

    prompt
}

/// Output schema: an array of categories, each holding fully specified items.
pub fn catalog_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "categoryName": {
                    "type": "STRING",
                    "description": "The category of materials (e.g., Lumber, Hardware, Concrete, Finishes)."
                },
                "items": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": {
                                "type": "STRING",
                                "description": "Specific name of the item (e.g., 4x10x12' Pressure Treated Beam)"
                            },
                            "quantity": {
                                "type": "NUMBER",
                                "description": "Estimated quantity needed"
                            },
                            "unit": {
                                "type": "STRING",
                                "description": "Unit of measure (e.g., boards, lbs, box, bags)"
                            },
                            "notes": {
                                "type": "STRING",
                                "description": "Reasoning for the quantity or specific usage instructions"
                            }
                        },
                        "required": ["name", "quantity", "unit", "notes"]
                    }
                }
            },
            "required": ["categoryName", "items"]
        }
    })
}
