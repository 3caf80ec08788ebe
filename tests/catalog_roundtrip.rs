//! A catalog written out as JSON parses back to the same catalog.

use deck_planner::{MaterialCatalog, MaterialCategory, MaterialItem, parse_response};
use proptest::prelude::*;

fn roundtrip(catalog: &MaterialCatalog) -> MaterialCatalog {
    let json = serde_json::to_string(catalog).unwrap();
    parse_response(&json).unwrap()
}

fn item(name: &str, quantity: f64, unit: &str, notes: &str) -> MaterialItem {
    MaterialItem {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        notes: notes.to_string(),
    }
}

fn quantity() -> impl Strategy<Value = f64> {
    prop_oneof![
        (1u32..500).prop_map(f64::from),
        0.01f64..1000.0,
        1e-300f64..1e300,
        prop::num::f64::POSITIVE | prop::num::f64::NORMAL,
    ]
}

fn material_item() -> impl Strategy<Value = MaterialItem> {
    (
        "[A-Za-z0-9][ -~]{0,30}",
        quantity(),
        "[ -~]{0,12}",
        any::<String>(),
    )
        .prop_map(|(name, quantity, unit, notes)| MaterialItem {
            name,
            quantity,
            unit,
            notes,
        })
}

fn material_category() -> impl Strategy<Value = MaterialCategory> {
    (
        "[A-Za-z][ -~]{0,20}",
        prop::collection::vec(material_item(), 0..6),
    )
        .prop_map(|(category_name, items)| MaterialCategory {
            category_name,
            items,
        })
}

proptest! {
    #[test]
    fn generated_catalog_survives_json(catalog in prop::collection::vec(material_category(), 0..6)) {
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = parse_response(&json);
        prop_assert!(parsed.is_ok(), "{json} gave {parsed:?}");
        prop_assert_eq!(parsed.unwrap(), catalog);
    }

    #[test]
    fn quantities_keep_every_bit(q in 1e-300f64..1e300) {
        let catalog = vec![MaterialCategory {
            category_name: "Lumber".to_string(),
            items: vec![item("Joist", q, "boards", "")],
        }];
        let parsed = roundtrip(&catalog);
        prop_assert_eq!(parsed[0].items[0].quantity.to_bits(), q.to_bits());
    }
}

#[test]
fn large_quantity_is_exact() {
    let q = 4.329955484145133e299;
    let catalog = vec![MaterialCategory {
        category_name: "Concrete".to_string(),
        items: vec![item("Concrete mix", q, "bags", "60 lb bags")],
    }];
    assert_eq!(roundtrip(&catalog)[0].items[0].quantity, q);
}

#[test]
fn multi_category_catalog() {
    let catalog = vec![
        MaterialCategory {
            category_name: "Lumber".to_string(),
            items: vec![
                item("2x8x12 Joist", 15.0, "boards", "16\" on center"),
                item("2x10x12 Beam", 2.0, "boards", "doubled"),
            ],
        },
        MaterialCategory {
            category_name: "Hardware".to_string(),
            items: vec![item("Joist hanger", 30.0, "each", "")],
        },
        MaterialCategory {
            category_name: "Finishing".to_string(),
            items: Vec::new(),
        },
    ];
    assert_eq!(roundtrip(&catalog), catalog);
}

#[test]
fn empty_catalog() {
    assert_eq!(roundtrip(&Vec::new()), Vec::<MaterialCategory>::new());
}
