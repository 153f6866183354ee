use fateweaver_engine::cards::{Card, Catalog};
use fateweaver_engine::errors::CatalogError;

fn card(id: u32, number: &str, name: &str, keywords: &[&str]) -> Card {
    Card {
        id,
        number: number.to_string(),
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        description: String::new(),
        image: String::new(),
    }
}

fn catalog() -> Catalog {
    Catalog::from_cards(vec![
        card(0, "0", "The Fool", &["fool", "jester"]),
        card(1, "II", "High Priestess", &["priestess"]),
    ])
}

#[test]
fn finds_card_by_keyword() {
    let catalog = catalog();
    assert_eq!(catalog.find("priestess"), Some(1));
    assert_eq!(catalog.find("jester"), Some(0));
}

#[test]
fn finds_card_by_full_name_case_insensitive() {
    let catalog = catalog();
    assert_eq!(catalog.find("the fool"), Some(0));
    assert_eq!(catalog.find("THE FOOL"), Some(0));
    assert_eq!(catalog.find("High Priestess"), Some(1));
}

#[test]
fn unknown_keyword_returns_none() {
    let catalog = catalog();
    assert_eq!(catalog.find("magic"), None);
}

#[test]
fn partial_name_does_not_match() {
    let catalog = catalog();
    assert_eq!(catalog.find("fool's journey"), None);
    assert_eq!(catalog.find("priest"), None);
}

#[test]
fn first_listed_card_wins_on_shared_keyword() {
    let catalog = Catalog::from_cards(vec![
        card(0, "XVIII", "The Moon", &["omen", "moon"]),
        card(1, "XIX", "The Sun", &["omen", "sun"]),
    ]);
    assert_eq!(catalog.find("omen"), Some(0));
}

#[test]
fn get_out_of_range_fails() {
    let catalog = catalog();
    assert!(matches!(
        catalog.get(99),
        Err(CatalogError::OutOfRange { index: 99, len: 2 })
    ));
    assert_eq!(catalog.get(1).unwrap().name, "High Priestess");
}

#[test]
fn loads_catalog_from_json_file() {
    let path = std::env::temp_dir().join("fateweaver_test_catalog.json");
    let raw = r#"{
        "cards": [
            {
                "id": 0,
                "number": "0",
                "name": "The Fool",
                "keywords": ["fool", "jester"],
                "description": "New beginnings.",
                "image": "https://example.invalid/fool.jpg"
            }
        ]
    }"#;
    std::fs::write(&path, raw).expect("write fixture");

    let catalog = Catalog::load(&path).expect("load fixture");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().keywords, vec!["fool", "jester"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn rejects_malformed_catalog_file() {
    let path = std::env::temp_dir().join("fateweaver_bad_catalog.json");
    std::fs::write(&path, "{ not json").expect("write fixture");

    assert!(matches!(Catalog::load(&path), Err(CatalogError::Parse(_))));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn bundled_catalog_holds_the_major_arcana() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/cards.json");
    let catalog = Catalog::load(path).expect("bundled catalog parses");
    assert_eq!(catalog.len(), 22);
    assert_eq!(catalog.find("fool"), Some(0));
    assert_eq!(catalog.find("priestess"), Some(2));
}
