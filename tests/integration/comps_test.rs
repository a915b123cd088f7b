//! Card identification and stub comps provider tests

use card_king::comps::{identify, stable_card_key, Category, CompsProvider, StubCompsProvider};
use card_king::config::CompsConfig;
use chrono::{TimeZone, Utc};

#[test]
fn test_identify_normalizes_key() {
    let a = identify("  Charizard Base Set  ").unwrap();
    let b = identify("CHARIZARD BASE SET").unwrap();
    assert_eq!(a.card_key, b.card_key);
    assert_eq!(a.card_key.len(), 16);
    assert_eq!(a.display_name, "Charizard Base Set");
    assert_eq!(stable_card_key("abc"), "ba7816bf8f01cfea");
}

#[test]
fn test_identify_categories() {
    assert_eq!(identify("2018 Topps Ohtani").unwrap().category, Category::Sports);
    assert_eq!(identify("LeBron NBA Hoops").unwrap().category, Category::Sports);
    assert_eq!(identify("Dark Magician").unwrap().category, Category::Tcg);
}

#[test]
fn test_identify_rejects_bad_queries() {
    assert!(identify("").is_err());
    assert!(identify(&"a".repeat(201)).is_err());
}

#[test]
fn test_long_display_name_truncated() {
    let identity = identify(&"z".repeat(150)).unwrap();
    assert_eq!(identity.display_name.chars().count(), 80);
    assert!(identity.display_name.ends_with("..."));
}

#[tokio::test]
async fn test_stub_provider_is_reproducible() {
    let as_of = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    let provider = StubCompsProvider::from_config(&CompsConfig::default()).with_reference_time(as_of);
    let identity = identify("Rayquaza Gold Star").unwrap();

    let first = provider.recent_sold_comps(&identity).await.unwrap();
    let second = provider.recent_sold_comps(&identity).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.comps.len(), 10);
    assert_eq!(first.stats.comps_count, 10);
    assert_eq!(provider.name(), "stub");
}

#[tokio::test]
async fn test_stub_provider_sample_size() {
    let provider = StubCompsProvider::new(25, 10);
    let identity = identify("Blastoise Shadowless").unwrap();
    let snapshot = provider.recent_sold_comps(&identity).await.unwrap();
    assert_eq!(snapshot.comps.len(), 25);
    assert!(snapshot.stats.confidence <= 100);
}
