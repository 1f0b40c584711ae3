use approx::assert_abs_diff_eq;
use linka_geo::location::{Gazetteer, LocationError, LocationResolver, SettlementType};
use std::io::Write;
use std::sync::Arc;

#[test]
fn test_every_place_resolves_to_itself() {
    let resolver = LocationResolver::new();
    for place in resolver.gazetteer() {
        for query in [
            place.name.clone(),
            place.name.to_lowercase(),
            format!("\t{} ", place.name.to_uppercase()),
        ] {
            let found = resolver.find_location(&query).unwrap();
            assert_eq!(found.id, place.id, "query {:?}", query);
        }
    }
}

#[test]
fn test_substring_in_both_directions() {
    let resolver = LocationResolver::new();
    assert_eq!(resolver.find_location("Xai-Xai City").unwrap().name, "Xai-Xai");
    assert_eq!(resolver.find_location("Xai").unwrap().name, "Xai-Xai");
}

#[test]
fn test_unknown_place() {
    let resolver = LocationResolver::new();
    assert!(resolver.find_location("Timbuktu").is_none());
    assert!(!resolver.is_valid_location("Timbuktu"));
}

#[test]
fn test_suggestion_minimum_length() {
    let resolver = LocationResolver::new();
    assert!(resolver.get_suggestions("M", 5).is_empty());
    assert!(!resolver.get_suggestions("Ma", 5).is_empty());
}

#[test]
fn test_suggestion_ranking_covers_all_matches() {
    let resolver = LocationResolver::new();
    let all = resolver.get_suggestions("ma", 100);

    let expected = resolver
        .gazetteer()
        .iter()
        .filter(|p| p.name.to_lowercase().contains("ma") || p.province.to_lowercase().contains("ma"))
        .count();
    assert_eq!(all.len(), expected);
    assert_eq!(all.len(), 12);

    // Prefix matches form a leading block.
    let prefix: Vec<bool> = all.iter().map(|p| p.name.to_lowercase().starts_with("ma")).collect();
    let first_non_prefix = prefix.iter().position(|&b| !b).unwrap();
    assert!(prefix[first_non_prefix..].iter().all(|&b| !b));

    // Type rank never decreases inside either block.
    for block in [&all[..first_non_prefix], &all[first_non_prefix..]] {
        for pair in block.windows(2) {
            assert!(pair[0].settlement_type.rank() <= pair[1].settlement_type.rank());
        }
    }
    assert_eq!(all[0].settlement_type, SettlementType::Capital);
}

#[test]
fn test_suggestion_limit() {
    let resolver = LocationResolver::new();
    assert!(resolver.get_suggestions("a", 3).is_empty());
    assert_eq!(resolver.get_suggestions("an", 3).len(), 3);
    assert!(resolver.get_suggestions("ma", 0).is_empty());
}

#[test]
fn test_distance_properties() {
    let maputo_beira = LocationResolver::distance_km(-25.9692, 32.5732, -19.8436, 34.8389);
    assert_abs_diff_eq!(maputo_beira, 719.5, epsilon = 0.5);

    let resolver = LocationResolver::new();
    let places = resolver.gazetteer().places();
    for a in places {
        assert_eq!(LocationResolver::distance_km(a.latitude, a.longitude, a.latitude, a.longitude), 0.0);
        for b in places {
            let ab = LocationResolver::distance_km(a.latitude, a.longitude, b.latitude, b.longitude);
            let ba = LocationResolver::distance_km(b.latitude, b.longitude, a.latitude, a.longitude);
            assert_abs_diff_eq!(ab, ba, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_repeated_calls_identical() {
    let resolver = LocationResolver::new();
    let other = resolver.clone();
    for q in ["ma", "na", "Beira", "Tete", "zz"] {
        assert_eq!(resolver.find_location(q), other.find_location(q));
        assert_eq!(resolver.get_suggestions(q, 10), resolver.get_suggestions(q, 10));
    }
    let d1 = LocationResolver::distance_km(-15.1165, 39.2666, -12.9740, 40.5178);
    let d2 = LocationResolver::distance_km(-15.1165, 39.2666, -12.9740, 40.5178);
    assert_eq!(d1.to_bits(), d2.to_bits());
}

#[test]
fn test_resolver_shared_across_threads() {
    let resolver = LocationResolver::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = resolver.clone();
            std::thread::spawn(move || r.find_location("Nampula").map(|p| p.id.clone()))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().as_deref(), Some("nampula"));
    }
}

#[test]
fn test_loaded_gazetteer() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id":"lam","name":"Lamego","province":"Sofala","district":"Nhamatanda","lat":-19.35,"lng":34.32,"type":"district"}},
            {{"id":"nha","name":"Nhamatanda","province":"Sofala","lat":-19.26,"lng":34.21,"type":"town","population":50000}}
        ]"#
    )
    .unwrap();

    let gazetteer = Gazetteer::load_from(file.path()).unwrap();
    let resolver = LocationResolver::with_gazetteer(Arc::new(gazetteer));

    assert_eq!(resolver.gazetteer().stats().total_districts, 1);
    let names: Vec<&str> = resolver
        .get_suggestions("sofala", 5)
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Nhamatanda", "Lamego"]);
    assert!(resolver.find_location("Beira").is_none());
}

#[test]
fn test_rejected_gazetteer() {
    let err = Gazetteer::from_json(
        r#"[{"id":"x","name":"X","province":"P","lat":91.0,"lng":0.0,"type":"city"}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, LocationError::CoordinatesOutOfRange { .. }));
}
