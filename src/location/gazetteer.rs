//! The gazetteer: a read-only table of Mozambican places.
//!
//! The built-in table is compiled in and materialised once. A replacement
//! table can be loaded from a JSON file at start-up; either way the
//! declaration order is preserved, since lookups resolve ties by it.

use super::geo::validate_coordinates;
use super::types::{GazetteerStats, LocationError, Place, SettlementType};
use super::types::SettlementType::{Capital, City, Town};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinPlace {
    id: &'static str,
    name: &'static str,
    province: &'static str,
    lat: f64,
    lng: f64,
    kind: SettlementType,
    population: Option<u64>,
}

const BUILTIN_PLACES: &[BuiltinPlace] = &[
    // Maputo
    BuiltinPlace { id: "maputo", name: "Maputo", province: "Maputo", lat: -25.9692, lng: 32.5732, kind: Capital, population: Some(1_191_613) },
    BuiltinPlace { id: "matola", name: "Matola", province: "Maputo", lat: -25.9623, lng: 32.4589, kind: City, population: Some(1_032_197) },
    BuiltinPlace { id: "boane", name: "Boane", province: "Maputo", lat: -26.0464, lng: 32.3281, kind: Town, population: None },
    BuiltinPlace { id: "namaacha", name: "Namaacha", province: "Maputo", lat: -25.9919, lng: 32.0208, kind: Town, population: None },
    // Gaza
    BuiltinPlace { id: "xai-xai", name: "Xai-Xai", province: "Gaza", lat: -25.0519, lng: 33.6442, kind: City, population: Some(127_366) },
    BuiltinPlace { id: "chokwe", name: "Chokwé", province: "Gaza", lat: -24.5333, lng: 33.0167, kind: City, population: None },
    BuiltinPlace { id: "chibuto", name: "Chibuto", province: "Gaza", lat: -24.6867, lng: 33.5308, kind: Town, population: None },
    // Inhambane
    BuiltinPlace { id: "inhambane", name: "Inhambane", province: "Inhambane", lat: -23.8647, lng: 35.3833, kind: City, population: Some(79_098) },
    BuiltinPlace { id: "maxixe", name: "Maxixe", province: "Inhambane", lat: -23.8597, lng: 35.3467, kind: City, population: None },
    BuiltinPlace { id: "vilanculos", name: "Vilanculos", province: "Inhambane", lat: -22.0133, lng: 35.3133, kind: City, population: None },
    BuiltinPlace { id: "tofo", name: "Tofo", province: "Inhambane", lat: -23.8500, lng: 35.5333, kind: Town, population: None },
    // Sofala
    BuiltinPlace { id: "beira", name: "Beira", province: "Sofala", lat: -19.8436, lng: 34.8389, kind: City, population: Some(592_090) },
    BuiltinPlace { id: "dondo", name: "Dondo", province: "Sofala", lat: -19.6108, lng: 34.7431, kind: City, population: None },
    BuiltinPlace { id: "gorongosa", name: "Gorongosa", province: "Sofala", lat: -18.7417, lng: 34.0167, kind: Town, population: None },
    // Manica
    BuiltinPlace { id: "chimoio", name: "Chimoio", province: "Manica", lat: -19.1164, lng: 33.4833, kind: City, population: Some(256_936) },
    BuiltinPlace { id: "catandica", name: "Catandica", province: "Manica", lat: -18.9667, lng: 32.8833, kind: Town, population: None },
    BuiltinPlace { id: "sussundenga", name: "Sussundenga", province: "Manica", lat: -19.3333, lng: 33.3833, kind: Town, population: None },
    // Tete
    BuiltinPlace { id: "tete", name: "Tete", province: "Tete", lat: -16.1564, lng: 33.5867, kind: City, population: Some(307_259) },
    BuiltinPlace { id: "moatize", name: "Moatize", province: "Tete", lat: -16.1039, lng: 33.7233, kind: City, population: None },
    BuiltinPlace { id: "cahora-bassa", name: "Cahora Bassa", province: "Tete", lat: -15.5833, lng: 32.6667, kind: Town, population: None },
    // Zambézia
    BuiltinPlace { id: "quelimane", name: "Quelimane", province: "Zambézia", lat: -17.8786, lng: 36.8883, kind: City, population: Some(349_842) },
    BuiltinPlace { id: "mocuba", name: "Mocuba", province: "Zambézia", lat: -16.8372, lng: 36.9856, kind: City, population: None },
    BuiltinPlace { id: "gurué", name: "Gurué", province: "Zambézia", lat: -15.4667, lng: 36.9833, kind: City, population: None },
    // Nampula
    BuiltinPlace { id: "nampula", name: "Nampula", province: "Nampula", lat: -15.1165, lng: 39.2666, kind: City, population: Some(743_125) },
    BuiltinPlace { id: "nacala", name: "Nacala", province: "Nampula", lat: -14.5428, lng: 40.6728, kind: City, population: None },
    BuiltinPlace { id: "angoche", name: "Angoche", province: "Nampula", lat: -16.2333, lng: 39.9000, kind: City, population: None },
    // Cabo Delgado
    BuiltinPlace { id: "pemba", name: "Pemba", province: "Cabo Delgado", lat: -12.9740, lng: 40.5178, kind: City, population: Some(201_845) },
    BuiltinPlace { id: "montepuez", name: "Montepuez", province: "Cabo Delgado", lat: -13.1258, lng: 39.0042, kind: City, population: None },
    BuiltinPlace { id: "palma", name: "Palma", province: "Cabo Delgado", lat: -10.7333, lng: 40.3667, kind: Town, population: None },
    // Niassa
    BuiltinPlace { id: "lichinga", name: "Lichinga", province: "Niassa", lat: -13.3133, lng: 35.2406, kind: City, population: Some(142_253) },
    BuiltinPlace { id: "cuamba", name: "Cuamba", province: "Niassa", lat: -14.8000, lng: 36.5333, kind: City, population: None },
    // Border crossings and coast
    BuiltinPlace { id: "ressano-garcia", name: "Ressano Garcia", province: "Maputo", lat: -25.4333, lng: 31.9833, kind: Town, population: None },
    BuiltinPlace { id: "chongoene", name: "Chongoene", province: "Gaza", lat: -24.0667, lng: 33.7667, kind: Town, population: None },
    BuiltinPlace { id: "ponta-do-ouro", name: "Ponta do Ouro", province: "Maputo", lat: -26.8500, lng: 32.8833, kind: Town, population: None },
];

static BUILTIN: Lazy<Arc<Gazetteer>> = Lazy::new(|| {
    let places = BUILTIN_PLACES.iter().map(builtin_to_place).collect();
    Arc::new(Gazetteer { places })
});

fn builtin_to_place(p: &BuiltinPlace) -> Place {
    Place {
        id: p.id.to_string(),
        name: p.name.to_string(),
        province: p.province.to_string(),
        district: None,
        latitude: p.lat,
        longitude: p.lng,
        settlement_type: p.kind,
        population: p.population,
    }
}

// ─── Gazetteer ──────────────────────────────────────────────────

/// An immutable, validated list of places in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gazetteer {
    places: Vec<Place>,
}

impl Gazetteer {
    /// The compiled-in Mozambique table, shared process-wide.
    pub fn builtin() -> Arc<Gazetteer> {
        Arc::clone(&BUILTIN)
    }

    /// Build a gazetteer, checking id uniqueness and coordinate ranges.
    pub fn from_places(places: Vec<Place>) -> Result<Self, LocationError> {
        if places.is_empty() {
            return Err(LocationError::EmptyGazetteer);
        }

        validate_places(&places)?;
        Ok(Self { places })
    }

    /// Parse a JSON array of places.
    pub fn from_json(json: &str) -> Result<Self, LocationError> {
        let places: Vec<Place> = serde_json::from_str(json)?;
        Self::from_places(places)
    }

    /// Load a gazetteer file (JSON array, same fields as the built-in table).
    pub fn load_from(path: &Path) -> Result<Self, LocationError> {
        let data = fs::read_to_string(path).map_err(|source| LocationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let gazetteer = Self::from_json(&data)?;
        tracing::info!(
            path = %path.display(),
            places = gazetteer.len(),
            "loaded gazetteer"
        );
        Ok(gazetteer)
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Distinct province names, sorted.
    pub fn provinces(&self) -> Vec<String> {
        self.places
            .iter()
            .map(|p| p.province.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn stats(&self) -> GazetteerStats {
        let provinces: HashSet<&str> = self.places.iter().map(|p| p.province.as_str()).collect();
        let districts: HashSet<&str> = self
            .places
            .iter()
            .filter_map(|p| p.district.as_deref())
            .collect();

        let count = |kind: SettlementType| {
            self.places
                .iter()
                .filter(|p| p.settlement_type == kind)
                .count()
        };

        GazetteerStats {
            total_locations: self.places.len(),
            total_provinces: provinces.len(),
            total_districts: districts.len(),
            capitals: count(SettlementType::Capital),
            cities: count(SettlementType::City),
            towns: count(SettlementType::Town),
            districts: count(SettlementType::District),
        }
    }
}

fn validate_places(places: &[Place]) -> Result<(), LocationError> {
    let mut seen = HashSet::with_capacity(places.len());
    for place in places {
        if !seen.insert(place.id.as_str()) {
            return Err(LocationError::DuplicateId(place.id.clone()));
        }
        if !validate_coordinates(place.latitude, place.longitude) {
            return Err(LocationError::CoordinatesOutOfRange {
                id: place.id.clone(),
                lat: place.latitude,
                lng: place.longitude,
            });
        }
    }
    Ok(())
}

impl<'a> IntoIterator for &'a Gazetteer {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn place(id: &str, lat: f64, lng: f64) -> Place {
        Place {
            id: id.into(),
            name: id.to_uppercase(),
            province: "Test".into(),
            district: None,
            latitude: lat,
            longitude: lng,
            settlement_type: SettlementType::Town,
            population: None,
        }
    }

    #[test]
    fn test_builtin_is_valid() {
        let g = Gazetteer::builtin();
        assert_eq!(g.len(), 34);
        // Built-in data must pass the same checks as a loaded file.
        assert!(Gazetteer::from_places(g.places().to_vec()).is_ok());
    }

    #[test]
    fn test_builtin_declaration_order() {
        let g = Gazetteer::builtin();
        assert_eq!(g.places()[0].id, "maputo");
        assert_eq!(g.places()[4].name, "Xai-Xai");
        assert_eq!(g.places().last().unwrap().id, "ponta-do-ouro");
    }

    #[test]
    fn test_builtin_shared() {
        assert!(Arc::ptr_eq(&Gazetteer::builtin(), &Gazetteer::builtin()));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Gazetteer::from_places(vec![place("a", 0.0, 0.0), place("a", 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, LocationError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Gazetteer::from_places(vec![place("a", 91.0, 0.0)]).unwrap_err();
        assert!(matches!(err, LocationError::CoordinatesOutOfRange { .. }));
        let err = Gazetteer::from_places(vec![place("b", 0.0, 200.0)]).unwrap_err();
        assert!(matches!(err, LocationError::CoordinatesOutOfRange { .. }));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Gazetteer::from_places(vec![]), Err(LocationError::EmptyGazetteer)));
    }

    #[test]
    fn test_provinces_sorted_distinct() {
        let provinces = Gazetteer::builtin().provinces();
        assert_eq!(provinces.len(), 10);
        assert_eq!(provinces.first().map(String::as_str), Some("Cabo Delgado"));
        assert_eq!(provinces.last().map(String::as_str), Some("Zambézia"));
    }

    #[test]
    fn test_stats() {
        let s = Gazetteer::builtin().stats();
        assert_eq!(s.total_locations, 34);
        assert_eq!(s.total_provinces, 10);
        assert_eq!(s.total_districts, 0);
        assert_eq!(s.capitals, 1);
        assert_eq!(s.cities, 21);
        assert_eq!(s.towns, 12);
        assert_eq!(s.capitals + s.cities + s.towns + s.districts, 34);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("places.json");
        fs::write(
            &path,
            r#"[
                {"id":"polana","name":"Polana","province":"Maputo","district":"KaMpfumo","lat":-25.9642,"lng":32.5883,"type":"district"},
                {"id":"bilene","name":"Bilene","province":"Gaza","lat":-25.3,"lng":33.2,"type":"town","population":12000}
            ]"#,
        )
        .unwrap();

        let g = Gazetteer::load_from(&path).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.get("polana").unwrap().district.as_deref(), Some("KaMpfumo"));
        assert_eq!(g.get("bilene").unwrap().population, Some(12000));
        assert_eq!(g.stats().total_districts, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Gazetteer::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LocationError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        assert!(matches!(Gazetteer::from_json("{not json"), Err(LocationError::Parse(_))));
    }
}
