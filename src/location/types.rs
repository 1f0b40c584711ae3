//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Kind of settlement a place represents.
///
/// Only used as an ordering tie-break in suggestions, never as an
/// implicit filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementType {
    Capital,
    City,
    Town,
    District,
    /// Any type string a gazetteer file carries that we don't know about.
    #[serde(other)]
    Other,
}

impl SettlementType {
    /// Ordering rank for autocomplete: capital=0, city=1, town=2, district=3.
    /// Unknown types rank with districts.
    pub fn rank(self) -> u8 {
        match self {
            Self::Capital => 0,
            Self::City => 1,
            Self::Town => 2,
            Self::District | Self::Other => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capital => "capital",
            Self::City => "city",
            Self::Town => "town",
            Self::District => "district",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SettlementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlementType {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "capital" => Ok(Self::Capital),
            "city" => Ok(Self::City),
            "town" => Ok(Self::Town),
            "district" => Ok(Self::District),
            other => Err(LocationError::UnknownSettlementType(other.to_string())),
        }
    }
}

/// A latitude/longitude pair in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A named place in the gazetteer.
///
/// Field names on the wire follow the gazetteer file format
/// (`lat`, `lng`, `type`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub province: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "type")]
    pub settlement_type: SettlementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "Name, Province" as shown in autocomplete dropdowns.
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.name, self.province)
    }
}

/// Aggregate counts over a gazetteer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GazetteerStats {
    pub total_locations: usize,
    pub total_provinces: usize,
    pub total_districts: usize,
    pub capitals: usize,
    pub cities: usize,
    pub towns: usize,
    pub districts: usize,
}

/// A place matched by [`super::LocationResolver::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub place: &'a Place,
    /// Distance from the search origin, when one was given.
    pub distance_km: Option<f64>,
}

/// Distance and travel estimate between two resolved places.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimate<'a> {
    pub from: &'a Place,
    pub to: &'a Place,
    pub distance_km: f64,
    pub rounded_km: u64,
    pub estimated_minutes: u64,
}

/// Location subsystem errors.
///
/// Plain lookups never produce these; a missing place is `None`.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location not found: '{0}'")]
    NotFound(String),

    #[error("Cannot read gazetteer {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid gazetteer data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate place id '{0}'")]
    DuplicateId(String),

    #[error("Coordinates out of range for '{id}': lat {lat}, lng {lng}")]
    CoordinatesOutOfRange { id: String, lat: f64, lng: f64 },

    #[error("Gazetteer contains no places")]
    EmptyGazetteer,

    #[error("Unknown settlement type '{0}'. Use capital, city, town or district")]
    UnknownSettlementType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(SettlementType::Capital.rank() < SettlementType::City.rank());
        assert!(SettlementType::City.rank() < SettlementType::Town.rank());
        assert!(SettlementType::Town.rank() < SettlementType::District.rank());
        assert_eq!(SettlementType::Other.rank(), SettlementType::District.rank());
    }

    #[test]
    fn test_settlement_type_from_str() {
        assert_eq!("City".parse::<SettlementType>().unwrap(), SettlementType::City);
        assert_eq!(" capital ".parse::<SettlementType>().unwrap(), SettlementType::Capital);
        assert!("village".parse::<SettlementType>().is_err());
    }

    #[test]
    fn test_unknown_type_deserializes_as_other() {
        let json = r#"{"id":"x","name":"X","province":"P","lat":0.0,"lng":0.0,"type":"village"}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.settlement_type, SettlementType::Other);
        assert!(place.district.is_none());
    }

    #[test]
    fn test_place_wire_names() {
        let place = Place {
            id: "tete".into(),
            name: "Tete".into(),
            province: "Tete".into(),
            district: None,
            latitude: -16.1564,
            longitude: 33.5867,
            settlement_type: SettlementType::City,
            population: Some(307259),
        };
        let v = serde_json::to_value(&place).unwrap();
        assert_eq!(v["lat"], -16.1564);
        assert_eq!(v["type"], "city");
        assert!(v.get("district").is_none());
        assert_eq!(place.full_name(), "Tete, Tete");
    }
}
