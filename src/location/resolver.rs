//! Location resolver: lookup, autocomplete and distance over a gazetteer.
//!
//! Lookup flow:   exact name → partial name (either direction) → not found
//! Suggest flow:  length gate → name/province filter → prefix, type rank → truncate
//!
//! Every operation is a pure function of its arguments and the gazetteer,
//! which never changes after construction.

use super::gazetteer::Gazetteer;
use super::geo::{haversine_km, is_within_proximity};
use super::proximity;
use super::types::{Coordinates, LocationError, Place, RouteEstimate, SearchHit, SettlementType};
use crate::travel::{estimate_travel_minutes, DEFAULT_AVERAGE_SPEED_KMH};
use std::sync::Arc;

/// Default number of autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Queries shorter than this (in characters, untrimmed) get no suggestions.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Resolves free-text queries against a shared gazetteer.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    gazetteer: Arc<Gazetteer>,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationResolver {
    /// Resolver over the built-in Mozambique gazetteer.
    pub fn new() -> Self {
        Self {
            gazetteer: Gazetteer::builtin(),
        }
    }

    /// Resolver over a specific gazetteer (loaded file, tests).
    pub fn with_gazetteer(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Resolve a query to a place: exact name first, then partial.
    ///
    /// The partial phase accepts a place whose name contains the query or
    /// whose name is contained in the query ("Maputo City" → Maputo). The
    /// first match in declaration order wins in both phases.
    pub fn find_location(&self, query: &str) -> Option<&Place> {
        let q = normalize(query);

        if let Some(place) = self.gazetteer.iter().find(|p| p.name.to_lowercase() == q) {
            return Some(place);
        }

        self.gazetteer.iter().find(|p| {
            let name = p.name.to_lowercase();
            name.contains(&q) || q.contains(&name)
        })
    }

    pub fn is_valid_location(&self, query: &str) -> bool {
        self.find_location(query).is_some()
    }

    /// Ranked autocomplete suggestions.
    ///
    /// Places whose name starts with the query come first; within each group
    /// capitals precede cities, cities precede towns, towns precede districts.
    /// The sort is stable, so equal entries keep declaration order.
    pub fn get_suggestions(&self, query: &str, limit: usize) -> Vec<&Place> {
        if limit == 0 || query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            return Vec::new();
        }

        let q = normalize(query);
        let mut matches: Vec<(bool, u8, &Place)> = self
            .gazetteer
            .iter()
            .filter_map(|p| {
                let name = p.name.to_lowercase();
                if name.contains(&q) || p.province.to_lowercase().contains(&q) {
                    Some((!name.starts_with(&q), p.settlement_type.rank(), p))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|&(not_prefix, rank, _)| (not_prefix, rank));
        matches.into_iter().take(limit).map(|(_, _, p)| p).collect()
    }

    /// Great-circle distance in km (Haversine, R = 6371 km).
    pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
        haversine_km(lat1, lng1, lat2, lng2)
    }

    /// Places filtered by province (case-insensitive) and settlement type.
    pub fn list_locations(
        &self,
        province: Option<&str>,
        kind: Option<SettlementType>,
    ) -> Vec<&Place> {
        let province = province.map(str::to_lowercase);
        self.gazetteer
            .iter()
            .filter(|p| {
                province
                    .as_deref()
                    .map_or(true, |prov| p.province.to_lowercase() == prov)
            })
            .filter(|p| kind.map_or(true, |k| p.settlement_type == k))
            .collect()
    }

    /// Name search, ordered by distance from `origin` when given, otherwise
    /// by relevance (exact, prefix, substring) and then name.
    pub fn search(&self, query: &str, origin: Option<Coordinates>, limit: usize) -> Vec<SearchHit<'_>> {
        let q = normalize(query);
        if q.is_empty() || limit == 0 {
            return Vec::new();
        }

        let candidates = self
            .gazetteer
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&q));

        let mut hits: Vec<SearchHit<'_>> = match origin {
            Some(o) => {
                let mut hits: Vec<SearchHit<'_>> = candidates
                    .map(|p| SearchHit {
                        place: p,
                        distance_km: Some(haversine_km(o.lat, o.lng, p.latitude, p.longitude)),
                    })
                    .collect();
                hits.sort_by(|a, b| {
                    let da = a.distance_km.unwrap_or(f64::INFINITY);
                    let db = b.distance_km.unwrap_or(f64::INFINITY);
                    da.total_cmp(&db)
                });
                hits
            }
            None => {
                let mut ranked: Vec<(u8, String, &Place)> = candidates
                    .map(|p| {
                        let name = p.name.to_lowercase();
                        let relevance = if name == q {
                            0
                        } else if name.starts_with(&q) {
                            1
                        } else {
                            2
                        };
                        (relevance, name, p)
                    })
                    .collect();
                ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
                ranked
                    .into_iter()
                    .map(|(_, _, p)| SearchHit { place: p, distance_km: None })
                    .collect()
            }
        };

        hits.truncate(limit);
        hits
    }

    /// The place closest to a point, with its distance. First declared wins ties.
    pub fn nearest(&self, lat: f64, lng: f64) -> Option<(&Place, f64)> {
        let mut best: Option<(&Place, f64)> = None;
        for place in self.gazetteer.iter() {
            let d = haversine_km(lat, lng, place.latitude, place.longitude);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((place, d));
            }
        }
        best
    }

    /// Places within `radius_km` of a point, nearest first.
    pub fn within_radius(&self, origin: Coordinates, radius_km: f64) -> Vec<SearchHit<'_>> {
        let mut hits: Vec<SearchHit<'_>> = self
            .gazetteer
            .iter()
            .filter(|p| is_within_proximity(origin.lat, origin.lng, p.latitude, p.longitude, radius_km))
            .map(|p| SearchHit {
                place: p,
                distance_km: Some(haversine_km(origin.lat, origin.lng, p.latitude, p.longitude)),
            })
            .collect();
        hits.sort_by(|a, b| {
            let da = a.distance_km.unwrap_or(f64::INFINITY);
            let db = b.distance_km.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        });
        hits
    }

    /// Nearby neighbourhoods and towns for a place name (accent-insensitive).
    pub fn proximity_terms(&self, location: &str) -> &'static [&'static str] {
        proximity::proximity_terms(location)
    }

    /// Resolve two names and estimate the trip between them at 60 km/h.
    pub fn route_between(&self, from: &str, to: &str) -> Result<RouteEstimate<'_>, LocationError> {
        let origin = self
            .find_location(from)
            .ok_or_else(|| LocationError::NotFound(from.to_string()))?;
        let destination = self
            .find_location(to)
            .ok_or_else(|| LocationError::NotFound(to.to_string()))?;

        let distance_km = haversine_km(
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
        );

        Ok(RouteEstimate {
            from: origin,
            to: destination,
            distance_km,
            rounded_km: distance_km.round() as u64,
            estimated_minutes: estimate_travel_minutes(distance_km, DEFAULT_AVERAGE_SPEED_KMH),
        })
    }
}

/// Trim and lower-case a query. Gazetteer names are only lower-cased.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
