use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::location::{
    is_within_proximity, validate_coordinates, Coordinates, GazetteerStats, Place, SearchHit,
    SettlementType, DEFAULT_SUGGESTION_LIMIT,
};

use super::error::ApiError;
use super::state::AppState;

/// Default and maximum `limit` for `/api/geo/search`.
const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;

// ─── Shared shapes ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    pub province: String,
    pub coordinates: Coordinates,
}

impl From<&Place> for LocationSummary {
    fn from(p: &Place) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            province: p.province.clone(),
            coordinates: p.coordinates(),
        }
    }
}

#[derive(Serialize)]
pub struct LocationItem {
    pub id: String,
    pub name: String,
    pub province: String,
    #[serde(rename = "type")]
    pub settlement_type: SettlementType,
    pub coordinates: Coordinates,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl LocationItem {
    fn new(p: &Place, distance_km: Option<f64>) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            province: p.province.clone(),
            settlement_type: p.settlement_type,
            coordinates: p.coordinates(),
            distance_km: distance_km.map(round_km),
        }
    }
}

impl From<SearchHit<'_>> for LocationItem {
    fn from(hit: SearchHit<'_>) -> Self {
        Self::new(hit.place, hit.distance_km)
    }
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub locations: usize,
    pub uptime_seconds: i64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "OK",
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        locations: state.resolver.gazetteer().len(),
        uptime_seconds: (now - state.started_at).num_seconds(),
    })
}

// ─── GET /api/geo/autocomplete ───────────────────────────────────

#[derive(Deserialize)]
pub struct AutocompleteQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub province: String,
    pub full_name: String,
    #[serde(rename = "type")]
    pub settlement_type: SettlementType,
    pub coordinates: Coordinates,
}

#[derive(Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<Suggestion>,
}

pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AutocompleteQuery>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let q = required(params.q.as_deref(), "q")?;
    let limit = clamp_limit(params.limit, DEFAULT_SUGGESTION_LIMIT, state.max_suggestions);

    let suggestions: Vec<Suggestion> = state
        .resolver
        .get_suggestions(q, limit)
        .into_iter()
        .map(|p| Suggestion {
            id: p.id.clone(),
            name: p.name.clone(),
            province: p.province.clone(),
            full_name: p.full_name(),
            settlement_type: p.settlement_type,
            coordinates: p.coordinates(),
        })
        .collect();

    tracing::debug!(query = q, limit, results = suggestions.len(), "autocomplete");
    Ok(Json(AutocompleteResponse { suggestions }))
}

// ─── GET /api/geo/validate ───────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateQuery {
    pub location: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
    pub location: Option<LocationSummary>,
}

pub async fn validate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ValidateQuery>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let query = required(params.location.as_deref(), "location")?;
    let found = state.resolver.find_location(query);

    Ok(Json(ValidateResponse {
        is_valid: found.is_some(),
        location: found.map(LocationSummary::from),
    }))
}

// ─── GET /api/geo/distance ───────────────────────────────────────

#[derive(Deserialize)]
pub struct DistanceQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Serialize)]
pub struct PlaceRef {
    pub name: String,
    pub province: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResponse {
    pub from: PlaceRef,
    pub to: PlaceRef,
    pub distance: u64,
    pub distance_unit: &'static str,
    pub estimated_time: u64,
    pub estimated_time_unit: &'static str,
}

pub async fn distance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DistanceQuery>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let from = required(params.from.as_deref(), "from")?;
    let to = required(params.to.as_deref(), "to")?;

    let route = state.resolver.route_between(from, to)?;
    tracing::debug!(from = %route.from.id, to = %route.to.id, km = route.distance_km, "distance");

    Ok(Json(DistanceResponse {
        from: PlaceRef {
            name: route.from.name.clone(),
            province: route.from.province.clone(),
        },
        to: PlaceRef {
            name: route.to.name.clone(),
            province: route.to.province.clone(),
        },
        distance: route.rounded_km,
        distance_unit: "km",
        estimated_time: route.estimated_minutes,
        estimated_time_unit: "minutes",
    }))
}

// ─── GET /api/geo/locations ──────────────────────────────────────

#[derive(Deserialize)]
pub struct LocationsQuery {
    pub province: Option<String>,
    #[serde(rename = "type")]
    pub settlement_type: Option<String>,
}

#[derive(Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationItem>,
    pub total: usize,
}

pub async fn locations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationsQuery>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let province = non_empty(params.province.as_deref());
    // Exact, case-sensitive match on the wire name; unknown types match nothing.
    let kind = non_empty(params.settlement_type.as_deref());

    let locations: Vec<LocationItem> = state
        .resolver
        .list_locations(province, None)
        .into_iter()
        .filter(|p| kind.map_or(true, |k| p.settlement_type.as_str() == k))
        .map(|p| LocationItem::new(p, None))
        .collect();

    Ok(Json(LocationsResponse {
        total: locations.len(),
        locations,
    }))
}

// ─── GET /api/geo/provinces ──────────────────────────────────────

#[derive(Serialize)]
pub struct ProvincesResponse {
    pub provinces: Vec<String>,
}

pub async fn provinces(State(state): State<Arc<AppState>>) -> Json<ProvincesResponse> {
    Json(ProvincesResponse {
        provinces: state.resolver.gazetteer().provinces(),
    })
}

// ─── GET /api/geo/stats ──────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: GazetteerStats,
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        stats: state.resolver.gazetteer().stats(),
    })
}

// ─── GET /api/geo/search ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub limit: Option<i64>,
    #[serde(rename = "radiusKm")]
    pub radius_km: Option<f64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<LocationItem>,
    pub total: usize,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let q = required(params.q.as_deref(), "q")?;
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);

    let origin = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Some(checked_coordinates(lat, lng)?),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "Provide both 'lat' and 'lng', or neither".to_string(),
            ))
        }
    };

    let radius = match (params.radius_km, origin) {
        (Some(r), Some(_)) if r.is_finite() && r >= 0.0 => Some(r),
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest("'radiusKm' must be a non-negative number".to_string()))
        }
        (Some(_), None) => {
            return Err(ApiError::BadRequest("'radiusKm' requires 'lat' and 'lng'".to_string()))
        }
        (None, _) => None,
    };

    let results: Vec<LocationItem> = state
        .resolver
        .search(q, origin, usize::MAX)
        .into_iter()
        .filter(|hit| match (radius, origin) {
            (Some(r), Some(o)) => {
                is_within_proximity(o.lat, o.lng, hit.place.latitude, hit.place.longitude, r)
            }
            _ => true,
        })
        .take(limit)
        .map(LocationItem::from)
        .collect();

    Ok(Json(SearchResponse {
        total: results.len(),
        results,
    }))
}

// ─── GET /api/geo/nearest ────────────────────────────────────────

#[derive(Deserialize)]
pub struct NearestQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestResponse {
    pub location: LocationItem,
    pub distance_km: f64,
}

pub async fn nearest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestQuery>,
) -> Result<Json<NearestResponse>, ApiError> {
    let lat = params.lat.ok_or_else(|| ApiError::missing_param("lat"))?;
    let lng = params.lng.ok_or_else(|| ApiError::missing_param("lng"))?;
    let point = checked_coordinates(lat, lng)?;

    let (place, d) = state
        .resolver
        .nearest(point.lat, point.lng)
        .ok_or_else(|| ApiError::NotFound("Gazetteer contains no places".to_string()))?;

    Ok(Json(NearestResponse {
        location: LocationItem::new(place, None),
        distance_km: round_km(d),
    }))
}

// ─── GET /api/geo/proximity ──────────────────────────────────────

#[derive(Deserialize)]
pub struct ProximityQuery {
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct ProximityResponse {
    pub location: String,
    pub terms: &'static [&'static str],
}

pub async fn proximity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProximityQuery>,
) -> Result<Json<ProximityResponse>, ApiError> {
    let location = required(params.location.as_deref(), "location")?;
    Ok(Json(ProximityResponse {
        location: location.to_string(),
        terms: state.resolver.proximity_terms(location),
    }))
}

// ─── Helpers ─────────────────────────────────────────────────────

/// A present, non-empty query parameter. Whitespace counts as a value.
fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    non_empty(value).ok_or_else(|| ApiError::missing_param(name))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Missing → `default`; negative → 0; never above `max`.
fn clamp_limit(requested: Option<i64>, default: usize, max: usize) -> usize {
    let limit = match requested {
        Some(n) => usize::try_from(n).unwrap_or(0),
        None => default,
    };
    limit.min(max)
}

fn checked_coordinates(lat: f64, lng: f64) -> Result<Coordinates, ApiError> {
    if validate_coordinates(lat, lng) {
        Ok(Coordinates::new(lat, lng))
    } else {
        Err(ApiError::BadRequest(
            "Invalid coordinates. Lat: -90..90, Lng: -180..180".to_string(),
        ))
    }
}

/// Kilometres to two decimals for display.
fn round_km(d: f64) -> f64 {
    (d * 100.0).round() / 100.0
}
