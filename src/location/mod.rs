//! Location subsystem for Link-A.
//!
//! A read-only gazetteer of Mozambican places, a resolver for free-text
//! lookup and autocomplete, and great-circle distance helpers.

pub mod gazetteer;
pub mod geo;
pub mod proximity;
pub mod resolver;
pub mod types;

pub use gazetteer::Gazetteer;
pub use geo::{haversine_km, is_within_proximity, validate_coordinates, DEFAULT_PROXIMITY_KM, EARTH_RADIUS_KM};
pub use proximity::{fold_accents, proximity_terms};
pub use resolver::{LocationResolver, DEFAULT_SUGGESTION_LIMIT, MIN_SUGGESTION_QUERY_CHARS};
pub use types::{Coordinates, GazetteerStats, LocationError, Place, RouteEstimate, SearchHit, SettlementType};
