use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use linka_geo::config::{Config, LogFormat};
use linka_geo::location::{
    validate_coordinates, Coordinates, Gazetteer, LocationResolver, Place, SettlementType,
    DEFAULT_PROXIMITY_KM, DEFAULT_SUGGESTION_LIMIT,
};
use linka_geo::logging::init_logger;
use linka_geo::travel::{suggested_fare, DEFAULT_PRICE_PER_KM};

/// Link-A location resolver: Mozambican place lookup, autocomplete and distance.
///
/// Examples:
///   linka-geo find "Maputo City"
///   linka-geo suggest ma --limit 10
///   linka-geo distance Maputo Beira
///   linka-geo nearest --lat -19.80 --lng 34.85
///   linka-geo nearby --lat -25.97 --lng 32.57 --radius 30
///   linka-geo terms Xai-Xai
///   linka-geo serve --port 8080
#[derive(Parser)]
#[command(name = "linka-geo", version, about, long_about = None)]
struct Cli {
    /// JSON gazetteer to use instead of the built-in table.
    #[arg(long, global = true, env = "LINKA_GEO_GAZETTEER")]
    gazetteer: Option<PathBuf>,

    /// Debug logging.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Log output format: "text" or "json".
    #[arg(long, global = true, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a place name (exact, then partial match).
    Find { query: String },

    /// Report whether a place name resolves.
    Validate { query: String },

    /// Ranked autocomplete suggestions.
    Suggest {
        query: String,
        #[arg(long, short = 'l', default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Distance, travel time and suggested fare between two places.
    Distance { from: String, to: String },

    /// List places, optionally filtered.
    Locations {
        #[arg(long)]
        province: Option<String>,
        /// capital, city, town or district.
        #[arg(long = "type")]
        kind: Option<SettlementType>,
    },

    /// Distinct province names.
    Provinces,

    /// Gazetteer counts.
    Stats,

    /// Closest place to a point.
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Places within a radius of a point, nearest first.
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, short = 'r', default_value_t = DEFAULT_PROXIMITY_KM)]
        radius: f64,
    },

    /// Nearby neighbourhoods and towns for a place name.
    Terms { location: String },

    /// Start the HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.gazetteer.clone() {
        config.gazetteer_path = Some(path);
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    init_logger(cli.verbose, config.log_format);

    let resolver = match &config.gazetteer_path {
        Some(path) => {
            let gazetteer = Gazetteer::load_from(path)
                .with_context(|| format!("loading gazetteer from {}", path.display()))?;
            LocationResolver::with_gazetteer(Arc::new(gazetteer))
        }
        None => LocationResolver::new(),
    };

    match cli.command {
        Command::Find { query } => match resolver.find_location(&query) {
            Some(place) => print_json(&place_json(place))?,
            None => {
                eprintln!("Error: Location not found: '{}'", query);
                std::process::exit(1);
            }
        },

        Command::Validate { query } => {
            let found = resolver.find_location(&query);
            print_json(&json!({
                "isValid": found.is_some(),
                "location": found.map(place_json),
            }))?;
        }

        Command::Suggest { query, limit } => {
            let suggestions: Vec<_> = resolver
                .get_suggestions(&query, limit)
                .into_iter()
                .map(|p| {
                    let mut v = place_json(p);
                    v["fullName"] = json!(p.full_name());
                    v
                })
                .collect();
            print_json(&json!({ "suggestions": suggestions }))?;
        }

        Command::Distance { from, to } => {
            let route = resolver.route_between(&from, &to)?;
            print_json(&json!({
                "from": { "name": route.from.name, "province": route.from.province },
                "to": { "name": route.to.name, "province": route.to.province },
                "distance": route.rounded_km,
                "distanceKm": route.distance_km,
                "distanceUnit": "km",
                "estimatedTime": route.estimated_minutes,
                "estimatedTimeUnit": "minutes",
                "suggestedFare": suggested_fare(route.distance_km, DEFAULT_PRICE_PER_KM),
                "currency": "MZN",
            }))?;
        }

        Command::Locations { province, kind } => {
            let locations: Vec<_> = resolver
                .list_locations(province.as_deref(), kind)
                .into_iter()
                .map(place_json)
                .collect();
            print_json(&json!({ "total": locations.len(), "locations": locations }))?;
        }

        Command::Provinces => {
            print_json(&json!({ "provinces": resolver.gazetteer().provinces() }))?;
        }

        Command::Stats => {
            print_json(&json!({ "stats": resolver.gazetteer().stats() }))?;
        }

        Command::Nearest { lat, lng } => {
            if !validate_coordinates(lat, lng) {
                bail!("Invalid coordinates. Lat: -90..90, Lng: -180..180");
            }
            match resolver.nearest(lat, lng) {
                Some((place, d)) => print_json(&json!({ "location": place_json(place), "distanceKm": d }))?,
                None => bail!("Gazetteer contains no places"),
            }
        }

        Command::Nearby { lat, lng, radius } => {
            if !validate_coordinates(lat, lng) {
                bail!("Invalid coordinates. Lat: -90..90, Lng: -180..180");
            }
            let places: Vec<_> = resolver
                .within_radius(Coordinates::new(lat, lng), radius)
                .into_iter()
                .map(|hit| {
                    let mut v = place_json(hit.place);
                    v["distanceKm"] = json!(hit.distance_km);
                    v
                })
                .collect();
            print_json(&json!({ "radiusKm": radius, "total": places.len(), "locations": places }))?;
        }

        Command::Terms { location } => {
            print_json(&json!({ "location": location, "terms": resolver.proximity_terms(&location) }))?;
        }

        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("building tokio runtime")?;
            runtime
                .block_on(linka_geo::server::start(&config, resolver))
                .with_context(|| format!("serving on {}", config.bind_addr()))?;
        }
    }

    Ok(())
}

fn place_json(p: &Place) -> serde_json::Value {
    json!({
        "id": p.id,
        "name": p.name,
        "province": p.province,
        "type": p.settlement_type,
        "coordinates": p.coordinates(),
    })
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
