//! Link-A location resolver.
//!
//! Place lookup, autocomplete and distance over a static gazetteer of
//! Mozambican places, with an HTTP adapter and a command-line front end.

pub mod config;
pub mod location;
pub mod logging;
pub mod server;
pub mod travel;
