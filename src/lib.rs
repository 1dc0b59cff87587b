pub mod colormap;
pub mod commands;
pub mod config;
pub mod elevation;
pub mod endpoints;
pub mod models;
pub mod traits;
pub mod utils;

pub use config::{Cli, Command, Config};
pub use elevation::{ElevationLookup, ElevationReading, ElevationResult};
pub use endpoints::server::MapServer;
