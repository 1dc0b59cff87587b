use crate::colormap::ColormapSource;
use crate::elevation::http::OPEN_METEO_ELEVATION_URL;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "topotint", version, about = "Elevation-tinted web map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the map page and JSON API (default)
    Serve,
    /// Print a summary of the colormap and its legend
    Legend {
        /// Emit the legend as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Look up a single coordinate
    Lookup {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Read `lat,lng` lines from stdin as pointer moves and keep a live readout
    Watch,
}

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Elevation API endpoint, queried with `latitude` and `longitude`
    #[arg(long, default_value = OPEN_METEO_ELEVATION_URL)]
    pub elevation_url: String,

    /// Quiet period before a lookup is sent upstream
    #[arg(long, default_value_t = 200)]
    pub debounce_ms: u64,

    /// Colormap file path or http(s) URL
    #[arg(long, default_value = "data/colormap.txt")]
    pub colormap: String,

    /// Folder served under /data
    #[arg(long, default_value = "data")]
    pub data_folder: PathBuf,

    /// {z}/{x}/{y} template of the elevation tint overlay
    #[arg(long)]
    pub elevation_tiles: Option<String>,

    /// {z}/{x}/{y} template of a secondary overlay
    #[arg(long)]
    pub overlay_tiles: Option<String>,

    /// Initial opacity of the overlays matched by --opacity-target
    #[arg(long, default_value_t = 0.7)]
    pub overlay_opacity: f32,

    /// URL substring selecting the overlay the opacity slider drives
    #[arg(long, default_value = "elevation")]
    pub opacity_target: String,

    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    #[arg(long, default_value_t = 10)]
    pub http_timeout_secs: u64,

    #[arg(long, default_value_t = 3)]
    pub connect_timeout_secs: u64,

    /// Readout redraw period for `watch`
    #[arg(long, default_value_t = 250)]
    pub redraw_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            elevation_url: OPEN_METEO_ELEVATION_URL.to_string(),
            debounce_ms: 200,
            colormap: "data/colormap.txt".to_string(),
            data_folder: PathBuf::from("data"),
            elevation_tiles: None,
            overlay_tiles: None,
            overlay_opacity: 0.7,
            opacity_target: "elevation".to_string(),
            port: 8000,
            http_timeout_secs: 10,
            connect_timeout_secs: 3,
            redraw_ms: 250,
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn redraw_period(&self) -> Duration {
        Duration::from_millis(self.redraw_ms.max(1))
    }

    pub fn colormap_source(&self) -> ColormapSource {
        ColormapSource::from(self.colormap.as_str())
    }
}
