pub mod legend;
pub mod parse;
pub mod render;

use crate::models::style::ColorBreakpoint;
use anyhow::Context;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

pub use legend::{LegendDisplay, LegendDisplayState, build_legend, decimate};
pub use parse::parse_colormap;

/// Where the colormap text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColormapSource {
    Local(PathBuf),
    Remote(String),
}

impl From<&str> for ColormapSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ColormapSource::Remote(value.to_string())
        } else {
            ColormapSource::Local(PathBuf::from(value))
        }
    }
}

impl fmt::Display for ColormapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColormapSource::Local(path) => write!(f, "{}", path.display()),
            ColormapSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Fetch and parse the colormap. Never fails: an unreadable resource is
/// logged and yields no breakpoints, leaving the legend empty.
pub async fn load_colormap(source: &ColormapSource, client: &reqwest::Client) -> Vec<ColorBreakpoint> {
    match fetch_text(source, client).await {
        Ok(text) => {
            let breakpoints = parse_colormap(&text);
            if breakpoints.is_empty() {
                warn!(%source, "colormap contains no usable breakpoints");
            } else {
                info!(%source, count = breakpoints.len(), "loaded colormap");
            }
            breakpoints
        }
        Err(e) => {
            warn!(%source, error = %e, "failed to load colormap, legend will be empty");
            Vec::new()
        }
    }
}

async fn fetch_text(source: &ColormapSource, client: &reqwest::Client) -> anyhow::Result<String> {
    match source {
        ColormapSource::Local(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        ColormapSource::Remote(url) => {
            let resp = client.get(url).send().await?.error_for_status()?;
            Ok(resp.text().await?)
        }
    }
}
