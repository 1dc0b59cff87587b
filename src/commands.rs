use crate::colormap::{build_legend, load_colormap};
use crate::config::{Command, Config};
use crate::elevation::ElevationLookup;
use crate::elevation::http::HttpElevationSource;
use crate::elevation::readout::ElevationReadout;
use crate::endpoints::server::MapServer;
use crate::models::coordinate::CoordinateSample;
use crate::utils::status::print_colormap_summary;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::warn;

pub async fn run(command: Option<Command>, config: Config) -> anyhow::Result<()> {
    match command.unwrap_or(Command::Serve) {
        Command::Serve => MapServer::new(config).await?.start().await,
        Command::Legend { json } => legend(&config, json).await,
        Command::Lookup { lat, lng } => lookup_once(&config, CoordinateSample::new(lat, lng)).await,
        Command::Watch => watch(&config).await,
    }
}

fn elevation_lookup(config: &Config) -> anyhow::Result<Arc<ElevationLookup>> {
    let source = HttpElevationSource::new(
        config.elevation_url.clone(),
        config.http_timeout(),
        config.connect_timeout(),
    )?;
    Ok(Arc::new(ElevationLookup::new(Arc::new(source), config.debounce())))
}

async fn legend(config: &Config, json: bool) -> anyhow::Result<()> {
    let source = config.colormap_source();
    let breakpoints = load_colormap(&source, &reqwest::Client::new()).await;

    if json {
        let legend = build_legend(&breakpoints, false);
        println!("{}", serde_json::to_string_pretty(&legend)?);
    } else {
        print_colormap_summary(&source.to_string(), &breakpoints);
    }
    Ok(())
}

async fn lookup_once(config: &Config, coord: CoordinateSample) -> anyhow::Result<()> {
    let lookup = elevation_lookup(config)?;
    let reading = lookup.lookup(coord).await;
    println!("{}", serde_json::to_string(&reading)?);
    Ok(())
}

/// Pointer moves arrive as `lat,lng` lines on stdin. Each one is an
/// independent lookup; the readout redraws on its own ticker.
async fn watch(config: &Config) -> anyhow::Result<()> {
    let lookup = elevation_lookup(config)?;
    let readout = ElevationReadout::new();

    let mut last_frame = String::new();
    let redraw = readout.spawn_redraw(config.redraw_period(), move |frame| {
        if frame != last_frame {
            println!("{frame}");
            last_frame = frame.to_string();
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();
    while let Some(line) = lines.next_line().await? {
        let Some(coord) = parse_coordinate_line(&line) else {
            if !line.trim().is_empty() {
                warn!(%line, "expected `lat,lng`");
            }
            continue;
        };
        let lookup = Arc::clone(&lookup);
        let readout = readout.clone();
        in_flight.spawn(async move {
            readout.record(lookup.lookup(coord).await);
        });
    }

    while in_flight.join_next().await.is_some() {}
    // let the ticker draw the final state
    tokio::time::sleep(config.redraw_period() * 2).await;
    redraw.abort();
    Ok(())
}

pub fn parse_coordinate_line(line: &str) -> Option<CoordinateSample> {
    let (lat, lng) = line.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return None;
    }
    Some(CoordinateSample::new(lat, lng))
}
