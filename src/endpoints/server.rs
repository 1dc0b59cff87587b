use crate::colormap::load_colormap;
use crate::config::Config;
use crate::elevation::ElevationLookup;
use crate::elevation::http::HttpElevationSource;
use crate::endpoints::handlers::{
    elevation_handler, get_all_layers, legend_handler, legend_png_handler, webmap_handler,
};
use crate::models::layer::{LayerSet, TileLayer};
use crate::models::style::ColorBreakpoint;
use crate::utils::status::print_colormap_summary;
use anyhow::Context;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub struct AppState {
    pub lookup: Arc<ElevationLookup>,
    pub breakpoints: Arc<Vec<ColorBreakpoint>>,
    pub layers: LayerSet,
}

pub struct MapServer {
    config: Config,
    state: AppState,
}

impl MapServer {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let source = HttpElevationSource::new(
            config.elevation_url.clone(),
            config.http_timeout(),
            config.connect_timeout(),
        )?;
        info!(endpoint = source.endpoint(), "elevation source ready");
        let lookup = Arc::new(ElevationLookup::new(Arc::new(source), config.debounce()));

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("failed to build colormap HTTP client")?;
        let breakpoints = load_colormap(&config.colormap_source(), &client).await;
        print_colormap_summary(&config.colormap_source().to_string(), &breakpoints);

        let state = AppState {
            lookup,
            breakpoints: Arc::new(breakpoints),
            layers: layer_set(&config),
        };
        Ok(Self { config, state })
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let state = Arc::new(self.state);
        let app = build_router(state.clone(), &self.config.data_folder);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        if state.layers.overlays().next().is_none() {
            println!(
                "⚠️ No elevation overlay configured. Pass --elevation-tiles with a \
                {{z}}/{{x}}/{{y}} template to tint the map."
            );
        }

        println!(
            r#"
    🚀 topotint serving on {}

    🌍 Elevation map
       → http://{}/map

    ⛰️ Elevation at a point (JSON, {} ms debounce)
       → http://{}/api/elevation?lat=47.1235&lng=8.1235

    🎨 Legend (JSON / PNG)
       → http://{}/api/legend
       → http://{}/api/legend.png
            "#,
            addr,
            addr,
            state.lookup.debounce_period().as_millis(),
            addr,
            addr,
            addr
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server failed")?;

        info!(
            cached_cells = state.lookup.cache().entry_count().await,
            upstream_requests = state.lookup.requests_issued(),
            "server shut down"
        );
        Ok(())
    }
}

pub fn build_router(state: Arc<AppState>, data_folder: &Path) -> Router {
    Router::new()
        .route("/", get(webmap_handler))
        .route("/map", get(webmap_handler))
        .route("/api/elevation", get(elevation_handler))
        .route("/api/legend", get(legend_handler))
        .route("/api/legend.png", get(legend_png_handler))
        .route("/api/layers", get(get_all_layers))
        .nest_service("/data", ServeDir::new(data_folder))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn layer_set(config: &Config) -> LayerSet {
    let mut layers = LayerSet::with_default_basemaps(&config.opacity_target);
    if let Some(url) = &config.elevation_tiles {
        layers.push_overlay(TileLayer::overlay("Elevation", url, 1.0));
    }
    if let Some(url) = &config.overlay_tiles {
        layers.push_overlay(TileLayer::overlay("Overlay", url, 1.0));
    }
    layers.set_opacity_matching(&config.opacity_target, config.overlay_opacity);
    layers
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
