use crate::colormap::legend::{LegendDisplayState, build_gradient};
use crate::colormap::render::render_legend_png;
use crate::endpoints::map::INDEX_HTML;
use crate::endpoints::server::AppState;
use crate::models::coordinate::CoordinateSample;
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

const MAX_LEGEND_PIXELS: u32 = 2048;

#[derive(Deserialize)]
pub struct ElevationQuery {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
pub struct LegendQuery {
    #[serde(default)]
    collapsed: bool,
}

#[derive(Deserialize)]
pub struct LegendImageQuery {
    width: Option<u32>,
    height: Option<u32>,
}

pub async fn webmap_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub async fn elevation_handler(
    Query(query): Query<ElevationQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let valid = query.lat.is_finite()
        && query.lng.is_finite()
        && (-90.0..=90.0).contains(&query.lat)
        && (-180.0..=180.0).contains(&query.lng);
    if !valid {
        return (
            StatusCode::BAD_REQUEST,
            "lat must be within [-90, 90] and lng within [-180, 180]",
        )
            .into_response();
    }

    let coord = CoordinateSample::new(query.lat, query.lng);
    let reading = state.lookup.lookup(coord).await;
    (StatusCode::OK, Json(reading)).into_response()
}

pub async fn legend_handler(
    Query(query): Query<LegendQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let display = LegendDisplayState::new(&state.breakpoints, query.collapsed).display();
    (StatusCode::OK, Json(display))
}

pub async fn legend_png_handler(
    Query(query): Query<LegendImageQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let width = query.width.unwrap_or(24).clamp(1, MAX_LEGEND_PIXELS);
    let height = query.height.unwrap_or(200).clamp(1, MAX_LEGEND_PIXELS);
    let shown = LegendDisplayState::new(&state.breakpoints, false).breakpoints;
    let stops = build_gradient(&shown);

    match render_legend_png(&stops, width, height) {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render legend image");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn get_all_layers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.layers.clone()))
}
