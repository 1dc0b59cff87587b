use crate::models::coordinate::CacheKey;
use crate::traits::ElevationSource;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const OPEN_METEO_ELEVATION_URL: &str = "https://api.open-meteo.com/v1/elevation";

#[derive(Deserialize)]
struct ElevationResponse {
    elevation: Vec<f64>,
}

/// Elevation API client: `GET <endpoint>?latitude=..&longitude=..`.
pub struct HttpElevationSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpElevationSource {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("topotint/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .context("failed to build elevation HTTP client")?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        HttpElevationSource {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ElevationSource for HttpElevationSource {
    async fn fetch_elevation(&self, key: CacheKey) -> anyhow::Result<f64> {
        let (lat, lng) = key.query_pair();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("latitude", lat.as_str()), ("longitude", lng.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body: ElevationResponse = resp.json().await?;

        body.elevation
            .first()
            .copied()
            .ok_or_else(|| anyhow!("elevation API returned an empty array for {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinate::CoordinateSample;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::{Router, routing::get};
    use std::collections::HashMap;
    use std::net::SocketAddr;

    async fn echo_elevation(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        // Echo the latitude back as the elevation so tests can see what was sent.
        let lat: f64 = params
            .get("latitude")
            .and_then(|v| v.parse().ok())
            .unwrap_or(-1.0);
        assert_eq!(params.get("longitude").map(String::as_str), Some("8.1235"));
        axum::Json(serde_json::json!({ "elevation": [lat] }))
    }

    async fn spawn_upstream() -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route("/v1/elevation", get(echo_elevation))
            .route(
                "/empty",
                get(|| async { axum::Json(serde_json::json!({ "elevation": [] })) }),
            )
            .route("/garbage", get(|| async { "not json" }))
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind upstream listener");
        let addr = listener.local_addr().expect("upstream address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve upstream");
        });
        (addr, handle)
    }

    fn source(addr: SocketAddr, path: &str) -> HttpElevationSource {
        HttpElevationSource::new(
            format!("http://{addr}{path}"),
            Duration::from_secs(5),
            Duration::from_secs(1),
        )
        .expect("client builds")
    }

    #[tokio::test]
    async fn test_sends_rounded_coordinates() {
        let (addr, handle) = spawn_upstream().await;
        let key = CoordinateSample::new(47.1234567, 8.1234567).cache_key();

        let upstream = source(addr, "/v1/elevation");
        assert_eq!(upstream.endpoint(), format!("http://{addr}/v1/elevation"));

        let elevation = upstream
            .fetch_elevation(key)
            .await
            .expect("elevation");
        assert_eq!(elevation, 47.1235);

        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_malformed_and_failed_responses_are_errors() {
        let (addr, handle) = spawn_upstream().await;
        let key = CoordinateSample::new(1.0, 2.0).cache_key();

        for path in ["/empty", "/garbage", "/broken", "/missing"] {
            let result = source(addr, path).fetch_elevation(key).await;
            assert!(result.is_err(), "{path} should fail");
        }

        handle.abort();
    }
}
