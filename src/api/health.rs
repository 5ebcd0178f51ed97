use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub active_sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        active_sessions: state.sessions.len().await,
    })
}

/// Ready once the trade source is wired in; the source itself is not probed.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "dataApiUrl": state.config.data_api_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::datasource::MockTradeSource;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(Arc::new(MockTradeSource::new()), Config::default())
    }

    #[tokio::test]
    async fn test_health_reports_session_count() {
        let state = state();
        let Json(body) = health(State(state.clone())).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.service, "polyeye");
        assert_eq!(body.active_sessions, 0);

        state.sessions.create().await;
        state.sessions.create().await;
        let Json(body) = health(State(state)).await;
        assert_eq!(body.active_sessions, 2);
    }

    #[tokio::test]
    async fn test_ready_returns_ready() {
        let Json(body) = ready(State(state())).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["dataApiUrl"], crate::config::DEFAULT_DATA_API_URL);
    }
}
