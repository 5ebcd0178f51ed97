use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::domain::{RawTrade, ResolvedSide, SideSelection};
use crate::engine::{AnalysisError, Metrics};
use crate::error::AppError;
use crate::ingest::{parse_csv_document, parse_json_document};
use crate::report::{render_text_report, ChartSeries, REPORT_FILENAME};
use crate::session::{AnalysisContext, SideDecision};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    #[serde(default)]
    pub condition_id: String,
    #[serde(default)]
    pub user_address: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesLoaded {
    pub trade_count: usize,
    pub market_title: String,
    pub condition_id: String,
    pub resolved_side: Option<ResolvedSide>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSideRequest {
    pub resolved_side: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub market_title: String,
    pub resolved_side: ResolvedSide,
    pub metrics: Metrics,
}

async fn with_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut AnalysisContext) -> R,
) -> Result<R, AppError> {
    state
        .sessions
        .with_context(id, f)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}

fn load(
    ctx: &mut AnalysisContext,
    trades: Vec<RawTrade>,
    title: Option<String>,
    condition_id: Option<String>,
) -> TradesLoaded {
    ctx.load_trades(trades, title, condition_id);
    TradesLoaded {
        trade_count: ctx.raw_trades().len(),
        market_title: ctx.market_title().to_string(),
        condition_id: ctx.condition_id().to_string(),
        resolved_side: ctx.resolved_side(),
    }
}

pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

pub async fn delete_session(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {} not found", id)));
    }
    tracing::info!(session = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fetch_trades(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<FetchRequest>,
) -> Result<Json<TradesLoaded>, AppError> {
    let condition_id = body.condition_id.trim().to_string();
    let user = body.user_address.trim().to_string();
    if condition_id.is_empty() || user.is_empty() {
        return Err(AppError::BadRequest(
            "conditionId and userAddress are required".into(),
        ));
    }
    with_session(&state, id, |_| ()).await?;

    tracing::debug!(session = %id, condition_id = %condition_id, user = %user, "fetching trades");
    let trades = state.source.fetch_trades(&condition_id, &user).await?;
    if trades.is_empty() {
        return Err(AppError::NotFound(
            "No trades found for this user/market".into(),
        ));
    }

    let loaded = with_session(&state, id, |ctx| load(ctx, trades, None, Some(condition_id))).await?;
    tracing::info!(session = %id, trade_count = loaded.trade_count, "trades fetched");
    Ok(Json(loaded))
}

pub async fn upload_trades(
    Path(id): Path<Uuid>,
    Query(params): Query<UploadQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TradesLoaded>, AppError> {
    let is_csv = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("text/csv"))
        .unwrap_or(false);

    let trades = if is_csv {
        parse_csv_document(&body)?
    } else {
        parse_json_document(&body)?
    };
    if trades.is_empty() {
        return Err(AnalysisError::EmptyInput.into());
    }

    let loaded = with_session(&state, id, |ctx| load(ctx, trades, params.title, None)).await?;
    tracing::info!(session = %id, trade_count = loaded.trade_count, csv = is_csv, "trades uploaded");
    Ok(Json(loaded))
}

pub async fn set_resolved_side(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<ResolvedSideRequest>,
) -> Result<Json<SideDecision>, AppError> {
    let selection: SideSelection = body.resolved_side.parse()?;
    let decision = with_session(&state, id, |ctx| ctx.select_side(selection)).await??;
    Ok(Json(decision))
}

pub async fn run_analysis(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = with_session(&state, id, |ctx| {
        let market_title = ctx.market_title().to_string();
        ctx.run_analysis().map(|analysis| AnalysisResponse {
            market_title,
            resolved_side: analysis.resolved_side,
            metrics: analysis.metrics.clone(),
        })
    })
    .await??;
    Ok(Json(response))
}

fn analysis_missing() -> AppError {
    AppError::NotFound("Analysis has not been run for this session".into())
}

pub async fn get_chart(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ChartSeries>, AppError> {
    let chart = with_session(&state, id, |ctx| {
        ctx.analysis()
            .map(|analysis| ChartSeries::build(analysis, ctx.market_title()))
    })
    .await?
    .ok_or_else(analysis_missing)?;
    Ok(Json(chart))
}

pub async fn get_report(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let report = with_session(&state, id, |ctx| {
        ctx.analysis()
            .map(|analysis| render_text_report(analysis, ctx.market_title()))
    })
    .await?
    .ok_or_else(analysis_missing)?;

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report,
    ))
}
