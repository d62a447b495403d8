//! Request handlers.

use super::error::ApiError;
use super::AppState;
use crate::analysis::{AnalysisRequest, AnalysisResult, AnalysisType};
use crate::inference::schema::{analysis_schema, metadata_schema};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, Instrument};
use uuid::Uuid;

#[derive(Deserialize)]
pub(super) struct UrlQuery {
    url: String,
}

pub(super) async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Tubelens - YouTube transcript analysis API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "analyze": "POST /analyze",
            "summary": "GET /analyze/summary?url=",
            "topics": "GET /analyze/topics?url=",
            "insights": "GET /analyze/insights?url=",
            "schema": "GET /schema",
            "health": "GET /health",
        },
    }))
}

pub(super) async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn schema() -> impl IntoResponse {
    Json(json!({
        "request": {
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "YouTube video URL (alias: youtube_url)"
                },
                "analysis_type": {
                    "type": "string",
                    "enum": ["full", "summary_only", "topics_only", "insights_only"],
                    "default": "full"
                }
            },
            "required": ["url"]
        },
        "model_output": {
            "analysis": analysis_schema(),
            "metadata": metadata_schema(),
        },
        "errors": ["invalid_input", "transcript_unavailable", "inference_failure", "internal"],
    }))
}

pub(super) async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    run(&state, request).await
}

pub(super) async fn analyze_summary(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    run_query(&state, query, AnalysisType::SummaryOnly).await
}

pub(super) async fn analyze_topics(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    run_query(&state, query, AnalysisType::TopicsOnly).await
}

pub(super) async fn analyze_insights(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    run_query(&state, query, AnalysisType::InsightsOnly).await
}

async fn run_query(
    state: &AppState,
    query: Result<Query<UrlQuery>, QueryRejection>,
    analysis_type: AnalysisType,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    run(state, AnalysisRequest::new(query.url, analysis_type)).await
}

async fn run(state: &AppState, request: AnalysisRequest) -> Result<Json<AnalysisResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze_request", %request_id);

    async move {
        info!("Received analysis request for {}", request.url);
        let result = state.analyzer.analyze(&request).await?;
        Ok(Json(result))
    }
    .instrument(span)
    .await
}
