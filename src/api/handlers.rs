use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{AnalysisRecord, FilterCriteria};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Analyze and store a string
pub async fn create_string(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateStringRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalysisRecord>)> {
    let Json(request) = payload?;

    let record = state.processor.create(request.value).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Body of `POST /strings`
///
/// A missing or non-string `value` fails deserialization and is reported as
/// invalid input.
#[derive(Debug, Deserialize)]
pub struct CreateStringRequest {
    pub value: String,
}

/// Get a string's analysis by its value
pub async fn get_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<Json<AnalysisRecord>> {
    let record = state.processor.get(&value).await?;
    Ok(Json(record))
}

/// Delete a string by its value
pub async fn delete_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<StatusCode> {
    state.processor.delete(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List strings, optionally filtered by structured query parameters
pub async fn list_strings(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListStringsQuery>, QueryRejection>,
) -> Result<Json<ListStringsResponse>> {
    let Query(params) = params?;
    let criteria = FilterCriteria::try_from(params)?;

    let data = state.processor.list(&criteria).await?;

    Ok(Json(ListStringsResponse {
        count: data.len(),
        data,
        filters_applied: criteria,
    }))
}

/// Raw structured filter parameters; empty values count as absent
#[derive(Debug, Default, Deserialize)]
pub struct ListStringsQuery {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl TryFrom<ListStringsQuery> for FilterCriteria {
    type Error = AppError;

    fn try_from(params: ListStringsQuery) -> Result<Self> {
        Ok(FilterCriteria {
            is_palindrome: non_empty(params.is_palindrome)
                .map(|v| parse_bool("is_palindrome", &v))
                .transpose()?,
            min_length: non_empty(params.min_length)
                .map(|v| parse_integer("min_length", &v))
                .transpose()?,
            max_length: non_empty(params.max_length)
                .map(|v| parse_integer("max_length", &v))
                .transpose()?,
            word_count: non_empty(params.word_count)
                .map(|v| parse_integer("word_count", &v))
                .transpose()?,
            contains_character: non_empty(params.contains_character)
                .map(|v| parse_single_char("contains_character", &v))
                .transpose()?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(AppError::MalformedFilterParameter(format!(
            "'{}' must be true or false",
            name
        ))),
    }
}

fn parse_integer(name: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| AppError::MalformedFilterParameter(format!("'{}' must be an integer", name)))
}

fn parse_single_char(name: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(AppError::MalformedFilterParameter(format!(
            "'{}' must be a single character",
            name
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct ListStringsResponse {
    pub data: Vec<AnalysisRecord>,
    pub count: usize,
    pub filters_applied: FilterCriteria,
}

/// Filter strings with a free-text query
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    params: std::result::Result<Query<NaturalLanguageQuery>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>> {
    let Query(params) = params?;
    params.validate()?;

    let (parsed_filters, data) = state
        .processor
        .filter_natural_language(&params.query)
        .await?;

    Ok(Json(NaturalLanguageResponse {
        count: data.len(),
        data,
        interpreted_query: InterpretedQuery {
            original: params.query,
            parsed_filters,
        },
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct NaturalLanguageQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "query parameter 'query' is required"))]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<AnalysisRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

#[derive(Debug, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterCriteria,
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics() -> (StatusCode, String) {
    let metrics = crate::metrics::gather_metrics();
    (StatusCode::OK, metrics)
}
