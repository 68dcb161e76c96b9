// src/server.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ReportError;
use crate::interval::DayInterval;
use crate::period::{capitalize, year_options, ReportPeriod, MONTHS};
use crate::record::AttendanceRecord;
use crate::report::{GeneratedReport, ReportGenerator};
use crate::source::load_records;

const LISTING_FAILURE_MESSAGE: &str =
    "Falha ao mostrar a referencia, contate o administrador do sistema.";

// --- Error Handling ---

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Funcionário com CPF {0} não encontrado")]
    EmployeeNotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Error occurred: {}", self); // Log the original error

        let (status_code, message) = match &self {
            AppError::Report(ReportError::SourceUnavailable { .. }) => {
                (StatusCode::NOT_FOUND, LISTING_FAILURE_MESSAGE.to_string())
            }
            AppError::Report(ReportError::InvalidPeriod(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Report(ReportError::MalformedRow { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, LISTING_FAILURE_MESSAGE.to_string())
            }
            AppError::Report(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                LISTING_FAILURE_MESSAGE.to_string(),
            ),
            AppError::EmployeeNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

// --- Models ---

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<String>,
    pub year: Option<String>,
    pub search: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> Result<ReportPeriod, ReportError> {
        ReportPeriod::or_current(self.month.as_deref(), self.year.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeDetail {
    pub employee: AttendanceRecord,
    pub days: Vec<DayInterval>,
    pub total: String,
}

#[derive(Debug, Serialize)]
pub struct MonthOption {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct PeriodOptions {
    pub months: Vec<MonthOption>,
    pub years: Vec<String>,
    pub current: ReportPeriod,
}

#[derive(Clone)]
pub struct AppState {
    pub generator: ReportGenerator,
}

// --- Routes ---

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/periods", get(period_options))
        .route("/api/records", get(list_records))
        .route("/api/records/{cpf}", get(employee_detail))
        .route("/api/report", get(report_document))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn period_options() -> Json<PeriodOptions> {
    let today = Local::now().date_naive();
    Json(PeriodOptions {
        months: MONTHS
            .iter()
            .map(|m| MonthOption {
                value: *m,
                label: capitalize(m),
            })
            .collect(),
        years: year_options(today.year()),
        current: ReportPeriod::for_date(today),
    })
}

async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let period = query.period()?;
    let records = load_records(state.generator.source(), &period).await?;
    let term = query.search.as_deref().unwrap_or("");

    Ok(Json(
        records.into_iter().filter(|r| r.matches(term)).collect(),
    ))
}

async fn employee_detail(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<EmployeeDetail>, AppError> {
    let period = query.period()?;
    let records = load_records(state.generator.source(), &period).await?;
    let employee = records
        .into_iter()
        .find(|r| r.cpf == cpf)
        .ok_or_else(|| AppError::EmployeeNotFound(cpf.clone()))?;

    let (days, total) = employee.intervals();
    Ok(Json(EmployeeDetail {
        employee,
        days,
        total: total.label(),
    }))
}

async fn report_document(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<GeneratedReport>, AppError> {
    let period = query.period()?;
    let report = state.generator.build(&period, Local::now()).await?;
    Ok(Json(report))
}
