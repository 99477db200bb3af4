use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Serialize;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::config::{Requirements, RequirementsConfig};
use crate::error::ScheduleError;
use crate::export::{generate_csv_content, EXPORT_FILE_NAME};
use crate::parser::{check_day_columns, parse_availability};
use crate::schedule::{assign_shifts, CoverageGap};

/// Last generated schedule, kept in memory for re-download.
#[derive(Default)]
pub struct AppState {
    pub latest_csv: Mutex<Option<String>>,
    pub latest_gaps: Mutex<Option<Vec<CoverageGap>>>,
}

#[derive(Serialize)]
pub struct CoverageResponse {
    gaps: Vec<CoverageGap>,
}

fn error_response(err: &ScheduleError) -> HttpResponse {
    let body = serde_json::json!({"success": false, "error": err.to_string()});
    match err {
        ScheduleError::InputUnreadable(_)
        | ScheduleError::InvalidConfig(_)
        | ScheduleError::EmptyRoster => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn csv_download(content: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ))
        .body(content)
}

fn poisoned<T>(_: T) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("schedule state lock poisoned")
}

/// Runs the whole pipeline on an uploaded table.
fn build_schedule(body: &[u8], config: &RequirementsConfig) -> crate::error::Result<(String, Vec<CoverageGap>)> {
    let requirements = Requirements::from_config(config)?;
    let roster = parse_availability(body)?;
    check_day_columns(&roster, requirements.month.days);

    let mut outcome = assign_shifts(roster.people, &roster.grid, &requirements)?;
    let csv = generate_csv_content(outcome.schedule.days(), &mut outcome.people)?;
    Ok((csv, outcome.gaps))
}

// Upload endpoint: CSV body in, schedule.csv out
async fn generate_schedule(
    query: web::Query<RequirementsConfig>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match build_schedule(&body, &query) {
        Ok((csv, gaps)) => {
            info!(gaps = gaps.len(), "schedule generated");
            *state.latest_csv.lock().map_err(poisoned)? = Some(csv.clone());
            *state.latest_gaps.lock().map_err(poisoned)? = Some(gaps);
            Ok(csv_download(csv))
        }
        Err(e) => {
            warn!(error = %e, "schedule generation failed");
            Ok(error_response(&e))
        }
    }
}

async fn latest_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest_csv.lock().map_err(poisoned)?;
    match latest.as_ref() {
        Some(csv) => Ok(csv_download(csv.clone())),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"}))),
    }
}

async fn coverage(state: web::Data<AppState>) -> Result<HttpResponse> {
    let gaps = state.latest_gaps.lock().map_err(poisoned)?;
    match gaps.as_ref() {
        Some(gaps) => Ok(HttpResponse::Ok().json(CoverageResponse { gaps: gaps.clone() })),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"}))),
    }
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Page and API routes, shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/schedule", web::post().to(generate_schedule))
        .route("/api/schedule/latest", web::get().to(latest_schedule))
        .route("/api/coverage", web::get().to(coverage));
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::default());

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(4 * 1024 * 1024))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
