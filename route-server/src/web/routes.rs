//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::StopId;
use crate::planner::{PlanError, RoutePlanner, StopQuery};
use crate::store::NetworkReader;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/route", get(plan_route))
        .route("/api/between", get(stops_between))
        .route("/api/lines", get(all_lines))
        .route("/api/lines/:number", get(line_details))
        .route("/api/stops", get(stop_names))
        .route("/api/stops/lines", get(lines_at_stop))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a required, non-blank stop name.
fn required_stop(raw: Option<&str>, message: &str) -> Result<StopQuery, AppError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(StopQuery::parse)
        .ok_or_else(|| AppError::BadRequest {
            message: message.to_string(),
        })
}

fn required_pair(req: &StopPairRequest) -> Result<(StopQuery, StopQuery), AppError> {
    const MESSAGE: &str = "Please enter both start and end bus stops.";
    let start = required_stop(req.start_stop.as_deref(), MESSAGE)?;
    let end = required_stop(req.end_stop.as_deref(), MESSAGE)?;
    Ok((start, end))
}

/// Plan a route between two named stops.
///
/// Every search whose stops both resolve is counted, including ones that
/// find no route.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<StopPairRequest>,
) -> Result<Json<RouteSearchResponse>, AppError> {
    let (start, end) = required_pair(&req)?;

    let network = state.store.snapshot().await;
    let planner = RoutePlanner::new(&*network, &*state.distance);
    let from = planner.resolve(&start)?;
    let to = planner.resolve(&end)?;

    let search_count = state.searches.record(from.id, to.id).await;
    let outcome = planner.plan(from.id, to.id).await?;

    Ok(Json(RouteSearchResponse {
        route: RouteResponse::from(&outcome),
        search_count,
    }))
}

/// Stops between two named stops, on every line serving both.
async fn stops_between(
    State(state): State<AppState>,
    Query(req): Query<StopPairRequest>,
) -> Result<Json<BetweenResponse>, AppError> {
    let (start, end) = required_pair(&req)?;

    let network = state.store.snapshot().await;
    let planner = RoutePlanner::new(&*network, &*state.distance);
    let from = planner.resolve(&start)?;
    let to = planner.resolve(&end)?;

    let lines = planner
        .stops_between(from.id, to.id)
        .iter()
        .map(LineSliceResult::from)
        .collect();

    Ok(Json(BetweenResponse {
        start_stop: StopResult::from(from),
        end_stop: StopResult::from(to),
        lines,
    }))
}

/// All lines, ordered by number.
async fn all_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let network = state.store.snapshot().await;
    let lines = network.lines().iter().map(LineResult::from).collect();
    Json(LinesResponse { lines })
}

/// One line, whole or between two stops.
async fn line_details(
    State(state): State<AppState>,
    number: Result<Path<i32>, PathRejection>,
    req: Result<Query<LineDetailsRequest>, QueryRejection>,
) -> Result<Json<SegmentResult>, AppError> {
    let Path(number) = number?;
    let Query(req) = req?;

    let between = match (req.start_stop_id, req.end_stop_id) {
        (Some(from), Some(to)) => Some((StopId(from), StopId(to))),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest {
                message: "Provide both start_stop_id and end_stop_id, or neither.".to_string(),
            });
        }
    };

    let network = state.store.snapshot().await;
    let planner = RoutePlanner::new(&*network, &*state.distance);
    let details = planner.line_details(number, between).await?;

    Ok(Json(SegmentResult::from(&details)))
}

/// Stop names for autocomplete.
async fn stop_names(State(state): State<AppState>) -> Json<Vec<StopNameResult>> {
    let network = state.store.snapshot().await;
    Json(network.stops().iter().map(StopNameResult::from).collect())
}

/// Lines serving a named stop.
async fn lines_at_stop(
    State(state): State<AppState>,
    Query(req): Query<StopRequest>,
) -> Result<Json<StopLinesResponse>, AppError> {
    let query = required_stop(req.stop.as_deref(), "Please enter a bus stop name.")?;

    let network = state.store.snapshot().await;
    let planner = RoutePlanner::new(&*network, &*state.distance);
    let stop = planner.resolve(&query)?;
    let lines = planner.lines_at_stop(stop.id).await?;

    Ok(Json(StopLinesResponse {
        stop: StopResult::from(stop),
        lines: lines.iter().map(StopLineResult::from).collect(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
