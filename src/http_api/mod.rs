use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    BroadcastTemplate, CalendarRefresh, DisplaySnapshot, Kiosk, QuickAction, ScheduleReport,
    Settings, StateError, TemplatePatch, TimeSlot,
};

#[derive(Clone)]
pub struct ApiState {
    kiosk: Kiosk,
}

impl ApiState {
    pub fn new(kiosk: Kiosk) -> Self {
        Self { kiosk }
    }

    fn kiosk(&self) -> &Kiosk {
        &self.kiosk
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<StateError> for ApiError {
    fn from(value: StateError) -> Self {
        match value {
            StateError::UnknownTemplate(_) | StateError::UnknownSlot(_) => {
                ApiError::NotFound(value.to_string())
            }
            StateError::InvalidDay(_) | StateError::InvalidTime(_) | StateError::BlankDestination => {
                ApiError::Invalid(value.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, "conflict", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SlotTimesPayload {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct TimetableCellPayload {
    subject: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PublishPayload {
    Template { template_id: String },
    Quick { quick: QuickAction },
    Travel { travel: String },
}

#[derive(Debug, Default, Deserialize)]
struct SyncParams {
    #[serde(default)]
    silent: bool,
}

#[derive(Debug, Serialize)]
struct CalendarRefreshBody {
    result: CalendarRefresh,
    calendar_text: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/display", get(display))
        .route("/settings", get(get_settings))
        .route("/slots/:id", put(update_slot_times))
        .route("/timetable/:day/:slot_id", put(update_timetable_cell))
        .route("/templates", get(list_templates))
        .route("/templates/:id", put(update_template))
        .route(
            "/broadcast",
            get(current_broadcast)
                .post(publish_broadcast)
                .delete(dismiss_broadcast),
        )
        .route("/sync", post(sync_schedule))
        .route("/import", post(import_workbook))
        .route("/calendar/refresh", post(refresh_calendar))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, kiosk: Kiosk) -> std::io::Result<()> {
    let state = ApiState::new(kiosk);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn display(State(state): State<ApiState>) -> Json<DisplaySnapshot> {
    let now = Local::now().naive_local();
    Json(state.kiosk().snapshot(&now))
}

async fn get_settings(State(state): State<ApiState>) -> Json<Settings> {
    Json(state.kiosk().settings())
}

async fn update_slot_times(
    State(state): State<ApiState>,
    Path(slot_id): Path<String>,
    Json(payload): Json<SlotTimesPayload>,
) -> Result<Json<TimeSlot>, ApiError> {
    let slot = state
        .kiosk()
        .set_slot_times(&slot_id, &payload.start, &payload.end)?;
    Ok(Json(slot))
}

async fn update_timetable_cell(
    State(state): State<ApiState>,
    Path((day, slot_id)): Path<(u8, String)>,
    Json(payload): Json<TimetableCellPayload>,
) -> Result<StatusCode, ApiError> {
    state
        .kiosk()
        .set_timetable_cell(day, &slot_id, &payload.subject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_templates(State(state): State<ApiState>) -> Json<Vec<BroadcastTemplate>> {
    Json(state.kiosk().templates())
}

async fn update_template(
    State(state): State<ApiState>,
    Path(template_id): Path<String>,
    Json(patch): Json<TemplatePatch>,
) -> Result<Json<BroadcastTemplate>, ApiError> {
    let template = state.kiosk().update_template(&template_id, &patch)?;
    Ok(Json(template))
}

async fn current_broadcast(
    State(state): State<ApiState>,
) -> Result<Json<BroadcastTemplate>, ApiError> {
    state
        .kiosk()
        .broadcast()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no broadcast is showing"))
}

async fn publish_broadcast(
    State(state): State<ApiState>,
    Json(payload): Json<PublishPayload>,
) -> Result<(StatusCode, Json<BroadcastTemplate>), ApiError> {
    let kiosk = state.kiosk();
    let broadcast = match payload {
        PublishPayload::Template { template_id } => kiosk.publish_template(&template_id)?,
        PublishPayload::Quick { quick } => kiosk.publish_quick_action(quick),
        PublishPayload::Travel { travel } => kiosk.publish_travel(&travel)?,
    };
    Ok((StatusCode::CREATED, Json(broadcast)))
}

async fn dismiss_broadcast(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    match state.kiosk().dismiss_broadcast() {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found("no broadcast is showing")),
    }
}

async fn sync_schedule(
    State(state): State<ApiState>,
    Query(params): Query<SyncParams>,
) -> Json<ScheduleReport> {
    Json(state.kiosk().sync_remote_schedule(!params.silent).await)
}

async fn import_workbook(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<ScheduleReport>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::invalid("request body must contain an .xlsx workbook"));
    }
    Ok(Json(state.kiosk().import_workbook(&body)))
}

async fn refresh_calendar(
    State(state): State<ApiState>,
) -> Result<Json<CalendarRefreshBody>, ApiError> {
    let kiosk = state.kiosk();
    let result = kiosk.refresh_calendar().await;
    if result == CalendarRefresh::AlreadyRunning {
        return Err(ApiError::Conflict("calendar refresh already running".into()));
    }
    let now = Local::now().naive_local();
    Ok(Json(CalendarRefreshBody {
        result,
        calendar_text: kiosk.snapshot(&now).calendar_text,
    }))
}
