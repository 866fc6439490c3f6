use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    CurrentUser, JsonBody, PagePath,
    errors::responses::{
        InternalServerErrorResponse, UnauthorizedResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{Event, EventPayload};
use crate::repository::EventRepository;
use crate::service::EventService;
use crate::status::{Status, StatusMessage};

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(create_event, list_events, read_event, update_event, delete_event),
    components(
        schemas(Event, EventPayload, Status, StatusMessage),
        responses(
            UnauthorizedResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event scheduling endpoints")
    )
)]
pub struct ApiDoc;

/// Create the events router. Every route expects a [`CurrentUser`] in the
/// request extensions, put there by the authentication middleware.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/events/add", post(create_event))
        .route("/events/list/{page}", get(list_events))
        .route(
            "/events/{id}",
            get(read_event).put(update_event).delete(delete_event),
        )
        .with_state(shared_service)
}

/// Schedule a new event owned by the caller
#[utoipa::path(
    post,
    path = "/events/add",
    tag = "Events",
    request_body = EventPayload,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Event created", body = StatusMessage),
        (status = 400, description = "Owner mismatch or event in the past", body = StatusMessage),
        (status = 401, response = UnauthorizedResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    JsonBody(payload): JsonBody<EventPayload>,
) -> EventResult<impl IntoResponse> {
    let event = service.create(&user, payload).await?;
    let message = StatusMessage::ok(format!("Event created. id: {}", event.id))
        .with_data(serde_json::to_value(&event)?);
    Ok((StatusCode::CREATED, Json(message)))
}

/// One page of events ordered by date
#[utoipa::path(
    get,
    path = "/events/list/{page}",
    tag = "Events",
    params(
        ("page" = u64, Path, description = "Zero-based page number")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Up to ten events", body = Vec<Event>),
        (status = 401, response = UnauthorizedResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    _user: CurrentUser,
    PagePath(page): PagePath,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list(page).await?;
    Ok(Json(events))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24 hex digits)")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, description = "Malformed or unknown id", body = StatusMessage),
        (status = 401, description = "Private event of another user", body = StatusMessage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn read_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> EventResult<Json<Event>> {
    let event = service.read(&id, &user).await?;
    Ok(Json(event))
}

/// Replace an event with a new payload
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24 hex digits)")
    ),
    request_body = EventPayload,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event updated", body = StatusMessage),
        (status = 400, description = "Bad id, owner mismatch or event in the past", body = StatusMessage),
        (status = 401, description = "Caller is not the owner", body = StatusMessage),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<EventPayload>,
) -> EventResult<Json<StatusMessage>> {
    let event = service.update(&id, &user, payload).await?;
    let message = StatusMessage::ok("Event updated").with_data(serde_json::to_value(&event)?);
    Ok(Json(message))
}

/// Delete an event owned by the caller
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24 hex digits)")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event deleted", body = StatusMessage),
        (status = 400, description = "Malformed or unknown id", body = StatusMessage),
        (status = 401, description = "Caller is not the owner", body = StatusMessage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> EventResult<Json<StatusMessage>> {
    service.delete(&id, &user).await?;
    Ok(Json(StatusMessage::ok(format!("Event {id} deleted."))))
}
