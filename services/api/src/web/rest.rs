//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    protocol::ServerMessage,
    schema::{
        AnimationFinishedRequest, CoordinateDto, FocusPlanDto, ListEntryDto, ListViewDto,
        MapViewDto, MarkerDto, PhotoResponse, ViewCommandDto,
    },
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use utoipa::OpenApi;
use uuid::Uuid;
use whereami_core::{
    capture_photo, save_to_device, CaptureError, CapturedFile, Coordinate, FocusTicket, PhotoId,
};

/// Carries the success message shown after a download, percent-encoded UTF-8.
pub const TOAST_HEADER: HeaderName = HeaderName::from_static("x-toast");

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        report_location_handler,
        current_location_handler,
        capture_photo_handler,
        list_photos_handler,
        map_view_handler,
        open_panel_handler,
        close_panel_handler,
        focus_photo_handler,
        animation_finished_handler,
        download_photo_handler,
        blob_handler,
    ),
    components(
        schemas(
            CoordinateDto, PhotoResponse, ListViewDto, ListEntryDto, MapViewDto, MarkerDto,
            FocusPlanDto, ViewCommandDto, AnimationFinishedRequest
        )
    ),
    tags(
        (name = "Smart WhereAmI API", description = "Geotagged photo capture, map annotation and photo list.")
    )
)]
pub struct ApiDoc;

type HandlerError = (StatusCode, String);

//=========================================================================================
// Location
//=========================================================================================

/// Report the device's current location.
#[utoipa::path(
    post,
    path = "/location",
    request_body = CoordinateDto,
    responses(
        (status = 204, description = "Location recorded"),
        (status = 422, description = "Coordinate out of range")
    )
)]
pub async fn report_location_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<CoordinateDto>,
) -> Result<StatusCode, HandlerError> {
    let at = Coordinate::new(body.lat, body.lon)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    app_state.ctx.location_found(at);
    debug!("Location updated to {}, {}", at.lat, at.lon);
    Ok(StatusCode::NO_CONTENT)
}

/// The last known location, or `null` before the first fix.
#[utoipa::path(
    get,
    path = "/location",
    responses((status = 200, description = "Current location, `null` before the first fix", body = Option<CoordinateDto>))
)]
pub async fn current_location_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Option<CoordinateDto>> {
    Json(app_state.ctx.current_location().map(Into::into))
}

//=========================================================================================
// Photos
//=========================================================================================

/// Capture a photo at the current location.
///
/// Accepts a multipart/form-data request with a single image file part.
#[utoipa::path(
    post,
    path = "/photos",
    request_body(content_type = "multipart/form-data", description = "The captured image."),
    responses(
        (status = 201, description = "Photo captured and placed on the map", body = PhotoResponse),
        (status = 400, description = "Missing file part"),
        (status = 409, description = "No location known yet"),
        (status = 502, description = "Reverse geocoding failed")
    )
)]
pub async fn capture_photo_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let file = read_file_part(&mut multipart).await?;

    // The pipeline runs detached so a client that disconnects mid-geocode
    // does not cancel the capture.
    let task = {
        let app_state = app_state.clone();
        tokio::spawn(async move { run_capture(&app_state, file).await })
    };
    let outcome = task.await.map_err(|e| {
        error!("Capture task failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Capture failed".to_string(),
        )
    })?;

    match outcome {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(CaptureError::NoLocation) => {
            Err((StatusCode::CONFLICT, "No location known yet".to_string()))
        }
        Err(CaptureError::AddressResolution(_)) => Err((
            StatusCode::BAD_GATEWAY,
            "Failed to resolve address".to_string(),
        )),
    }
}

/// Returns the first part that carries a file name; text fields are skipped.
async fn read_file_part(multipart: &mut Multipart) -> Result<CapturedFile, HandlerError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        let Some(name) = field.file_name().map(str::to_string) else {
            debug!("Skipping non-file multipart field {:?}", field.name());
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to read file bytes: {}", e),
            )
        })?;
        return Ok(CapturedFile {
            name,
            content_type,
            bytes,
        });
    }
    Err((
        StatusCode::BAD_REQUEST,
        "Multipart form must include a file".to_string(),
    ))
}

/// Captures, logs and announces one photo.
async fn run_capture(
    app_state: &AppState,
    file: CapturedFile,
) -> Result<PhotoResponse, CaptureError> {
    match capture_photo(&app_state.ctx, app_state.resolver.as_ref(), file).await {
        Ok(record) => {
            info!("Captured photo {} at {}", record.id, record.address);
            let response = PhotoResponse::from(record.as_ref());
            // No subscribers is fine; nobody is watching the map.
            let _ = app_state.events.send(ServerMessage::PhotoAdded {
                marker: response.marker.clone(),
                entry: response.entry.clone(),
            });
            Ok(response)
        }
        Err(e @ CaptureError::NoLocation) => {
            warn!("Photo selected before the first location fix; dropped.");
            Err(e)
        }
        Err(e) => {
            error!("Failed to resolve address: {:?}", e);
            Err(e)
        }
    }
}

/// The photo list panel, most recent first.
#[utoipa::path(
    get,
    path = "/photos",
    responses((status = 200, description = "List panel", body = ListViewDto))
)]
pub async fn list_photos_handler(State(app_state): State<Arc<AppState>>) -> Json<ListViewDto> {
    Json(app_state.ctx.list_view().into())
}

/// Viewport, user marker and photo markers.
#[utoipa::path(
    get,
    path = "/map",
    responses((status = 200, description = "Map state", body = MapViewDto))
)]
pub async fn map_view_handler(State(app_state): State<Arc<AppState>>) -> Json<MapViewDto> {
    Json(app_state.ctx.map_view().into())
}

#[utoipa::path(post, path = "/panel/open", responses((status = 204, description = "Panel opened")))]
pub async fn open_panel_handler(State(app_state): State<Arc<AppState>>) -> StatusCode {
    app_state.ctx.open_panel();
    StatusCode::NO_CONTENT
}

#[utoipa::path(post, path = "/panel/close", responses((status = 204, description = "Panel closed")))]
pub async fn close_panel_handler(State(app_state): State<Arc<AppState>>) -> StatusCode {
    app_state.ctx.close_panel();
    StatusCode::NO_CONTENT
}

//=========================================================================================
// Focus
//=========================================================================================

/// Start showing a photo: close the panel and fly the map to it.
///
/// The popup is opened once the client reports the animation as finished.
#[utoipa::path(
    post,
    path = "/photos/{id}/focus",
    params(("id" = i64, Path, description = "Photo id")),
    responses(
        (status = 200, description = "Commands to run", body = FocusPlanDto),
        (status = 404, description = "Unknown photo")
    )
)]
pub async fn focus_photo_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<FocusPlanDto>, HandlerError> {
    app_state
        .ctx
        .focus_photo(PhotoId(id))
        .map(|plan| Json(plan.into()))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Photo {} not found", id)))
}

#[utoipa::path(
    post,
    path = "/focus/complete",
    request_body = AnimationFinishedRequest,
    responses(
        (status = 200, description = "Open the popup", body = ViewCommandDto),
        (status = 204, description = "Superseded by a newer focus")
    )
)]
pub async fn animation_finished_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<AnimationFinishedRequest>,
) -> Response {
    match app_state.ctx.animation_finished(FocusTicket(body.ticket)) {
        Some(command) => Json(ViewCommandDto::from(command)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

//=========================================================================================
// Images
//=========================================================================================

/// Save the original image to the device.
#[utoipa::path(
    get,
    path = "/photos/{id}/download",
    params(("id" = i64, Path, description = "Photo id")),
    responses(
        (status = 200, description = "The image as an attachment"),
        (status = 404, description = "Unknown photo")
    )
)]
pub async fn download_photo_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, HandlerError> {
    let download = save_to_device(&app_state.ctx, PhotoId(id))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Photo {} not found", id)))?;

    let headers = [
        (header::CONTENT_TYPE, header_value(&download.content_type)?),
        (
            header::CONTENT_DISPOSITION,
            header_value(&format!("attachment; filename=\"{}\"", download.file_name))?,
        ),
        (
            TOAST_HEADER,
            header_value(&utf8_percent_encode(&download.toast, NON_ALPHANUMERIC).to_string())?,
        ),
    ];
    Ok((headers, download.bytes).into_response())
}

/// Raw bytes behind a transient image reference.
#[utoipa::path(
    get,
    path = "/blobs/{handle}",
    params(("handle" = Uuid, Path, description = "Image handle")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Unknown handle")
    )
)]
pub async fn blob_handler(
    State(app_state): State<Arc<AppState>>,
    Path(handle): Path<Uuid>,
) -> Result<Response, HandlerError> {
    let blob = app_state
        .ctx
        .blob(handle)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Unknown image handle".to_string()))?;
    let content_type = blob
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(([(header::CONTENT_TYPE, header_value(&content_type)?)], blob.bytes).into_response())
}

fn header_value(value: &str) -> Result<HeaderValue, HandlerError> {
    HeaderValue::from_str(value).map_err(|e| {
        error!("Invalid header value {:?}: {}", value, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Invalid header value".to_string())
    })
}
