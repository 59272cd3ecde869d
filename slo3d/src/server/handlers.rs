//! Request handlers.

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::server::{ApiError, AppState, HeightMapParams, HeightMapRequest};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `GET` or `POST /heightmaps` with `x`, `y`, `dim` and `levelId`.
///
/// A POST body is read only when it is declared as an urlencoded form;
/// any other body is ignored and the query string alone is used.
pub(super) async fn heightmap_request(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let form: &[u8] = if method == Method::POST && is_form(&headers) {
        &body[..]
    } else {
        &[]
    };
    let query = query.unwrap_or_default();
    let params = HeightMapParams::from_urlencoded(form, query.as_bytes());
    respond(heightmap(state, params).await)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn respond(result: Result<Response, ApiError>) -> Response {
    match result {
        Ok(response) => response,
        Err(e) => {
            if e.status().is_server_error() {
                warn!(error = %e, "Height map request failed");
            } else {
                debug!(error = %e, "Height map request rejected");
            }
            e.into_response()
        }
    }
}

async fn heightmap(state: AppState, params: HeightMapParams) -> Result<Response, ApiError> {
    let HeightMapRequest {
        x,
        y,
        dim,
        level_id,
    } = params.parse()?;
    debug!(x, y, dim, level_id, "Height map requested");

    let service = state.service.clone();
    let task = tokio::task::spawn_blocking(move || service.render(x, y, dim, level_id));

    let joined = match state.timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| ApiError::Timeout(limit))?,
        None => task.await,
    };
    let bytes = joined.map_err(|e| ApiError::Worker(e.to_string()))??;

    let content_type = state.service.content_type().to_string();
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
