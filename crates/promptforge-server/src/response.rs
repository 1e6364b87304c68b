//! `{"ok": ..., "data" | "error": ...}` envelope shared by every API route

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use promptforge_core::HttpError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Success<T> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct Failure<'a> {
    ok: bool,
    error: &'a str,
}

pub fn success<T: Serialize>(data: T) -> Response {
    Json(Success { ok: true, data }).into_response()
}

pub fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(Failure { ok: false, error: message })).into_response()
}

/// Convert a domain error into a failure envelope
pub fn from_error<E: HttpError>(error: &E) -> Response {
    failure(error.status_code(), &error.client_message())
}
