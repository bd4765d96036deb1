//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON envelopes and status
//! codes.

use std::future::Future;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tokio::task_local;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

task_local! {
    static EXPOSE_DETAILS: bool;
}

/// Run `fut` with internal-error details exposed to clients or not.
///
/// Responses rendered outside such a scope never carry internal details.
pub async fn with_error_details<Fut>(expose: bool, fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    EXPOSE_DETAILS.scope(expose, fut).await
}

fn details_exposed() -> bool {
    EXPOSE_DETAILS.try_with(|expose| *expose).unwrap_or(false)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Prepare the envelope sent to clients.
///
/// Attaches the in-scope trace identifier when the error carries none, and
/// drops internal-error details unless `expose_details` is set.
fn envelope(error: &Error, expose_details: bool) -> Error {
    let mut body = error.clone();
    if body.trace_id().is_none()
        && let Some(trace_id) = TraceId::current()
    {
        body = body.with_trace_id(trace_id.to_string());
    }
    if matches!(body.code(), ErrorCode::InternalError) && !expose_details {
        body = body.without_details();
    }
    body
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), details = ?self.details(), "request failed");
        }

        let body = envelope(self, details_exposed());
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = body.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body)
    }
}

/// `JsonConfig` error handler turning body parse failures into 400 envelopes.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(format!("Invalid JSON body: {err}")).into()
}
