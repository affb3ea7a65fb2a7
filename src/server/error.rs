use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::core::{ErrorKind, GatewayError};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    message: String,
    kind: ErrorKind,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let envelope = self.envelope();
        let status = StatusCode::from_u16(envelope.http_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(ErrorBody {
            error: ErrorDetail {
                message: envelope.message,
                kind: envelope.kind,
            },
        });

        (status, body).into_response()
    }
}
