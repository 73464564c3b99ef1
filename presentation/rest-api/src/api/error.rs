use poem::{
    endpoint::BoxEndpoint,
    Endpoint, EndpointExt, IntoResponse, Response, http::StatusCode,
};
use poem_openapi::{
    Object,
    error::{ContentTypeError, ParseRequestPayloadError},
    payload::Json,
};

use business::domain::errors::ErrorKind;

/// Failure body shared by every JSON endpoint.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    /// Error class: `NotFound`, `InvalidArgument` or `Internal`.
    pub name: String,
    pub error: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the response for an error class. Internal failures never expose
/// their cause to the client.
pub fn error_response(kind: ErrorKind, message: String) -> (StatusCode, Json<ErrorResponse>) {
    let error = match kind {
        ErrorKind::Internal => {
            tracing::error!(cause = %message, "request failed");
            "internal server error".to_string()
        }
        _ => message,
    };

    (
        status_for(kind),
        Json(ErrorResponse {
            success: false,
            name: kind.to_string(),
            error,
        }),
    )
}

/// Wraps the API endpoint so request bodies that fail to parse are answered
/// with the error envelope instead of poem's plain-text message.
pub fn with_error_envelope<E>(endpoint: E) -> BoxEndpoint<'static>
where
    E: Endpoint + 'static,
{
    endpoint
        .catch_error(|err: ParseRequestPayloadError| async move {
            invalid_body(format!("invalid request body: {}", err.reason))
        })
        .catch_error(|err: ContentTypeError| async move { invalid_body(err.to_string()) })
        .boxed()
}

fn invalid_body(message: String) -> Response {
    error_response(ErrorKind::InvalidArgument, message).into_response()
}
