use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Query parameters of the distance endpoint, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateParam {
    Lat1,
    Lon1,
    Lat2,
    Lon2,
}

impl CoordinateParam {
    pub const ALL: [CoordinateParam; 4] = [Self::Lat1, Self::Lon1, Self::Lat2, Self::Lon2];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Lat1 => "lat1",
            Self::Lon1 => "lon1",
            Self::Lat2 => "lat2",
            Self::Lon2 => "lon2",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Self::Lat1 => "Invalid latitude for point 1",
            Self::Lon1 => "Invalid longitude for point 1",
            Self::Lat2 => "Invalid latitude for point 2",
            Self::Lon2 => "Invalid longitude for point 2",
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    InvalidParameter(CoordinateParam),
    Serialization(serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidParameter(param) => param.error_message(),
            Self::Serialization(_) => "Failed to marshal JSON response",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Serialization(e) = &self {
            error!("Error serializing response: {}", e);
        }
        // Body is the bare message; no trailing newline is appended.
        let mut response = (self.status(), self.message()).into_response();
        response.headers_mut()
            .insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        response
    }
}

pub struct ErrorWithMessage {
    pub message: String,
}

impl ErrorWithMessage {
    pub fn new(message: String) -> Self {
        Self {
            message
        }
    }
}

impl Debug for ErrorWithMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Display for ErrorWithMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ErrorWithMessage {

}
