use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::Error;

/// Failure as the client sees it: a status code and a message, rendered as
/// `{"success": false, "error": ...}`.
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    InternalError(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl From<Error> for HttpError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingParameter(_) => {
                HttpError::BadRequest("Se requieren los parámetros 'origen' y 'destino'".to_string())
            }
            Error::NotFound(place) => {
                HttpError::NotFound(format!("Lugar no encontrado en la base de datos: {place}"))
            }
            Error::NoPath { origin, destination } => {
                HttpError::NotFound(format!("No existe camino entre {origin} y {destination}"))
            }
            other => HttpError::InternalError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_stay_distinct() {
        let missing = HttpError::from(Error::MissingParameter("origin".into()));
        let unknown = HttpError::from(Error::NotFound("Nowhere".into()));
        let no_path = HttpError::from(Error::NoPath { origin: "A".into(), destination: "B".into() });
        let load = HttpError::from(Error::StorageError("down".into()));

        assert!(matches!(missing, HttpError::BadRequest(_)));
        assert!(matches!(&unknown, HttpError::NotFound(m) if m.contains("Lugar no encontrado")));
        assert!(matches!(&no_path, HttpError::NotFound(m) if m.contains("No existe camino")));
        assert!(matches!(load, HttpError::InternalError(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(HttpError::BadRequest("x".into()).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::NotFound("x".into()).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            HttpError::InternalError("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
