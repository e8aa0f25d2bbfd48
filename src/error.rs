use crate::entities::SeatingMode;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 下单失败的原因，任何一种都会回滚所在事务
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Event date {event_date_id} not found")]
    OccurrenceNotFound { event_date_id: i64 },

    #[error("Ticket type {ticket_type_id} is not offered for event date {event_date_id}")]
    TicketTypeNotOffered {
        event_date_id: i64,
        ticket_type_id: i64,
    },

    #[error("Seat {seat_id} is not sellable for event date {event_date_id}")]
    SeatNotSellable { event_date_id: i64, seat_id: i64 },

    #[error("Event date {event_date_id} is {actual}, request requires {expected}")]
    ModeMismatch {
        event_date_id: i64,
        expected: SeatingMode,
        actual: SeatingMode,
    },

    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    #[error(
        "Not enough tickets left for ticket type {ticket_type_id} (remaining: {remaining}, requested: {requested})"
    )]
    InsufficientInventory {
        ticket_type_id: i64,
        requested: i32,
        remaining: i32,
    },

    #[error("Seats {seat_ids:?} are no longer available")]
    SeatAlreadyTaken { seat_ids: Vec<i64> },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::OccurrenceNotFound { .. }
            | BookingError::TicketTypeNotOffered { .. }
            | BookingError::SeatNotSellable { .. } => StatusCode::NOT_FOUND,
            BookingError::ModeMismatch { .. } | BookingError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            BookingError::InsufficientInventory { .. } | BookingError::SeatAlreadyTaken { .. } => {
                StatusCode::CONFLICT
            }
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::OccurrenceNotFound { .. }
            | BookingError::TicketTypeNotOffered { .. }
            | BookingError::SeatNotSellable { .. } => "NOT_FOUND",
            BookingError::ModeMismatch { .. } => "SEATING_MODE_MISMATCH",
            BookingError::InvalidRequest(_) => "VALIDATION_ERROR",
            BookingError::InsufficientInventory { .. } => "INSUFFICIENT_INVENTORY",
            BookingError::SeatAlreadyTaken { .. } => "SEAT_ALREADY_TAKEN",
            BookingError::Database(_) => "DATABASE_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BookingError::InsufficientInventory {
                ticket_type_id,
                requested,
                remaining,
            } => Some(json!({
                "ticket_type_id": ticket_type_id,
                "requested": requested,
                "remaining": remaining,
            })),
            BookingError::SeatAlreadyTaken { seat_ids } if !seat_ids.is_empty() => {
                Some(json!({ "seat_ids": seat_ids }))
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Booking(err) => err.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message, details) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                ("VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                ("AUTH_ERROR", msg.clone(), None)
            }
            AppError::JwtError(err) => {
                log::warn!("Token rejected: {err}");
                ("AUTH_ERROR", "Invalid access token".to_string(), None)
            }
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone(), None),
            AppError::Booking(BookingError::Database(err)) | AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                ("DATABASE_ERROR", "Database error".to_string(), None)
            }
            AppError::Booking(err) => {
                log::warn!("Booking rejected: {err}");
                (err.error_code(), err.to_string(), err.details())
            }
            _ => {
                log::error!("Internal error: {self}");
                ("INTERNAL_ERROR", "Internal server error".to_string(), None)
            }
        };

        let mut error = json!({
            "code": error_code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": error
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_error_codes() {
        let err = BookingError::InsufficientInventory {
            ticket_type_id: 7,
            requested: 2,
            remaining: 0,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "INSUFFICIENT_INVENTORY");
        assert_eq!(
            err.to_string(),
            "Not enough tickets left for ticket type 7 (remaining: 0, requested: 2)"
        );

        let err = BookingError::ModeMismatch {
            event_date_id: 1,
            expected: SeatingMode::Ga,
            actual: SeatingMode::Seated,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Event date 1 is SEATED, request requires GA");

        let err = BookingError::OccurrenceNotFound { event_date_id: 9 };
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_app_error_wraps_booking_status() {
        let err: AppError = BookingError::SeatAlreadyTaken { seat_ids: vec![3] }.into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: AppError = BookingError::Database(DbErr::Custom("boom".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
