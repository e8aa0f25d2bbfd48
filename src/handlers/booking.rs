use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::get_user_id_from_request;
use crate::error::AppError;
use crate::models::*;
use crate::services::BookingService;

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "booking",
    request_body = BookingRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid request or seating mode mismatch", body = ApiError),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event date, ticket type or seat not found", body = ApiError),
        (status = 409, description = "Sold out or seat already taken", body = ApiError)
    )
)]
pub async fn create_booking(
    booking_service: web::Data<BookingService>,
    req: HttpRequest,
    request: web::Json<BookingRequest>,
) -> Result<HttpResponse> {
    let user_id = match get_user_id_from_request(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    let request = request.into_inner();
    if let Err(e) = request.validate() {
        return Ok(e.error_response());
    }

    match booking_service.book(user_id, &request).await {
        Ok(booking) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": booking
        }))),
        Err(e) => Ok(AppError::from(e).error_response()),
    }
}

pub fn booking_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/bookings").route("", web::post().to(create_booking)));
}
