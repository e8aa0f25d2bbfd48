use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::SeatingMode;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::booking::create_booking,
        handlers::order::get_orders,
        handlers::order::get_order,
        handlers::user::get_profile,
        handlers::user::update_profile,
    ),
    components(
        schemas(
            BookingRequest,
            TierBookingRequest,
            SeatBookingRequest,
            BookingResponse,
            BookedTicketResponse,
            SeatingMode,
            OrderResponse,
            OrderTicketResponse,
            OrderQuery,
            UserResponse,
            UpdateUserRequest,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "booking", description = "Ticket booking API"),
        (name = "order", description = "Order history API"),
        (name = "user", description = "User profile API"),
    ),
    info(
        title = "Box Office Backend API",
        version = "1.0.0",
        description = "Ticket booking and inventory REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
