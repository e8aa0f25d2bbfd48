mod common;

use actix_web::{App, http::StatusCode, test, web};
use boxoffice_backend::handlers;
use boxoffice_backend::middlewares::AuthMiddleware;
use boxoffice_backend::services::{BookingService, CatalogService, OrderService, UserService};
use boxoffice_backend::utils::JwtService;
use common::*;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

const SECRET: &str = "test-secret";

macro_rules! init_app {
    ($db:expr) => {{
        let db: &DatabaseConnection = $db;
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(JwtService::new(SECRET, 3600)))
                .app_data(handlers::json_config())
                .app_data(web::Data::new(BookingService::new(
                    db.clone(),
                    CatalogService::new(db.clone()),
                )))
                .app_data(web::Data::new(OrderService::new(db.clone())))
                .app_data(web::Data::new(UserService::new(db.clone())))
                .service(
                    web::scope("/api/v1")
                        .configure(handlers::booking_config)
                        .configure(handlers::order_config)
                        .configure(handlers::user_config),
                ),
        )
        .await
    }};
}

fn bearer(user_id: i64) -> (&'static str, String) {
    let token = JwtService::new(SECRET, 3600)
        .generate_access_token(user_id)
        .unwrap();
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_booking_requires_token() {
    let db = setup_db().await;
    let f = ga_fixture(&db, 2).await;
    let app = init_app!(&db);

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(ga_request(f.event_date_id, &[(f.ticket_type_id, 1)]))
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    let status = match resp {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(remaining(&db, f.event_date_id, f.ticket_type_id).await, 2);
}

#[actix_web::test]
async fn test_book_then_sold_out_over_http() {
    let db = setup_db().await;
    let f = ga_fixture(&db, 2).await;
    let app = init_app!(&db);

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(bearer(f.user_id))
        .set_json(ga_request(f.event_date_id, &[(f.ticket_type_id, 2)]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_amount"], "50.00");
    assert_eq!(body["data"]["tickets"].as_array().map(Vec::len), Some(2));
    let order_id = body["data"]["order_id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(bearer(f.user_id))
        .set_json(ga_request(f.event_date_id, &[(f.ticket_type_id, 1)]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_INVENTORY");
    assert_eq!(body["error"]["details"]["remaining"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/orders/{order_id}"))
        .insert_header(bearer(f.user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_tickets"], 2);
    assert_eq!(body["data"]["tickets"][0]["event_title"], "Spring Concert");

    let stranger = insert_user(&db, "mallory").await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/orders/{order_id}"))
        .insert_header(bearer(stranger))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_booking_request_shape_is_validated() {
    let db = setup_db().await;
    let f = ga_fixture(&db, 2).await;
    let app = init_app!(&db);

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(bearer(f.user_id))
        .set_json(json!({
            "event_date_id": f.event_date_id,
            "customer_name": "Ada",
            "payment_source": "tok_visa",
            "tiers": [{"ticket_type_id": f.ticket_type_id, "quantity": 1}],
            "seats": [{"seat_id": 1, "ticket_type_id": f.ticket_type_id}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(bearer(f.user_id))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    let status = match resp {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_mode_mismatch_over_http() {
    let db = setup_db().await;
    let f = seated_fixture(&db).await;
    let app = init_app!(&db);

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(bearer(f.user_id))
        .set_json(ga_request(f.event_date_id, &[(f.ticket_type_id, 1)]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "SEATING_MODE_MISMATCH");
}

#[actix_web::test]
async fn test_profile_roundtrip() {
    let db = setup_db().await;
    let user_id = insert_user(&db, "ada").await;
    let app = init_app!(&db);

    let req = test::TestRequest::put()
        .uri("/api/v1/user/profile")
        .insert_header(bearer(user_id))
        .set_json(json!({"first_name": "Augusta", "email": "augusta@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/user/profile")
        .insert_header(bearer(user_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["first_name"], "Augusta");
    assert_eq!(body["data"]["user"]["email"], "augusta@example.com");
    assert_eq!(body["data"]["user"]["username"], "ada");

    let other = insert_user(&db, "grace").await;
    let req = test::TestRequest::put()
        .uri("/api/v1/user/profile")
        .insert_header(bearer(other))
        .set_json(json!({"username": "ada"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
