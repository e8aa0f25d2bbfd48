#![allow(dead_code)]

use boxoffice_backend::entities::{
    SeatingMode, allocation_entity as allocations, event_date_entity as event_dates,
    event_entity as events, seat_assignment_entity as seat_assignments, seat_entity as seats,
    ticket_type_entity as ticket_types, user_entity as users, venue_entity as venues,
};
use boxoffice_backend::models::{
    BookingRequest, SeatBookingRequest, TierBookingRequest,
};
use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set,
};

/// 使用真实迁移创建的内存数据库
///
/// 只有一个连接：所有查询共用同一个内存库，事务依次排队执行。
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> i64 {
    let now = Utc::now();
    users::ActiveModel {
        username: Set(username.to_string()),
        first_name: Set("Test".to_string()),
        last_name: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_event(db: &DatabaseConnection, title: &str) -> i64 {
    events::ActiveModel {
        slug: Set(title.to_lowercase().replace(' ', "-")),
        title: Set(title.to_string()),
        description: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_venue(db: &DatabaseConnection, name: &str) -> i64 {
    venues::ActiveModel {
        name: Set(name.to_string()),
        capacity: Set(500),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_ticket_type(db: &DatabaseConnection, name: &str) -> i64 {
    ticket_types::ActiveModel {
        name: Set(name.to_string()),
        description: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_event_date(
    db: &DatabaseConnection,
    event_id: i64,
    venue_id: i64,
    seating_mode: SeatingMode,
) -> i64 {
    event_dates::ActiveModel {
        event_id: Set(event_id),
        venue_id: Set(venue_id),
        seating_mode: Set(seating_mode),
        date: Set(Utc.with_ymd_and_hms(2026, 12, 31, 20, 0, 0).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_allocation(
    db: &DatabaseConnection,
    event_date_id: i64,
    ticket_type_id: i64,
    price_cents: i64,
    remaining: i32,
) {
    allocations::Entity::insert(allocations::ActiveModel {
        event_date_id: Set(event_date_id),
        ticket_type_id: Set(ticket_type_id),
        price_cents: Set(price_cents),
        remaining_tickets: Set(remaining),
        max_quantity: Set(remaining),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

pub async fn insert_seat(db: &DatabaseConnection, venue_id: i64, row: &str, number: &str) -> i64 {
    seats::ActiveModel {
        venue_id: Set(venue_id),
        section: Set(String::new()),
        row: Set(row.to_string()),
        number: Set(number.to_string()),
        is_accessible: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_seat_assignment(
    db: &DatabaseConnection,
    event_date_id: i64,
    seat_id: i64,
    ticket_type_id: i64,
    price_cents: i64,
) {
    seat_assignments::Entity::insert(seat_assignments::ActiveModel {
        event_date_id: Set(event_date_id),
        seat_id: Set(seat_id),
        price_cents: Set(price_cents),
        ticket_type_id: Set(ticket_type_id),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

pub async fn remaining(db: &DatabaseConnection, event_date_id: i64, ticket_type_id: i64) -> i32 {
    allocations::Entity::find_by_id((event_date_id, ticket_type_id))
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .remaining_tickets
}

/// GA 场次，票种 "General" 价格 25.00
pub struct GaFixture {
    pub user_id: i64,
    pub event_id: i64,
    pub event_date_id: i64,
    pub ticket_type_id: i64,
}

pub async fn ga_fixture(db: &DatabaseConnection, remaining: i32) -> GaFixture {
    let user_id = insert_user(db, "ada").await;
    let event_id = insert_event(db, "Spring Concert").await;
    let venue_id = insert_venue(db, "Main Hall").await;
    let ticket_type_id = insert_ticket_type(db, "General").await;
    let event_date_id = insert_event_date(db, event_id, venue_id, SeatingMode::Ga).await;
    insert_allocation(db, event_date_id, ticket_type_id, 2500, remaining).await;

    GaFixture {
        user_id,
        event_id,
        event_date_id,
        ticket_type_id,
    }
}

/// 对号入座场次，座位 "A1" 和 "A2"，票种 "Orchestra" 价格 40.00
pub struct SeatedFixture {
    pub user_id: i64,
    pub event_date_id: i64,
    pub ticket_type_id: i64,
    pub seat_ids: Vec<i64>,
}

pub async fn seated_fixture(db: &DatabaseConnection) -> SeatedFixture {
    let user_id = insert_user(db, "grace").await;
    let event_id = insert_event(db, "Opera Night").await;
    let venue_id = insert_venue(db, "Opera House").await;
    let ticket_type_id = insert_ticket_type(db, "Orchestra").await;
    let event_date_id = insert_event_date(db, event_id, venue_id, SeatingMode::Seated).await;

    let mut seat_ids = Vec::new();
    for number in ["1", "2"] {
        let seat_id = insert_seat(db, venue_id, "A", number).await;
        insert_seat_assignment(db, event_date_id, seat_id, ticket_type_id, 4000).await;
        seat_ids.push(seat_id);
    }

    SeatedFixture {
        user_id,
        event_date_id,
        ticket_type_id,
        seat_ids,
    }
}

pub fn ga_request(event_date_id: i64, tiers: &[(i64, i32)]) -> BookingRequest {
    BookingRequest {
        event_date_id,
        customer_name: "Ada Lovelace".to_string(),
        payment_source: "tok_visa".to_string(),
        tiers: tiers
            .iter()
            .map(|&(ticket_type_id, quantity)| TierBookingRequest {
                ticket_type_id,
                quantity,
            })
            .collect(),
        seats: vec![],
    }
}

pub fn seated_request(event_date_id: i64, seats: &[(i64, i64)]) -> BookingRequest {
    BookingRequest {
        event_date_id,
        customer_name: "Grace Hopper".to_string(),
        payment_source: "tok_mastercard".to_string(),
        tiers: vec![],
        seats: seats
            .iter()
            .map(|&(seat_id, ticket_type_id)| SeatBookingRequest {
                seat_id,
                ticket_type_id,
            })
            .collect(),
    }
}
