use crate::entities::{
    event_date_entity as event_dates, seat_entity as seats, ticket_type_entity as ticket_types,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

/// 只读目录查询：场次、票种名称、座位显示名
#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn resolve_occurrence(
        &self,
        event_date_id: i64,
    ) -> Result<Option<event_dates::Model>, DbErr> {
        event_dates::Entity::find_by_id(event_date_id)
            .one(&self.pool)
            .await
    }

    /// 获取票种名称，失败时返回 `TicketType-<id>`
    pub async fn ticket_type_name(&self, ticket_type_id: i64) -> String {
        match ticket_types::Entity::find_by_id(ticket_type_id)
            .one(&self.pool)
            .await
        {
            Ok(Some(tt)) => tt.name,
            Ok(None) => format!("TicketType-{ticket_type_id}"),
            Err(e) => {
                log::warn!("Failed to load ticket type {ticket_type_id}: {e}");
                format!("TicketType-{ticket_type_id}")
            }
        }
    }

    /// 获取座位显示名（如 "A12"），失败时返回 `Seat-<id>`
    pub async fn seat_label(&self, seat_id: i64) -> String {
        match seats::Entity::find_by_id(seat_id).one(&self.pool).await {
            Ok(Some(seat)) => seat.label(),
            Ok(None) => format!("Seat-{seat_id}"),
            Err(e) => {
                log::warn!("Failed to load seat {seat_id}: {e}");
                format!("Seat-{seat_id}")
            }
        }
    }
}
