use crate::entities::{
    order_entity as orders, order_ticket_entity as order_tickets, ticket_entity as tickets,
};
use crate::error::BookingError;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set, SqlErr};

/// 出票所需的全部信息
#[derive(Debug, Clone)]
pub struct NewTicket<'a> {
    pub order_id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub event_date_id: i64,
    pub ticket_type_id: i64,
    /// GA 票为 `None`
    pub seat_id: Option<i64>,
    pub to_name: &'a str,
}

/// 写入订单和票，只追加不修改
#[derive(Clone, Default)]
pub struct OrderAssembler;

impl OrderAssembler {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_order<C: ConnectionTrait>(
        &self,
        txn: &C,
        user_id: i64,
        total_tickets: i32,
        amount: &str,
        payment_source: &str,
    ) -> Result<i64, DbErr> {
        let order = orders::ActiveModel {
            user_id: Set(user_id),
            total_tickets: Set(total_tickets),
            amount: Set(amount.to_string()),
            payment_source: Set(payment_source.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        Ok(order.id)
    }

    /// 写入票及订单关联
    ///
    /// (event_date_id, seat_id) 唯一索引冲突表示座位已被其他订单抢走，返回 `SeatAlreadyTaken`
    pub async fn create_ticket<C: ConnectionTrait>(
        &self,
        txn: &C,
        ticket: NewTicket<'_>,
    ) -> Result<i64, BookingError> {
        let inserted = tickets::ActiveModel {
            event_id: Set(ticket.event_id),
            user_id: Set(ticket.user_id),
            ticket_type_id: Set(ticket.ticket_type_id),
            to_name: Set(ticket.to_name.to_string()),
            event_date_id: Set(ticket.event_date_id),
            seat_id: Set(ticket.seat_id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| classify_ticket_insert_error(e, ticket.seat_id))?;

        order_tickets::Entity::insert(order_tickets::ActiveModel {
            order_id: Set(ticket.order_id),
            ticket_id: Set(inserted.id),
        })
        .exec_without_returning(txn)
        .await?;

        Ok(inserted.id)
    }
}

fn classify_ticket_insert_error(err: DbErr, seat_id: Option<i64>) -> BookingError {
    match (err.sql_err(), seat_id) {
        (Some(SqlErr::UniqueConstraintViolation(detail)), Some(seat_id)) => {
            log::warn!("Seat {seat_id} lost to a concurrent booking: {detail}");
            BookingError::SeatAlreadyTaken {
                seat_ids: vec![seat_id],
            }
        }
        _ => BookingError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_stay_database_errors() {
        let err = classify_ticket_insert_error(DbErr::Custom("connection reset".into()), Some(1));
        assert!(matches!(err, BookingError::Database(_)));

        let err = classify_ticket_insert_error(DbErr::RecordNotInserted, None);
        assert!(matches!(err, BookingError::Database(_)));
    }
}
