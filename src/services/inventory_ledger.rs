use crate::entities::allocation_entity as allocations;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, UpdateResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaReservation {
    Reserved,
    Insufficient,
}

/// GA 库存，所有方法都在调用方的事务中执行
#[derive(Clone, Default)]
pub struct InventoryLedger;

impl InventoryLedger {
    pub fn new() -> Self {
        Self
    }

    /// 扣减库存
    ///
    /// 单条条件更新（`remaining - q WHERE remaining >= q`），由数据库串行化同一行的并发扣减，
    /// 库存不会变为负数。影响行数为 0 表示库存不足或该票种未开售。
    pub async fn reserve_ga<C: ConnectionTrait>(
        &self,
        txn: &C,
        event_date_id: i64,
        ticket_type_id: i64,
        quantity: i32,
    ) -> Result<GaReservation, DbErr> {
        let update_result: UpdateResult = allocations::Entity::update_many()
            .col_expr(
                allocations::Column::RemainingTickets,
                Expr::col(allocations::Column::RemainingTickets).sub(quantity),
            )
            .filter(allocations::Column::EventDateId.eq(event_date_id))
            .filter(allocations::Column::TicketTypeId.eq(ticket_type_id))
            .filter(allocations::Column::RemainingTickets.gte(quantity))
            .exec(txn)
            .await?;

        if update_result.rows_affected == 1 {
            Ok(GaReservation::Reserved)
        } else {
            Ok(GaReservation::Insufficient)
        }
    }

    /// 在事务内读取 `(price_cents, remaining)`；该场次未开售此票种时返回 `None`
    pub async fn price_and_remaining<C: ConnectionTrait>(
        &self,
        txn: &C,
        event_date_id: i64,
        ticket_type_id: i64,
    ) -> Result<Option<(i64, i32)>, DbErr> {
        let allocation = allocations::Entity::find_by_id((event_date_id, ticket_type_id))
            .one(txn)
            .await?;
        Ok(allocation.map(|a| (a.price_cents, a.remaining_tickets)))
    }
}
