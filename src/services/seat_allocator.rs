use crate::entities::{seat_assignment_entity as seat_assignments, ticket_entity as tickets};
use crate::error::BookingError;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// 对号入座场次的座位查询
///
/// `check_availability` 只用于提前给出友好的错误；座位归属最终由
/// `tickets(event_date_id, seat_id)` 唯一索引决定，见 `OrderAssembler::create_ticket`。
#[derive(Clone, Default)]
pub struct SeatAllocator;

impl SeatAllocator {
    pub fn new() -> Self {
        Self
    }

    /// 返回 `seat_ids` 中该场次已售出的座位
    pub async fn check_availability<C: ConnectionTrait>(
        &self,
        txn: &C,
        event_date_id: i64,
        seat_ids: &[i64],
    ) -> Result<Vec<i64>, DbErr> {
        if seat_ids.is_empty() {
            return Ok(Vec::new());
        }

        let booked = tickets::Entity::find()
            .filter(tickets::Column::EventDateId.eq(event_date_id))
            .filter(tickets::Column::SeatId.is_in(seat_ids.iter().copied()))
            .all(txn)
            .await?;

        let mut taken: Vec<i64> = booked.into_iter().filter_map(|t| t.seat_id).collect();
        taken.sort_unstable();
        taken.dedup();
        Ok(taken)
    }

    /// 获取座位分配的 `(price_cents, ticket_type_id)`
    pub async fn price_and_ticket_type<C: ConnectionTrait>(
        &self,
        txn: &C,
        event_date_id: i64,
        seat_id: i64,
    ) -> Result<(i64, i64), BookingError> {
        seat_assignments::Entity::find_by_id((event_date_id, seat_id))
            .one(txn)
            .await?
            .map(|a| (a.price_cents, a.ticket_type_id))
            .ok_or(BookingError::SeatNotSellable {
                event_date_id,
                seat_id,
            })
    }
}
