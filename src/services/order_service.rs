use crate::entities::{
    event_date_entity as event_dates, event_entity as events, order_entity as orders,
    order_ticket_entity as order_tickets, seat_entity as seats, ticket_entity as tickets,
    ticket_type_entity as ticket_types,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;

/// 订单查询，只返回用户自己的订单
#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_order(&self, user_id: i64, order_id: i64) -> AppResult<OrderResponse> {
        let order = orders::Entity::find_by_id(order_id)
            .filter(orders::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        self.expand_orders(vec![order])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    /// 按创建时间倒序
    pub async fn get_user_orders(
        &self,
        user_id: i64,
        query: &OrderQuery,
    ) -> AppResult<PaginatedOrderResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let base = orders::Entity::find().filter(orders::Column::UserId.eq(user_id));
        let total = base.clone().count(&self.pool).await? as i64;

        let models = base
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items = self.expand_orders(models).await?;

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    /// 批量加载订单的票，每张表查询一次，保持订单原有顺序
    async fn expand_orders(&self, models: Vec<orders::Model>) -> AppResult<Vec<OrderResponse>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i64> = models.iter().map(|o| o.id).collect();
        let links = order_tickets::Entity::find()
            .filter(order_tickets::Column::OrderId.is_in(order_ids))
            .all(&self.pool)
            .await?;
        let order_of_ticket: HashMap<i64, i64> =
            links.iter().map(|l| (l.ticket_id, l.order_id)).collect();

        let ticket_rows = if links.is_empty() {
            Vec::new()
        } else {
            tickets::Entity::find()
                .filter(tickets::Column::Id.is_in(order_of_ticket.keys().copied()))
                .order_by_asc(tickets::Column::Id)
                .all(&self.pool)
                .await?
        };

        let type_names = self.ticket_type_names(&ticket_rows).await?;
        let seat_labels = self.seat_labels(&ticket_rows).await?;
        let occurrences = self.occurrences(&ticket_rows).await?;

        let mut by_order: HashMap<i64, Vec<OrderTicketResponse>> = HashMap::new();
        for t in ticket_rows {
            let Some(&order_id) = order_of_ticket.get(&t.id) else {
                continue;
            };
            let (event_title, event_date) = match occurrences.get(&t.event_date_id) {
                Some((title, date)) => (title.clone(), Some(*date)),
                None => (String::new(), None),
            };
            by_order
                .entry(order_id)
                .or_default()
                .push(OrderTicketResponse {
                    id: t.id,
                    event_title,
                    event_date,
                    ticket_type: type_names
                        .get(&t.ticket_type_id)
                        .cloned()
                        .unwrap_or_else(|| format!("TicketType-{}", t.ticket_type_id)),
                    seat_label: t.seat_id.map(|id| {
                        seat_labels
                            .get(&id)
                            .cloned()
                            .unwrap_or_else(|| format!("Seat-{id}"))
                    }),
                    to_name: t.to_name,
                });
        }

        Ok(models
            .into_iter()
            .map(|o| {
                let tickets = by_order.remove(&o.id).unwrap_or_default();
                let customer_name = tickets
                    .first()
                    .map(|t| t.to_name.clone())
                    .unwrap_or_default();
                OrderResponse {
                    id: o.id,
                    created_at: o.created_at,
                    customer_name,
                    total_amount: o.amount,
                    total_tickets: o.total_tickets,
                    tickets,
                }
            })
            .collect())
    }

    async fn ticket_type_names(
        &self,
        ticket_rows: &[tickets::Model],
    ) -> AppResult<HashMap<i64, String>> {
        let mut ids: Vec<i64> = ticket_rows.iter().map(|t| t.ticket_type_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = ticket_types::Entity::find()
            .filter(ticket_types::Column::Id.is_in(ids))
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|tt| (tt.id, tt.name)).collect())
    }

    async fn seat_labels(&self, ticket_rows: &[tickets::Model]) -> AppResult<HashMap<i64, String>> {
        let mut ids: Vec<i64> = ticket_rows.iter().filter_map(|t| t.seat_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = seats::Entity::find()
            .filter(seats::Column::Id.is_in(ids))
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|s| (s.id, s.label())).collect())
    }

    /// event_date_id -> (活动标题, 场次时间)
    async fn occurrences(
        &self,
        ticket_rows: &[tickets::Model],
    ) -> AppResult<HashMap<i64, (String, chrono::DateTime<chrono::Utc>)>> {
        let mut ids: Vec<i64> = ticket_rows.iter().map(|t| t.event_date_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let dates = event_dates::Entity::find()
            .filter(event_dates::Column::Id.is_in(ids))
            .all(&self.pool)
            .await?;

        let mut event_ids: Vec<i64> = dates.iter().map(|d| d.event_id).collect();
        event_ids.sort_unstable();
        event_ids.dedup();
        let titles: HashMap<i64, String> = events::Entity::find()
            .filter(events::Column::Id.is_in(event_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|e| (e.id, e.title))
            .collect();

        Ok(dates
            .into_iter()
            .map(|d| {
                let title = titles.get(&d.event_id).cloned().unwrap_or_default();
                (d.id, (title, d.date))
            })
            .collect())
    }
}
