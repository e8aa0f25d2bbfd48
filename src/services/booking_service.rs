use crate::entities::{SeatingMode, event_date_entity as event_dates};
use crate::error::BookingError;
use crate::models::booking::has_duplicate_seats;
use crate::models::{BookedTicketResponse, BookingRequest, BookingResponse};
use crate::services::{
    CatalogService, GaReservation, InventoryLedger, NewTicket, OrderAssembler, SeatAllocator,
};
use crate::utils::format_cents;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

/// 已写入的票，尚未附加显示名称
struct IssuedTicket {
    id: i64,
    ticket_type_id: i64,
    seat_id: Option<i64>,
}

/// 下单服务：把下单请求转换为订单和票。
///
/// 每次下单在同一个事务中完成：扣库存、订单、票和订单关联要么全部提交，要么全部不提交。
/// 提前返回会丢弃事务并自动回滚。
#[derive(Clone)]
pub struct BookingService {
    pool: DatabaseConnection,
    catalog: CatalogService,
    ledger: InventoryLedger,
    allocator: SeatAllocator,
    assembler: OrderAssembler,
}

impl BookingService {
    pub fn new(pool: DatabaseConnection, catalog: CatalogService) -> Self {
        Self {
            pool,
            catalog,
            ledger: InventoryLedger::new(),
            allocator: SeatAllocator::new(),
            assembler: OrderAssembler::new(),
        }
    }

    /// 根据请求类型分发：有 `seats` 为对号入座，否则为 GA
    pub async fn book(
        &self,
        user_id: i64,
        request: &BookingRequest,
    ) -> Result<BookingResponse, BookingError> {
        if request.is_seated() {
            self.book_seated_tickets(user_id, request).await
        } else {
            self.book_ga_tickets(user_id, request).await
        }
    }

    pub async fn book_ga_tickets(
        &self,
        user_id: i64,
        request: &BookingRequest,
    ) -> Result<BookingResponse, BookingError> {
        if request.tiers.is_empty() {
            return Err(BookingError::InvalidRequest(
                "GA booking requires at least one tier".to_string(),
            ));
        }
        if let Some(tier) = request.tiers.iter().find(|t| t.quantity <= 0) {
            return Err(BookingError::InvalidRequest(format!(
                "quantity for ticket type {} must be at least 1",
                tier.ticket_type_id
            )));
        }
        let requested: i64 = request.tiers.iter().map(|t| t.quantity as i64).sum();
        let total_tickets = i32::try_from(requested).map_err(|_| {
            BookingError::InvalidRequest("too many tickets in one booking".to_string())
        })?;

        let occurrence = self
            .resolve_occurrence(request.event_date_id, SeatingMode::Ga)
            .await?;

        let txn = self.pool.begin().await?;

        let mut total_cents: i64 = 0;
        for tier in &request.tiers {
            let reservation = self
                .ledger
                .reserve_ga(&txn, occurrence.id, tier.ticket_type_id, tier.quantity)
                .await?;

            if reservation == GaReservation::Insufficient {
                let err = match self
                    .ledger
                    .price_and_remaining(&txn, occurrence.id, tier.ticket_type_id)
                    .await?
                {
                    Some((_, remaining)) => BookingError::InsufficientInventory {
                        ticket_type_id: tier.ticket_type_id,
                        requested: tier.quantity,
                        remaining,
                    },
                    None => BookingError::TicketTypeNotOffered {
                        event_date_id: occurrence.id,
                        ticket_type_id: tier.ticket_type_id,
                    },
                };
                return Err(err);
            }

            let (price_cents, _) = self
                .ledger
                .price_and_remaining(&txn, occurrence.id, tier.ticket_type_id)
                .await?
                .ok_or(BookingError::TicketTypeNotOffered {
                    event_date_id: occurrence.id,
                    ticket_type_id: tier.ticket_type_id,
                })?;
            total_cents = add_line_total(total_cents, price_cents, tier.quantity)?;
        }

        let total_amount = format_cents(total_cents);
        let order_id = self
            .assembler
            .create_order(
                &txn,
                user_id,
                total_tickets,
                &total_amount,
                &request.payment_source,
            )
            .await?;

        let mut issued = Vec::with_capacity(total_tickets as usize);
        for tier in &request.tiers {
            for _ in 0..tier.quantity {
                let id = self
                    .assembler
                    .create_ticket(
                        &txn,
                        NewTicket {
                            order_id,
                            event_id: occurrence.event_id,
                            user_id,
                            event_date_id: occurrence.id,
                            ticket_type_id: tier.ticket_type_id,
                            seat_id: None,
                            to_name: &request.customer_name,
                        },
                    )
                    .await?;
                issued.push(IssuedTicket {
                    id,
                    ticket_type_id: tier.ticket_type_id,
                    seat_id: None,
                });
            }
        }

        txn.commit().await?;

        log::info!(
            "Order {order_id} booked by user {user_id}: {total_tickets} GA tickets for event date {}, total {total_amount}",
            occurrence.id
        );

        Ok(self
            .build_response(order_id, total_amount, &request.customer_name, issued)
            .await)
    }

    pub async fn book_seated_tickets(
        &self,
        user_id: i64,
        request: &BookingRequest,
    ) -> Result<BookingResponse, BookingError> {
        if request.seats.is_empty() {
            return Err(BookingError::InvalidRequest(
                "seated booking requires at least one seat".to_string(),
            ));
        }
        if has_duplicate_seats(&request.seats) {
            return Err(BookingError::InvalidRequest(
                "a seat can only be requested once".to_string(),
            ));
        }
        let total_tickets = i32::try_from(request.seats.len()).map_err(|_| {
            BookingError::InvalidRequest("too many seats in one booking".to_string())
        })?;

        let occurrence = self
            .resolve_occurrence(request.event_date_id, SeatingMode::Seated)
            .await?;
        let seat_ids: Vec<i64> = request.seats.iter().map(|s| s.seat_id).collect();

        let txn = self.pool.begin().await?;

        let taken = self
            .allocator
            .check_availability(&txn, occurrence.id, &seat_ids)
            .await?;
        if !taken.is_empty() {
            return Err(BookingError::SeatAlreadyTaken { seat_ids: taken });
        }

        // 以座位分配的票种为准，忽略请求中的票种
        let mut priced = Vec::with_capacity(seat_ids.len());
        let mut total_cents: i64 = 0;
        for &seat_id in &seat_ids {
            let (price_cents, ticket_type_id) = self
                .allocator
                .price_and_ticket_type(&txn, occurrence.id, seat_id)
                .await?;
            total_cents = add_line_total(total_cents, price_cents, 1)?;
            priced.push((seat_id, ticket_type_id));
        }

        let total_amount = format_cents(total_cents);
        let order_id = self
            .assembler
            .create_order(
                &txn,
                user_id,
                total_tickets,
                &total_amount,
                &request.payment_source,
            )
            .await?;

        let mut issued = Vec::with_capacity(priced.len());
        for (seat_id, ticket_type_id) in priced {
            let id = self
                .assembler
                .create_ticket(
                    &txn,
                    NewTicket {
                        order_id,
                        event_id: occurrence.event_id,
                        user_id,
                        event_date_id: occurrence.id,
                        ticket_type_id,
                        seat_id: Some(seat_id),
                        to_name: &request.customer_name,
                    },
                )
                .await?;
            issued.push(IssuedTicket {
                id,
                ticket_type_id,
                seat_id: Some(seat_id),
            });
        }

        txn.commit().await?;

        log::info!(
            "Order {order_id} booked by user {user_id}: seats {seat_ids:?} for event date {}, total {total_amount}",
            occurrence.id
        );

        Ok(self
            .build_response(order_id, total_amount, &request.customer_name, issued)
            .await)
    }

    async fn resolve_occurrence(
        &self,
        event_date_id: i64,
        expected: SeatingMode,
    ) -> Result<event_dates::Model, BookingError> {
        let occurrence = self
            .catalog
            .resolve_occurrence(event_date_id)
            .await?
            .ok_or(BookingError::OccurrenceNotFound { event_date_id })?;

        if occurrence.seating_mode != expected {
            return Err(BookingError::ModeMismatch {
                event_date_id,
                expected,
                actual: occurrence.seating_mode,
            });
        }
        Ok(occurrence)
    }

    /// 提交后执行；名称查询失败不影响下单结果
    async fn build_response(
        &self,
        order_id: i64,
        total_amount: String,
        to_name: &str,
        issued: Vec<IssuedTicket>,
    ) -> BookingResponse {
        let mut type_names: HashMap<i64, String> = HashMap::new();
        let mut tickets = Vec::with_capacity(issued.len());

        for ticket in issued {
            if !type_names.contains_key(&ticket.ticket_type_id) {
                let name = self.catalog.ticket_type_name(ticket.ticket_type_id).await;
                type_names.insert(ticket.ticket_type_id, name);
            }
            let seat_label = match ticket.seat_id {
                Some(seat_id) => Some(self.catalog.seat_label(seat_id).await),
                None => None,
            };

            tickets.push(BookedTicketResponse {
                id: ticket.id,
                ticket_type: type_names
                    .get(&ticket.ticket_type_id)
                    .cloned()
                    .unwrap_or_default(),
                seat_label,
                to_name: to_name.to_string(),
            });
        }

        BookingResponse {
            order_id,
            total_amount,
            tickets,
        }
    }
}

/// 计算 `total + price * quantity`，溢出时拒绝下单
fn add_line_total(total: i64, price_cents: i64, quantity: i32) -> Result<i64, BookingError> {
    price_cents
        .checked_mul(i64::from(quantity))
        .and_then(|line| total.checked_add(line))
        .ok_or_else(|| BookingError::InvalidRequest("booking total is out of range".to_string()))
}
