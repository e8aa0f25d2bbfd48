use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// 下单请求，`tiers`（GA）和 `seats`（对号入座）必须且只能提供一个
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingRequest {
    #[schema(example = 1)]
    pub event_date_id: i64,
    /// 每张票上的持票人姓名
    #[schema(example = "Ada Lovelace")]
    pub customer_name: String,
    /// 支付凭证，原样保存
    #[schema(example = "tok_visa")]
    pub payment_source: String,
    #[serde(default)]
    pub tiers: Vec<TierBookingRequest>,
    #[serde(default)]
    pub seats: Vec<SeatBookingRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TierBookingRequest {
    pub ticket_type_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeatBookingRequest {
    pub seat_id: i64,
    pub ticket_type_id: i64,
}

impl BookingRequest {
    pub fn is_seated(&self) -> bool {
        !self.seats.is_empty()
    }

    /// 请求格式校验，在进入下单流程之前执行
    pub fn validate(&self) -> AppResult<()> {
        if self.event_date_id <= 0 {
            return Err(AppError::ValidationError(
                "event_date_id is required".to_string(),
            ));
        }
        if self.customer_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "customer_name is required".to_string(),
            ));
        }
        if self.payment_source.trim().is_empty() {
            return Err(AppError::ValidationError(
                "payment_source is required".to_string(),
            ));
        }
        match (self.tiers.is_empty(), self.seats.is_empty()) {
            (true, true) => {
                return Err(AppError::ValidationError(
                    "Either tiers or seats must be provided".to_string(),
                ));
            }
            (false, false) => {
                return Err(AppError::ValidationError(
                    "tiers and seats cannot be combined in one booking".to_string(),
                ));
            }
            _ => {}
        }
        if self.tiers.iter().any(|t| t.quantity <= 0) {
            return Err(AppError::ValidationError(
                "quantity must be at least 1".to_string(),
            ));
        }
        if has_duplicate_seats(&self.seats) {
            return Err(AppError::ValidationError(
                "A seat can only be requested once".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn has_duplicate_seats(seats: &[SeatBookingRequest]) -> bool {
    let mut seen = HashSet::with_capacity(seats.len());
    seats.iter().any(|s| !seen.insert(s.seat_id))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub order_id: i64,
    /// 两位小数金额，例如 "50.00"
    #[schema(example = "50.00")]
    pub total_amount: String,
    pub tickets: Vec<BookedTicketResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookedTicketResponse {
    pub id: i64,
    pub ticket_type: String,
    /// 仅对号入座的票有值
    pub seat_label: Option<String>,
    pub to_name: String,
}
