use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PaginatedResponse;

/// 订单及其包含的票
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    /// 第一张票的持票人姓名
    pub customer_name: String,
    #[schema(example = "50.00")]
    pub total_amount: String,
    pub total_tickets: i32,
    pub tickets: Vec<OrderTicketResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderTicketResponse {
    pub id: i64,
    pub event_title: String,
    pub event_date: Option<DateTime<Utc>>,
    pub ticket_type: String,
    pub seat_label: Option<String>,
    pub to_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub type PaginatedOrderResponse = PaginatedResponse<OrderResponse>;
