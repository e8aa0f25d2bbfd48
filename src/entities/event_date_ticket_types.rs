use sea_orm::entity::prelude::*;

/// 某场次某票种的 GA 库存
/// - remaining_tickets: 只通过条件更新递减
/// - max_quantity: 初始库存，`0 <= remaining_tickets <= max_quantity`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "event_date_ticket_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_date_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ticket_type_id: i64,
    pub price_cents: i64,
    pub remaining_tickets: i32,
    pub max_quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
