use sea_orm::entity::prelude::*;

/// 某场次可售的座位，带有自己的价格和票种
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "event_date_seats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_date_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub seat_id: i64,
    pub price_cents: i64,
    pub ticket_type_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
