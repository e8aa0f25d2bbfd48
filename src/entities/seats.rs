use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "seats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub venue_id: i64,
    pub section: String,
    pub row: String,
    pub number: String,
    pub is_accessible: bool,
}

impl Model {
    /// 座位显示名：区 + 排 + 号（例如 "A12"）
    pub fn label(&self) -> String {
        format!("{}{}{}", self.section, self.row, self.number)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
