use sea_orm_migration::prelude::*;

use crate::m20251001_000001_create_users::Users;
use crate::m20251001_000002_create_catalog::{EventDates, Events, Seats, TicketTypes};

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    TotalTickets,
    Amount,
    PaymentSource,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tickets {
    Table,
    Id,
    EventId,
    UserId,
    TicketTypeId,
    ToName,
    EventDateId,
    SeatId,
}

#[derive(DeriveIden)]
enum OrderTickets {
    Table,
    OrderId,
    TicketId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 订单和票只追加，不修改。
///
/// `uniq_ticket_event_date_seat` 保证同一场次的座位最多售出一次；
/// GA 票的 seat_id 为 NULL，不会互相冲突。
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::TotalTickets).integer().not_null())
                    // 固定两位小数的字符串，例如 "50.00"
                    .col(ColumnDef::new(Orders::Amount).string_len(32).not_null())
                    .col(ColumnDef::new(Orders::PaymentSource).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_user")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_user")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::EventId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::TicketTypeId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::ToName).string_len(255).not_null())
                    .col(ColumnDef::new(Tickets::EventDateId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::SeatId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_event")
                            .from(Tickets::Table, Tickets::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_user")
                            .from(Tickets::Table, Tickets::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_ticket_type")
                            .from(Tickets::Table, Tickets::TicketTypeId)
                            .to(TicketTypes::Table, TicketTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_event_date")
                            .from(Tickets::Table, Tickets::EventDateId)
                            .to(EventDates::Table, EventDates::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_seat")
                            .from(Tickets::Table, Tickets::SeatId)
                            .to(Seats::Table, Seats::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_ticket_event_date_seat")
                    .table(Tickets::Table)
                    .col(Tickets::EventDateId)
                    .col(Tickets::SeatId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderTickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderTickets::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(OrderTickets::TicketId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(OrderTickets::OrderId)
                            .col(OrderTickets::TicketId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_ticket_order")
                            .from(OrderTickets::Table, OrderTickets::OrderId)
                            .to(Orders::Table, Orders::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_ticket_ticket")
                            .from(OrderTickets::Table, OrderTickets::TicketId)
                            .to(Tickets::Table, Tickets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_tickets_ticket_unique")
                    .table(OrderTickets::Table)
                    .col(OrderTickets::TicketId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(OrderTickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Orders::Table).to_owned())
            .await?;
        Ok(())
    }
}
