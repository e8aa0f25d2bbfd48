use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Events {
    Table,
    Id,
    Slug,
    Title,
    Description,
}

#[derive(DeriveIden)]
enum Venues {
    Table,
    Id,
    Name,
    Capacity,
}

#[derive(DeriveIden)]
pub(crate) enum TicketTypes {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
pub(crate) enum Seats {
    Table,
    Id,
    VenueId,
    Section,
    Row,
    Number,
    IsAccessible,
}

/// 活动在某个场馆的一次场次
#[derive(DeriveIden)]
pub(crate) enum EventDates {
    Table,
    Id,
    EventId,
    VenueId,
    SeatingMode,
    Date,
}

/// 按票种划分的 GA 库存池
#[derive(DeriveIden)]
enum EventDateTicketTypes {
    Table,
    EventDateId,
    TicketTypeId,
    PriceCents,
    RemainingTickets,
    MaxQuantity,
}

/// 每个场次可售的座位
#[derive(DeriveIden)]
enum EventDateSeats {
    Table,
    EventDateId,
    SeatId,
    PriceCents,
    TicketTypeId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Events::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Events::Description).text().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Venues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venues::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venues::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Venues::Capacity).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TicketTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TicketTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TicketTypes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(TicketTypes::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Seats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Seats::VenueId).big_integer().not_null())
                    .col(ColumnDef::new(Seats::Section).string_len(32).not_null())
                    .col(ColumnDef::new(Seats::Row).string_len(32).not_null())
                    .col(ColumnDef::new(Seats::Number).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Seats::IsAccessible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_venue")
                            .from(Seats::Table, Seats::VenueId)
                            .to(Venues::Table, Venues::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventDates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventDates::EventId).big_integer().not_null())
                    .col(ColumnDef::new(EventDates::VenueId).big_integer().not_null())
                    // "GA" 或 "SEATED"
                    .col(ColumnDef::new(EventDates::SeatingMode).string_len(16).not_null())
                    .col(
                        ColumnDef::new(EventDates::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_date_event")
                            .from(EventDates::Table, EventDates::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_date_venue")
                            .from(EventDates::Table, EventDates::VenueId)
                            .to(Venues::Table, Venues::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventDateTicketTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventDateTicketTypes::EventDateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventDateTicketTypes::TicketTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventDateTicketTypes::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventDateTicketTypes::RemainingTickets)
                            .integer()
                            .not_null()
                            .check(Expr::col(EventDateTicketTypes::RemainingTickets).gte(0)),
                    )
                    .col(
                        ColumnDef::new(EventDateTicketTypes::MaxQuantity)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventDateTicketTypes::EventDateId)
                            .col(EventDateTicketTypes::TicketTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_allocation_event_date")
                            .from(
                                EventDateTicketTypes::Table,
                                EventDateTicketTypes::EventDateId,
                            )
                            .to(EventDates::Table, EventDates::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_allocation_ticket_type")
                            .from(
                                EventDateTicketTypes::Table,
                                EventDateTicketTypes::TicketTypeId,
                            )
                            .to(TicketTypes::Table, TicketTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventDateSeats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventDateSeats::EventDateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventDateSeats::SeatId).big_integer().not_null())
                    .col(
                        ColumnDef::new(EventDateSeats::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventDateSeats::TicketTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventDateSeats::EventDateId)
                            .col(EventDateSeats::SeatId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_assignment_event_date")
                            .from(EventDateSeats::Table, EventDateSeats::EventDateId)
                            .to(EventDates::Table, EventDates::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_assignment_seat")
                            .from(EventDateSeats::Table, EventDateSeats::SeatId)
                            .to(Seats::Table, Seats::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_assignment_ticket_type")
                            .from(EventDateSeats::Table, EventDateSeats::TicketTypeId)
                            .to(TicketTypes::Table, TicketTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 先删子表
        manager
            .drop_table(Table::drop().if_exists().table(EventDateSeats::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(EventDateTicketTypes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(EventDates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Seats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(TicketTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Venues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Events::Table).to_owned())
            .await?;
        Ok(())
    }
}
