pub mod event_date_seats;
pub mod event_date_ticket_types;
pub mod event_dates;
pub mod events;
pub mod order_tickets;
pub mod orders;
pub mod seats;
pub mod ticket_types;
pub mod tickets;
pub mod users;
pub mod venues;

pub use event_date_seats as seat_assignment_entity;
pub use event_date_ticket_types as allocation_entity;
pub use event_dates as event_date_entity;
pub use event_dates::SeatingMode;
pub use events as event_entity;
pub use order_tickets as order_ticket_entity;
pub use orders as order_entity;
pub use seats as seat_entity;
pub use ticket_types as ticket_type_entity;
pub use tickets as ticket_entity;
pub use users as user_entity;
pub use venues as venue_entity;
