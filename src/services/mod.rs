pub mod booking_service;
pub mod catalog_service;
pub mod inventory_ledger;
pub mod order_assembler;
pub mod order_service;
pub mod seat_allocator;
pub mod user_service;

pub use booking_service::*;
pub use catalog_service::*;
pub use inventory_ledger::*;
pub use order_assembler::*;
pub use order_service::*;
pub use seat_allocator::*;
pub use user_service::*;
