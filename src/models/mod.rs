pub mod booking;
pub mod common;
pub mod order;
pub mod pagination;
pub mod user;

pub use booking::*;
pub use common::*;
pub use order::*;
pub use pagination::*;
pub use user::*;
