pub mod jwt;
pub mod money;

pub use jwt::*;
pub use money::format_cents;
