// Domain layer. No I/O, no clocks, no infrastructure types.

pub mod codec;
pub mod error;
pub mod order;

pub use codec::CodecError;
pub use error::DomainError;
pub use order::{Order, OrderId};
