//! Host-invocable actions.

mod unsigned_tx;

pub use unsigned_tx::{CreateUnsignedTxAction, build_unsigned_tx};
