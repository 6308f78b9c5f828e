//! Wallet balance reporting for the host agent runtime.
//!
//! # Architecture
//!
//! ```text
//! EvmWalletProvider (host Provider seam)
//!   └── init_wallet_provider()  → WalletProvider
//!         ├── AccountSource     → address (private key | TEE-derived)
//!         ├── chains            → static registry + runtime overlay
//!         ├── BalanceCache      → in-memory TTL tier + durable tier
//!         └── alloy RPC         → get_balance, 18-decimal formatting
//! ```
//!
//! The wallet never signs anything in this crate; it resolves an address,
//! reads balances, and formats a display summary.

mod cache;
mod chains;
mod error;
mod provider;
pub mod tee;

pub use cache::BalanceCache;
pub use chains::{ChainConfig, DEFAULT_CHAIN, NativeCurrency, gen_chain_from_name};
pub use error::WalletError;
pub use provider::{AccountSource, EvmWalletProvider, WalletProvider, init_wallet_provider};
