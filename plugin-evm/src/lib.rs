#![cfg_attr(docsrs, feature(doc_cfg))]
//! EVM wallet and unsigned-transaction plugin for AI agent runtimes.
//!
//! This crate is a thin orchestration layer between a host agent runtime
//! and EVM-compatible chains. It registers two capabilities with the host:
//!
//! - an action, [`CreateUnsignedTxAction`](actions::CreateUnsignedTxAction),
//!   that turns natural-language-derived parameters into an unsigned
//!   `{from, to, value}` transaction record, and
//! - a provider, [`EvmWalletProvider`](wallet::EvmWalletProvider), that
//!   reports the agent's wallet address and native-token balance for
//!   display.
//!
//! Transaction signing and broadcasting are explicitly out of scope: the
//! produced transaction carries no signature and cannot be submitted
//! as-is. Parameter extraction is delegated to the host's language-model
//! call through the [`AgentRuntime`](runtime::AgentRuntime) seam.
//!
//! # Architecture
//!
//! ```text
//! Plugin ("evm")
//!   ├── CreateUnsignedTxAction
//!   │     ├── extract::build_transfer_details()  → validated BuildParams
//!   │     └── actions::build_unsigned_tx()       → UnsignedTransaction
//!   └── EvmWalletProvider
//!         └── WalletProvider (alloy RPC + two-tier balance cache)
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use plugin_evm::evm_plugin;
//!
//! let plugin = evm_plugin();
//! host.register_plugin(plugin);
//! ```

pub mod actions;
pub mod error;
pub mod extract;
pub mod plugin;
pub mod runtime;
pub mod templates;
pub mod types;
pub mod wallet;

pub use error::{Error, Result};
pub use plugin::{Plugin, evm_plugin};
pub use types::{BuildParams, UnsignedTransaction};
