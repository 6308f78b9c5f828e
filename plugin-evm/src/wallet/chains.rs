//! Static EVM chain registry.
//!
//! A fixed set of well-known chains keyed by lowercase name. The registry
//! is immutable; runtime additions live in the [`WalletProvider`] overlay
//! and never mutate the base set.
//!
//! [`WalletProvider`]: super::WalletProvider

use super::error::WalletError;

/// The chain selected when no configuration says otherwise.
pub const DEFAULT_CHAIN: &str = "mainnet";

/// A chain's native currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
    /// Currency name (e.g. "Ether").
    pub name: &'static str,
    /// Ticker symbol (e.g. "ETH").
    pub symbol: &'static str,
    /// Number of decimals in the smallest unit.
    pub decimals: u8,
}

/// RPC and network configuration for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Registry key (lowercase, e.g. "mainnet").
    pub key: String,
    /// EIP-155 chain id.
    pub id: u64,
    /// Display name (e.g. "Ethereum").
    pub name: String,
    /// Native currency of the chain.
    pub native_currency: NativeCurrency,
    /// Public default JSON-RPC endpoint.
    pub default_rpc_url: String,
    /// Runtime-configured RPC override, preferred when set.
    pub custom_rpc_url: Option<String>,
}

impl ChainConfig {
    /// The endpoint balance queries should use.
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        self.custom_rpc_url
            .as_deref()
            .unwrap_or(&self.default_rpc_url)
    }
}

const ETH: NativeCurrency = NativeCurrency {
    name: "Ether",
    symbol: "ETH",
    decimals: 18,
};

/// Look up a chain in the static registry.
fn base_chain(key: &str) -> Option<ChainConfig> {
    let (id, name, native_currency, default_rpc_url) = match key {
        "mainnet" => (1, "Ethereum", ETH, "https://eth.merkle.io"),
        "sepolia" => (11_155_111, "Sepolia", ETH, "https://sepolia.drpc.org"),
        "base" => (8453, "Base", ETH, "https://mainnet.base.org"),
        "optimism" => (10, "OP Mainnet", ETH, "https://mainnet.optimism.io"),
        "arbitrum" => (42_161, "Arbitrum One", ETH, "https://arb1.arbitrum.io/rpc"),
        "polygon" => (
            137,
            "Polygon",
            NativeCurrency {
                name: "POL",
                symbol: "POL",
                decimals: 18,
            },
            "https://polygon-rpc.com",
        ),
        "bsc" => (
            56,
            "BNB Smart Chain",
            NativeCurrency {
                name: "BNB",
                symbol: "BNB",
                decimals: 18,
            },
            "https://bsc-dataseed.binance.org",
        ),
        "avalanche" => (
            43_114,
            "Avalanche",
            NativeCurrency {
                name: "Avalanche",
                symbol: "AVAX",
                decimals: 18,
            },
            "https://api.avax.network/ext/bc/C/rpc",
        ),
        "gnosis" => (
            100,
            "Gnosis",
            NativeCurrency {
                name: "xDAI",
                symbol: "XDAI",
                decimals: 18,
            },
            "https://rpc.gnosischain.com",
        ),
        "fantom" => (
            250,
            "Fantom",
            NativeCurrency {
                name: "Fantom",
                symbol: "FTM",
                decimals: 18,
            },
            "https://rpc.fantom.network",
        ),
        _ => return None,
    };

    Some(ChainConfig {
        key: key.to_string(),
        id,
        name: name.to_string(),
        native_currency,
        default_rpc_url: default_rpc_url.to_string(),
        custom_rpc_url: None,
    })
}

/// Synthesize a [`ChainConfig`] from the static registry, optionally
/// overriding its RPC endpoint.
///
/// Fails with [`WalletError::InvalidChain`] when the name is unknown.
pub fn gen_chain_from_name(
    chain_name: &str,
    custom_rpc_url: Option<&str>,
) -> Result<ChainConfig, WalletError> {
    let mut chain = base_chain(chain_name)
        .ok_or_else(|| WalletError::InvalidChain(chain_name.to_string()))?;
    chain.custom_rpc_url = custom_rpc_url.map(str::to_string);
    Ok(chain)
}
