//! EVM wallet provider.
//!
//! Resolves the agent's account once at construction, tracks a current
//! chain over the static registry plus a runtime overlay, and reports the
//! native-token balance through a two-tier cache. Balance reporting is
//! display-only: RPC failures are logged and degrade to `None` instead of
//! erroring the surrounding turn.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::primitives::utils::format_ether;
use alloy::providers::{DynProvider, Provider as AlloyProvider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, error, info};

use super::cache::BalanceCache;
use super::chains::{ChainConfig, DEFAULT_CHAIN, gen_chain_from_name};
use super::error::WalletError;
use super::tee::{DerivedKeypair, TeeMode};
use crate::error::Result;
use crate::runtime::{AgentRuntime, CacheManager, Memory, Provider, State};

/// Balance cache TTL for both tiers.
const CACHE_EXPIRY: Duration = Duration::from_secs(5);

/// Namespace prefixing durable cache keys.
const CACHE_NAMESPACE: &str = "evm/wallet";

/// Where the wallet's key material comes from.
///
/// Exactly one source is selected at provider construction, driven by the
/// `TEE_MODE` setting.
pub enum AccountSource {
    /// Raw private key hex string (with or without `0x` prefix).
    PrivateKey(String),
    /// Keypair derived inside a trusted execution environment.
    DerivedKeypair(DerivedKeypair),
}

impl std::fmt::Debug for AccountSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrivateKey(_) => f.write_str("AccountSource::PrivateKey(..)"),
            Self::DerivedKeypair(kp) => f
                .debug_tuple("AccountSource::DerivedKeypair")
                .field(kp)
                .finish(),
        }
    }
}

/// Wallet state for balance reporting and chain selection.
pub struct WalletProvider {
    account: Address,
    current: ChainConfig,
    overlay: HashMap<String, ChainConfig>,
    cache: BalanceCache,
}

impl std::fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletProvider")
            .field("account", &self.account)
            .field("current", &self.current.key)
            .finish_non_exhaustive()
    }
}

impl WalletProvider {
    /// Build a wallet provider.
    ///
    /// The account source is resolved to an address exactly once here.
    /// `chains` seeds the registry overlay in order; the first entry
    /// becomes the current chain, falling back to `mainnet` when none are
    /// configured.
    pub fn new(
        source: AccountSource,
        cache_manager: Arc<dyn CacheManager>,
        chains: Vec<ChainConfig>,
    ) -> std::result::Result<Self, WalletError> {
        let account = resolve_account(source)?;

        let mut overlay = HashMap::new();
        let mut first_key: Option<String> = None;
        for chain in chains {
            if first_key.is_none() {
                first_key = Some(chain.key.clone());
            }
            overlay.insert(chain.key.clone(), chain);
        }

        let current = first_key
            .and_then(|key| overlay.get(&key).cloned())
            .map(Ok)
            .unwrap_or_else(|| gen_chain_from_name(DEFAULT_CHAIN, None))?;

        info!(
            address = %account,
            chain = %current.key,
            "EVM wallet provider initialized",
        );

        Ok(Self {
            account,
            current,
            overlay,
            cache: BalanceCache::new(cache_manager, CACHE_NAMESPACE, CACHE_EXPIRY),
        })
    }

    /// The wallet's EVM address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.account
    }

    /// The currently selected chain.
    #[must_use]
    pub const fn current_chain(&self) -> &ChainConfig {
        &self.current
    }

    /// Resolve a chain by name: overlay first, then the static registry.
    #[must_use]
    pub fn chain(&self, chain_name: &str) -> Option<ChainConfig> {
        self.overlay
            .get(chain_name)
            .cloned()
            .or_else(|| gen_chain_from_name(chain_name, None).ok())
    }

    /// Insert a chain into the overlay. The static registry is never
    /// mutated.
    pub fn add_chain(&mut self, chain: ChainConfig) {
        self.overlay.insert(chain.key.clone(), chain);
    }

    /// Select the current chain, synthesizing an overlay entry from the
    /// static registry (plus an optional custom RPC URL) when the chain
    /// is not already configured.
    ///
    /// Fails with [`WalletError::InvalidChain`] for unrecognized names.
    pub fn switch_chain(
        &mut self,
        chain_name: &str,
        custom_rpc_url: Option<&str>,
    ) -> std::result::Result<(), WalletError> {
        if let Some(chain) = self.overlay.get(chain_name) {
            self.current = chain.clone();
            return Ok(());
        }

        let chain = gen_chain_from_name(chain_name, custom_rpc_url)?;
        self.overlay.insert(chain_name.to_string(), chain.clone());
        self.current = chain;
        Ok(())
    }

    /// Connect an RPC client for the named chain.
    pub async fn get_public_client(
        &self,
        chain_name: &str,
    ) -> std::result::Result<DynProvider<Ethereum>, WalletError> {
        let chain = self
            .chain(chain_name)
            .ok_or_else(|| WalletError::InvalidChain(chain_name.to_string()))?;
        let rpc_url = chain.rpc_url();

        let provider: DynProvider<Ethereum> = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(|e| WalletError::provider(format!("failed to connect to '{rpc_url}': {e}")))?
            .erased();
        Ok(provider)
    }

    /// Native-token balance of the current chain, as an 18-decimal string.
    ///
    /// Served from the two-tier cache when fresh; on a full miss the RPC
    /// endpoint is queried and the result written through both tiers.
    /// Failures are logged and reported as `None`.
    pub async fn get_wallet_balance(&self) -> Option<String> {
        let cache_key = format!("walletBalance_{}", self.current.key);
        if let Some(cached) = self.cache.get(&cache_key).await {
            debug!(chain = %self.current.key, "returning cached wallet balance");
            return Some(cached);
        }

        match self.query_balance(&self.current.key).await {
            Ok(balance) => {
                self.cache.set(&cache_key, &balance).await;
                debug!(chain = %self.current.key, "wallet balance cached");
                Some(balance)
            }
            Err(e) => {
                error!(chain = %self.current.key, error = %e, "failed to get wallet balance");
                None
            }
        }
    }

    /// One-off, uncached balance lookup against an arbitrary chain.
    pub async fn get_wallet_balance_for_chain(&self, chain_name: &str) -> Option<String> {
        match self.query_balance(chain_name).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                error!(chain = %chain_name, error = %e, "failed to get wallet balance");
                None
            }
        }
    }

    async fn query_balance(&self, chain_name: &str) -> std::result::Result<String, WalletError> {
        let client = self.get_public_client(chain_name).await?;
        let balance = client
            .get_balance(self.account)
            .await
            .map_err(|e| WalletError::provider(format!("failed to get balance: {e}")))?;
        Ok(format_ether(balance))
    }
}

/// Resolve an account source to its EVM address.
fn resolve_account(source: AccountSource) -> std::result::Result<Address, WalletError> {
    match source {
        AccountSource::PrivateKey(key) => {
            let stripped = key.strip_prefix("0x").unwrap_or(&key);
            let signer = stripped
                .parse::<PrivateKeySigner>()
                .map_err(|e| WalletError::config(format!("invalid private key: {e}")))?;
            Ok(signer.address())
        }
        AccountSource::DerivedKeypair(keypair) => Ok(keypair.address()),
    }
}

/// Build the chain overlay from host configuration.
///
/// Each configured chain may carry an `ETHEREUM_PROVIDER_<CHAINNAME>` RPC
/// override; `EVM_PROVIDER_URL` additionally pins a custom mainnet
/// endpoint.
fn gen_chains_from_runtime(runtime: &dyn AgentRuntime) -> Result<Vec<ChainConfig>> {
    let mut chains = Vec::new();

    for chain_name in runtime.configured_chains() {
        let rpc_url =
            runtime.get_setting(&format!("ETHEREUM_PROVIDER_{}", chain_name.to_uppercase()));
        chains.push(gen_chain_from_name(&chain_name, rpc_url.as_deref())?);
    }

    if let Some(mainnet_rpc_url) = runtime.get_setting("EVM_PROVIDER_URL") {
        chains.push(gen_chain_from_name(DEFAULT_CHAIN, Some(&mainnet_rpc_url))?);
    }

    Ok(chains)
}

/// Construct a [`WalletProvider`] from host settings.
///
/// `TEE_MODE` selects the account source: enabled modes require
/// `WALLET_SECRET_SALT` and a host [`DeriveKeyProvider`] and derive the
/// keypair for key path `"evm"`; otherwise `EVM_PRIVATE_KEY` is required.
///
/// [`DeriveKeyProvider`]: super::tee::DeriveKeyProvider
pub async fn init_wallet_provider(runtime: &dyn AgentRuntime) -> Result<WalletProvider> {
    let tee_mode = TeeMode::parse(runtime.get_setting("TEE_MODE").as_deref())?;
    let chains = gen_chains_from_runtime(runtime)?;

    let source = if tee_mode.is_enabled() {
        let salt = runtime.get_setting("WALLET_SECRET_SALT").ok_or_else(|| {
            WalletError::config("WALLET_SECRET_SALT required when TEE_MODE is enabled")
        })?;
        let derive_key_provider = runtime.derive_key_provider().ok_or_else(|| {
            WalletError::config("TEE_MODE is enabled but the host provides no derive-key provider")
        })?;
        let keypair = derive_key_provider
            .derive_ecdsa_keypair(&salt, "evm", runtime.agent_id())
            .await?;
        AccountSource::DerivedKeypair(keypair)
    } else {
        let private_key = runtime
            .get_setting("EVM_PRIVATE_KEY")
            .ok_or_else(|| WalletError::config("EVM_PRIVATE_KEY is missing"))?;
        AccountSource::PrivateKey(private_key)
    };

    Ok(WalletProvider::new(
        source,
        runtime.cache_manager(),
        chains,
    )?)
}

/// Host-facing wallet balance reporter.
///
/// Produces the display summary the host injects into composed state. Any
/// failure — configuration, derivation, RPC — is logged and degrades to
/// `None`; balance display is not transaction-critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmWalletProvider;

#[async_trait]
impl Provider for EvmWalletProvider {
    async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        _message: &Memory,
        state: Option<&State>,
    ) -> Option<String> {
        match wallet_report(runtime, state).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "error in EVM wallet provider");
                None
            }
        }
    }
}

async fn wallet_report(runtime: &dyn AgentRuntime, state: Option<&State>) -> Result<String> {
    let wallet = init_wallet_provider(runtime).await?;
    let balance = wallet.get_wallet_balance().await;
    let agent_name = state
        .and_then(|s| s.agent_name.clone())
        .unwrap_or_else(|| "The agent".to_string());
    let public_address = runtime.get_setting("EVM_PUBLIC_ADDRESS");

    Ok(format_wallet_report(
        &agent_name,
        wallet.address(),
        public_address.as_deref(),
        balance.as_deref(),
        wallet.current_chain(),
    ))
}

fn format_wallet_report(
    agent_name: &str,
    address: Address,
    public_address: Option<&str>,
    balance: Option<&str>,
    chain: &ChainConfig,
) -> String {
    let mut report = format!("{agent_name}'s EVM Wallet Address: {address}");
    if let Some(public_address) = public_address {
        report.push_str(&format!("\nPublic Address: {public_address}"));
    }
    report.push_str(&format!(
        "\nBalance: {} {}",
        balance.unwrap_or("unknown"),
        chain.native_currency.symbol
    ));
    report.push_str(&format!("\nChain ID: {}, Name: {}", chain.id, chain.name));
    report
}
