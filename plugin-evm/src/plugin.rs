//! Plugin manifest.

use std::sync::Arc;

use crate::actions::CreateUnsignedTxAction;
use crate::runtime::{Action, Provider};
use crate::wallet::EvmWalletProvider;

/// A capability bundle registered with the host agent runtime.
pub struct Plugin {
    /// Plugin name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Actions the host may invoke.
    pub actions: Vec<Arc<dyn Action>>,
    /// Context providers queried during state composition.
    pub providers: Vec<Arc<dyn Provider>>,
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .field("providers", &self.providers.len())
            .finish_non_exhaustive()
    }
}

/// Build the EVM plugin manifest: the unsigned-transaction action plus
/// the wallet balance provider.
#[must_use]
pub fn evm_plugin() -> Plugin {
    Plugin {
        name: "evm",
        description: "EVM blockchain integration plugin",
        actions: vec![Arc::new(CreateUnsignedTxAction)],
        providers: vec![Arc::new(EvmWalletProvider)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest() {
        let plugin = evm_plugin();
        assert_eq!(plugin.name, "evm");
        assert_eq!(plugin.actions.len(), 1);
        assert_eq!(plugin.actions[0].name(), "createUnsignedTx");
        assert_eq!(plugin.providers.len(), 1);
    }
}
