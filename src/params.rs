//! Network parameters
//!
//! Activation heights and size limits are passed explicitly to every rule
//! instead of living in globals, so the same code validates any network
//! (or a synthetic one in tests).
//!
//! Loaded from JSON, e.g.
//! ```json
//! {
//!   "block_size_limit": 2000000,
//!   "oak_hardfork_height": 135000,
//!   "foundation_hardfork_height": 298000
//! }
//! ```
//! Any omitted field takes its [`NetworkParams::standard`] value.

use crate::types::Height;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Maximum encoded block size in bytes.
    pub block_size_limit: u64,
    /// Height from which the stricter per-transaction size cap applies.
    pub oak_hardfork_height: Height,
    pub oak_hardfork_txn_size_limit: u64,
    /// Height from which the sig-hash carries the first replay prefix.
    pub asic_hardfork_height: Height,
    /// Height from which Foundation updates in arbitrary data are checked
    /// and the sig-hash carries the second replay prefix.
    pub foundation_hardfork_height: Height,
    /// Activation of the zero-valued contract output rule. No network has
    /// scheduled it; `None` keeps it dormant.
    pub zero_contract_output_height: Option<Height>,
}

impl NetworkParams {
    /// Production network.
    pub fn standard() -> Self {
        Self {
            block_size_limit: 2_000_000,
            oak_hardfork_height: 135_000,
            oak_hardfork_txn_size_limit: 64_000,
            asic_hardfork_height: 179_000,
            foundation_hardfork_height: 298_000,
            zero_contract_output_height: None,
        }
    }

    /// Local development network with early forks.
    pub fn dev() -> Self {
        Self {
            oak_hardfork_height: 100,
            asic_hardfork_height: 20,
            foundation_hardfork_height: 100,
            ..Self::standard()
        }
    }

    /// Test network where every fork is active almost immediately.
    pub fn testing() -> Self {
        Self {
            oak_hardfork_height: 2,
            asic_hardfork_height: 5,
            foundation_hardfork_height: 50,
            ..Self::standard()
        }
    }

    /// Size cap that applies before any height-dependent limit.
    pub fn base_txn_size_limit(&self) -> u64 {
        self.block_size_limit
            .saturating_sub(crate::constants::BLOCK_OVERHEAD_RESERVE)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse network parameters")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read network parameters from {}", path.display()))?;
        Self::from_json(&contents)
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::standard()
    }
}
