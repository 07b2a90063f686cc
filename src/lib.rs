//! # Txn-Standalone
//!
//! Context-free transaction validation for a proof-of-work storage network.
//!
//! This crate decides whether a transaction is structurally and semantically
//! well-formed without any chain state: no UTXO set, no mempool. Every node
//! must reach identical verdicts on identical input at every height,
//! including across historical hardforks.
//!
//! ## Architecture
//!
//! - Data model (`types`, `currency`)
//! - Canonical encoding (`encoding`), which the size rule measures
//! - Rule chain (`transaction`): one pure function per invariant
//! - Collaborators: tax schedule (`economic`) and signatures (`signatures`)
//! - Network parameters (`params`): activation heights passed explicitly
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Rules are deterministic and side-effect-free
//! 2. **Fixed Order**: Rules run in a fixed order and stop at the first failure
//! 3. **Exact Arithmetic**: Currency never wraps; sums are exact
//! 4. **Exact Version Pinning**: Consensus-critical dependencies are pinned
//!
//! ## Usage
//!
//! ```rust
//! use txn_standalone::types::Transaction;
//! use txn_standalone::{Currency, NetworkParams, StandaloneValidator};
//!
//! let validator = StandaloneValidator::new(NetworkParams::standard());
//! let tx = Transaction {
//!     miner_fees: vec![Currency::from(10u64)],
//!     ..Default::default()
//! };
//! assert!(validator.validate(&tx, 100).is_ok());
//! ```

pub mod types;
pub mod currency;
pub mod constants;
pub mod params;
pub mod encoding;
pub mod economic;
pub mod signatures;
pub mod transaction;
pub mod error;

// Re-export commonly used types
pub use currency::Currency;
pub use economic::{StandardTax, TaxSchedule};
pub use error::{Result, SignatureError, ValidationError};
pub use params::NetworkParams;
pub use signatures::{AcceptAllSignatures, SignatureVerifier, StandardSignatureVerifier};
pub use types::Height;

/// Standalone validator bundling network parameters with its tax and
/// signature collaborators.
///
/// Holds no mutable state; one instance can validate any number of
/// transactions, concurrently.
///
/// # Examples
///
/// ```
/// use txn_standalone::*;
/// use txn_standalone::types::*;
///
/// let validator = StandaloneValidator::new(NetworkParams::standard());
///
/// // Spending the same output twice is rejected regardless of chain state.
/// let input = CoinInput {
///     parent_id: CoinOutputId([1; 32]),
///     unlock_conditions: UnlockConditions::default(),
/// };
/// let tx = Transaction {
///     coin_inputs: vec![input.clone(), input],
///     ..Default::default()
/// };
///
/// assert_eq!(validator.validate(&tx, 0), Err(ValidationError::DoubleSpend));
/// ```
pub struct StandaloneValidator<T = StandardTax, V = StandardSignatureVerifier> {
    params: NetworkParams,
    tax: T,
    verifier: V,
}

impl StandaloneValidator {
    /// Validator with the standard tax schedule and signature verifier.
    pub fn new(params: NetworkParams) -> Self {
        Self::with_collaborators(params, StandardTax, StandardSignatureVerifier::new())
    }
}

impl<T: TaxSchedule, V: SignatureVerifier> StandaloneValidator<T, V> {
    /// Validator with caller-supplied collaborators.
    ///
    /// # Examples
    ///
    /// ```
    /// use txn_standalone::*;
    /// use txn_standalone::types::Transaction;
    ///
    /// let validator = StandaloneValidator::with_collaborators(
    ///     NetworkParams::testing(),
    ///     StandardTax,
    ///     AcceptAllSignatures,
    /// );
    /// assert!(validator.validate(&Transaction::default(), 0).is_ok());
    /// ```
    pub fn with_collaborators(params: NetworkParams, tax: T, verifier: V) -> Self {
        Self {
            params,
            tax,
            verifier,
        }
    }

    /// Network parameters every rule is checked against.
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Run every standalone rule against `tx` at `height`, returning the
    /// first failure.
    pub fn validate(&self, tx: &types::Transaction, height: Height) -> Result<()> {
        transaction::standalone_valid(tx, height, &self.params, &self.tax, &self.verifier)
    }
}

impl Default for StandaloneValidator {
    fn default() -> Self {
        Self::new(NetworkParams::standard())
    }
}
