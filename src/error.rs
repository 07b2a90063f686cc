//! Error types for standalone transaction validation

use thiserror::Error;

/// Every way a transaction can fail standalone validation.
///
/// Each rule returns exactly one of these; the validator never wraps or
/// aggregates them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("transaction uses a parent object twice")]
    DoubleSpend,

    #[error("file contract has invalid output sums")]
    FileContractOutputSumViolation,

    #[error("file contract window must end at least one block after it starts")]
    FileContractWindowEndViolation,

    #[error("file contract window must start in the future")]
    FileContractWindowStartViolation,

    #[error("transaction has a fund output with a non-zero claim start")]
    NonZeroClaimStart,

    #[error("transaction cannot have an output or payout that has zero value")]
    ZeroOutput,

    #[error("transaction has a zero value miner fee")]
    ZeroMinerFee,

    #[error("transaction has both a storage proof and other outputs")]
    StorageProofWithOutputs,

    #[error("timelock has not been met")]
    TimelockNotSatisfied,

    #[error("transaction is too large to fit in a block")]
    TransactionTooLarge,

    #[error("transaction contains an improperly-encoded FoundationUnlockHashUpdate")]
    InvalidFoundationUpdateEncoding,

    /// Updates cannot set either Foundation address to the void unlock hash.
    #[error("transaction contains an uninitialized FoundationUnlockHashUpdate")]
    UninitializedFoundationUpdate,

    #[error("signature verification failed: {0}")]
    Signature(#[from] SignatureError),
}

/// Failures raised by the signature collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("covered fields must be empty when the whole transaction is covered")]
    WholeTransactionViolation,

    #[error("covered field indices are not sorted, unique and in range")]
    SortedUniqueViolation,

    #[error("transaction has a frivolous signature")]
    FrivolousSignature,

    #[error("public key was used multiple times while signing the same input")]
    PublicKeyOveruse,

    #[error("signature references a public key index that does not exist")]
    InvalidPubKeyIndex,

    #[error("signature timelock has not expired")]
    PrematureSignature,

    #[error("transaction tries to sign an entropy public key")]
    EntropyKey,

    #[error("signature is invalid: {0}")]
    InvalidSignature(String),

    #[error("transaction has inputs with missing signatures")]
    MissingSignatures,
}

/// Errors raised while decoding canonical bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
