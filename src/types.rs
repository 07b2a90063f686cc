//! Core transaction types for standalone validation

use crate::constants::{SEGMENT_SIZE, SPECIFIER_LEN};
use crate::currency::Currency;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Block height
pub type Height = u64;

macro_rules! hash_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Hash);

        impl From<Hash> for $name {
            fn from(hash: Hash) -> Self {
                $name(hash)
            }
        }
    };
}

hash_id!(
    /// Identifies a spendable coin output.
    CoinOutputId
);
hash_id!(
    /// Identifies a spendable fund output.
    FundOutputId
);
hash_id!(
    /// Identifies a file contract.
    FileContractId
);
hash_id!(
    /// Address: hash of the unlock conditions that can spend an output.
    UnlockHash
);

impl UnlockHash {
    /// The void address, which nobody can spend from.
    pub const VOID: UnlockHash = UnlockHash([0u8; 32]);

    pub fn is_void(&self) -> bool {
        *self == UnlockHash::VOID
    }
}

/// Fixed-width, zero-padded ASCII tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specifier(pub [u8; SPECIFIER_LEN]);

impl Specifier {
    /// Build a specifier from up to 16 bytes of `name`; longer names are
    /// truncated.
    pub const fn new(name: &[u8]) -> Specifier {
        let mut bytes = [0u8; SPECIFIER_LEN];
        let mut i = 0;
        while i < name.len() && i < SPECIFIER_LEN {
            bytes[i] = name[i];
            i += 1;
        }
        Specifier(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A public key tagged with its signature algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub algorithm: Specifier,
    pub key: ByteString,
}

/// Conditions that authorize spending an input or revising a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockConditions {
    pub timelock: Height,
    pub public_keys: Vec<PublicKey>,
    pub signatures_required: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInput {
    pub parent_id: CoinOutputId,
    pub unlock_conditions: UnlockConditions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinOutput {
    pub value: Currency,
    pub unlock_hash: UnlockHash,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundInput {
    pub parent_id: FundOutputId,
    pub unlock_conditions: UnlockConditions,
    pub claim_unlock_hash: UnlockHash,
}

/// Fund output. `claim_start` is reserved: it travels on the wire but is
/// only ever filled in during state transition, so it must be zero here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundOutput {
    pub value: Currency,
    pub unlock_hash: UnlockHash,
    pub claim_start: Currency,
}

/// Escrow paying `valid_proof_outputs` if a storage proof lands inside
/// `[window_start, window_end)`, `missed_proof_outputs` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContract {
    pub file_size: u64,
    pub file_merkle_root: Hash,
    pub window_start: Height,
    pub window_end: Height,
    pub payout: Currency,
    pub valid_proof_outputs: Vec<CoinOutput>,
    pub missed_proof_outputs: Vec<CoinOutput>,
    pub unlock_hash: UnlockHash,
    pub revision_number: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContractRevision {
    pub parent_id: FileContractId,
    pub unlock_conditions: UnlockConditions,
    pub new_revision_number: u64,
    pub new_file_size: u64,
    pub new_file_merkle_root: Hash,
    pub new_window_start: Height,
    pub new_window_end: Height,
    pub new_valid_proof_outputs: Vec<CoinOutput>,
    pub new_missed_proof_outputs: Vec<CoinOutput>,
    pub new_unlock_hash: UnlockHash,
}

/// One leaf of the stored file.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Segment(pub [u8; SEGMENT_SIZE]);

impl Default for Segment {
    fn default() -> Self {
        Segment([0u8; SEGMENT_SIZE])
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment(")?;
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "..)")
    }
}

impl Serialize for Segment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SegmentVisitor;

        impl<'de> Visitor<'de> for SegmentVisitor {
            type Value = Segment;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "{} bytes", SEGMENT_SIZE)
            }

            fn visit_bytes<E>(self, value: &[u8]) -> std::result::Result<Segment, E>
            where
                E: de::Error,
            {
                let bytes: [u8; SEGMENT_SIZE] = value
                    .try_into()
                    .map_err(|_| E::invalid_length(value.len(), &self))?;
                Ok(Segment(bytes))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Segment, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes = [0u8; SEGMENT_SIZE];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(de::Error::invalid_length(SEGMENT_SIZE + 1, &self));
                }
                Ok(Segment(bytes))
            }
        }

        deserializer.deserialize_bytes(SegmentVisitor)
    }
}

/// Proof that the host still stores a segment of a contracted file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProof {
    pub parent_id: FileContractId,
    pub segment: Segment,
    pub hash_set: Vec<Hash>,
}

/// Which parts of a transaction a signature commits to. Each list holds
/// indices into the matching transaction field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveredFields {
    pub whole_transaction: bool,
    pub coin_inputs: Vec<u64>,
    pub coin_outputs: Vec<u64>,
    pub file_contracts: Vec<u64>,
    pub file_contract_revisions: Vec<u64>,
    pub storage_proofs: Vec<u64>,
    pub fund_inputs: Vec<u64>,
    pub fund_outputs: Vec<u64>,
    pub miner_fees: Vec<u64>,
    pub arbitrary_data: Vec<u64>,
    pub transaction_signatures: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// ID of the input or revised contract this signature authorizes.
    pub parent_id: Hash,
    pub public_key_index: u64,
    pub timelock: Height,
    pub covered_fields: CoveredFields,
    pub signature: ByteString,
}

/// A batch of inputs, outputs and contract actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub coin_inputs: Vec<CoinInput>,
    pub coin_outputs: Vec<CoinOutput>,
    pub file_contracts: Vec<FileContract>,
    pub file_contract_revisions: Vec<FileContractRevision>,
    pub storage_proofs: Vec<StorageProof>,
    pub fund_inputs: Vec<FundInput>,
    pub fund_outputs: Vec<FundOutput>,
    pub miner_fees: Vec<Currency>,
    pub arbitrary_data: Vec<ByteString>,
    pub transaction_signatures: Vec<TransactionSignature>,
}

/// Governance message replacing the Foundation's primary and failsafe
/// addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundationUnlockHashUpdate {
    pub new_primary: UnlockHash,
    pub new_failsafe: UnlockHash,
}
