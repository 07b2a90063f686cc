//! Canonical binary encoding
//!
//! Integers and lengths are 8-byte little-endian. Variable-length fields are
//! length-prefixed; fixed-size arrays (hashes, specifiers, segments) are
//! written raw. Currency is a length-prefixed minimal big-endian string.
//! Every node must agree on these bytes since the size rule depends on them.

use crate::constants::HASH_SIZE;
use crate::currency::Currency;
use crate::error::DecodeError;
use crate::types::*;

/// Anything with a canonical encoding.
pub trait Encodable {
    fn encode(&self, encoder: &mut Encoder);
}

#[derive(Debug, Default)]
pub struct Encoder {
    buffer: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(value as u8);
    }

    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_len_prefixed_bytes(&mut self, bytes: &[u8]) {
        self.write_u64(bytes.len() as u64);
        self.write_slice(bytes);
    }

    pub fn write_len_prefixed_vec<T: Encodable>(&mut self, items: &[T]) {
        self.write_u64(items.len() as u64);
        for item in items {
            item.encode(self);
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Canonical bytes of `value`.
pub fn encode_to_vec<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut encoder = Encoder::new();
    value.encode(&mut encoder);
    encoder.into_bytes()
}

/// Length of the canonical encoding of `value`.
pub fn encoded_len<T: Encodable + ?Sized>(value: &T) -> usize {
    encode_to_vec(value).len()
}

impl Encodable for u64 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_u64(*self);
    }
}

impl Encodable for Hash {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_slice(self);
    }
}

impl Encodable for ByteString {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_len_prefixed_bytes(self);
    }
}

impl Encodable for Currency {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_len_prefixed_bytes(&self.to_be_bytes_trimmed());
    }
}

macro_rules! encode_hash_id {
    ($($name:ident),*) => {
        $(
            impl Encodable for $name {
                fn encode(&self, encoder: &mut Encoder) {
                    encoder.write_slice(&self.0);
                }
            }
        )*
    };
}

encode_hash_id!(CoinOutputId, FundOutputId, FileContractId, UnlockHash);

impl Encodable for Specifier {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_slice(&self.0);
    }
}

impl Encodable for PublicKey {
    fn encode(&self, encoder: &mut Encoder) {
        self.algorithm.encode(encoder);
        encoder.write_len_prefixed_bytes(&self.key);
    }
}

impl Encodable for UnlockConditions {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_u64(self.timelock);
        encoder.write_len_prefixed_vec(&self.public_keys);
        encoder.write_u64(self.signatures_required);
    }
}

impl Encodable for CoinInput {
    fn encode(&self, encoder: &mut Encoder) {
        self.parent_id.encode(encoder);
        self.unlock_conditions.encode(encoder);
    }
}

impl Encodable for CoinOutput {
    fn encode(&self, encoder: &mut Encoder) {
        self.value.encode(encoder);
        self.unlock_hash.encode(encoder);
    }
}

impl Encodable for FundInput {
    fn encode(&self, encoder: &mut Encoder) {
        self.parent_id.encode(encoder);
        self.unlock_conditions.encode(encoder);
        self.claim_unlock_hash.encode(encoder);
    }
}

impl Encodable for FundOutput {
    fn encode(&self, encoder: &mut Encoder) {
        self.value.encode(encoder);
        self.unlock_hash.encode(encoder);
        self.claim_start.encode(encoder);
    }
}

impl Encodable for FileContract {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_u64(self.file_size);
        self.file_merkle_root.encode(encoder);
        encoder.write_u64(self.window_start);
        encoder.write_u64(self.window_end);
        self.payout.encode(encoder);
        encoder.write_len_prefixed_vec(&self.valid_proof_outputs);
        encoder.write_len_prefixed_vec(&self.missed_proof_outputs);
        self.unlock_hash.encode(encoder);
        encoder.write_u64(self.revision_number);
    }
}

impl Encodable for FileContractRevision {
    fn encode(&self, encoder: &mut Encoder) {
        self.parent_id.encode(encoder);
        self.unlock_conditions.encode(encoder);
        encoder.write_u64(self.new_revision_number);
        encoder.write_u64(self.new_file_size);
        self.new_file_merkle_root.encode(encoder);
        encoder.write_u64(self.new_window_start);
        encoder.write_u64(self.new_window_end);
        encoder.write_len_prefixed_vec(&self.new_valid_proof_outputs);
        encoder.write_len_prefixed_vec(&self.new_missed_proof_outputs);
        self.new_unlock_hash.encode(encoder);
    }
}

impl Encodable for StorageProof {
    fn encode(&self, encoder: &mut Encoder) {
        self.parent_id.encode(encoder);
        encoder.write_slice(&self.segment.0);
        encoder.write_len_prefixed_vec(&self.hash_set);
    }
}

impl Encodable for CoveredFields {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_bool(self.whole_transaction);
        encoder.write_len_prefixed_vec(&self.coin_inputs);
        encoder.write_len_prefixed_vec(&self.coin_outputs);
        encoder.write_len_prefixed_vec(&self.file_contracts);
        encoder.write_len_prefixed_vec(&self.file_contract_revisions);
        encoder.write_len_prefixed_vec(&self.storage_proofs);
        encoder.write_len_prefixed_vec(&self.fund_inputs);
        encoder.write_len_prefixed_vec(&self.fund_outputs);
        encoder.write_len_prefixed_vec(&self.miner_fees);
        encoder.write_len_prefixed_vec(&self.arbitrary_data);
        encoder.write_len_prefixed_vec(&self.transaction_signatures);
    }
}

impl Encodable for TransactionSignature {
    fn encode(&self, encoder: &mut Encoder) {
        self.parent_id.encode(encoder);
        encoder.write_u64(self.public_key_index);
        encoder.write_u64(self.timelock);
        self.covered_fields.encode(encoder);
        encoder.write_len_prefixed_bytes(&self.signature);
    }
}

/// Transaction encoding without its signatures; the part a whole-transaction
/// signature commits to.
pub struct TransactionSansSignatures<'a>(pub &'a Transaction);

impl Encodable for TransactionSansSignatures<'_> {
    fn encode(&self, encoder: &mut Encoder) {
        let tx = self.0;
        encoder.write_len_prefixed_vec(&tx.coin_inputs);
        encoder.write_len_prefixed_vec(&tx.coin_outputs);
        encoder.write_len_prefixed_vec(&tx.file_contracts);
        encoder.write_len_prefixed_vec(&tx.file_contract_revisions);
        encoder.write_len_prefixed_vec(&tx.storage_proofs);
        encoder.write_len_prefixed_vec(&tx.fund_inputs);
        encoder.write_len_prefixed_vec(&tx.fund_outputs);
        encoder.write_len_prefixed_vec(&tx.miner_fees);
        encoder.write_len_prefixed_vec(&tx.arbitrary_data);
    }
}

impl Encodable for Transaction {
    fn encode(&self, encoder: &mut Encoder) {
        TransactionSansSignatures(self).encode(encoder);
        encoder.write_len_prefixed_vec(&self.transaction_signatures);
    }
}

impl Encodable for FoundationUnlockHashUpdate {
    fn encode(&self, encoder: &mut Encoder) {
        self.new_primary.encode(encoder);
        self.new_failsafe.encode(encoder);
    }
}

/// Reads canonical bytes front to back.
struct Decoder<'a> {
    data: &'a [u8],
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn read_bytes(&mut self, n: usize) -> std::result::Result<&'a [u8], DecodeError> {
        if self.data.len() < n {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                remaining: self.data.len(),
            });
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    fn read_hash(&mut self) -> std::result::Result<Hash, DecodeError> {
        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(self.read_bytes(HASH_SIZE)?);
        Ok(hash)
    }
}

impl FoundationUnlockHashUpdate {
    /// Decode an update from the front of `data`. Bytes after the two
    /// addresses are not part of the update and are ignored.
    pub fn decode(data: &[u8]) -> std::result::Result<Self, DecodeError> {
        let mut decoder = Decoder::new(data);
        let new_primary = UnlockHash(decoder.read_hash()?);
        let new_failsafe = UnlockHash(decoder.read_hash()?);
        Ok(FoundationUnlockHashUpdate {
            new_primary,
            new_failsafe,
        })
    }
}
