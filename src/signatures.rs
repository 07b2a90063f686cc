//! Signature collaborator
//!
//! The validator checks signatures last, through [`SignatureVerifier`].
//! [`StandardSignatureVerifier`] enforces covered-field rules, signing-slot
//! accounting and secp256k1 ECDSA verification over a SHA-256 sig-hash.

use crate::constants::*;
use crate::encoding::{Encodable, Encoder, TransactionSansSignatures};
use crate::error::{Result, SignatureError, ValidationError};
use crate::params::NetworkParams;
use crate::types::*;
use secp256k1::{ecdsa::Signature, Message, PublicKey as SecpPublicKey, Secp256k1, VerifyOnly};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

/// Checks that every input of a transaction is properly authorized.
pub trait SignatureVerifier {
    fn verify_signatures(
        &self,
        tx: &Transaction,
        height: Height,
        params: &NetworkParams,
    ) -> Result<()>;
}

impl<T: SignatureVerifier + ?Sized> SignatureVerifier for &T {
    fn verify_signatures(
        &self,
        tx: &Transaction,
        height: Height,
        params: &NetworkParams,
    ) -> Result<()> {
        (**self).verify_signatures(tx, height, params)
    }
}

/// Skips signature checks, for callers that verified signatures elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllSignatures;

impl SignatureVerifier for AcceptAllSignatures {
    fn verify_signatures(&self, _: &Transaction, _: Height, _: &NetworkParams) -> Result<()> {
        Ok(())
    }
}

pub struct StandardSignatureVerifier {
    secp: Secp256k1<VerifyOnly>,
}

impl StandardSignatureVerifier {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }

    fn verify_secp256k1(
        &self,
        key: &[u8],
        signature: &[u8],
        hash: &Hash,
    ) -> std::result::Result<(), SignatureError> {
        let pubkey = SecpPublicKey::from_slice(key)
            .map_err(|e| SignatureError::InvalidSignature(format!("bad public key: {}", e)))?;
        let signature = Signature::from_compact(signature)
            .map_err(|e| SignatureError::InvalidSignature(format!("bad signature: {}", e)))?;
        let message = Message::from_digest_slice(hash)
            .map_err(|e| SignatureError::InvalidSignature(e.to_string()))?;
        self.secp
            .verify_ecdsa(&message, &signature, &pubkey)
            .map_err(|e| SignatureError::InvalidSignature(e.to_string()))
    }
}

impl Default for StandardSignatureVerifier {
    fn default() -> Self {
        Self::new()
    }
}

/// One input or revision awaiting signatures.
struct SigningSlot<'a> {
    remaining: u64,
    possible_keys: &'a [PublicKey],
    used_keys: HashSet<u64>,
}

impl SignatureVerifier for StandardSignatureVerifier {
    fn verify_signatures(
        &self,
        tx: &Transaction,
        height: Height,
        params: &NetworkParams,
    ) -> Result<()> {
        valid_covered_fields(tx)?;

        let mut slots: HashMap<Hash, SigningSlot> = HashMap::new();
        let parents = tx
            .coin_inputs
            .iter()
            .map(|input| (input.parent_id.0, &input.unlock_conditions))
            .chain(
                tx.file_contract_revisions
                    .iter()
                    .map(|rev| (rev.parent_id.0, &rev.unlock_conditions)),
            )
            .chain(
                tx.fund_inputs
                    .iter()
                    .map(|input| (input.parent_id.0, &input.unlock_conditions)),
            );
        for (parent_id, conditions) in parents {
            let slot = SigningSlot {
                remaining: conditions.signatures_required,
                possible_keys: &conditions.public_keys,
                used_keys: HashSet::new(),
            };
            if slots.insert(parent_id, slot).is_some() {
                return Err(ValidationError::DoubleSpend);
            }
        }

        for sig in &tx.transaction_signatures {
            let slot = match slots.get_mut(&sig.parent_id) {
                Some(slot) if slot.remaining > 0 => slot,
                _ => return Err(SignatureError::FrivolousSignature.into()),
            };
            if slot.used_keys.contains(&sig.public_key_index) {
                return Err(SignatureError::PublicKeyOveruse.into());
            }
            let key = usize::try_from(sig.public_key_index)
                .ok()
                .and_then(|index| slot.possible_keys.get(index))
                .ok_or(SignatureError::InvalidPubKeyIndex)?;
            if sig.timelock > height {
                return Err(SignatureError::PrematureSignature.into());
            }

            if key.algorithm == SIGNATURE_ENTROPY {
                return Err(SignatureError::EntropyKey.into());
            } else if key.algorithm == SIGNATURE_SECP256K1 {
                let hash = sig_hash(tx, sig, height, params);
                self.verify_secp256k1(&key.key, &sig.signature, &hash)?;
            }
            // Unrecognized algorithms pass so new schemes can be soft-forked in.

            slot.used_keys.insert(sig.public_key_index);
            slot.remaining -= 1;
        }

        if slots.values().any(|slot| slot.remaining != 0) {
            return Err(SignatureError::MissingSignatures.into());
        }
        Ok(())
    }
}

/// Indices must be strictly increasing and below `max`.
fn sorted_unique(indices: &[u64], max: usize) -> bool {
    let in_range = indices.last().map_or(true, |&last| last < max as u64);
    in_range && indices.windows(2).all(|pair| pair[0] < pair[1])
}

/// Check every signature's covered fields against the transaction.
pub fn valid_covered_fields(tx: &Transaction) -> std::result::Result<(), SignatureError> {
    for sig in &tx.transaction_signatures {
        let cf = &sig.covered_fields;
        let fields: [(&[u64], usize); 10] = [
            (&cf.coin_inputs, tx.coin_inputs.len()),
            (&cf.coin_outputs, tx.coin_outputs.len()),
            (&cf.file_contracts, tx.file_contracts.len()),
            (&cf.file_contract_revisions, tx.file_contract_revisions.len()),
            (&cf.storage_proofs, tx.storage_proofs.len()),
            (&cf.fund_inputs, tx.fund_inputs.len()),
            (&cf.fund_outputs, tx.fund_outputs.len()),
            (&cf.miner_fees, tx.miner_fees.len()),
            (&cf.arbitrary_data, tx.arbitrary_data.len()),
            (&cf.transaction_signatures, tx.transaction_signatures.len()),
        ];

        // Signatures may still be covered individually.
        if cf.whole_transaction && fields[..9].iter().any(|(field, _)| !field.is_empty()) {
            return Err(SignatureError::WholeTransactionViolation);
        }
        if !fields.iter().all(|(field, max)| sorted_unique(field, *max)) {
            return Err(SignatureError::SortedUniqueViolation);
        }
    }
    Ok(())
}

fn encode_covered<T: Encodable>(encoder: &mut Encoder, items: &[T], indices: &[u64]) {
    for &index in indices {
        if let Some(item) = usize::try_from(index).ok().and_then(|i| items.get(i)) {
            item.encode(encoder);
        }
    }
}

/// Replay prefix mixed into sig-hashes at `height`.
pub fn replay_prefix(height: Height, params: &NetworkParams) -> &'static [u8] {
    if height >= params.foundation_hardfork_height {
        FOUNDATION_REPLAY_PREFIX
    } else if height >= params.asic_hardfork_height {
        ASIC_REPLAY_PREFIX
    } else {
        &[]
    }
}

/// Hash a secp256k1 signature must sign: the covered parts of `tx`, the
/// signature's own header, the covered signatures and the replay prefix.
pub fn sig_hash(
    tx: &Transaction,
    sig: &TransactionSignature,
    height: Height,
    params: &NetworkParams,
) -> Hash {
    let cf = &sig.covered_fields;
    let mut encoder = Encoder::new();
    if cf.whole_transaction {
        TransactionSansSignatures(tx).encode(&mut encoder);
    } else {
        encode_covered(&mut encoder, &tx.coin_inputs, &cf.coin_inputs);
        encode_covered(&mut encoder, &tx.coin_outputs, &cf.coin_outputs);
        encode_covered(&mut encoder, &tx.file_contracts, &cf.file_contracts);
        encode_covered(&mut encoder, &tx.file_contract_revisions, &cf.file_contract_revisions);
        encode_covered(&mut encoder, &tx.storage_proofs, &cf.storage_proofs);
        encode_covered(&mut encoder, &tx.fund_inputs, &cf.fund_inputs);
        encode_covered(&mut encoder, &tx.fund_outputs, &cf.fund_outputs);
        encode_covered(&mut encoder, &tx.miner_fees, &cf.miner_fees);
        encode_covered(&mut encoder, &tx.arbitrary_data, &cf.arbitrary_data);
    }
    sig.parent_id.encode(&mut encoder);
    encoder.write_u64(sig.public_key_index);
    encoder.write_u64(sig.timelock);
    encode_covered(&mut encoder, &tx.transaction_signatures, &cf.transaction_signatures);
    encoder.write_slice(replay_prefix(height, params));

    let digest = Sha256::digest(encoder.into_bytes());
    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(&digest);
    hash
}
