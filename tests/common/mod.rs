//! Shared fixtures for integration tests

#![allow(dead_code)]

use secp256k1::{Message, PublicKey as SecpPublicKey, Secp256k1, SecretKey};
use txn_standalone::constants::{SIGNATURE_SECP256K1, SPECIFIER_FOUNDATION};
use txn_standalone::encoding::encode_to_vec;
use txn_standalone::signatures::sig_hash;
use txn_standalone::types::*;
use txn_standalone::{Currency, NetworkParams, TaxSchedule};

/// Takes a fixed amount of tax from every payout.
pub struct FlatTax(pub u64);

impl TaxSchedule for FlatTax {
    fn tax(&self, _height: Height, _payout: Currency) -> Currency {
        Currency::from(self.0)
    }
}

pub fn coins(value: u64) -> CoinOutput {
    CoinOutput {
        value: Currency::from(value),
        unlock_hash: UnlockHash([0xab; 32]),
    }
}

pub fn keypair(seed: u8) -> (SecretKey, PublicKey) {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(&[seed; 32]).unwrap();
    let public = SecpPublicKey::from_secret_key(&secp, &secret);
    (
        secret,
        PublicKey {
            algorithm: SIGNATURE_SECP256K1,
            key: public.serialize().to_vec(),
        },
    )
}

pub fn unlocked_input(parent: u8, timelock: Height) -> CoinInput {
    CoinInput {
        parent_id: CoinOutputId([parent; 32]),
        unlock_conditions: UnlockConditions {
            timelock,
            public_keys: vec![],
            signatures_required: 0,
        },
    }
}

pub fn contract(window_start: Height, payout: u64, valid: u64, missed: u64) -> FileContract {
    FileContract {
        file_size: 4096,
        file_merkle_root: [0x11; 32],
        window_start,
        window_end: window_start + 100,
        payout: Currency::from(payout),
        valid_proof_outputs: vec![coins(valid)],
        missed_proof_outputs: vec![coins(missed)],
        unlock_hash: UnlockHash([0x22; 32]),
        revision_number: 0,
    }
}

pub fn storage_proof(contract: u8) -> StorageProof {
    StorageProof {
        parent_id: FileContractId([contract; 32]),
        segment: Segment([0x5a; 64]),
        hash_set: vec![[0x01; 32], [0x02; 32]],
    }
}

pub fn foundation_update(primary: u8, failsafe: u8) -> ByteString {
    let mut data = SPECIFIER_FOUNDATION.as_bytes().to_vec();
    data.extend(encode_to_vec(&FoundationUnlockHashUpdate {
        new_primary: UnlockHash([primary; 32]),
        new_failsafe: UnlockHash([failsafe; 32]),
    }));
    data
}

/// A coin spend guarded by `key`, carrying one unsigned whole-transaction
/// signature slot.
pub fn spend_to(key: PublicKey, parent: u8, value: u64) -> Transaction {
    Transaction {
        coin_inputs: vec![CoinInput {
            parent_id: CoinOutputId([parent; 32]),
            unlock_conditions: UnlockConditions {
                timelock: 0,
                public_keys: vec![key],
                signatures_required: 1,
            },
        }],
        coin_outputs: vec![coins(value)],
        miner_fees: vec![Currency::from(1u64)],
        transaction_signatures: vec![TransactionSignature {
            parent_id: [parent; 32],
            public_key_index: 0,
            timelock: 0,
            covered_fields: CoveredFields {
                whole_transaction: true,
                ..Default::default()
            },
            signature: vec![],
        }],
        ..Default::default()
    }
}

/// Fill in signature `index` as valid at `height`.
pub fn sign(
    tx: &mut Transaction,
    index: usize,
    secret: &SecretKey,
    height: Height,
    params: &NetworkParams,
) {
    let hash = sig_hash(tx, &tx.transaction_signatures[index], height, params);
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(&hash).unwrap();
    tx.transaction_signatures[index].signature =
        secp.sign_ecdsa(&message, secret).serialize_compact().to_vec();
}
