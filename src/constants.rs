//! Fixed consensus constants that are not network parameters

use crate::types::Specifier;

/// Length in bytes of every specifier.
pub const SPECIFIER_LEN: usize = 16;

/// Marks arbitrary data carrying a Foundation unlock hash update.
pub const SPECIFIER_FOUNDATION: Specifier = Specifier::new(b"foundation");

/// Public key algorithm whose keys can never sign.
pub const SIGNATURE_ENTROPY: Specifier = Specifier::new(b"entropy");

/// Public key algorithm verified as compact ECDSA over the sig-hash.
pub const SIGNATURE_SECP256K1: Specifier = Specifier::new(b"secp256k1");

/// Bytes reserved in every block for the header and miner payouts.
pub const BLOCK_OVERHEAD_RESERVE: u64 = 5_000;

/// Size of a storage proof leaf segment.
pub const SEGMENT_SIZE: usize = 64;

/// Size of hashes, IDs and unlock hashes.
pub const HASH_SIZE: usize = 32;

/// Share of every file contract payout taken as tax: 39 / 1000.
pub const TAX_NUMERATOR: u64 = 39;
pub const TAX_DENOMINATOR: u64 = 1_000;

/// Total number of fund shares. Tax is rounded down to a multiple of this so
/// it divides evenly among shareholders.
pub const FUND_COUNT: u64 = 10_000;

/// Replay prefixes mixed into the sig-hash after each signing hardfork.
pub const ASIC_REPLAY_PREFIX: &[u8] = &[0x00];
pub const FOUNDATION_REPLAY_PREFIX: &[u8] = &[0x01];
