//! Standalone transaction rules
//!
//! Each rule is a pure function of the transaction, the height it is being
//! validated at and the network parameters. None of them consult chain
//! state. [`standalone_valid`] runs them in their fixed order and stops at
//! the first failure; later rules assume earlier ones held.

use crate::constants::SPECIFIER_FOUNDATION;
use crate::currency::CurrencySum;
use crate::economic::TaxSchedule;
use crate::encoding::encoded_len;
use crate::error::{Result, ValidationError};
use crate::params::NetworkParams;
use crate::signatures::SignatureVerifier;
use crate::types::*;
use std::collections::HashSet;
use tracing::{debug, trace};

/// FitsInABlock: the encoded transaction must leave room for block overhead,
/// and after the Oak hardfork must also stay under the per-transaction cap.
pub fn fits_in_a_block(tx: &Transaction, height: Height, params: &NetworkParams) -> Result<()> {
    let size = encoded_len(tx) as u64;
    if size > params.base_txn_size_limit() {
        return Err(ValidationError::TransactionTooLarge);
    }
    if height >= params.oak_hardfork_height && size > params.oak_hardfork_txn_size_limit {
        return Err(ValidationError::TransactionTooLarge);
    }
    Ok(())
}

/// A transaction carrying storage proofs may carry nothing else with lasting
/// effect: a reorg can invalidate the proof, and with it the whole
/// transaction.
pub fn follows_storage_proof_rules(tx: &Transaction) -> Result<()> {
    if tx.storage_proofs.is_empty() {
        return Ok(());
    }
    if !tx.coin_outputs.is_empty()
        || !tx.file_contracts.is_empty()
        || !tx.file_contract_revisions.is_empty()
        || !tx.fund_outputs.is_empty()
    {
        return Err(ValidationError::StorageProofWithOutputs);
    }
    Ok(())
}

/// No parent object may be used twice within the transaction. A contract
/// may not be both proven and revised, even though later rules would reject
/// that anyway.
pub fn no_repeats(tx: &Transaction) -> Result<()> {
    let mut coin_inputs = HashSet::new();
    for input in &tx.coin_inputs {
        if !coin_inputs.insert(input.parent_id) {
            return Err(ValidationError::DoubleSpend);
        }
    }

    let mut contracts = HashSet::new();
    let contract_targets = tx
        .storage_proofs
        .iter()
        .map(|proof| proof.parent_id)
        .chain(tx.file_contract_revisions.iter().map(|rev| rev.parent_id));
    for id in contract_targets {
        if !contracts.insert(id) {
            return Err(ValidationError::DoubleSpend);
        }
    }

    let mut fund_inputs = HashSet::new();
    for input in &tx.fund_inputs {
        if !fund_inputs.insert(input.parent_id) {
            return Err(ValidationError::DoubleSpend);
        }
    }
    Ok(())
}

/// Outputs, payouts and fees must be non-zero, and the reserved fund claim
/// field must be zero.
pub fn follows_minimum_values(tx: &Transaction) -> Result<()> {
    if tx.coin_outputs.iter().any(|output| output.value.is_zero()) {
        return Err(ValidationError::ZeroOutput);
    }
    if tx.file_contracts.iter().any(|fc| fc.payout.is_zero()) {
        return Err(ValidationError::ZeroOutput);
    }
    for output in &tx.fund_outputs {
        if !output.claim_start.is_zero() {
            return Err(ValidationError::NonZeroClaimStart);
        }
        if output.value.is_zero() {
            return Err(ValidationError::ZeroOutput);
        }
    }
    if tx.miner_fees.iter().any(|fee| fee.is_zero()) {
        return Err(ValidationError::ZeroMinerFee);
    }
    Ok(())
}

/// Whether zero-valued contract proof outputs are rejected at `height`.
/// Dormant until a network schedules it.
fn zero_contract_outputs_forbidden(height: Height, params: &NetworkParams) -> bool {
    params
        .zero_contract_output_height
        .map_or(false, |activation| height >= activation)
}

fn proof_output_sum(outputs: &[CoinOutput], forbid_zero: bool) -> Result<CurrencySum> {
    let mut sum = CurrencySum::default();
    for output in outputs {
        if forbid_zero && output.value.is_zero() {
            return Err(ValidationError::ZeroOutput);
        }
        sum.add(&output.value);
    }
    Ok(sum)
}

fn check_window(window_start: Height, window_end: Height, height: Height) -> Result<()> {
    if window_start <= height {
        return Err(ValidationError::FileContractWindowStartViolation);
    }
    if window_end <= window_start {
        return Err(ValidationError::FileContractWindowEndViolation);
    }
    Ok(())
}

/// New contracts must open their proof window in the future, close it after
/// it opens, and split exactly the post-tax payout in both outcomes.
pub fn correct_file_contracts<T: TaxSchedule + ?Sized>(
    tx: &Transaction,
    height: Height,
    params: &NetworkParams,
    tax: &T,
) -> Result<()> {
    let forbid_zero = zero_contract_outputs_forbidden(height, params);
    for fc in &tx.file_contracts {
        check_window(fc.window_start, fc.window_end, height)?;

        let valid_sum = proof_output_sum(&fc.valid_proof_outputs, forbid_zero)?;
        let missed_sum = proof_output_sum(&fc.missed_proof_outputs, forbid_zero)?;
        let output_portion = tax.post_tax(height, fc.payout);
        if !valid_sum.equals(&output_portion) || !missed_sum.equals(&output_portion) {
            return Err(ValidationError::FileContractOutputSumViolation);
        }
    }
    Ok(())
}

/// Revisions follow the same window rules; their two outcomes must pay the
/// same total. Tax was settled when the contract formed.
pub fn correct_file_contract_revisions(
    tx: &Transaction,
    height: Height,
    params: &NetworkParams,
) -> Result<()> {
    let forbid_zero = zero_contract_outputs_forbidden(height, params);
    for rev in &tx.file_contract_revisions {
        check_window(rev.new_window_start, rev.new_window_end, height)?;

        let valid_sum = proof_output_sum(&rev.new_valid_proof_outputs, forbid_zero)?;
        let missed_sum = proof_output_sum(&rev.new_missed_proof_outputs, forbid_zero)?;
        if valid_sum != missed_sum {
            return Err(ValidationError::FileContractOutputSumViolation);
        }
    }
    Ok(())
}

/// From the Foundation hardfork on, arbitrary data tagged with the
/// Foundation specifier must hold a well-formed update to non-void
/// addresses. Untagged data is never inspected.
pub fn correct_arbitrary_data(
    tx: &Transaction,
    height: Height,
    params: &NetworkParams,
) -> Result<()> {
    if height < params.foundation_hardfork_height {
        return Ok(());
    }
    for data in &tx.arbitrary_data {
        let Some(payload) = data.strip_prefix(SPECIFIER_FOUNDATION.as_bytes()) else {
            continue;
        };
        let update = FoundationUnlockHashUpdate::decode(payload)
            .map_err(|_| ValidationError::InvalidFoundationUpdateEncoding)?;
        if update.new_primary.is_void() || update.new_failsafe.is_void() {
            return Err(ValidationError::UninitializedFoundationUpdate);
        }
    }
    Ok(())
}

/// Unlock conditions are satisfied once their timelock has passed. Takes
/// the height explicitly so callers at a different effective height can
/// reuse it.
pub fn unlock_conditions_satisfied(conditions: &UnlockConditions, height: Height) -> Result<()> {
    if conditions.timelock > height {
        return Err(ValidationError::TimelockNotSatisfied);
    }
    Ok(())
}

/// Every coin input, revision and fund input must be unlocked at `height`.
pub fn valid_unlock_conditions(tx: &Transaction, height: Height) -> Result<()> {
    let conditions = tx
        .coin_inputs
        .iter()
        .map(|input| &input.unlock_conditions)
        .chain(tx.file_contract_revisions.iter().map(|rev| &rev.unlock_conditions))
        .chain(tx.fund_inputs.iter().map(|input| &input.unlock_conditions));
    for uc in conditions {
        unlock_conditions_satisfied(uc, height)?;
    }
    Ok(())
}

/// StandaloneValid: whether `tx` is valid in any context at `height`.
///
/// Rules run cheapest first and signatures last:
/// 1. size
/// 2. storage proof isolation
/// 3. no repeats
/// 4. minimum values
/// 5. file contracts
/// 6. file contract revisions
/// 7. arbitrary data
/// 8. unlock conditions
/// 9. signatures
///
/// Passing says nothing about whether the spent outputs exist or are
/// unspent; that needs chain state.
pub fn standalone_valid<T, V>(
    tx: &Transaction,
    height: Height,
    params: &NetworkParams,
    tax: &T,
    verifier: &V,
) -> Result<()>
where
    T: TaxSchedule + ?Sized,
    V: SignatureVerifier + ?Sized,
{
    let rules: [(&str, &dyn Fn() -> Result<()>); 9] = [
        ("fits_in_a_block", &|| fits_in_a_block(tx, height, params)),
        ("follows_storage_proof_rules", &|| follows_storage_proof_rules(tx)),
        ("no_repeats", &|| no_repeats(tx)),
        ("follows_minimum_values", &|| follows_minimum_values(tx)),
        ("correct_file_contracts", &|| correct_file_contracts(tx, height, params, tax)),
        ("correct_file_contract_revisions", &|| {
            correct_file_contract_revisions(tx, height, params)
        }),
        ("correct_arbitrary_data", &|| correct_arbitrary_data(tx, height, params)),
        ("valid_unlock_conditions", &|| valid_unlock_conditions(tx, height)),
        ("valid_signatures", &|| verifier.verify_signatures(tx, height, params)),
    ];

    for (rule, check) in rules {
        if let Err(error) = check() {
            debug!(rule, height, %error, "transaction rejected");
            return Err(error);
        }
    }
    trace!(height, "transaction passed standalone validation");
    Ok(())
}
