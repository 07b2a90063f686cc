//! Property tests for standalone validation

mod common;

use common::*;
use proptest::prelude::*;
use txn_standalone::types::*;
use txn_standalone::*;

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        prop::collection::vec((0u8..4, 0u64..80), 0..4),
        prop::collection::vec(0u64..3, 0..4),
        prop::collection::vec(0u64..3, 0..3),
        prop::collection::vec(0u8..3, 0..3),
        prop::collection::vec((0u64..60, 0u64..200), 0..2),
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..3),
    )
        .prop_map(|(inputs, outputs, fees, proofs, contracts, data)| Transaction {
            coin_inputs: inputs
                .into_iter()
                .map(|(parent, timelock)| unlocked_input(parent, timelock))
                .collect(),
            coin_outputs: outputs.into_iter().map(coins).collect(),
            miner_fees: fees.into_iter().map(Currency::from).collect(),
            storage_proofs: proofs.into_iter().map(storage_proof).collect(),
            file_contracts: contracts
                .into_iter()
                .map(|(start, payout)| contract(start, payout, payout, payout))
                .collect(),
            arbitrary_data: data,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(tx in arb_transaction(), height in 0u64..120) {
        let validator = StandaloneValidator::new(NetworkParams::testing());
        let first = validator.validate(&tx, height);
        let second = validator.validate(&tx, height);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_timelock_is_monotonic(timelock in 0u64..10_000, height in 0u64..10_000) {
        let validator = StandaloneValidator::with_collaborators(
            NetworkParams::standard(),
            StandardTax,
            AcceptAllSignatures,
        );
        let tx = Transaction {
            coin_inputs: vec![unlocked_input(1, timelock)],
            coin_outputs: vec![coins(1)],
            ..Default::default()
        };

        let verdict = validator.validate(&tx, height);
        if height < timelock {
            prop_assert_eq!(verdict, Err(ValidationError::TimelockNotSatisfied));
            prop_assert_eq!(validator.validate(&tx, timelock), Ok(()));
        } else {
            prop_assert_eq!(verdict, Ok(()));
            prop_assert_eq!(validator.validate(&tx, height + 1), Ok(()));
        }
    }

    #[test]
    fn prop_window_start_must_be_in_future(height in 0u64..1_000, offset in 0u64..3) {
        let validator = StandaloneValidator::default();
        let tx = Transaction {
            file_contracts: vec![contract(height + offset, 100, 100, 100)],
            ..Default::default()
        };
        let verdict = validator.validate(&tx, height);
        if offset == 0 {
            prop_assert_eq!(verdict, Err(ValidationError::FileContractWindowStartViolation));
        } else {
            prop_assert_eq!(verdict, Ok(()));
        }
    }
}
