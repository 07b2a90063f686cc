//! Contract tax schedule
//!
//! Forming a file contract pays a tax to fund shareholders. Proof outputs
//! must sum to the payout after that tax.

use crate::constants::{FUND_COUNT, TAX_DENOMINATOR, TAX_NUMERATOR};
use crate::currency::Currency;
use crate::types::Height;

/// Tax collaborator. Implementations must be pure and deterministic.
pub trait TaxSchedule {
    /// Tax owed on `payout` when the contract forms at `height`.
    fn tax(&self, height: Height, payout: Currency) -> Currency;

    /// PostTax: what is left of `payout` for the proof outputs.
    fn post_tax(&self, height: Height, payout: Currency) -> Currency {
        let tax = self.tax(height, payout);
        payout.checked_sub(tax).unwrap_or(Currency::ZERO)
    }
}

/// The standard schedule: 3.9% of the payout, rounded down to a multiple of
/// the fund share count.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTax;

impl TaxSchedule for StandardTax {
    fn tax(&self, _height: Height, payout: Currency) -> Currency {
        // num < den, so the product always fits.
        payout
            .mul_ratio_floor(TAX_NUMERATOR, TAX_DENOMINATOR)
            .unwrap_or(Currency::ZERO)
            .round_down(FUND_COUNT)
    }
}

impl<T: TaxSchedule + ?Sized> TaxSchedule for &T {
    fn tax(&self, height: Height, payout: Currency) -> Currency {
        (**self).tax(height, payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    #[test]
    fn test_tax_small_payout_rounds_to_zero() {
        // 3.9% of 100_000 = 3_900, below one fund share unit.
        let payout = Currency::from(100_000u64);
        assert_eq!(StandardTax.tax(0, payout), Currency::ZERO);
        assert_eq!(StandardTax.post_tax(0, payout), payout);
    }

    #[test]
    fn test_tax_rounds_down_to_fund_count() {
        // 3.9% of 1_000_000 = 39_000 -> 30_000.
        let payout = Currency::from(1_000_000u64);
        assert_eq!(StandardTax.tax(0, payout), Currency::from(30_000u64));
        assert_eq!(StandardTax.post_tax(0, payout), Currency::from(970_000u64));
    }

    #[test]
    fn test_tax_exact_multiple() {
        let payout = Currency::from(10_000_000u64);
        assert_eq!(StandardTax.tax(0, payout), Currency::from(390_000u64));
    }

    #[test]
    fn test_standard_tax_ignores_height() {
        let payout = Currency::from(1_000_000u64);
        for height in [0, 21_000, 135_000, u64::MAX] {
            assert_eq!(StandardTax.tax(height, payout), Currency::from(30_000u64));
        }
    }

    #[test]
    fn test_tax_never_exceeds_payout() {
        let payout = Currency::new(U256::MAX);
        let post = StandardTax.post_tax(500_000, payout);
        assert!(post < payout);
        assert!(!post.is_zero());
    }

    struct FlatTax(u64);

    impl TaxSchedule for FlatTax {
        fn tax(&self, _height: Height, _payout: Currency) -> Currency {
            Currency::from(self.0)
        }
    }

    #[test]
    fn test_post_tax_saturates_at_zero() {
        assert_eq!(FlatTax(50).post_tax(0, Currency::from(10u64)), Currency::ZERO);
        assert_eq!(FlatTax(10).post_tax(0, Currency::from(100u64)), Currency::from(90u64));
    }
}
