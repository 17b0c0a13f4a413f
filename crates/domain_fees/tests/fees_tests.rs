//! Fee Calculation Tests
//!
//! # Test Organization
//!
//! - `discount_tests` - DiscountCalculator examples and properties
//! - `team_fee_tests` - TeamFeeCalculator phases, payment methods and properties
//! - `insurable_tests` - InsurableAmountCalculator
//! - `code_book_tests` - discount codes feeding team fees

use chrono::NaiveDate;
use core_kernel::round_money;
use domain_fees::{
    DiscountCalculator, DiscountCodeBook, FeeError, InsurableAmountCalculator, NewDiscountCode,
    PaymentMethod, ProcessingFeePolicy, TeamFeeCalculator, TeamFeeInput,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cents(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

mod discount_tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(DiscountCalculator::calculate(dec!(100), dec!(10), true), dec!(10.00));
        assert_eq!(DiscountCalculator::calculate(dec!(5), dec!(50), false), dec!(5));
    }

    #[test]
    fn test_one_hundred_percent_is_whole_base() {
        assert_eq!(DiscountCalculator::calculate(dec!(849.99), dec!(100), true), dec!(849.99));
    }

    proptest! {
        #[test]
        fn percentage_discount_stays_within_base(base in 1i64..10_000_000i64, pct in 0i64..=10_000i64) {
            let base = cents(base);
            let pct = cents(pct);
            let discount = DiscountCalculator::calculate(base, pct, true);

            prop_assert!(discount >= Decimal::ZERO);
            prop_assert!(discount <= base);

            let expected = round_money(base * pct / dec!(100));
            if expected > base {
                prop_assert_eq!(discount, base);
            } else {
                prop_assert_eq!(discount, expected);
            }
        }

        #[test]
        fn fixed_discount_is_min_of_value_and_base(base in 0i64..10_000_000i64, value in 0i64..10_000_000i64) {
            let base = cents(base);
            let value = cents(value);
            let discount = DiscountCalculator::calculate(base, value, false);

            prop_assert!(discount >= Decimal::ZERO);
            prop_assert_eq!(discount, value.min(base));
        }

        #[test]
        fn discount_near_the_decimal_limit_stays_within_base(
            below_max in any::<u64>(),
            pct in 0i64..=20_000i64,
            is_percentage in any::<bool>(),
        ) {
            let base = Decimal::MAX - Decimal::from(below_max);
            let discount = DiscountCalculator::calculate(base, cents(pct), is_percentage);

            prop_assert!(discount >= Decimal::ZERO);
            prop_assert!(discount <= base);
        }
    }
}

mod team_fee_tests {
    use super::*;

    fn policy(apply_to_deposit: bool) -> ProcessingFeePolicy {
        ProcessingFeePolicy {
            apply_to_deposit,
            ..ProcessingFeePolicy::card_surcharge(dec!(3.5))
        }
    }

    #[test]
    fn test_deposit_phase_surcharged_when_configured() {
        let input = TeamFeeInput::new_registration(
            dec!(300), dec!(700), false, Decimal::ZERO, policy(true), PaymentMethod::CreditCard,
        )
        .unwrap();
        let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();

        assert_eq!(fees.fee_base, dec!(300));
        assert_eq!(fees.fee_processing, dec!(10.50));
        assert_eq!(fees.fee_total, dec!(310.50));
    }

    #[test]
    fn test_deposit_phase_not_surcharged_otherwise() {
        let input = TeamFeeInput::new_registration(
            dec!(300), dec!(700), false, Decimal::ZERO, policy(false), PaymentMethod::CreditCard,
        )
        .unwrap();
        assert_eq!(TeamFeeCalculator::calculate_team_fees(&input).unwrap().fee_processing, Decimal::ZERO);
    }

    #[test]
    fn test_processing_disabled() {
        let input = TeamFeeInput::new_registration(
            dec!(300), dec!(700), true, Decimal::ZERO, ProcessingFeePolicy::none(), PaymentMethod::CreditCard,
        )
        .unwrap();
        let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();
        assert_eq!(fees.fee_processing, Decimal::ZERO);
        assert_eq!(fees.fee_total, dec!(1000));
    }

    #[test]
    fn test_negative_components_are_ignored() {
        let input = TeamFeeInput::new_registration(
            dec!(-10), dec!(-20), true, dec!(-5), policy(true), PaymentMethod::Check,
        )
        .unwrap();
        let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();
        assert_eq!(fees.fee_base, Decimal::ZERO);
        assert_eq!(fees.fee_discount, Decimal::ZERO);
        assert_eq!(fees.fee_total, Decimal::ZERO);
    }

    #[test]
    fn test_discount_larger_than_fee_is_capped() {
        let input = TeamFeeInput::new_registration(
            dec!(300), dec!(0), false, dec!(500), policy(true), PaymentMethod::CreditCard,
        )
        .unwrap();
        let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();
        assert_eq!(fees.fee_discount, dec!(300));
        assert_eq!(fees.fee_processing, Decimal::ZERO);
        assert_eq!(fees.fee_total, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn paid_in_full_never_surcharged(
            deposit in 0i64..500_000i64,
            balance in 0i64..500_000i64,
            discount in 0i64..200_000i64,
            current in 0i64..1_000_000i64,
            overpay in 0i64..100_000i64,
            full in any::<bool>(),
            to_deposit in any::<bool>(),
            add in any::<bool>(),
            method in prop_oneof![
                Just(PaymentMethod::CreditCard),
                Just(PaymentMethod::Check),
                Just(PaymentMethod::ECheck),
            ],
        ) {
            let input = TeamFeeInput {
                deposit: cents(deposit),
                balance_due: cents(balance),
                charge_full_amount: full,
                discount: cents(discount),
                processing: ProcessingFeePolicy {
                    add_processing_fees: add,
                    rate: core_kernel::Rate::from_percentage(dec!(3.5)),
                    apply_to_deposit: to_deposit,
                },
                payment_method: method,
                paid_total: cents(current + overpay),
                current_fee_total: cents(current),
            };

            let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();
            prop_assert_eq!(fees.fee_processing, Decimal::ZERO);
        }

        #[test]
        fn owed_is_never_negative(
            deposit in 0i64..500_000i64,
            paid in 0i64..2_000_000i64,
        ) {
            let mut input = TeamFeeInput::new_registration(
                cents(deposit), Decimal::ZERO, false, Decimal::ZERO,
                ProcessingFeePolicy::card_surcharge(dec!(3)), PaymentMethod::CreditCard,
            )
            .unwrap();
            input.paid_total = cents(paid);

            let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();
            prop_assert!(fees.owed_total >= Decimal::ZERO);
            prop_assert_eq!(fees.fee_total, fees.fee_base - fees.fee_discount + fees.fee_processing);
        }

        #[test]
        fn oversized_amounts_are_errors_not_panics(below_max in any::<u64>(), full in any::<bool>()) {
            let huge = Decimal::MAX - Decimal::from(below_max);
            let result = TeamFeeInput::new_registration(
                huge, huge, full, Decimal::ZERO,
                ProcessingFeePolicy::card_surcharge(dec!(3.5)), PaymentMethod::CreditCard,
            )
            .and_then(|input| TeamFeeCalculator::calculate_team_fees(&input));
            prop_assert!(matches!(result, Err(FeeError::Money(_))));
        }
    }
}

mod insurable_tests {
    use super::*;

    #[test]
    fn test_insures_discounted_team_fee() {
        let input = TeamFeeInput::new_registration(
            dec!(250), dec!(600), true, dec!(85), ProcessingFeePolicy::card_surcharge(dec!(3.5)),
            PaymentMethod::CreditCard,
        )
        .unwrap();
        let fees = TeamFeeCalculator::calculate_team_fees(&input).unwrap();

        assert!(fees.fee_processing > Decimal::ZERO);
        assert_eq!(InsurableAmountCalculator::for_breakdown(&fees, false), dec!(765));
        assert_eq!(InsurableAmountCalculator::for_breakdown(&fees, true), Decimal::ZERO);
    }
}

mod code_book_tests {
    use super::*;

    #[test]
    fn test_redeemed_code_feeds_team_fee() {
        let mut book = DiscountCodeBook::new(core_kernel::JobId::new());
        book.add(NewDiscountCode {
            code: "EARLY".to_string(),
            value: dec!(15),
            is_percentage: true,
            valid_from: None,
            valid_until: NaiveDate::from_ymd_opt(2025, 1, 31),
            max_uses: Some(10),
        })
        .unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let base = TeamFeeCalculator::fee_base(dec!(250), dec!(600), true).unwrap();
        let discount = book.redeem("early", today, base).unwrap();
        assert_eq!(discount, dec!(127.50));

        let input = TeamFeeInput::new_registration(
            dec!(250), dec!(600), true, discount, ProcessingFeePolicy::none(), PaymentMethod::Check,
        )
        .unwrap();
        assert_eq!(TeamFeeCalculator::calculate_team_fees(&input).unwrap().fee_total, dec!(722.50));
        assert_eq!(book.get("EARLY").unwrap().times_used, 1);
    }

    #[test]
    fn test_expired_code_is_rejected() {
        let mut book = DiscountCodeBook::new(core_kernel::JobId::new());
        book.add(NewDiscountCode {
            code: "EARLY".to_string(),
            value: dec!(15),
            is_percentage: true,
            valid_from: None,
            valid_until: NaiveDate::from_ymd_opt(2025, 1, 31),
            max_uses: None,
        })
        .unwrap();

        let late = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(matches!(book.redeem("EARLY", late, dec!(100)), Err(FeeError::Expired { .. })));
        assert!(matches!(book.redeem("LATE", late, dec!(100)), Err(FeeError::CodeNotFound(_))));
    }
}
