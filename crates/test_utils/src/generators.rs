//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Currency, Money, TeamId};
use domain_fees::{PaymentMethod, ProcessingFeePolicy};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::CAD),
    ]
}

/// Strategy for fee amounts in cents, up to $10,000
pub fn fee_cents_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000i64
}

/// Strategy for fee amounts as decimals with two places
pub fn fee_amount_strategy() -> impl Strategy<Value = Decimal> {
    fee_cents_strategy().prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-negative USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    fee_cents_strategy().prop_map(|cents| Money::from_minor(cents, Currency::USD))
}

/// Strategy for Money values in any supported currency
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (fee_cents_strategy(), currency_strategy())
        .prop_map(|(cents, currency)| Money::from_minor(cents, currency))
}

/// Strategy for generating valid Decimal values for percentages (0% to 100%)
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for card surcharge rates a job might configure (0% to 5%)
pub fn surcharge_percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=500u32).prop_map(|n| Decimal::new(n as i64, 2))
}

pub fn payment_method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::CreditCard),
        Just(PaymentMethod::Check),
        Just(PaymentMethod::ECheck),
    ]
}

/// Strategy for a job's processing fee settings
pub fn processing_policy_strategy() -> impl Strategy<Value = ProcessingFeePolicy> {
    (any::<bool>(), surcharge_percentage_strategy(), any::<bool>()).prop_map(
        |(add_processing_fees, percentage, apply_to_deposit)| ProcessingFeePolicy {
            add_processing_fees,
            apply_to_deposit,
            ..ProcessingFeePolicy::card_surcharge(percentage)
        },
    )
}

/// Strategy for pool and bracket sizes
pub fn team_count_strategy() -> impl Strategy<Value = u32> {
    2u32..=16u32
}

/// Strategy for generating TeamId
pub fn team_id_strategy() -> impl Strategy<Value = TeamId> {
    any::<[u8; 16]>().prop_map(|bytes| TeamId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Club names as coaches type them: words, spacing and punctuation vary
pub fn club_name_strategy() -> impl Strategy<Value = String> {
    "(The )?[A-Z][a-z]{2,10}( [A-Z][a-z]{2,8})?( Lacrosse| LC| Lax| Club)?( [0-9]{4})?"
}

/// Discount code text accepted by a code book
pub fn discount_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_-]{0,31}"
}
