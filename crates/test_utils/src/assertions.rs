//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_fees::FeeBreakdown;
use domain_scheduling::{Game, QaIssueKind, QaReport};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that an amount is rounded to whole cents
pub fn assert_cents(amount: Decimal) {
    assert_eq!(
        amount,
        amount.round_dp(2),
        "Expected an amount in whole cents, got {}",
        amount
    );
}

/// Asserts the relationships every fee breakdown must satisfy
///
/// # Panics
///
/// Panics if the discount exceeds the base, any part is negative, or the
/// total is not base - discount + processing
pub fn assert_breakdown_consistent(fees: &FeeBreakdown) {
    assert!(fees.fee_discount >= Decimal::ZERO, "Negative discount: {:?}", fees);
    assert!(
        fees.fee_discount <= fees.fee_base,
        "Discount {} exceeds base {}",
        fees.fee_discount,
        fees.fee_base
    );
    assert!(fees.fee_processing >= Decimal::ZERO, "Negative processing fee: {:?}", fees);
    assert!(fees.owed_total >= Decimal::ZERO, "Negative owed total: {:?}", fees);
    assert_eq!(
        fees.fee_total,
        fees.fee_base - fees.fee_discount + fees.fee_processing,
        "Total doesn't add up: {:?}",
        fees
    );
    assert_cents(fees.fee_total);
}

/// Asserts that no two games share a field at overlapping times
pub fn assert_no_field_overlaps(games: &[Game]) {
    for (i, a) in games.iter().enumerate() {
        for b in &games[i + 1..] {
            assert!(
                a.field_id != b.field_id || !a.window().overlaps(&b.window()),
                "Games {} and {} overlap on field {}",
                a.game_number,
                b.game_number,
                a.field_id
            );
        }
    }
}

/// Asserts that no side plays two games at overlapping times
pub fn assert_no_team_overlaps(games: &[Game]) {
    for (i, a) in games.iter().enumerate() {
        for b in &games[i + 1..] {
            if a.division_id != b.division_id || !a.window().overlaps(&b.window()) {
                continue;
            }
            for side in a.participants() {
                assert!(
                    !b.involves(&side),
                    "{} plays games {} and {} at the same time",
                    side,
                    a.game_number,
                    b.game_number
                );
            }
        }
    }
}

/// Asserts that a QA report found nothing
pub fn assert_qa_clean(report: &QaReport) {
    assert!(
        report.is_clean(),
        "Expected a clean schedule, found:\n{}",
        report
            .issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Asserts that a QA report contains exactly `expected` issues of `kind`
pub fn assert_qa_count(report: &QaReport, kind: QaIssueKind, expected: usize) {
    let actual = report.count(kind);
    assert_eq!(
        actual, expected,
        "Expected {} {:?} issues, found {}: {:?}",
        expected, kind, actual, report.issues
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    #[should_panic(expected = "whole cents")]
    fn test_assert_cents_rejects_fractions() {
        assert_cents(dec!(10.005));
    }

    #[test]
    fn test_money_approx() {
        assert_money_approx_eq(&Money::usd(dec!(10.00)), &Money::usd(dec!(10.01)), dec!(0.01));
    }
}
