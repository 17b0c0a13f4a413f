//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common league entities.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use core_kernel::{DivisionId, FieldId, JobId, Money, TeamId, Timezone};
use domain_fees::ProcessingFeePolicy;
use domain_registration::{Agegroup, Division, Job, MembershipRecord, Season};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for fee amounts
pub struct FeeFixtures;

impl FeeFixtures {
    /// Agegroup deposit due at registration
    pub fn team_deposit() -> Decimal {
        dec!(250.00)
    }

    /// Balance due once the job charges the full amount
    pub fn team_balance_due() -> Decimal {
        dec!(600.00)
    }

    pub fn player_fee() -> Decimal {
        dec!(75.00)
    }

    pub fn usd_team_fee() -> Money {
        Money::usd(Self::team_deposit() + Self::team_balance_due())
    }

    /// 3.5% card surcharge, applied to deposits too
    pub fn card_surcharge() -> ProcessingFeePolicy {
        ProcessingFeePolicy::card_surcharge(dec!(3.5))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Saturday of the standard tournament weekend
    pub fn game_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    pub fn second_game_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    pub fn first_game_time() -> NaiveTime {
        NaiveTime::from_hms_opt(8, 0, 0).unwrap()
    }

    /// `hour:minute` on the first game day
    pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
        Self::game_day().and_hms_opt(hour, minute, 0).unwrap()
    }

    pub fn registration_opens() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    pub fn registration_closes() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
    }

    /// Birth date of the standard U14 player
    pub fn player_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 10, 2).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic job ID for testing
    pub fn job_id() -> JobId {
        JobId::from_uuid(Uuid::parse_str("7d1f3c2a-0b4e-4f6a-9c8d-000000000001").unwrap())
    }

    /// Creates a deterministic division ID for testing
    pub fn division_id() -> DivisionId {
        DivisionId::from_uuid(Uuid::parse_str("7d1f3c2a-0b4e-4f6a-9c8d-000000000002").unwrap())
    }

    /// Creates a deterministic field ID for testing
    pub fn field_id() -> FieldId {
        FieldId::from_uuid(Uuid::parse_str("7d1f3c2a-0b4e-4f6a-9c8d-000000000003").unwrap())
    }

    /// `count` distinct team IDs, stable across calls
    pub fn team_ids(count: usize) -> Vec<TeamId> {
        (0..count)
            .map(|i| TeamId::from_uuid(Uuid::from_u128(0x7d1f_3c2a_0b4e_4f6a_9c8d_0001_0000_0000 + i as u128)))
            .collect()
    }
}

/// Fixture for league structure
pub struct LeagueFixtures;

impl LeagueFixtures {
    /// A summer tournament with one U14 agegroup holding two divisions
    pub fn summer_tournament() -> Job {
        let mut job = Job::new("Summer Shootout 2025", 2025, Season::Summer, Timezone::default());
        job.registration_opens = Some(TemporalFixtures::registration_opens());
        job.registration_closes = Some(TemporalFixtures::registration_closes());
        job.processing = FeeFixtures::card_surcharge();
        job.agegroups.push(
            Agegroup::new(
                "U14",
                FeeFixtures::team_deposit(),
                FeeFixtures::team_balance_due(),
                FeeFixtures::player_fee(),
            )
            .with_division(Division::new("Gold", Some(8)))
            .with_division(Division::new("Silver", None)),
        );
        job
    }

    /// A current membership for the standard player
    pub fn membership_record() -> MembershipRecord {
        MembershipRecord {
            member_id: "2200417".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            birth_date: TemporalFixtures::player_birth_date(),
            expires_on: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }
}
