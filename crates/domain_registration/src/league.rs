//! Jobs, agegroups and divisions
//!
//! A job is one season of one league or tournament. It owns the fee
//! settings registrants see and the agegroup/division tree teams register
//! into. Most leagues run the same job every year, so a job can be cloned
//! forward into a new season.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{AgegroupId, CoreError, DivisionId, JobId, Timezone};
use domain_fees::{DiscountCodeBook, ProcessingFeePolicy};

use crate::error::RegistrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
    /// Registration closes for the division once this many teams are in
    pub max_teams: Option<u32>,
}

impl Division {
    pub fn new(name: impl Into<String>, max_teams: Option<u32>) -> Self {
        Self {
            id: DivisionId::new(),
            name: name.into(),
            max_teams,
        }
    }

    pub fn is_full(&self, registered_teams: u32) -> bool {
        self.max_teams.is_some_and(|max| registered_teams >= max)
    }
}

/// An age band with its fee schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agegroup {
    pub id: AgegroupId,
    pub name: String,
    pub team_deposit: Decimal,
    pub team_balance_due: Decimal,
    pub player_fee: Decimal,
    pub divisions: Vec<Division>,
}

impl Agegroup {
    pub fn new(name: impl Into<String>, team_deposit: Decimal, team_balance_due: Decimal, player_fee: Decimal) -> Self {
        Self {
            id: AgegroupId::new(),
            name: name.into(),
            team_deposit,
            team_balance_due,
            player_fee,
            divisions: Vec::new(),
        }
    }

    pub fn with_division(mut self, division: Division) -> Self {
        self.divisions.push(division);
        self
    }

    /// Deposit plus balance: what a team pays in full
    pub fn team_fee(&self) -> Decimal {
        self.team_deposit.max(Decimal::ZERO) + self.team_balance_due.max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub year: i32,
    pub season: Season,
    pub timezone: Timezone,
    pub registration_opens: Option<NaiveDate>,
    pub registration_closes: Option<NaiveDate>,
    pub processing: ProcessingFeePolicy,
    pub agegroups: Vec<Agegroup>,
}

impl Job {
    pub fn new(name: impl Into<String>, year: i32, season: Season, timezone: Timezone) -> Self {
        Self {
            id: JobId::new_v7(),
            name: name.into(),
            year,
            season,
            timezone,
            registration_opens: None,
            registration_closes: None,
            processing: ProcessingFeePolicy::none(),
            agegroups: Vec::new(),
        }
    }

    pub fn find_division(&self, division_id: DivisionId) -> Option<&Division> {
        self.agegroups
            .iter()
            .flat_map(|a| a.divisions.iter())
            .find(|d| d.id == division_id)
    }

    pub fn agegroup_for_division(&self, division_id: DivisionId) -> Option<&Agegroup> {
        self.agegroups
            .iter()
            .find(|a| a.divisions.iter().any(|d| d.id == division_id))
    }

    /// Like [`Job::agegroup_for_division`] but an unknown division is an error
    pub fn require_agegroup(&self, division_id: DivisionId) -> Result<&Agegroup, RegistrationError> {
        self.agegroup_for_division(division_id)
            .ok_or(RegistrationError::DivisionNotFound(division_id))
    }

    /// Registration is open on both boundary dates; an unset bound is unbounded
    pub fn is_registration_open(&self, today: NaiveDate) -> bool {
        let opened = self.registration_opens.map_or(true, |d| today >= d);
        let not_closed = self.registration_closes.map_or(true, |d| today <= d);
        opened && not_closed
    }

    /// Copies the job into a new season
    ///
    /// Every agegroup and division gets a fresh id; the returned maps
    /// translate old ids to new so per-division data can follow.
    /// Registration dates move by `year_offset` years, with Feb 29
    /// landing on Feb 28 in non-leap years.
    pub fn clone_for_season(&self, new_name: impl Into<String>, year_offset: i32) -> Result<JobClone, RegistrationError> {
        if year_offset == 0 {
            return Err(CoreError::validation("a season clone must move the job by at least one year").into());
        }

        let mut agegroup_ids = HashMap::new();
        let mut division_ids = HashMap::new();

        let agegroups = self
            .agegroups
            .iter()
            .map(|agegroup| {
                let id = AgegroupId::new();
                agegroup_ids.insert(agegroup.id, id);
                let divisions = agegroup
                    .divisions
                    .iter()
                    .map(|division| {
                        let new_id = DivisionId::new();
                        division_ids.insert(division.id, new_id);
                        Division {
                            id: new_id,
                            ..division.clone()
                        }
                    })
                    .collect();
                Agegroup {
                    id,
                    divisions,
                    ..agegroup.clone()
                }
            })
            .collect();

        let job = Job {
            id: JobId::new_v7(),
            name: new_name.into(),
            year: self.year + year_offset,
            season: self.season,
            timezone: self.timezone,
            registration_opens: self.registration_opens.map(|d| shift_years(d, year_offset)).transpose()?,
            registration_closes: self.registration_closes.map(|d| shift_years(d, year_offset)).transpose()?,
            processing: self.processing,
            agegroups,
        };

        info!(
            source_job_id = %self.id,
            job_id = %job.id,
            year = job.year,
            divisions = division_ids.len(),
            "job cloned into new season"
        );

        Ok(JobClone {
            source_job_id: self.id,
            job,
            agegroup_ids,
            division_ids,
        })
    }
}

fn shift_years(date: NaiveDate, years: i32) -> Result<NaiveDate, RegistrationError> {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| {
            if date.month() == 2 && date.day() == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
        .ok_or_else(|| RegistrationError::DateOutOfRange {
            date: date.to_string(),
            years,
        })
}

/// A job copied into a new season along with its id translations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobClone {
    pub source_job_id: JobId,
    pub job: Job,
    pub agegroup_ids: HashMap<AgegroupId, AgegroupId>,
    pub division_ids: HashMap<DivisionId, DivisionId>,
}

impl JobClone {
    pub fn new_division_id(&self, old: DivisionId) -> Option<DivisionId> {
        self.division_ids.get(&old).copied()
    }

    pub fn new_agegroup_id(&self, old: AgegroupId) -> Option<AgegroupId> {
        self.agegroup_ids.get(&old).copied()
    }

    /// Carries the source job's discount codes over with usage reset
    pub fn clone_discount_codes(&self, codes: &DiscountCodeBook) -> DiscountCodeBook {
        codes.clone_for_job(self.job.id)
    }
}
