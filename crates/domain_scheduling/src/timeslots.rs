//! Timeslots: when each field is available for games

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use core_kernel::FieldId;

use crate::error::SchedulingError;

/// A start time on a field that a game can be placed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeslot {
    pub field_id: FieldId,
    pub start: NaiveDateTime,
}

/// A run of evenly spaced slots on one field on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotTemplate {
    pub field_id: FieldId,
    pub date: NaiveDate,
    pub first_game: NaiveTime,
    pub game_interval_minutes: u32,
    pub max_games: u32,
}

impl TimeslotTemplate {
    /// Expands the template into concrete slots
    ///
    /// Slots that would start on the next calendar day are dropped.
    pub fn slots(&self) -> Result<Vec<Timeslot>, SchedulingError> {
        if self.game_interval_minutes == 0 {
            return Err(SchedulingError::InvalidTimeslot(
                "game interval must be at least one minute".to_string(),
            ));
        }

        let first = self.date.and_time(self.first_game);
        let interval = Duration::minutes(i64::from(self.game_interval_minutes));

        Ok((0..self.max_games)
            .map(|i| first + interval * i as i32)
            .take_while(|start| start.date() == self.date)
            .map(|start| Timeslot {
                field_id: self.field_id,
                start,
            })
            .collect())
    }
}

/// Every slot available to a build, in placement order
///
/// Slots are ordered by start time, then by the order their field first
/// appeared in the templates, so earlier-listed fields fill first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotPlan {
    slots: Vec<Timeslot>,
}

impl TimeslotPlan {
    pub fn from_templates(templates: &[TimeslotTemplate]) -> Result<Self, SchedulingError> {
        let mut field_order: Vec<FieldId> = Vec::new();
        let mut seen = HashSet::new();
        let mut slots = Vec::new();

        for template in templates {
            if !field_order.contains(&template.field_id) {
                field_order.push(template.field_id);
            }
            for slot in template.slots()? {
                if seen.insert(slot) {
                    slots.push(slot);
                }
            }
        }

        let rank = |field: &FieldId| field_order.iter().position(|f| f == field).unwrap_or(usize::MAX);
        slots.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| rank(&a.field_id).cmp(&rank(&b.field_id))));

        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[Timeslot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fields in the order they fill
    pub fn fields(&self) -> Vec<FieldId> {
        let mut fields = Vec::new();
        for slot in &self.slots {
            if !fields.contains(&slot.field_id) {
                fields.push(slot.field_id);
            }
        }
        fields
    }
}
