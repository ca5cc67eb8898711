//! Availability-window bookkeeping for cafe dishes.
//!
//! A dish's history is an ordered list of periods. At most one period is
//! open (`available_to == None`) and it is always the last one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub period_id: i32,
    pub available_from: DateTime<Utc>,
    pub available_to: Option<DateTime<Utc>>,
}

impl Period {
    pub fn is_open(&self) -> bool {
        self.available_to.is_none()
    }
}

/// What has to happen to a history when an admin submits a new `available` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityChange {
    /// First record for a new dish. `open == false` means a zero-length closed period.
    Start { open: bool, at: DateTime<Utc> },
    Close { period_id: i32, at: DateTime<Utc> },
    Open { at: DateTime<Utc> },
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityHistory {
    periods: Vec<Period>,
}

impl AvailabilityHistory {
    pub fn new(mut periods: Vec<Period>) -> Self {
        periods.sort_by_key(|p| (p.available_from, p.period_id));
        Self { periods }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn into_periods(self) -> Vec<Period> {
        self.periods
    }

    pub fn latest(&self) -> Option<&Period> {
        self.periods.last()
    }

    pub fn open_period(&self) -> Option<&Period> {
        self.periods.last().filter(|p| p.is_open())
    }

    pub fn open_count(&self) -> usize {
        self.periods.iter().filter(|p| p.is_open()).count()
    }

    pub fn plan(&self, available: bool, now: DateTime<Utc>) -> AvailabilityChange {
        match self.periods.last() {
            None => AvailabilityChange::Start {
                open: available,
                at: now,
            },
            Some(last) if last.is_open() && !available => AvailabilityChange::Close {
                period_id: last.period_id,
                at: now,
            },
            Some(last) if !last.is_open() && available => AvailabilityChange::Open { at: now },
            Some(_) => AvailabilityChange::Unchanged,
        }
    }

    /// Applies `available` in memory. `next_id` supplies ids for new periods.
    pub fn apply(
        &mut self,
        available: bool,
        now: DateTime<Utc>,
        next_id: impl FnOnce() -> i32,
    ) -> AvailabilityChange {
        let change = self.plan(available, now);
        match change {
            AvailabilityChange::Start { open, at } => self.periods.push(Period {
                period_id: next_id(),
                available_from: at,
                available_to: if open { None } else { Some(at) },
            }),
            AvailabilityChange::Close { at, .. } => {
                if let Some(last) = self.periods.last_mut() {
                    // clock skew must not produce an inverted interval
                    last.available_to = Some(at.max(last.available_from));
                }
            }
            AvailabilityChange::Open { at } => {
                let from = self
                    .periods
                    .last()
                    .and_then(|p| p.available_to)
                    .map_or(at, |closed| at.max(closed));
                self.periods.push(Period {
                    period_id: next_id(),
                    available_from: from,
                    available_to: None,
                });
            }
            AvailabilityChange::Unchanged => {}
        }
        change
    }
}
