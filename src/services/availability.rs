use async_trait::async_trait;
use chrono::{Datelike, Weekday};
use rand::Rng;

use crate::models::{DayAvailability, DaySlots, MonthAvailability, SlotStatus};
use crate::services::calendar;

/// Pluggable source of per-day, per-slot booking capacity. The mock below
/// fabricates plausible data; a production deployment backs this with the
/// scheduling store while preserving the same contract.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// One status per slot for every day of the given "YYYY-MM" month.
    async fn month_availability(&self, month: &str) -> anyhow::Result<MonthAvailability>;

    /// Slot statuses for a single "YYYY-MM-DD" day. Days outside any
    /// defined month (or unparsable input) come back all-closed rather
    /// than erroring.
    async fn day_slots(&self, date: &str) -> anyhow::Result<DaySlots>;
}

const WEEKEND_CLOSURE_CHANCE: f64 = 0.3;
const WEEKDAY_CLOSURE_CHANCE: f64 = 0.1;
const SLOT_FULL_CHANCE: f64 = 0.2;

/// Randomized placeholder provider. Past days are fully closed; weekends
/// may close entirely and never open evenings; weekdays may close entirely,
/// otherwise each slot fills independently.
pub struct MockAvailabilityProvider;

impl MockAvailabilityProvider {
    fn generate_month(&self, month: &str) -> anyhow::Result<MonthAvailability> {
        let first = calendar::parse_month_string(month)
            .ok_or_else(|| anyhow::anyhow!("invalid month string: {month}"))?;

        let mut rng = rand::thread_rng();
        let days = calendar::generate_calendar_matrix(first.year(), first.month())
            .into_iter()
            .flatten()
            .map(|date| {
                let past = calendar::is_past_date(date);
                let slots = if past {
                    DaySlots::all_closed()
                } else {
                    random_day_slots(&mut rng, is_weekend(date.weekday()))
                };
                DayAvailability {
                    date: calendar::format_date_string(date),
                    is_bookable: !past && slots.any_available(),
                    slots,
                }
            })
            .collect();

        Ok(MonthAvailability {
            month: calendar::format_month_string(first),
            days,
        })
    }
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn random_slot<R: Rng>(rng: &mut R) -> SlotStatus {
    if rng.gen_bool(SLOT_FULL_CHANCE) {
        SlotStatus::Full
    } else {
        SlotStatus::Available
    }
}

fn random_day_slots<R: Rng>(rng: &mut R, weekend: bool) -> DaySlots {
    let closure_chance = if weekend {
        WEEKEND_CLOSURE_CHANCE
    } else {
        WEEKDAY_CLOSURE_CHANCE
    };
    if rng.gen_bool(closure_chance) {
        return DaySlots::all_closed();
    }

    DaySlots {
        morning: random_slot(rng),
        afternoon: random_slot(rng),
        evening: if weekend {
            SlotStatus::Closed
        } else {
            random_slot(rng)
        },
    }
}

#[async_trait]
impl AvailabilityProvider for MockAvailabilityProvider {
    async fn month_availability(&self, month: &str) -> anyhow::Result<MonthAvailability> {
        self.generate_month(month)
    }

    async fn day_slots(&self, date: &str) -> anyhow::Result<DaySlots> {
        let Some(parsed) = calendar::parse_date_string(date) else {
            return Ok(DaySlots::all_closed());
        };
        let month = self.generate_month(&calendar::format_month_string(parsed))?;
        Ok(month
            .day(&calendar::format_date_string(parsed))
            .map(|day| day.slots)
            .unwrap_or_else(DaySlots::all_closed))
    }
}
