use serde::{Deserialize, Serialize};

/// The three daily service windows a visit can be scheduled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Morning,
    Afternoon,
    Evening,
}

impl SlotKey {
    pub const ALL: [SlotKey; 3] = [SlotKey::Morning, SlotKey::Afternoon, SlotKey::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::Morning => "morning",
            SlotKey::Afternoon => "afternoon",
            SlotKey::Evening => "evening",
        }
    }

    /// The start time stored on bookings for this window.
    pub fn start_time(&self) -> &'static str {
        match self {
            SlotKey::Morning => "09:00",
            SlotKey::Afternoon => "14:00",
            SlotKey::Evening => "18:00",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Full,
    Closed,
}

/// Per-slot status for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlots {
    pub morning: SlotStatus,
    pub afternoon: SlotStatus,
    pub evening: SlotStatus,
}

impl DaySlots {
    pub fn all_closed() -> Self {
        Self {
            morning: SlotStatus::Closed,
            afternoon: SlotStatus::Closed,
            evening: SlotStatus::Closed,
        }
    }

    pub fn get(&self, slot: SlotKey) -> SlotStatus {
        match slot {
            SlotKey::Morning => self.morning,
            SlotKey::Afternoon => self.afternoon,
            SlotKey::Evening => self.evening,
        }
    }

    pub fn any_available(&self) -> bool {
        SlotKey::ALL
            .iter()
            .any(|slot| self.get(*slot) == SlotStatus::Available)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailability {
    /// "YYYY-MM-DD"
    pub date: String,
    pub slots: DaySlots,
    #[serde(rename = "isBookable")]
    pub is_bookable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthAvailability {
    /// "YYYY-MM"
    pub month: String,
    pub days: Vec<DayAvailability>,
}

impl MonthAvailability {
    pub fn day(&self, date: &str) -> Option<&DayAvailability> {
        self.days.iter().find(|day| day.date == date)
    }
}
