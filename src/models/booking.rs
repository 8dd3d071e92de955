use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::SlotKey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub booking_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub service_address: String,
    pub pest_type: String,
    pub pest_description: Option<String>,
    /// "YYYY-MM-DD"
    pub preferred_date: String,
    /// Slot start time, e.g. "14:00"
    pub time_slot: String,
    pub urgent_service: bool,
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
    pub estimated_price: Option<i64>,
    /// Denormalized chat-flow intake detail, present only for chat submissions.
    pub intake: Option<serde_json::Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input for a direct (form) booking; id, number, status and timestamps are
/// assigned at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingInput {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub service_address: String,
    pub pest_type: String,
    pub pest_description: Option<String>,
    pub preferred_date: String,
    pub time_slot: SlotKey,
    #[serde(default)]
    pub urgent_service: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Received,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Received => "received",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse_opt(s: &str) -> Option<Self> {
        match s {
            "received" => Some(BookingStatus::Received),
            "confirmed" => Some(BookingStatus::Confirmed),
            "in_progress" => Some(BookingStatus::InProgress),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Lenient parse for stored rows; unknown values read back as received.
    pub fn parse(s: &str) -> Self {
        Self::parse_opt(s).unwrap_or(BookingStatus::Received)
    }
}
