pub mod availability;
pub mod booking;
pub mod catalog;
pub mod chat_flow;
pub mod session;

pub use availability::{DayAvailability, DaySlots, MonthAvailability, SlotKey, SlotStatus};
pub use booking::{Booking, BookingInput, BookingStatus};
pub use chat_flow::{ChatFlowPayload, ChatFlowState, ChatFlowStep, IncompleteFlow};
pub use session::AdminSession;
