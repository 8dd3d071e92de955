use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{catalog, Booking, BookingInput, BookingStatus, ChatFlowPayload};
use crate::services::booking_number;

/// Creates a booking from the direct form input: allocates the customer
/// reference number, stamps timestamps, persists with status "received".
pub fn create_from_input(conn: &Connection, input: BookingInput) -> anyhow::Result<Booking> {
    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        booking_number: booking_number::generate(),
        customer_name: input.customer_name,
        customer_phone: input.customer_phone,
        customer_email: input.customer_email,
        service_address: input.service_address,
        pest_type: input.pest_type,
        pest_description: input.pest_description,
        preferred_date: input.preferred_date,
        time_slot: input.time_slot.start_time().to_string(),
        urgent_service: input.urgent_service,
        status: BookingStatus::Received,
        admin_notes: None,
        estimated_price: None,
        intake: None,
        created_at: now,
        updated_at: now,
    };
    queries::create_booking(conn, &booking)?;
    Ok(booking)
}

/// Creates a booking from a completed chat-flow payload. The intake answers
/// are denormalized alongside their display labels so the dashboard can
/// render them without another catalog pass.
pub fn create_from_chat(conn: &Connection, payload: &ChatFlowPayload) -> anyhow::Result<Booking> {
    let now = Utc::now().naive_utc();

    let intake = serde_json::json!({
        "flowVersion": payload.flow_version,
        "issue": {
            "code": payload.issue.code,
            "text": payload.issue.text,
            "label": catalog::issue_label(&payload.issue.code),
        },
        "lastSeen": {
            "code": payload.last_seen,
            "label": catalog::last_seen_label(&payload.last_seen),
        },
        "tenure": {
            "code": payload.tenure,
            "label": catalog::tenure_label(&payload.tenure),
        },
        "homeType": {
            "code": payload.home_type.code,
            "text": payload.home_type.text,
            "label": catalog::home_type_label(&payload.home_type.code),
        },
        "region": {
            "macro": payload.region.macro_code,
            "micro": payload.region.micro_code,
            "text": payload.region.text,
            "macroLabel": catalog::region_label(&payload.region.macro_code),
            "microLabel": payload.region.micro_code.as_deref().map(catalog::sub_region_label),
        },
        "timeSlotLabel": catalog::time_slot_label(&payload.schedule.time_slot),
        "locale": payload.meta.locale,
        "source": payload.meta.source,
        "submittedAt": payload.meta.timestamp,
    });

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        booking_number: booking_number::generate(),
        // contact details are collected by the operations team after intake
        customer_name: String::new(),
        customer_phone: String::new(),
        customer_email: String::new(),
        service_address: String::new(),
        pest_type: catalog::pest_type_for_issue(&payload.issue.code).to_string(),
        pest_description: payload.issue.text.clone(),
        preferred_date: payload.schedule.date.clone(),
        time_slot: payload.schedule.time_slot.clone(),
        urgent_service: false,
        status: BookingStatus::Received,
        admin_notes: None,
        estimated_price: None,
        intake: Some(intake),
        created_at: now,
        updated_at: now,
    };
    queries::create_booking(conn, &booking)?;
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{ChatFlowState, SlotKey};

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn complete_state() -> ChatFlowState {
        let mut state = ChatFlowState::new();
        state.issue.code = Some("ISSUE_ROACH".to_string());
        state.issue.text = None;
        state.last_seen = Some("SEEN_TODAY".to_string());
        state.tenure = Some("TENURE_1M".to_string());
        state.home_type.code = Some("HOME_APT".to_string());
        state.region.macro_code = Some("REGION_SEOUL".to_string());
        state.region.micro_code = Some("SEOUL_GANGNAM".to_string());
        state.schedule.date = Some("2025-09-01".to_string());
        state.schedule.time_slot = Some("14:00".to_string());
        state
    }

    #[test]
    fn test_create_from_input_persists_and_returns() {
        let conn = setup_db();
        let input = BookingInput {
            customer_name: "김민수".to_string(),
            customer_phone: "010-1234-5678".to_string(),
            customer_email: "minsu@example.com".to_string(),
            service_address: "서울시 강남구".to_string(),
            pest_type: "cockroach".to_string(),
            pest_description: Some("주방에서 발견".to_string()),
            preferred_date: "2025-09-15".to_string(),
            time_slot: SlotKey::Afternoon,
            urgent_service: true,
        };

        let booking = create_from_input(&conn, input).unwrap();
        assert_eq!(booking.status, BookingStatus::Received);
        assert_eq!(booking.time_slot, "14:00");
        assert!(booking_number::is_valid(&booking.booking_number));

        let found = queries::get_booking_by_id(&conn, &booking.id)
            .unwrap()
            .unwrap();
        assert_eq!(found.customer_name, "김민수");
        assert!(found.urgent_service);
        assert_eq!(found.created_at, found.updated_at);
    }

    #[test]
    fn test_create_from_chat_then_lookup_by_number() {
        let conn = setup_db();
        let payload = complete_state().to_payload().unwrap();
        let booking = create_from_chat(&conn, &payload).unwrap();

        assert!(booking_number::is_valid(&booking.booking_number));

        let found = queries::get_booking_by_number(&conn, &booking.booking_number)
            .unwrap()
            .unwrap();
        assert_eq!(found.status, BookingStatus::Received);
        assert_eq!(found.preferred_date, "2025-09-01");
        assert_eq!(found.time_slot, "14:00");
        assert_eq!(found.pest_type, "cockroach");

        let intake = found.intake.unwrap();
        assert_eq!(intake["issue"]["label"], "바퀴벌레");
        assert_eq!(intake["region"]["microLabel"], "강남구");
        assert_eq!(intake["timeSlotLabel"], "오후 (14:00-17:00)");
        assert_eq!(intake["flowVersion"], "home-1.0.0");
    }

    #[test]
    fn test_chat_booking_maps_other_issue() {
        let conn = setup_db();
        let mut state = complete_state();
        state.issue.code = Some("ISSUE_OTHER_TEXT".to_string());
        state.issue.text = Some("벌집이 생겼어요".to_string());
        let payload = state.to_payload().unwrap();

        let booking = create_from_chat(&conn, &payload).unwrap();
        assert_eq!(booking.pest_type, "other");
        assert_eq!(booking.pest_description.as_deref(), Some("벌집이 생겼어요"));
    }
}
