use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus};

const BOOKING_COLUMNS: &str = "id, booking_number, customer_name, customer_phone, customer_email, \
     service_address, pest_type, pest_description, preferred_date, time_slot, urgent_service, \
     status, admin_notes, estimated_price, intake, created_at, updated_at";

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let updated_at = booking.updated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let intake = booking
        .intake
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.execute(
        "INSERT INTO bookings (id, booking_number, customer_name, customer_phone, customer_email, \
         service_address, pest_type, pest_description, preferred_date, time_slot, urgent_service, \
         status, admin_notes, estimated_price, intake, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            booking.id,
            booking.booking_number,
            booking.customer_name,
            booking.customer_phone,
            booking.customer_email,
            booking.service_address,
            booking.pest_type,
            booking.pest_description,
            booking.preferred_date,
            booking.time_slot,
            booking.urgent_service as i32,
            booking.status.as_str(),
            booking.admin_notes,
            booking.estimated_price,
            intake,
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

/// Lookup by the customer-facing reference, uppercased before matching.
/// Numbers are unique by convention only; the first match wins.
pub fn get_booking_by_number(conn: &Connection, number: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_number = ?1 LIMIT 1"),
        params![number.to_uppercase()],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Full scan for the dashboard, newest submissions first. No pagination;
/// acceptable at this collection size.
pub fn get_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Status change with partial-update semantics: updated_at always moves,
/// notes and price are only written when provided. Returns false when the
/// id does not exist. Any status may follow any other.
pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: &BookingStatus,
    admin_notes: Option<&str>,
    estimated_price: Option<i64>,
) -> anyhow::Result<bool> {
    let now = Utc::now()
        .naive_utc()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let mut sets = String::from("status = ?1, updated_at = ?2");
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> =
        vec![Box::new(status.as_str().to_string()), Box::new(now)];

    if let Some(notes) = admin_notes {
        params_vec.push(Box::new(notes.to_string()));
        sets.push_str(&format!(", admin_notes = ?{}", params_vec.len()));
    }
    if let Some(price) = estimated_price {
        params_vec.push(Box::new(price));
        sets.push_str(&format!(", estimated_price = ?{}", params_vec.len()));
    }

    params_vec.push(Box::new(id.to_string()));
    let sql = format!("UPDATE bookings SET {sets} WHERE id = ?{}", params_vec.len());

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let count = conn.execute(&sql, params_refs.as_slice())?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let booking_number: String = row.get(1)?;
    let customer_name: String = row.get(2)?;
    let customer_phone: String = row.get(3)?;
    let customer_email: String = row.get(4)?;
    let service_address: String = row.get(5)?;
    let pest_type: String = row.get(6)?;
    let pest_description: Option<String> = row.get(7)?;
    let preferred_date: String = row.get(8)?;
    let time_slot: String = row.get(9)?;
    let urgent_service: bool = row.get::<_, i32>(10)? != 0;
    let status_str: String = row.get(11)?;
    let admin_notes: Option<String> = row.get(12)?;
    let estimated_price: Option<i64> = row.get(13)?;
    let intake_json: Option<String> = row.get(14)?;
    let created_at_str: String = row.get(15)?;
    let updated_at_str: String = row.get(16)?;

    let intake = intake_json.and_then(|json| serde_json::from_str(&json).ok());
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id,
        booking_number,
        customer_name,
        customer_phone,
        customer_email,
        service_address,
        pest_type,
        pest_description,
        preferred_date,
        time_slot,
        urgent_service,
        status: BookingStatus::parse(&status_str),
        admin_notes,
        estimated_price,
        intake,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn make_booking(id: &str, number: &str, created_at: &str) -> Booking {
        let ts = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S").unwrap();
        Booking {
            id: id.to_string(),
            booking_number: number.to_string(),
            customer_name: "홍길동".to_string(),
            customer_phone: "010-0000-0000".to_string(),
            customer_email: "hong@example.com".to_string(),
            service_address: "서울시 마포구".to_string(),
            pest_type: "ant".to_string(),
            pest_description: None,
            preferred_date: "2025-09-01".to_string(),
            time_slot: "09:00".to_string(),
            urgent_service: false,
            status: BookingStatus::Received,
            admin_notes: None,
            estimated_price: None,
            intake: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_create_and_get_by_id() {
        let conn = setup_db();
        let booking = make_booking("bk-1", "AB234567", "2025-08-01 10:00:00");
        create_booking(&conn, &booking).unwrap();

        let found = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(found.booking_number, "AB234567");
        assert_eq!(found.status, BookingStatus::Received);
        assert!(get_booking_by_id(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_lookup_by_number_is_case_insensitive() {
        let conn = setup_db();
        create_booking(&conn, &make_booking("bk-1", "AB234567", "2025-08-01 10:00:00")).unwrap();

        let found = get_booking_by_number(&conn, "ab234567").unwrap();
        assert!(found.is_some());
        assert!(get_booking_by_number(&conn, "ZZ999999").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_numbers_first_match_wins() {
        let conn = setup_db();
        create_booking(&conn, &make_booking("bk-1", "AB234567", "2025-08-01 10:00:00")).unwrap();
        create_booking(&conn, &make_booking("bk-2", "AB234567", "2025-08-02 10:00:00")).unwrap();

        let found = get_booking_by_number(&conn, "AB234567").unwrap().unwrap();
        assert_eq!(found.booking_number, "AB234567");
    }

    #[test]
    fn test_list_all_newest_first() {
        let conn = setup_db();
        create_booking(&conn, &make_booking("bk-1", "AA222222", "2025-08-01 10:00:00")).unwrap();
        create_booking(&conn, &make_booking("bk-2", "BB333333", "2025-08-03 10:00:00")).unwrap();
        create_booking(&conn, &make_booking("bk-3", "CC444444", "2025-08-02 10:00:00")).unwrap();

        let bookings = get_all_bookings(&conn).unwrap();
        let ids: Vec<&str> = bookings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["bk-2", "bk-3", "bk-1"]);
    }

    #[test]
    fn test_update_status_partial_semantics() {
        let conn = setup_db();
        create_booking(&conn, &make_booking("bk-1", "AB234567", "2025-08-01 10:00:00")).unwrap();

        // first update writes notes and price
        let updated = update_booking_status(
            &conn,
            "bk-1",
            &BookingStatus::Confirmed,
            Some("방문 전 전화"),
            Some(80_000),
        )
        .unwrap();
        assert!(updated);

        let booking = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.admin_notes.as_deref(), Some("방문 전 전화"));
        assert_eq!(booking.estimated_price, Some(80_000));
        assert!(booking.updated_at > booking.created_at);

        // omitting notes and price leaves them untouched
        update_booking_status(&conn, "bk-1", &BookingStatus::Completed, None, None).unwrap();
        let booking = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
        assert_eq!(booking.admin_notes.as_deref(), Some("방문 전 전화"));
        assert_eq!(booking.estimated_price, Some(80_000));
    }

    #[test]
    fn test_update_status_allows_any_transition() {
        let conn = setup_db();
        create_booking(&conn, &make_booking("bk-1", "AB234567", "2025-08-01 10:00:00")).unwrap();

        // no transition table: completed may go back to received
        update_booking_status(&conn, "bk-1", &BookingStatus::Completed, None, None).unwrap();
        update_booking_status(&conn, "bk-1", &BookingStatus::Received, None, None).unwrap();
        let booking = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Received);
    }

    #[test]
    fn test_update_status_unknown_id() {
        let conn = setup_db();
        let updated =
            update_booking_status(&conn, "missing", &BookingStatus::Cancelled, None, None).unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_intake_json_round_trips() {
        let conn = setup_db();
        let mut booking = make_booking("bk-1", "AB234567", "2025-08-01 10:00:00");
        booking.intake = Some(serde_json::json!({"issue": {"code": "ISSUE_ANT"}}));
        create_booking(&conn, &booking).unwrap();

        let found = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(found.intake.unwrap()["issue"]["code"], "ISSUE_ANT");
    }
}
