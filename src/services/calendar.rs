use chrono::{Datelike, Local, Months, NaiveDate};

/// 7 columns x 6 rows, Sunday-first.
pub const CALENDAR_CELLS: usize = 42;

/// Builds the month grid: leading nulls for weekday offset, one cell per
/// day, trailing nulls up to exactly 42. Months are 1-12; an invalid
/// year/month yields an empty grid of nulls.
pub fn generate_calendar_matrix(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return vec![None; CALENDAR_CELLS];
    };
    let Some(last) = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
    else {
        return vec![None; CALENDAR_CELLS];
    };

    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut matrix: Vec<Option<NaiveDate>> = Vec::with_capacity(CALENDAR_CELLS);
    matrix.extend(std::iter::repeat(None).take(leading));
    matrix.extend(first.iter_days().take(last.day() as usize).map(Some));
    matrix.resize(CALENDAR_CELLS, None);
    matrix
}

/// "YYYY-MM-DD"
pub fn format_date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// "YYYY-MM"
pub fn format_month_string(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parses "YYYY-MM" into the first day of that month. Left inverse of
/// `format_month_string`.
pub fn parse_month_string(month: &str) -> Option<NaiveDate> {
    let (year, month) = month.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn parse_date_string(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Strictly before today in the evaluator's local calendar.
pub fn is_past_date(date: NaiveDate) -> bool {
    date < Local::now().date_naive()
}

pub fn is_same_date(a: NaiveDate, b: NaiveDate) -> bool {
    format_date_string(a) == format_date_string(b)
}

/// Month string `offset` months from the current local month.
pub fn month_offset(offset: i32) -> String {
    let today = Local::now().date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let shifted = if offset >= 0 {
        first.checked_add_months(Months::new(offset as u32))
    } else {
        first.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    format_month_string(shifted.unwrap_or(first))
}
