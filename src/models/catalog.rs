//! Static code → label tables for the home intake flow.
//!
//! Codes are stable wire identifiers; labels are the Korean display strings
//! shown to customers and denormalized into stored bookings.

pub const UNKNOWN_LABEL: &str = "알 수 없음";

pub const ISSUE_TYPES: &[(&str, &str)] = &[
    ("ISSUE_ROACH", "바퀴벌레"),
    ("ISSUE_ANT", "개미"),
    ("ISSUE_FLY", "파리/모기"),
    ("ISSUE_MITE", "진드기/응애"),
    ("ISSUE_MOTH", "나방/좀벌레"),
    ("ISSUE_OTHER_TEXT", "기타"),
];

pub const LAST_SEEN_OPTIONS: &[(&str, &str)] = &[
    ("SEEN_TODAY", "오늘"),
    ("SEEN_3D", "2-3일 전"),
    ("SEEN_1W", "일주일 전"),
    ("SEEN_1M", "한달 전"),
    ("SEEN_LONG", "오래전"),
];

pub const TENURE_OPTIONS: &[(&str, &str)] = &[
    ("TENURE_1M", "1개월 미만"),
    ("TENURE_6M", "1-6개월"),
    ("TENURE_6_12M", "6-12개월"),
    ("TENURE_1Y", "1-3년"),
    ("TENURE_3Y", "3년 이상"),
];

pub const HOME_TYPE_OPTIONS: &[(&str, &str)] = &[
    ("HOME_APT", "아파트"),
    ("HOME_VILLA", "빌라/연립"),
    ("HOME_HOUSE", "단독주택"),
    ("HOME_OFFICETEL", "오피스텔"),
    ("HOME_OTHER_TEXT", "기타"),
];

pub const REGION_OPTIONS: &[(&str, &str)] = &[
    ("REGION_SEOUL", "서울"),
    ("REGION_GYEONGGI", "경기도"),
    ("REGION_INCHEON", "인천"),
    ("REGION_OTHER_TEXT", "기타 지역"),
];

/// Sub-regions only exist under REGION_SEOUL.
pub const SEOUL_SUB_REGIONS: &[(&str, &str)] = &[
    ("SEOUL_GANGNAM", "강남구"),
    ("SEOUL_GANGDONG", "강동구"),
    ("SEOUL_GANGBUK", "강북구"),
    ("SEOUL_GANGSEO", "강서구"),
    ("SEOUL_GWANAK", "관악구"),
    ("SEOUL_GWANGJIN", "광진구"),
    ("SEOUL_GURO", "구로구"),
    ("SEOUL_GEUMCHEON", "금천구"),
    ("SEOUL_NOWON", "노원구"),
    ("SEOUL_DOBONG", "도봉구"),
    ("SEOUL_DONGDAEMUN", "동대문구"),
    ("SEOUL_DONGJAK", "동작구"),
    ("SEOUL_MAPO", "마포구"),
    ("SEOUL_SEODAEMUN", "서대문구"),
    ("SEOUL_SEOCHO", "서초구"),
    ("SEOUL_SEONGDONG", "성동구"),
    ("SEOUL_SEONGBUK", "성북구"),
    ("SEOUL_SONGPA", "송파구"),
    ("SEOUL_YANGCHEON", "양천구"),
    ("SEOUL_YEONGDEUNGPO", "영등포구"),
    ("SEOUL_YONGSAN", "용산구"),
    ("SEOUL_EUNPYEONG", "은평구"),
    ("SEOUL_JONGNO", "종로구"),
    ("SEOUL_JUNG", "중구"),
    ("SEOUL_JUNGNANG", "중랑구"),
];

pub const TIME_SLOTS: &[(&str, &str)] = &[
    ("09:00", "오전 (09:00-12:00)"),
    ("14:00", "오후 (14:00-17:00)"),
    ("18:00", "저녁 (18:00-20:00)"),
];

pub const BOOKING_STATUS_LABELS: &[(&str, &str)] = &[
    ("received", "접수됨"),
    ("confirmed", "확인됨"),
    ("in_progress", "진행중"),
    ("completed", "완료"),
    ("cancelled", "취소됨"),
];

pub const PEST_TYPE_LABELS: &[(&str, &str)] = &[
    ("cockroach", "바퀴벌레"),
    ("ant", "개미"),
    ("fly", "파리/모기"),
    ("mite", "진드기/응애"),
    ("moth", "나방/좀벌레"),
    ("termite", "흰개미"),
    ("mouse", "쥐"),
    ("other", "기타"),
];

fn lookup(table: &[(&str, &'static str)], code: &str) -> &'static str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_LABEL)
}

pub fn issue_label(code: &str) -> &'static str {
    lookup(ISSUE_TYPES, code)
}

pub fn last_seen_label(code: &str) -> &'static str {
    lookup(LAST_SEEN_OPTIONS, code)
}

pub fn tenure_label(code: &str) -> &'static str {
    lookup(TENURE_OPTIONS, code)
}

pub fn home_type_label(code: &str) -> &'static str {
    lookup(HOME_TYPE_OPTIONS, code)
}

pub fn region_label(code: &str) -> &'static str {
    lookup(REGION_OPTIONS, code)
}

pub fn sub_region_label(code: &str) -> &'static str {
    lookup(SEOUL_SUB_REGIONS, code)
}

pub fn time_slot_label(slot: &str) -> &'static str {
    lookup(TIME_SLOTS, slot)
}

pub fn status_label(status: &str) -> &'static str {
    lookup(BOOKING_STATUS_LABELS, status)
}

pub fn pest_type_label(pest_type: &str) -> &'static str {
    lookup(PEST_TYPE_LABELS, pest_type)
}

/// Maps an intake issue code onto the pest-type vocabulary used by the
/// booking record. Unrecognized codes fall back to "other".
pub fn pest_type_for_issue(issue_code: &str) -> &'static str {
    match issue_code {
        "ISSUE_ROACH" => "cockroach",
        "ISSUE_ANT" => "ant",
        "ISSUE_FLY" => "fly",
        "ISSUE_MITE" => "mite",
        "ISSUE_MOTH" => "moth",
        _ => "other",
    }
}
