use super::*;

fn d(y: i32, m: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn indonesian_long_date() {
    assert_eq!(long_date(d(2026, 10, 15), DateLocale::Indonesian), "15 Oktober 2026");
    assert_eq!(long_date(d(2025, 8, 1), DateLocale::Indonesian), "1 Agustus 2025");
    assert_eq!(long_date(d(2024, 5, 31), DateLocale::Indonesian), "31 Mei 2024");
}

#[test]
fn english_long_date() {
    assert_eq!(long_date(d(2026, 10, 15), DateLocale::English), "15 October 2026");
}

#[test]
fn locale_is_lowercase_in_json() {
    let l: DateLocale = serde_json::from_str("\"english\"").unwrap();
    assert_eq!(l, DateLocale::English);
    assert_eq!(DateLocale::default(), DateLocale::Indonesian);
}
