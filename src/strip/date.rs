use chrono::Datelike;

/// Language of the footer date line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    /// `15 Oktober 2026`
    #[default]
    Indonesian,
    /// `15 October 2026`
    English,
}

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Long day-month-year date, without leading zeros.
pub fn long_date(date: chrono::NaiveDate, locale: DateLocale) -> String {
    let months = match locale {
        DateLocale::Indonesian => &MONTHS_ID,
        DateLocale::English => &MONTHS_EN,
    };
    format!(
        "{} {} {}",
        date.day(),
        months[date.month0() as usize],
        date.year()
    )
}

/// Today's date in local time.
pub fn today(locale: DateLocale) -> String {
    long_date(chrono::Local::now().date_naive(), locale)
}

#[cfg(test)]
#[path = "../../tests/unit/strip/date.rs"]
mod tests;
