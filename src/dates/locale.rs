//! Locale conventions for calendar rendering: first day of week, weekday
//! label rotation, and the display label tables for supported languages.

/// Language prefixes whose calendar convention starts the week on Monday.
/// Covers most of continental Europe, East Asia, and a few others; anything
/// not listed defaults to Sunday-first.
const MONDAY_FIRST: &[&str] = &[
    "de", "fr", "es", "it", "pt", "nl", "be", "dk", "fi", "is", "no", "se", "al", "ba", "bg", "hr",
    "cz", "gr", "hu", "pl", "ro", "ru", "sk", "si", "rs", "ua", "tr", "cy", "il", "cn", "jp", "kr",
];

/// First day of week for a locale tag: `0` = Sunday, `1` = Monday.
pub fn first_day_of_week(locale: &str) -> u32 {
    let prefix = locale
        .split('-')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if MONDAY_FIRST.contains(&prefix.as_str()) {
        1
    } else {
        0
    }
}

/// Rotates a Sunday-ordered 7-element label sequence so it starts at
/// `first_day`: `labels[first_day..] + labels[..first_day]`.
pub fn reorder_weekday_labels<T: Clone>(labels: &[T; 7], first_day: u32) -> Vec<T> {
    let pivot = (first_day % 7) as usize;
    let mut reordered = labels[pivot..].to_vec();
    reordered.extend_from_slice(&labels[..pivot]);
    reordered
}

/// Maps a Sunday-based day-of-week index into the column of a grid whose
/// first column is `first_day`.
pub fn adjust_day_of_week(day_of_week: u32, first_day: u32) -> u32 {
    (day_of_week + 7 - first_day) % 7
}

/// Short weekday labels in Sunday order for the locale's language.
pub fn weekday_labels(locale: &str) -> &'static [&'static str; 7] {
    match language(locale) {
        "de" => &["SO", "MO", "DI", "MI", "DO", "FR", "SA"],
        "fr" => &["DIM", "LUN", "MAR", "MER", "JEU", "VEN", "SAM"],
        "es" => &["DOM", "LUN", "MAR", "MIÉ", "JUE", "VIE", "SÁB"],
        "it" => &["DOM", "LUN", "MAR", "MER", "GIO", "VEN", "SAB"],
        _ => &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
    }
}

/// Full month name (1-based month) in the locale's language.
pub fn month_name(month: u32, locale: &str) -> &'static str {
    let index = (month.saturating_sub(1) % 12) as usize;
    match language(locale) {
        "de" => [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ][index],
        "fr" => [
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ][index],
        "es" => [
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ][index],
        "it" => [
            "gennaio",
            "febbraio",
            "marzo",
            "aprile",
            "maggio",
            "giugno",
            "luglio",
            "agosto",
            "settembre",
            "ottobre",
            "novembre",
            "dicembre",
        ][index],
        _ => [
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
        ][index],
    }
}

/// Formats a date for display in the locale's numeric convention.
pub fn format_date_display(date: chrono::NaiveDate, locale: &str) -> String {
    use chrono::Datelike;
    if locale.starts_with("en-US") {
        format!("{:02}/{:02}/{}", date.month(), date.day(), date.year())
    } else if first_day_of_week(locale) == 1 {
        format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
    } else {
        crate::dates::format_iso(date)
    }
}

fn language(locale: &str) -> &str {
    locale.split('-').next().unwrap_or_default()
}
