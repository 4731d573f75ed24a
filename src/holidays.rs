/// Polish public holidays (dni ustawowo wolne od pracy).
///
/// Fixed-date holidays are stored as (month, day) pairs.
/// Movable feasts hang off Easter Sunday, computed per year.
use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::days_in_month;

// ─── Data types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    pub name:       &'static str,
    pub local_name: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Returns all holidays that fall on the given date.
pub fn holidays_on(date: NaiveDate) -> Vec<Holiday> {
    let mut out = Vec::new();
    let (m, d) = (date.month(), date.day());

    // ── Fixed-date holidays ──────────────────────────────────────────────────
    const FIXED: &[(u32, u32, &str, &str)] = &[
        (1,  1,  "New Year's Day",        "Nowy Rok"),
        (1,  6,  "Epiphany",              "Święto Trzech Króli"),
        (5,  1,  "Labour Day",            "Święto Pracy"),
        (5,  3,  "Constitution Day",      "Święto Konstytucji 3 Maja"),
        (8,  15, "Assumption Day",        "Wniebowzięcie NMP"),
        (11, 1,  "All Saints' Day",       "Wszystkich Świętych"),
        (11, 11, "Independence Day",      "Narodowe Święto Niepodległości"),
        (12, 25, "Christmas Day",         "Boże Narodzenie"),
        (12, 26, "Second Day of Christmas", "Drugi dzień Bożego Narodzenia"),
    ];
    for &(hm, hd, name, local_name) in FIXED {
        if m == hm && d == hd {
            out.push(Holiday { name, local_name });
        }
    }

    // Christmas Eve became a public holiday in 2025.
    if date.year() >= 2025 && m == 12 && d == 24 {
        out.push(Holiday { name: "Christmas Eve", local_name: "Wigilia" });
    }

    // ── Easter-based holidays ────────────────────────────────────────────────
    const MOVABLE: &[(i64, &str, &str)] = &[
        (0,  "Easter Sunday",  "Wielkanoc"),
        (1,  "Easter Monday",  "Poniedziałek Wielkanocny"),
        (49, "Pentecost",      "Zielone Świątki"),
        (60, "Corpus Christi", "Boże Ciało"),
    ];
    if let Some(easter) = easter_sunday(date.year()) {
        for &(offset, name, local_name) in MOVABLE {
            if easter + Duration::days(offset) == date {
                out.push(Holiday { name, local_name });
            }
        }
    }

    out
}

/// Returns `(day_of_month, Holiday)` pairs for every holiday in the given month.
pub fn holidays_in_month(year: i32, month: u32) -> Vec<(u32, Holiday)> {
    let mut out = Vec::new();
    for day in 1..=days_in_month(year, month) {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            for h in holidays_on(date) {
                out.push((day, h));
            }
        }
    }
    out
}

pub fn is_holiday(date: NaiveDate) -> bool {
    !holidays_on(date).is_empty()
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Western Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day   = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_dates() {
        assert_eq!(easter_sunday(2024), Some(ymd(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(ymd(2025, 4, 20)));
        assert_eq!(easter_sunday(2026), Some(ymd(2026, 4, 5)));
        assert_eq!(easter_sunday(2000), Some(ymd(2000, 4, 23)));
    }

    #[test]
    fn movable_feasts_follow_easter() {
        assert_eq!(holidays_on(ymd(2025, 4, 21))[0].name, "Easter Monday");
        assert_eq!(holidays_on(ymd(2025, 6, 8))[0].name, "Pentecost");
        assert_eq!(holidays_on(ymd(2025, 6, 19))[0].name, "Corpus Christi");
    }

    #[test]
    fn fixed_holidays() {
        assert_eq!(holidays_on(ymd(2007, 11, 11))[0].local_name, "Narodowe Święto Niepodległości");
        assert!(is_holiday(ymd(2030, 5, 3)));
        assert!(!is_holiday(ymd(2030, 5, 2)));
    }

    #[test]
    fn christmas_eve_only_from_2025() {
        assert!(!is_holiday(ymd(2024, 12, 24)));
        assert!(is_holiday(ymd(2025, 12, 24)));
    }

    #[test]
    fn december_2025_has_three_holidays() {
        let days: Vec<u32> = holidays_in_month(2025, 12).iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![24, 25, 26]);
    }
}
