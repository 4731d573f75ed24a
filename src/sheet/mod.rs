//! Sheet-name resolution: `STYCZEŃ'07` → January 2007.
//!
//! Sheet names carry an upper-case Polish month name and a two-digit year,
//! joined by an apostrophe. Years are always taken to be in the 2000s.

use chrono::{Datelike, Month, NaiveDate};
use std::fmt;
use thiserror::Error;

/// Character separating the month token from the year token.
pub const SEPARATOR: char = '\'';

/// Century added to the two-digit year token.
pub const CENTURY_BASE: i32 = 2000;

// ─── Locale table ─────────────────────────────────────────────────────────────

/// One locale spelling of a month and the month it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleMonthEntry {
    pub token: &'static str,
    pub month: Month,
}

impl LocaleMonthEntry {
    /// English month name, e.g. "January".
    pub fn canonical_name(&self) -> &'static str { self.month.name() }

    /// Zero-based month index (January = 0).
    pub fn month_index(&self) -> u32 { self.month.number_from_month() - 1 }
}

pub static POLISH_MONTHS: [LocaleMonthEntry; 12] = [
    LocaleMonthEntry { token: "STYCZEŃ",     month: Month::January   },
    LocaleMonthEntry { token: "LUTY",        month: Month::February  },
    LocaleMonthEntry { token: "MARZEC",      month: Month::March     },
    LocaleMonthEntry { token: "KWIECIEŃ",    month: Month::April     },
    LocaleMonthEntry { token: "MAJ",         month: Month::May       },
    LocaleMonthEntry { token: "CZERWIEC",    month: Month::June      },
    LocaleMonthEntry { token: "LIPIEC",      month: Month::July      },
    LocaleMonthEntry { token: "SIERPIEŃ",    month: Month::August    },
    LocaleMonthEntry { token: "WRZESIEŃ",    month: Month::September },
    LocaleMonthEntry { token: "PAŹDZIERNIK", month: Month::October   },
    LocaleMonthEntry { token: "LISTOPAD",    month: Month::November  },
    LocaleMonthEntry { token: "GRUDZIEŃ",    month: Month::December  },
];

/// Exact (case- and diacritic-sensitive) lookup of a month token.
pub fn lookup_month(token: &str) -> Option<&'static LocaleMonthEntry> {
    POLISH_MONTHS.iter().find(|e| e.token == token)
}

// ─── Resolved period ──────────────────────────────────────────────────────────

/// A month of a specific year. Always holds a valid first-of-month date, so
/// an out-of-range month index cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedPeriod {
    month: Month,
    first: NaiveDate,
}

impl ResolvedPeriod {
    pub fn new(month: Month, year: i32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
        Some(Self { month, first })
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let month = match first.month() {
            1 => Month::January,   2 => Month::February, 3 => Month::March,
            4 => Month::April,     5 => Month::May,      6 => Month::June,
            7 => Month::July,      8 => Month::August,   9 => Month::September,
            10 => Month::October,  11 => Month::November, _ => Month::December,
        };
        Self { month, first }
    }

    pub fn month(&self) -> Month { self.month }

    /// Zero-based month index (January = 0).
    pub fn month_index(&self) -> u32 { self.month.number_from_month() - 1 }

    pub fn year(&self) -> i32 { self.first.year() }

    pub fn first_day(&self) -> NaiveDate { self.first }

    /// Same month, a given day. `None` if the day does not exist.
    pub fn date(&self, day: u32) -> Option<NaiveDate> { self.first.with_day(day) }

    pub fn next(&self) -> Option<Self> {
        let year = if self.month == Month::December { self.year() + 1 } else { self.year() };
        Self::new(self.month.succ(), year)
    }

    pub fn prev(&self) -> Option<Self> {
        let year = if self.month == Month::January { self.year() - 1 } else { self.year() };
        Self::new(self.month.pred(), year)
    }

    /// Display title, e.g. "January 2007".
    pub fn title(&self) -> String { self.to_string() }
}

impl fmt::Display for ResolvedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year())
    }
}

// ─── Resolution ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("sheet name {0:?} is not in the MONTH'YY format")]
    MalformedIdentifier(String),
    #[error("unknown month name {0:?}")]
    UnknownMonthToken(String),
    #[error("invalid two-digit year {0:?}")]
    InvalidYearToken(String),
}

/// Resolve a sheet name such as `"LUTY'25"` into its month and year.
pub fn resolve(identifier: &str) -> Result<ResolvedPeriod, ParseError> {
    let parts: Vec<&str> = identifier.split(SEPARATOR).collect();
    let [month_token, year_token] = parts.as_slice() else {
        return Err(ParseError::MalformedIdentifier(identifier.to_owned()));
    };
    let month_token = month_token.trim();
    let year_token  = year_token.trim();

    let entry = lookup_month(month_token)
        .ok_or_else(|| ParseError::UnknownMonthToken(month_token.to_owned()))?;

    let short_year = parse_short_year(year_token)
        .ok_or_else(|| ParseError::InvalidYearToken(year_token.to_owned()))?;

    ResolvedPeriod::new(entry.month, CENTURY_BASE + short_year)
        .ok_or_else(|| ParseError::InvalidYearToken(year_token.to_owned()))
}

/// One or two ASCII digits, nothing else.
fn parse_short_year(token: &str) -> Option<i32> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_resolves_with_year_2007() {
        for entry in &POLISH_MONTHS {
            let period = resolve(&format!("{}'07", entry.token)).unwrap();
            assert_eq!(period.month(), entry.month);
            assert_eq!(period.month_index(), entry.month_index());
            assert_eq!(period.year(), 2007);
        }
    }

    #[test]
    fn table_covers_each_month_once() {
        let mut indices: Vec<u32> = POLISH_MONTHS.iter().map(|e| e.month_index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_month_token() {
        assert_eq!(
            resolve("Unknown'07"),
            Err(ParseError::UnknownMonthToken("Unknown".into()))
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(matches!(resolve("styczeń'07"), Err(ParseError::UnknownMonthToken(_))));
        // Diacritics are significant too.
        assert!(matches!(resolve("STYCZEN'07"), Err(ParseError::UnknownMonthToken(_))));
    }

    #[test]
    fn wrong_separator_is_malformed() {
        assert_eq!(
            resolve("STYCZEŃ-07"),
            Err(ParseError::MalformedIdentifier("STYCZEŃ-07".into()))
        );
    }

    #[test]
    fn too_many_separators_is_malformed() {
        assert!(matches!(resolve("MAJ'07'08"), Err(ParseError::MalformedIdentifier(_))));
    }

    #[test]
    fn non_numeric_year() {
        assert_eq!(
            resolve("STYCZEŃ'ab"),
            Err(ParseError::InvalidYearToken("ab".into()))
        );
    }

    #[test]
    fn year_token_length_limits() {
        assert!(matches!(resolve("MAJ'"), Err(ParseError::InvalidYearToken(_))));
        assert!(matches!(resolve("MAJ'2007"), Err(ParseError::InvalidYearToken(_))));
        assert!(matches!(resolve("MAJ'-7"), Err(ParseError::InvalidYearToken(_))));
        assert!(matches!(resolve("MAJ'+7"), Err(ParseError::InvalidYearToken(_))));
        assert_eq!(resolve("MAJ'7").unwrap().year(), 2007);
        assert_eq!(resolve("MAJ'99").unwrap().year(), 2099);
        assert_eq!(resolve("MAJ'00").unwrap().year(), 2000);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let period = resolve("  PAŹDZIERNIK ' 24 ").unwrap();
        assert_eq!(period.month(), Month::October);
        assert_eq!(period.year(), 2024);
    }

    #[test]
    fn title_uses_english_month_name() {
        assert_eq!(resolve("GRUDZIEŃ'23").unwrap().title(), "December 2023");
        assert_eq!(POLISH_MONTHS[8].canonical_name(), "September");
    }

    #[test]
    fn next_and_prev_roll_over_the_year() {
        let dec = ResolvedPeriod::new(Month::December, 2024).unwrap();
        let jan = dec.next().unwrap();
        assert_eq!((jan.month(), jan.year()), (Month::January, 2025));
        assert_eq!(jan.prev(), Some(dec));
    }

    #[test]
    fn containing_maps_a_date_to_its_month() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        let period = ResolvedPeriod::containing(date);
        assert_eq!(period, ResolvedPeriod::new(Month::February, 2025).unwrap());
        assert_eq!(period.date(17), Some(date));
        assert_eq!(period.date(30), None);
    }
}
