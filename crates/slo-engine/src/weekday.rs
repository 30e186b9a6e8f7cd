//! Map free-form day labels ("Mon", "tuesday", "จ.", "พฤ", "3") to weekdays.
//!
//! Resolution never fails on non-empty input. Labels that match nothing in
//! the table fall back to the caller-supplied `today`, and the result says so
//! through [`WeekdayResolution::Defaulted`].

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Outcome of resolving a day label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "weekday", rename_all = "snake_case")]
pub enum WeekdayResolution {
    /// The label matched an entry in the lookup table.
    Resolved(Weekday),
    /// The label was unrecognized; the fallback weekday was used.
    Defaulted(Weekday),
}

impl WeekdayResolution {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekdayResolution::Resolved(w) | WeekdayResolution::Defaulted(w) => w,
        }
    }

    /// Index with 0 = Sunday through 6 = Saturday.
    pub fn index(self) -> u32 {
        self.weekday().num_days_from_sunday()
    }

    pub fn is_defaulted(self) -> bool {
        matches!(self, WeekdayResolution::Defaulted(_))
    }
}

/// Known labels, keyed by normalized (trimmed, lowercased, no trailing dot) text.
///
/// Thai single-letter abbreviations follow the conventional calendar forms:
/// อา Sunday, จ Monday, อ Tuesday, พ Wednesday, พฤ Thursday, ศ Friday, ส Saturday.
const DAY_TABLE: &[(&str, Weekday)] = &[
    // English, three-letter prefixes cover the full names.
    ("sun", Weekday::Sun),
    ("mon", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
    // RFC 5545 BYDAY codes.
    ("su", Weekday::Sun),
    ("mo", Weekday::Mon),
    ("tu", Weekday::Tue),
    ("we", Weekday::Wed),
    ("th", Weekday::Thu),
    ("fr", Weekday::Fri),
    ("sa", Weekday::Sat),
    // Thai full names.
    ("อาทิตย์", Weekday::Sun),
    ("จันทร์", Weekday::Mon),
    ("อังคาร", Weekday::Tue),
    ("พุธ", Weekday::Wed),
    ("พฤหัสบดี", Weekday::Thu),
    ("พฤหัส", Weekday::Thu),
    ("ศุกร์", Weekday::Fri),
    ("เสาร์", Weekday::Sat),
    // Thai abbreviations.
    ("อา", Weekday::Sun),
    ("จ", Weekday::Mon),
    ("อ", Weekday::Tue),
    ("พ", Weekday::Wed),
    ("พฤ", Weekday::Thu),
    ("ศ", Weekday::Fri),
    ("ส", Weekday::Sat),
    // Numeric, 0 = Sunday.
    ("0", Weekday::Sun),
    ("1", Weekday::Mon),
    ("2", Weekday::Tue),
    ("3", Weekday::Wed),
    ("4", Weekday::Thu),
    ("5", Weekday::Fri),
    ("6", Weekday::Sat),
];

fn lookup(key: &str) -> Option<Weekday> {
    DAY_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, w)| *w)
}

fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Resolve a day label to a weekday.
///
/// Tries the whole normalized label, then its first three and two characters
/// against the table. Single-letter keys only match a label that is exactly
/// that letter, so "2pm" or "1st period" are not read as weekdays.
///
/// Returns `None` only when the label is empty or whitespace; anything else
/// unrecognized yields `Defaulted(today)`.
pub fn resolve_weekday(token: &str, today: Weekday) -> Option<WeekdayResolution> {
    let normalized = token.trim().trim_end_matches('.').trim().to_lowercase();
    if normalized.is_empty() {
        return if token.trim().is_empty() {
            None
        } else {
            Some(WeekdayResolution::Defaulted(today))
        };
    }

    let found = lookup(&normalized).or_else(|| {
        (2..=3)
            .rev()
            .map(|n| prefix(&normalized, n))
            .find_map(|p| lookup(&p))
    });

    Some(match found {
        Some(weekday) => WeekdayResolution::Resolved(weekday),
        None => WeekdayResolution::Defaulted(today),
    })
}
