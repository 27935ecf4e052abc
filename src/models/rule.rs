//! Weekday availability rules.
//!
//! A rule describes one weekday's resource grid: an ordered set of
//! distinct time slots crossed with an ordered set of distinct fields.
//! Every (slot, field) cell can host one game per matching date.
//!
//! Weekdays are numbered 0 (Sunday) through 6 (Saturday).

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Weekday used when a rule leaves it unspecified (Monday).
pub const DEFAULT_WEEKDAY: u8 = 1;

/// Slot used when a rule lists no game times.
pub const DEFAULT_GAME_TIME: &str = "7:00 PM";

/// Fields used when a rule lists none.
pub const DEFAULT_FIELDS: [&str; 2] = ["Field #1", "Field #2"];

const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

/// One weekday's availability: slots × fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleConfig")]
pub struct Rule {
    weekday: u8,
    #[serde(rename = "times")]
    slots: Vec<NaiveTime>,
    fields: Vec<String>,
}

/// Unvalidated rule input, as it arrives from configuration.
///
/// Empty lists and a missing weekday fall back to the defaults above.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Weekday, 0 = Sunday.
    pub weekday: Option<u8>,
    /// Times of day, e.g. `"7:00 PM"` or `"19:00"`.
    #[serde(alias = "game_times")]
    pub times: Vec<String>,
    /// Field identifiers.
    pub fields: Vec<String>,
}

impl Rule {
    /// Creates a validated rule.
    ///
    /// Duplicate slots and fields are dropped (first occurrence wins).
    /// Empty `times` or `fields` fall back to [`DEFAULT_GAME_TIME`] and
    /// [`DEFAULT_FIELDS`].
    ///
    /// # Errors
    /// [`ScheduleError::InvalidWeekday`] for a weekday above 6,
    /// [`ScheduleError::InvalidTime`] for an unparsable time.
    pub fn new<T, F>(weekday: u8, times: T, fields: F) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        if weekday > 6 {
            return Err(ScheduleError::InvalidWeekday(weekday));
        }

        let mut slots = Vec::new();
        for raw in times {
            let slot = parse_game_time(raw.as_ref())?;
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        if slots.is_empty() {
            slots.push(parse_game_time(DEFAULT_GAME_TIME)?);
        }

        let mut unique_fields: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !unique_fields.contains(&field) {
                unique_fields.push(field);
            }
        }
        if unique_fields.is_empty() {
            unique_fields = DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect();
        }

        Ok(Self {
            weekday,
            slots,
            fields: unique_fields,
        })
    }

    /// Weekday number, 0 = Sunday.
    #[inline]
    pub fn weekday_number(&self) -> u8 {
        self.weekday
    }

    /// Weekday as a chrono value.
    pub fn weekday(&self) -> Weekday {
        weekday_from_number(self.weekday)
    }

    /// Time slots in rule order.
    pub fn slots(&self) -> &[NaiveTime] {
        &self.slots
    }

    /// Field identifiers in rule order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Games this rule can host on one date.
    pub fn capacity(&self) -> usize {
        self.slots.len() * self.fields.len()
    }

    /// Position of `slot` in this rule, if present.
    pub fn slot_index(&self, slot: NaiveTime) -> Option<usize> {
        self.slots.iter().position(|&s| s == slot)
    }

    /// Position of `field` in this rule, if present.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

impl TryFrom<RuleConfig> for Rule {
    type Error = ScheduleError;

    fn try_from(config: RuleConfig) -> Result<Self> {
        Rule::new(
            config.weekday.unwrap_or(DEFAULT_WEEKDAY),
            config.times,
            config.fields,
        )
    }
}

/// Parses a time of day such as `7:00 PM`, `7:00pm`, `11:00 AM` or `18:20`.
pub fn parse_game_time(raw: &str) -> Result<NaiveTime> {
    let normalized = raw.trim().to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        .ok_or_else(|| ScheduleError::InvalidTime(raw.to_string()))
}

/// Maps 0 = Sunday .. 6 = Saturday onto chrono's weekday.
///
/// Values above 6 wrap modulo 7.
pub fn weekday_from_number(n: u8) -> Weekday {
    match n % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_rule_basic() {
        let r = Rule::new(3, ["7:00 PM", "9:00 PM"], ["A", "B", "C"]).unwrap();
        assert_eq!(r.weekday_number(), 3);
        assert_eq!(r.weekday(), Weekday::Wed);
        assert_eq!(r.slots(), &[time(19, 0), time(21, 0)]);
        assert_eq!(r.fields(), &["A", "B", "C"]);
        assert_eq!(r.capacity(), 6);
        assert_eq!(r.slot_index(time(21, 0)), Some(1));
        assert_eq!(r.field_index("C"), Some(2));
        assert_eq!(r.field_index("Z"), None);
    }

    #[test]
    fn test_rule_defaults() {
        let r = Rule::new(2, Vec::<&str>::new(), Vec::<String>::new()).unwrap();
        assert_eq!(r.slots(), &[time(19, 0)]);
        assert_eq!(r.fields(), &["Field #1", "Field #2"]);
    }

    #[test]
    fn test_rule_deduplicates() {
        let r = Rule::new(1, ["19:00", "7:00 PM", "8:00 PM"], ["A", "A", "B"]).unwrap();
        assert_eq!(r.slots(), &[time(19, 0), time(20, 0)]);
        assert_eq!(r.fields(), &["A", "B"]);
    }

    #[test]
    fn test_invalid_weekday() {
        let err = Rule::new(7, ["7:00 PM"], ["A"]).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidWeekday(7));
    }

    #[test]
    fn test_invalid_time() {
        let err = Rule::new(1, ["not a time"], ["A"]).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidTime("not a time".into()));
    }

    #[test]
    fn test_parse_game_time_formats() {
        assert_eq!(parse_game_time("7:00 PM").unwrap(), time(19, 0));
        assert_eq!(parse_game_time("7:00PM").unwrap(), time(19, 0));
        assert_eq!(parse_game_time("07:30 pm").unwrap(), time(19, 30));
        assert_eq!(parse_game_time("11:00 AM").unwrap(), time(11, 0));
        assert_eq!(parse_game_time("18:20").unwrap(), time(18, 20));
        assert_eq!(parse_game_time(" 18:20:00 ").unwrap(), time(18, 20));
        assert!(parse_game_time("25:00").is_err());
    }

    #[test]
    fn test_weekday_mapping() {
        assert_eq!(weekday_from_number(0), Weekday::Sun);
        assert_eq!(weekday_from_number(6), Weekday::Sat);
    }

    #[test]
    fn test_rule_config_conversion() {
        let config = RuleConfig {
            weekday: None,
            times: vec![],
            fields: vec!["North".into()],
        };
        let r = Rule::try_from(config).unwrap();
        assert_eq!(r.weekday_number(), DEFAULT_WEEKDAY);
        assert_eq!(r.fields(), &["North"]);
    }

    #[test]
    fn test_rule_deserialize_validates() {
        let r: Rule =
            serde_json::from_str(r#"{"weekday": 4, "game_times": ["9:00 PM"], "fields": ["X"]}"#)
                .unwrap();
        assert_eq!(r.weekday(), Weekday::Thu);
        assert_eq!(r.slots(), &[time(21, 0)]);

        let bad: std::result::Result<Rule, _> = serde_json::from_str(r#"{"weekday": 9}"#);
        assert!(bad.is_err());
    }
}
