use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::Mood;

pub const CALENDAR_DAYS: u8 = 30;

pub const MOOD_PROMPT: &str = "How was your day? 😊 (happy), 😐 (ok), 😞 (sad)";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodError {
    #[error("Day {0} is not on the calendar (1-30)")]
    DayOutOfRange(u8),
}

/// Day-of-month to mood mapping for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodCalendar {
    days: BTreeMap<u8, Mood>,
}

impl MoodCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply prompt input to `day`. Empty input changes nothing; an
    /// unrecognised value leaves the day without a mood.
    pub fn record(&mut self, day: u8, input: &str) -> Result<Option<Mood>, MoodError> {
        if !(1..=CALENDAR_DAYS).contains(&day) {
            return Err(MoodError::DayOutOfRange(day));
        }
        if input.trim().is_empty() {
            return Ok(self.get(day));
        }

        match Mood::parse(input) {
            Some(mood) => {
                self.days.insert(day, mood);
                Ok(Some(mood))
            }
            None => {
                self.days.remove(&day);
                Ok(None)
            }
        }
    }

    pub fn get(&self, day: u8) -> Option<Mood> {
        self.days.get(&day).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Mood)> + '_ {
        self.days.iter().map(|(d, m)| (*d, *m))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_overwrites() {
        let mut cal = MoodCalendar::new();
        assert_eq!(cal.record(3, "😊").unwrap(), Some(Mood::Happy));
        assert_eq!(cal.record(3, "sad").unwrap(), Some(Mood::Sad));
        assert_eq!(cal.get(3), Some(Mood::Sad));
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn empty_input_keeps_existing_mood() {
        let mut cal = MoodCalendar::new();
        cal.record(10, "ok").unwrap();
        assert_eq!(cal.record(10, "   ").unwrap(), Some(Mood::Ok));
        assert_eq!(cal.get(10), Some(Mood::Ok));
    }

    #[test]
    fn unknown_input_means_no_mood() {
        let mut cal = MoodCalendar::new();
        cal.record(5, "happy").unwrap();
        assert_eq!(cal.record(5, "meh").unwrap(), None);
        assert_eq!(cal.get(5), None);
        assert!(cal.is_empty());
    }

    #[test]
    fn day_must_be_on_calendar() {
        let mut cal = MoodCalendar::new();
        assert_eq!(cal.record(0, "ok"), Err(MoodError::DayOutOfRange(0)));
        assert_eq!(cal.record(31, "ok"), Err(MoodError::DayOutOfRange(31)));
        assert!(cal.record(30, "ok").is_ok());
    }

    #[test]
    fn iterates_in_day_order() {
        let mut cal = MoodCalendar::new();
        cal.record(20, "sad").unwrap();
        cal.record(2, "happy").unwrap();
        let days: Vec<u8> = cal.iter().map(|(d, _)| d).collect();
        assert_eq!(days, vec![2, 20]);
    }
}
