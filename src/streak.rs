use thiserror::Error;

pub const WEEK_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const CELEBRATION_MESSAGE: &str =
    "🎉 Congrats! You've completed your fitness goal for the entire week!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreakError {
    #[error("Day index {0} is out of range (0-6)")]
    DayOutOfRange(usize),
}

/// Result of flipping one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakToggle {
    /// New state of the toggled day
    pub completed: bool,
    /// True only when this toggle completed the whole week
    pub celebrate: bool,
}

/// Weekly check-in tracker, Monday through Sunday
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakWeek {
    days: [bool; 7],
}

impl StreakWeek {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, index: usize) -> Result<StreakToggle, StreakError> {
        let was_complete = self.is_complete();
        let day = self.days.get_mut(index).ok_or(StreakError::DayOutOfRange(index))?;
        *day = !*day;
        let completed = *day;

        Ok(StreakToggle {
            completed,
            celebrate: !was_complete && self.is_complete(),
        })
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.days.get(index).copied().unwrap_or(false)
    }

    pub fn days(&self) -> &[bool; 7] {
        &self.days
    }

    pub fn completed_count(&self) -> usize {
        self.days.iter().filter(|d| **d).count()
    }

    pub fn is_complete(&self) -> bool {
        self.days.iter().all(|d| *d)
    }

    pub fn completion_percent(&self) -> f64 {
        self.completed_count() as f64 / self.days.len() as f64 * 100.0
    }

    /// Percentage rounded for display
    pub fn completion_display(&self) -> u32 {
        self.completion_percent().round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let week = StreakWeek::new();
        assert_eq!(week.completed_count(), 0);
        assert_eq!(week.completion_display(), 0);
    }

    #[test]
    fn percentage_rounds_for_display() {
        let mut week = StreakWeek::new();
        week.toggle(0).unwrap();
        assert_eq!(week.completion_display(), 14);
        week.toggle(1).unwrap();
        assert_eq!(week.completion_display(), 29);
    }

    #[test]
    fn celebrates_once_per_transition() {
        let mut week = StreakWeek::new();
        let mut celebrations = 0;
        for i in 0..7 {
            if week.toggle(i).unwrap().celebrate {
                celebrations += 1;
            }
        }
        assert_eq!(celebrations, 1);
        assert_eq!(week.completion_percent(), 100.0);

        // Leaving and re-entering the complete state celebrates again
        assert!(!week.toggle(3).unwrap().celebrate);
        assert!(week.toggle(3).unwrap().celebrate);
    }

    #[test]
    fn toggle_flips_back() {
        let mut week = StreakWeek::new();
        assert!(week.toggle(6).unwrap().completed);
        assert!(!week.toggle(6).unwrap().completed);
        assert!(!week.is_done(6));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut week = StreakWeek::new();
        assert_eq!(week.toggle(7), Err(StreakError::DayOutOfRange(7)));
        assert_eq!(week, StreakWeek::new());
    }
}
