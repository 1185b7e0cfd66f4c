//! Progress entries, BMI and the per-category averages shown on the progress tab.

use serde::{Deserialize, Serialize};

use crate::models::{ProgressEntry, ValidationError};
use crate::utils::{parse_date, round1};

/// Fixed height used for every BMI calculation, in metres
pub const REFERENCE_HEIGHT_M: f64 = 1.75;

/// BMI for `weight_kg` at the reference height, rounded to one decimal
pub fn compute_bmi(weight_kg: f64) -> f64 {
    round1(weight_kg / REFERENCE_HEIGHT_M.powi(2))
}

/// Raw progress form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressForm {
    pub date: String,
    pub weight: String,
    pub calories: String,
    pub steps: String,
    pub diet: String,
    pub water: String,
    pub sleep: String,
    pub workout: String,
}

/// Field names in form order
pub const PROGRESS_FIELDS: [&str; 8] = [
    "date", "weight", "calories", "steps", "diet", "water", "sleep", "workout",
];

impl ProgressForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "date" => &self.date,
            "weight" => &self.weight,
            "calories" => &self.calories,
            "steps" => &self.steps,
            "diet" => &self.diet,
            "water" => &self.water,
            "sleep" => &self.sleep,
            "workout" => &self.workout,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "date" => Some(&mut self.date),
            "weight" => Some(&mut self.weight),
            "calories" => Some(&mut self.calories),
            "steps" => Some(&mut self.steps),
            "diet" => Some(&mut self.diet),
            "water" => Some(&mut self.water),
            "sleep" => Some(&mut self.sleep),
            "workout" => Some(&mut self.workout),
            _ => None,
        }
    }

    /// Check every field is present and well-formed. Presence is checked
    /// for all fields before any parsing happens.
    pub fn validate(&self) -> Result<ValidatedProgress, ValidationError> {
        for name in PROGRESS_FIELDS {
            if self.field(name).is_none_or(|v| v.trim().is_empty()) {
                return Err(ValidationError::MissingField(name));
            }
        }

        let date = self.date.trim();
        parse_date(date).map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

        let steps = self.steps.trim();
        let steps = steps.parse::<u64>().map_err(|_| ValidationError::InvalidNumber {
            field: "steps",
            value: steps.to_string(),
        })?;

        Ok(ValidatedProgress {
            date: date.to_string(),
            weight: number("weight", &self.weight)?,
            calories: number("calories", &self.calories)?,
            steps,
            diet: number("diet", &self.diet)?,
            water: number("water", &self.water)?,
            sleep: number("sleep", &self.sleep)?,
            workout: number("workout", &self.workout)?,
        })
    }
}

fn number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber { field, value: raw.to_string() })
}

/// A progress form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProgress {
    pub date: String,
    pub weight: f64,
    pub calories: f64,
    pub steps: u64,
    pub diet: f64,
    pub water: f64,
    pub sleep: f64,
    pub workout: f64,
}

/// Mean score per category across all entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverages {
    pub diet: f64,
    pub water: f64,
    pub sleep: f64,
    pub workout: f64,
}

impl CategoryAverages {
    pub fn as_pairs(&self) -> [(&'static str, f64); 4] {
        [
            ("Diet", self.diet),
            ("Water", self.water),
            ("Sleep", self.sleep),
            ("Workout", self.workout),
        ]
    }
}

/// Most-recent-first log of progress entries. It lives only as long as the
/// session that owns it. Entries are never edited or deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressLog {
    entries: Vec<ProgressEntry>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `form` and prepend the resulting entry
    pub fn add(&mut self, form: &ProgressForm) -> Result<ProgressEntry, ValidationError> {
        let valid = form.validate()?;
        let entry = ProgressEntry {
            id: self.next_id(),
            bmi: compute_bmi(valid.weight),
            date: valid.date,
            weight: valid.weight,
            calories: valid.calories,
            steps: valid.steps,
            diet: valid.diet,
            water: valid.water,
            sleep: valid.sleep,
            workout: valid.workout,
        };
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    // Creation time in millis, bumped past the newest id so ids stay strictly increasing
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        match self.entries.iter().map(|e| e.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }

    pub fn averages(&self) -> CategoryAverages {
        if self.entries.is_empty() {
            return CategoryAverages::default();
        }
        let n = self.entries.len() as f64;
        let mean = |f: fn(&ProgressEntry) -> f64| round1(self.entries.iter().map(f).sum::<f64>() / n);
        CategoryAverages {
            diet: mean(|e| e.diet),
            water: mean(|e| e.water),
            sleep: mean(|e| e.sleep),
            workout: mean(|e| e.workout),
        }
    }

    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(weight: &str, diet: &str) -> ProgressForm {
        ProgressForm {
            date: "2024-05-01".into(),
            weight: weight.into(),
            calories: "2100".into(),
            steps: "8000".into(),
            diet: diet.into(),
            water: "6".into(),
            sleep: "7".into(),
            workout: "5".into(),
        }
    }

    #[test]
    fn bmi_uses_reference_height() {
        assert_eq!(compute_bmi(70.0), 22.9);
        assert_eq!(compute_bmi(0.0), 0.0);
    }

    #[test]
    fn add_computes_bmi_and_prepends() {
        let mut log = ProgressLog::new();
        let first = log.add(&form("70", "8")).unwrap();
        let second = log.add(&form("80", "6")).unwrap();

        assert_eq!(first.bmi, 22.9);
        assert_eq!(second.bmi, 26.1);
        assert_eq!(log.entries()[0], second);
        assert!(second.id > first.id);
    }

    #[test]
    fn missing_steps_is_rejected() {
        let mut log = ProgressLog::new();
        let mut f = form("70", "8");
        f.steps.clear();

        assert_eq!(log.add(&f), Err(ValidationError::MissingField("steps")));
        assert!(log.is_empty());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut f = form("70", "8");
        f.date = "  ".into();
        assert_eq!(f.validate(), Err(ValidationError::MissingField("date")));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let f = form("heavy", "8");
        assert!(matches!(f.validate(), Err(ValidationError::InvalidNumber { field: "weight", .. })));

        let mut f = form("70", "8");
        f.date = "yesterday".into();
        assert!(matches!(f.validate(), Err(ValidationError::InvalidDate(_))));
    }

    #[test]
    fn averages_default_to_zero() {
        assert_eq!(ProgressLog::new().averages(), CategoryAverages::default());
    }

    #[test]
    fn averages_are_rounded_means() {
        let mut log = ProgressLog::new();
        log.add(&form("70", "8")).unwrap();
        log.add(&form("70", "7")).unwrap();
        log.add(&form("70", "7")).unwrap();

        let avg = log.averages();
        assert_eq!(avg.diet, 7.3);
        assert_eq!(avg.water, 6.0);
        assert_eq!(avg.sleep, 7.0);
    }
}
