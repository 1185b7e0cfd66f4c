//! Canned diet plans and the diet form that gates them.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use crate::models::ValidationError;

pub const MISSING_FIELDS_MESSAGE: &str = "❌ Please fill all fields to generate a diet plan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietPreference {
    #[default]
    Veg,
    NonVeg,
}

impl DietPreference {
    pub fn toggle(self) -> Self {
        match self {
            DietPreference::Veg => DietPreference::NonVeg,
            DietPreference::NonVeg => DietPreference::Veg,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DietPreference::Veg => "Veg",
            DietPreference::NonVeg => "Non-Veg",
        }
    }
}

/// Diet form as typed; all four fields are required
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietForm {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub gender: String,
}

/// A complete diet form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DietRequest {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub gender: String,
}

impl DietForm {
    pub fn validate(&self) -> Result<DietRequest, ValidationError> {
        let fields = [
            ("height", &self.height),
            ("weight", &self.weight),
            ("age", &self.age),
            ("gender", &self.gender),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(*name));
        }
        Ok(DietRequest {
            height: self.height.trim().to_string(),
            weight: self.weight.trim().to_string(),
            age: self.age.trim().to_string(),
            gender: self.gender.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Markdown plan for the given preference
pub fn generate_plan(preference: DietPreference, request: &DietRequest) -> String {
    match preference {
        DietPreference::Veg => format!(
            "🥗 **Veg Diet Plan** for {}, {} yrs:\n\
             * Morning: Oats with fruits + almonds\n\
             * Mid-morning: Coconut water + fruits\n\
             * Lunch: Brown rice, dal, sabzi, salad\n\
             * Snack: Buttermilk or green tea + roasted chana\n\
             * Dinner: Multigrain roti, paneer sabzi, soup",
            request.gender, request.age
        ),
        DietPreference::NonVeg => format!(
            "🍗 **Non-Veg Diet Plan** for {}, {} yrs:\n\
             * Morning: Boiled eggs + multigrain bread\n\
             * Mid-morning: Apple or banana\n\
             * Lunch: Grilled chicken, rice, sautéed veggies\n\
             * Snack: Boiled eggs or yogurt\n\
             * Dinner: Fish curry or chicken soup + salad",
            request.gender, request.age
        ),
    }
}

/// Produce the plan after a one-shot delay on a worker thread
pub fn spawn_plan(preference: DietPreference, request: DietRequest, delay: Duration) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        thread::sleep(delay);
        // Receiver may be gone if the UI quit first
        let _ = tx.send(generate_plan(preference, &request));
    });
    rx
}
