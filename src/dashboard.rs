use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub desc: &'static str,
    pub details: &'static str,
}

pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "Track Workouts",
        desc: "Log your steps, runs, strength sessions, and daily physical activities in one place.",
        details: "Track time, distance, pace, and calories burned across various exercises.",
    },
    Feature {
        title: "Monitor Nutrition",
        desc: "Track what you eat, monitor calories, macros, and make better food choices.",
        details: "Generate a veg or non-veg diet plan and ask the advisor for dietary tips.",
    },
    Feature {
        title: "Visual Progress",
        desc: "Understand your trends for weight, activity, and more.",
        details: "Log daily entries, see your BMI and category averages, and keep a mood calendar.",
    },
    Feature {
        title: "Stay Motivated",
        desc: "Set personal goals and keep a weekly streak going.",
        details: "Tick off each day of the week on your profile and celebrate a full week.",
    },
];

/// Which feature card is expanded, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    active: Option<usize>,
}

impl Dashboard {
    /// Expand card `index`, or collapse it when it is already open
    pub fn toggle(&mut self, index: usize) {
        if index >= FEATURES.len() {
            return;
        }
        self.active = if self.active == Some(index) { None } else { Some(index) };
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

pub fn greeting(session: &Session) -> String {
    format!("Welcome, {}! 💪", session.display_name().unwrap_or("Fitness Enthusiast"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_expands_then_collapses() {
        let mut dash = Dashboard::default();
        dash.toggle(1);
        assert_eq!(dash.active(), Some(1));
        dash.toggle(2);
        assert_eq!(dash.active(), Some(2));
        dash.toggle(2);
        assert_eq!(dash.active(), None);
        dash.toggle(9);
        assert_eq!(dash.active(), None);
    }

    #[test]
    fn greeting_falls_back_without_user() {
        assert_eq!(greeting(&Session::signed_out()), "Welcome, Fitness Enthusiast! 💪");
        assert_eq!(greeting(&Session::for_user(Some("Jo"))), "Welcome, Jo! 💪");
    }
}
