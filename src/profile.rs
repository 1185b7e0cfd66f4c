use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Age,
    Email,
    Gender,
    Goal,
    Location,
    Phone,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::Email,
        ProfileField::Gender,
        ProfileField::Goal,
        ProfileField::Location,
        ProfileField::Phone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Age => "Age",
            ProfileField::Email => "Email",
            ProfileField::Gender => "Gender",
            ProfileField::Goal => "Goal",
            ProfileField::Location => "Location",
            ProfileField::Phone => "Phone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub name: String,
    pub age: String,
    pub email: String,
    pub gender: String,
    pub goal: String,
    pub location: String,
    pub phone: String,
}

impl ProfileRecord {
    /// Seed the record from the session, filling the rest with placeholders
    pub fn from_session(session: &Session) -> Self {
        let user = session.user();
        Self {
            name: user
                .map(|u| u.display_name.clone())
                .unwrap_or_else(|| "Fitness Enthusiast".to_string()),
            age: "20".to_string(),
            email: user
                .and_then(|u| u.email.clone())
                .unwrap_or_else(|| "you@example.com".to_string()),
            gender: "Not specified".to_string(),
            goal: "Stay fit".to_string(),
            location: "Unknown".to_string(),
            phone: "-".to_string(),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Age => &self.age,
            ProfileField::Email => &self.email,
            ProfileField::Gender => &self.gender,
            ProfileField::Goal => &self.goal,
            ProfileField::Location => &self.location,
            ProfileField::Phone => &self.phone,
        }
    }

    fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Age => &mut self.age,
            ProfileField::Email => &mut self.email,
            ProfileField::Gender => &mut self.gender,
            ProfileField::Goal => &mut self.goal,
            ProfileField::Location => &mut self.location,
            ProfileField::Phone => &mut self.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Profile is not in edit mode")]
    NotEditing,
}

/// Profile view state: the record plus whether fields are currently editable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    record: ProfileRecord,
    editing: bool,
}

impl ProfileEditor {
    pub fn new(record: ProfileRecord) -> Self {
        Self { record, editing: false }
    }

    /// Flip edit mode, returning the new state
    pub fn toggle_edit(&mut self) -> bool {
        self.editing = !self.editing;
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), ProfileError> {
        if !self.editing {
            return Err(ProfileError::NotEditing);
        }
        *self.record.get_mut(field) = value.to_string();
        Ok(())
    }

    pub fn field(&self, field: ProfileField) -> &str {
        self.record.get(field)
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_name_from_session() {
        let record = ProfileRecord::from_session(&Session::for_user(Some("Priya")));
        assert_eq!(record.name, "Priya");

        let record = ProfileRecord::from_session(&Session::signed_out());
        assert_eq!(record.name, "Fitness Enthusiast");
    }

    #[test]
    fn edits_require_edit_mode() {
        let mut editor = ProfileEditor::new(ProfileRecord::from_session(&Session::signed_out()));
        assert_eq!(editor.set_field(ProfileField::Goal, "Run 10k"), Err(ProfileError::NotEditing));

        assert!(editor.toggle_edit());
        editor.set_field(ProfileField::Goal, "Run 10k").unwrap();
        assert!(!editor.toggle_edit());

        assert_eq!(editor.field(ProfileField::Goal), "Run 10k");
    }

    #[test]
    fn every_field_is_addressable() {
        let mut editor = ProfileEditor::new(ProfileRecord::from_session(&Session::signed_out()));
        editor.toggle_edit();
        for field in ProfileField::ALL {
            editor.set_field(field, field.label()).unwrap();
        }
        for field in ProfileField::ALL {
            assert_eq!(editor.field(field), field.label());
        }
    }
}
