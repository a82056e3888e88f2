//! Author form payload and validation

use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::models::AuthorDraft;

use super::{
    collect_field_errors, escape_html, iso_date_rule, parse_optional_date, FieldError,
};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name must be specified"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Family name must be specified"))]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = iso_date_rule, message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = iso_date_rule, message = "Invalid date of death"))]
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn trimmed(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.family_name = self.family_name.trim().to_string();
        self.date_of_birth = self.date_of_birth.trim().to_string();
        self.date_of_death = self.date_of_death.trim().to_string();
        self
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        collect_field_errors(self)
    }

    pub fn echo(&self) -> Value {
        json!({
            "first_name": escape_html(&self.first_name),
            "family_name": escape_html(&self.family_name),
            "date_of_birth": self.date_of_birth,
            "date_of_death": self.date_of_death,
        })
    }

    pub fn to_draft(&self) -> AuthorDraft {
        AuthorDraft {
            first_name: escape_html(&self.first_name),
            family_name: escape_html(&self.family_name),
            date_of_birth: parse_optional_date(&self.date_of_birth),
            date_of_death: parse_optional_date(&self.date_of_death),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_names() {
        let errors = AuthorForm::default().trimmed().field_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "family_name");
        assert_eq!(errors[1].field, "first_name");
    }

    #[test]
    fn test_valid_with_optional_dates_absent() {
        let form = AuthorForm {
            first_name: "Ursula".to_string(),
            family_name: "Le Guin".to_string(),
            ..Default::default()
        }
        .trimmed();
        assert!(form.field_errors().is_empty());
        let draft = form.to_draft();
        assert_eq!(draft.date_of_birth, None);
        assert_eq!(draft.date_of_death, None);
    }

    #[test]
    fn test_invalid_date_of_birth() {
        let form = AuthorForm {
            first_name: "Ursula".to_string(),
            family_name: "Le Guin".to_string(),
            date_of_birth: "yesterday".to_string(),
            ..Default::default()
        }
        .trimmed();
        let errors = form.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "date_of_birth");
        assert_eq!(errors[0].message, "Invalid date of birth");
    }
}
