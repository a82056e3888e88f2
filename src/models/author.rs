//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::format_date_med;

/// Full author record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Full display name: "family_name first_name"
    pub fn name(&self) -> String {
        format!("{} {}", self.family_name, self.first_name)
    }

    /// Formatted birth-death range. "-" when neither date is set, birth date
    /// alone when there is no death date.
    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_date_med).unwrap_or_default();
        let death = self.date_of_death.map(format_date_med).unwrap_or_default();
        if self.date_of_death.is_some() {
            format!("{} - {}", birth, death)
        } else if self.date_of_birth.is_none() {
            "-".to_string()
        } else {
            birth
        }
    }

    /// Canonical detail page path
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Birth date as yyyy-mm-dd, for form prefill
    pub fn date_of_birth_ymd(&self) -> Option<String> {
        self.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Death date as yyyy-mm-dd, for form prefill
    pub fn date_of_death_ymd(&self) -> Option<String> {
        self.date_of_death.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Data-bag representation including derived attributes
    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "first_name": self.first_name,
            "family_name": self.family_name,
            "date_of_birth": self.date_of_birth_ymd(),
            "date_of_death": self.date_of_death_ymd(),
            "name": self.name(),
            "lifespan": self.lifespan(),
            "url": self.url(),
        })
    }
}

/// Sanitized, not-yet-persisted author built from form input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}
