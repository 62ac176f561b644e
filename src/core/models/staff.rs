//! Employees and customers

use super::resource::{Collection, Resource};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::DataValidator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff member record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Job title, e.g. "barista"
    pub position: String,
    pub hourly_rate_cents: i64,
    pub hired_on: NaiveDate,
    /// Login account of this employee, if any
    #[serde(default)]
    pub account_id: Option<Uuid>,
}

impl Resource for Employee {
    const COLLECTION: Collection = Collection::Employees;
    const SEARCH_FIELDS: &'static [&'static str] = &["full_name", "email", "position"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["email"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("full_name", &self.full_name)?;
        DataValidator::require_text("position", &self.position)?;
        DataValidator::validate_email(&self.email)?;
        DataValidator::require_non_negative("hourly_rate_cents", self.hourly_rate_cents)
    }
}

/// Customer with a loyalty balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub loyalty_points: u32,
}

impl Resource for Customer {
    const COLLECTION: Collection = Collection::Customers;
    const SEARCH_FIELDS: &'static [&'static str] = &["full_name", "email", "phone"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["email"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("full_name", &self.full_name)?;
        if let Some(email) = &self.email {
            DataValidator::validate_email(email)?;
        }
        if self.email.is_none() && self.phone.is_none() {
            return Err(ShopError::validation(
                "Customer needs an email or a phone number",
            ));
        }
        Ok(())
    }
}
