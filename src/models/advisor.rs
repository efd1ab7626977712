//! Advisor DTOs
//!
//! The advisor record stored in the repository and cached by id, plus the
//! body accepted when creating one.

use rand::Rng;
use serde::{Deserialize, Serialize};

// == Field Limits ==
/// Maximum length of an advisor's name and address
pub const MAX_TEXT_LENGTH: usize = 255;

/// Exact length of a social insurance number
pub const SIN_LENGTH: usize = 9;

/// Exact length of a phone number
pub const PHONE_LENGTH: usize = 8;

// == Health Status ==
/// Health rating assigned to an advisor when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

impl HealthStatus {
    /// Rolls a status: 60% Green, 20% Yellow, 20% Red.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen_range(0..100))
    }

    fn from_roll(roll: u32) -> Self {
        match roll {
            0..=59 => HealthStatus::Green,
            60..=79 => HealthStatus::Yellow,
            _ => HealthStatus::Red,
        }
    }
}

// == Advisor ==
/// A stored advisor, also the body of PUT /api/advisors/:id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    pub id: i64,
    pub name: String,
    pub sin: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub health_status: Option<HealthStatus>,
}

impl Advisor {
    /// Returns the first field constraint violated, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_fields(
            &self.name,
            &self.sin,
            self.address.as_deref(),
            self.phone.as_deref(),
        )
    }
}

// == New Advisor ==
/// Request body for POST /api/advisors.
///
/// The id and health status are assigned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvisor {
    pub name: String,
    pub sin: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewAdvisor {
    pub fn validate(&self) -> Option<String> {
        validate_fields(
            &self.name,
            &self.sin,
            self.address.as_deref(),
            self.phone.as_deref(),
        )
    }

    /// Builds the advisor to persist. The id is a placeholder until the
    /// repository assigns one.
    pub fn into_advisor(self, health_status: HealthStatus) -> Advisor {
        Advisor {
            id: 0,
            name: self.name,
            sin: self.sin,
            address: self.address,
            phone: self.phone,
            health_status: Some(health_status),
        }
    }
}

fn validate_fields(
    name: &str,
    sin: &str,
    address: Option<&str>,
    phone: Option<&str>,
) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_TEXT_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} characters",
            MAX_TEXT_LENGTH
        ));
    }
    if sin.chars().count() != SIN_LENGTH {
        return Some(format!("SIN must be exactly {} characters", SIN_LENGTH));
    }
    if address.is_some_and(|a| a.chars().count() > MAX_TEXT_LENGTH) {
        return Some(format!(
            "Address exceeds maximum length of {} characters",
            MAX_TEXT_LENGTH
        ));
    }
    if phone.is_some_and(|p| p.chars().count() != PHONE_LENGTH) {
        return Some(format!("Phone must be exactly {} characters", PHONE_LENGTH));
    }
    None
}
