//! Customer profiles

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const COUNTRY_CODE: &str = "57";

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Whether `email` looks like a deliverable address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email.trim()))
}

/// Customer profile validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Email does not match the expected format.
    #[error("email address is not valid")]
    InvalidEmail,

    /// Phone numbers may only contain digits, spaces and dashes.
    #[error("phone number must contain only digits")]
    InvalidPhone,

    /// Unsupported identification document type.
    #[error("unknown legal id type: {0}")]
    UnknownLegalIdType(String),
}

/// Identification document types accepted by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegalIdType {
    /// Cédula de ciudadanía
    Cc,
    /// Cédula de extranjería
    Ce,
    /// Tax identification number
    Nit,
    /// Passport
    Pp,
    /// Tarjeta de identidad
    Ti,
    /// National identity document
    Dni,
}

impl LegalIdType {
    /// Gateway code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Ce => "CE",
            Self::Nit => "NIT",
            Self::Pp => "PP",
            Self::Ti => "TI",
            Self::Dni => "DNI",
        }
    }
}

impl fmt::Display for LegalIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegalIdType {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CC" => Ok(Self::Cc),
            "CE" => Ok(Self::Ce),
            "NIT" => Ok(Self::Nit),
            "PP" => Ok(Self::Pp),
            "TI" => Ok(Self::Ti),
            "DNI" => Ok(Self::Dni),
            _ => Err(CustomerError::UnknownLegalIdType(s.to_string())),
        }
    }
}

/// Customer contact and identification data sent with a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Full name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Phone number, with or without country code
    pub phone_number: String,

    /// Identification document number
    pub legal_id: String,

    /// Identification document type
    pub legal_id_type: LegalIdType,
}

impl CustomerProfile {
    /// Check that every field is present and well-formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`CustomerError`] found.
    pub fn validate(&self) -> Result<(), CustomerError> {
        if self.full_name.trim().is_empty() {
            return Err(CustomerError::MissingField("full_name"));
        }

        if self.email.trim().is_empty() {
            return Err(CustomerError::MissingField("email"));
        }

        if !is_valid_email(&self.email) {
            return Err(CustomerError::InvalidEmail);
        }

        if self.phone_number.trim().is_empty() {
            return Err(CustomerError::MissingField("phone_number"));
        }

        let phone = self.normalized_phone();

        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(CustomerError::InvalidPhone);
        }

        if self.legal_id.trim().is_empty() {
            return Err(CustomerError::MissingField("legal_id"));
        }

        Ok(())
    }

    /// Phone number without spaces or dashes.
    #[must_use]
    pub fn normalized_phone(&self) -> String {
        self.phone_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect()
    }

    /// Phone number prefixed with the Colombian country code unless already present.
    #[must_use]
    pub fn phone_with_country_code(&self) -> String {
        let phone = self.normalized_phone();
        let phone = phone.strip_prefix('+').unwrap_or(&phone);

        if phone.starts_with(COUNTRY_CODE) {
            phone.to_string()
        } else {
            format!("{COUNTRY_CODE}{phone}")
        }
    }
}
