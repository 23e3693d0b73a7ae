//! Facts a user can attach to their identity, with their one-letter wire
//! codes and validation rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PrimitivesError;

/// Maximum number of characters a fact may carry.
pub const MAX_FACT_LEN: usize = 64;

/// Kind of a fact. The numeric values are part of the JSON wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FactType {
    Username = 0,
    Email = 1,
    Phone = 2,
    Nickname = 3,
}

impl FactType {
    /// One-letter code used by the stringified fact form.
    pub fn stringify(self) -> &'static str {
        match self {
            FactType::Username => "U",
            FactType::Email => "E",
            FactType::Phone => "P",
            FactType::Nickname => "N",
        }
    }
}

impl fmt::Display for FactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FactType::Username => "Username",
            FactType::Email => "Email",
            FactType::Phone => "Phone",
            FactType::Nickname => "Nickname",
        })
    }
}

impl From<FactType> for u8 {
    fn from(fact_type: FactType) -> u8 {
        fact_type as u8
    }
}

impl TryFrom<u8> for FactType {
    type Error = PrimitivesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FactType::Username),
            1 => Ok(FactType::Email),
            2 => Ok(FactType::Phone),
            3 => Ok(FactType::Nickname),
            _ => Err(PrimitivesError::UnknownFactType(value.to_string())),
        }
    }
}

/// Parse a one-letter fact-type code.
pub fn unstringify_fact_type(code: &str) -> Result<FactType, PrimitivesError> {
    match code {
        "U" => Ok(FactType::Username),
        "E" => Ok(FactType::Email),
        "P" => Ok(FactType::Phone),
        "N" => Ok(FactType::Nickname),
        _ => Err(PrimitivesError::UnknownFactType(code.to_string())),
    }
}

/// A single identity fact and its type. The JSON field names are part of
/// the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "Fact")]
    pub fact: String,
    #[serde(rename = "T")]
    pub fact_type: FactType,
}

impl Fact {
    /// Build a fact, enforcing the character limit.
    pub fn new(fact_type: FactType, fact: &str) -> Result<Fact, PrimitivesError> {
        let chars = fact.chars().count();
        if chars > MAX_FACT_LEN {
            return Err(PrimitivesError::Fact(format!(
                "fact of {chars} characters exceeds the maximum of {MAX_FACT_LEN}"
            )));
        }
        Ok(Fact {
            fact: fact.to_string(),
            fact_type,
        })
    }

    /// Prepend the one-letter type code to the fact body.
    pub fn stringify(&self) -> String {
        format!("{}{}", self.fact_type.stringify(), self.fact)
    }
}

/// Invert [`Fact::stringify`].
pub fn unstringify_fact(stringified: &str) -> Result<Fact, PrimitivesError> {
    let Some(code) = stringified.get(..1) else {
        return Err(PrimitivesError::Fact(
            "stringified fact is missing its type code".into(),
        ));
    };
    let fact_type = unstringify_fact_type(code)?;
    Fact::new(fact_type, &stringified[1..])
}

/// Validate a fact's body against the rules for its type. Usernames carry
/// no constraint beyond the character limit enforced at construction.
pub fn validate_fact(fact: &Fact) -> Result<(), PrimitivesError> {
    match fact.fact_type {
        FactType::Username => Ok(()),
        FactType::Email => validate_email(&fact.fact),
        FactType::Phone => validate_phone(&fact.fact),
        FactType::Nickname => validate_nickname(&fact.fact),
    }
}

fn validate_email(email: &str) -> Result<(), PrimitivesError> {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(PrimitivesError::Fact(format!("invalid email: {email}"))),
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    let domain_ok = domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && !label.starts_with('-')
                && !label.ends_with('-')
        });

    if local_ok && domain_ok {
        Ok(())
    } else {
        Err(PrimitivesError::Fact(format!("invalid email: {email}")))
    }
}

/// Phone facts are the subscriber digits followed by a two-letter uppercase
/// country code, e.g. `8005559486US`.
fn validate_phone(number: &str) -> Result<(), PrimitivesError> {
    if !number.is_ascii() || number.len() <= 2 {
        return Err(PrimitivesError::Fact(format!("invalid phone: {number}")));
    }
    let (digits, country) = number.split_at(number.len() - 2);
    let valid = country.chars().all(|c| c.is_ascii_uppercase())
        && digits.len() >= 4
        && digits.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(PrimitivesError::Fact(format!("invalid phone: {number}")))
    }
}

fn validate_nickname(nickname: &str) -> Result<(), PrimitivesError> {
    if nickname.chars().count() < 3 {
        return Err(PrimitivesError::Fact(format!(
            "nickname {nickname:?} must be at least 3 characters"
        )));
    }
    Ok(())
}
