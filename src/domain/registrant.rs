use crate::domain::dpi::{self, Dpi, DpiRejection};
use thiserror::Error;

/// Reasons a registration form is refused before anything is sent to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrantError {
    #[error("{0}")]
    InvalidDpi(#[from] DpiRejection),

    #[error("first and last name are required")]
    MissingName,
}

impl RegistrantError {
    /// Short title for the error notice, the detail goes underneath.
    pub fn title(&self) -> &'static str {
        match self {
            RegistrantError::InvalidDpi(_) => "Invalid DPI",
            RegistrantError::MissingName => "Required fields",
        }
    }
}

/// The person a ticket is issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub dpi: Option<Dpi>,
    pub name: String,
}

impl Registrant {
    /// The DPI is checked before the names so its reason is the one reported.
    pub fn with_dpi(raw_dpi: &str, first: &str, last: &str) -> Result<Self, RegistrantError> {
        let dpi = dpi::validate(raw_dpi)?;
        let name = full_name(first, last)?;
        Ok(Self {
            dpi: Some(dpi),
            name,
        })
    }

    /// Names are filtered with [`sanitize_name_input`] before the required check.
    pub fn without_dpi(first: &str, last: &str) -> Result<Self, RegistrantError> {
        let name = full_name(&sanitize_name_input(first), &sanitize_name_input(last))?;
        Ok(Self { dpi: None, name })
    }
}

pub fn full_name(first: &str, last: &str) -> Result<String, RegistrantError> {
    let first = first.trim();
    let last = last.trim();
    if first.is_empty() || last.is_empty() {
        return Err(RegistrantError::MissingName);
    }
    Ok(format!("{} {}", first, last))
}

/// Keeps ASCII letters, Spanish accented vowels, ñ and spaces.
pub fn sanitize_name_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ' || "áéíóúÁÉÍÓÚñÑ".contains(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_dpi_builds_full_name() {
        let registrant = Registrant::with_dpi("1234567890101", "  Ana ", " López").unwrap();
        assert_eq!(registrant.name, "Ana López");
        assert_eq!(registrant.dpi.unwrap().as_str(), "1234567890101");
    }

    #[test]
    fn test_dpi_reason_wins_over_missing_name() {
        let err = Registrant::with_dpi("123", "", "").unwrap_err();
        assert_eq!(
            err,
            RegistrantError::InvalidDpi(DpiRejection::WrongLength { digits: 3 })
        );
        assert_eq!(err.to_string(), "must be 13 digits");
        assert_eq!(err.title(), "Invalid DPI");
    }

    #[test]
    fn test_names_are_required() {
        assert_eq!(
            Registrant::with_dpi("1234567890101", "Ana", "   "),
            Err(RegistrantError::MissingName)
        );
        assert_eq!(
            Registrant::without_dpi("", "López"),
            Err(RegistrantError::MissingName)
        );
    }

    #[test]
    fn test_without_dpi() {
        let registrant = Registrant::without_dpi("José", "Pérez").unwrap();
        assert!(registrant.dpi.is_none());
        assert_eq!(registrant.name, "José Pérez");
    }

    #[test]
    fn test_without_dpi_filters_names() {
        let registrant = Registrant::without_dpi("Ana2!", "López#").unwrap();
        assert_eq!(registrant.name, "Ana López");

        assert_eq!(
            Registrant::without_dpi("123", "López"),
            Err(RegistrantError::MissingName)
        );
    }

    #[test]
    fn test_sanitize_name_input() {
        assert_eq!(sanitize_name_input("María José 2nd!"), "María José nd");
        assert_eq!(sanitize_name_input("Ñoño-Gómez"), "ÑoñoGómez");
        assert_eq!(sanitize_name_input("Łukasz"), "ukasz");
    }
}
