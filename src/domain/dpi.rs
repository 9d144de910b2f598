//! Structural validation of the Guatemalan DPI (Documento Personal de Identificación).
//!
//! A DPI is 13 digits. Digits 10-11 (1-indexed) encode the department of
//! registration and digits 12-13 the municipality inside that department.
//! Validation is structural only: it never checks that the person exists.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub const DPI_LENGTH: usize = 13;

/// Highest municipality code for each of the 22 departments.
const MAX_MUNICIPALITY: [(u8, u8); 22] = [
    (1, 17),
    (2, 8),
    (3, 16),
    (4, 16),
    (5, 14),
    (6, 30),
    (7, 19),
    (8, 8),
    (9, 11),
    (10, 17),
    (11, 33),
    (12, 30),
    (13, 21),
    (14, 8),
    (15, 17),
    (16, 14),
    (17, 5),
    (18, 11),
    (19, 30),
    (20, 17),
    (21, 11),
    (22, 34),
];

/// Why a candidate DPI was rejected. The `Display` text is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DpiRejection {
    #[error("must be 13 digits")]
    WrongLength { digits: usize },

    #[error("invalid number")]
    RepeatedDigits,

    #[error("invalid department or municipality")]
    ZeroCode,

    #[error("department does not exist")]
    UnknownDepartment { department: u8 },

    #[error("municipality does not exist in department {department}")]
    UnknownMunicipality { department: u8, municipality: u8 },
}

impl DpiRejection {
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// A structurally valid DPI, stored as its 13 normalized digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dpi(String);

impl Dpi {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn department(&self) -> u8 {
        two_digits(&self.0[9..11])
    }

    pub fn municipality(&self) -> u8 {
        two_digits(&self.0[11..13])
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Dpi {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl std::str::FromStr for Dpi {
    type Err = DpiRejection;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        validate(s)
    }
}

/// Outcome of a validation in the `{ ok, reason }` shape the kiosk reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&std::result::Result<Dpi, DpiRejection>> for Verdict {
    fn from(result: &std::result::Result<Dpi, DpiRejection>) -> Self {
        match result {
            Ok(_) => Verdict {
                ok: true,
                reason: None,
            },
            Err(rejection) => Verdict {
                ok: false,
                reason: Some(rejection.reason()),
            },
        }
    }
}

/// Drops every character that is not an ASCII digit.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn max_municipality(department: u8) -> Option<u8> {
    MAX_MUNICIPALITY
        .iter()
        .find(|(d, _)| *d == department)
        .map(|(_, max)| *max)
}

pub fn validate(raw: &str) -> std::result::Result<Dpi, DpiRejection> {
    let value = normalize(raw);

    if value.len() != DPI_LENGTH {
        return Err(DpiRejection::WrongLength {
            digits: value.len(),
        });
    }

    let bytes = value.as_bytes();
    if bytes.iter().all(|b| *b == bytes[0]) {
        return Err(DpiRejection::RepeatedDigits);
    }

    let department = two_digits(&value[9..11]);
    let municipality = two_digits(&value[11..13]);

    if department == 0 || municipality == 0 {
        return Err(DpiRejection::ZeroCode);
    }

    let max = max_municipality(department)
        .ok_or(DpiRejection::UnknownDepartment { department })?;

    if municipality > max {
        return Err(DpiRejection::UnknownMunicipality {
            department,
            municipality,
        });
    }

    Ok(Dpi(value))
}

// Callers guarantee two ASCII digits.
fn two_digits(pair: &str) -> u8 {
    pair.bytes().fold(0, |acc, b| acc * 10 + (b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_codes(department: u8, municipality: u8) -> String {
        format!("123456789{:02}{:02}", department, municipality)
    }

    #[test]
    fn test_accepts_known_example() {
        let dpi = validate("1234567890101").unwrap();
        assert_eq!(dpi.department(), 1);
        assert_eq!(dpi.municipality(), 1);
        assert_eq!(dpi.as_str(), "1234567890101");
    }

    #[test]
    fn test_rejects_municipality_beyond_department_max() {
        let err = validate("1234567890199").unwrap_err();
        assert_eq!(
            err,
            DpiRejection::UnknownMunicipality {
                department: 1,
                municipality: 99
            }
        );
        assert_eq!(err.reason(), "municipality does not exist in department 1");
    }

    #[test]
    fn test_rejects_every_repeated_digit_run() {
        for d in '0'..='9' {
            let value: String = std::iter::repeat(d).take(13).collect();
            assert_eq!(validate(&value), Err(DpiRejection::RepeatedDigits));
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        for raw in ["", "123", "123456789010", "12345678901011", "abc"] {
            let err = validate(raw).unwrap_err();
            assert!(matches!(err, DpiRejection::WrongLength { .. }));
            assert_eq!(err.reason(), "must be 13 digits");
        }
    }

    #[test]
    fn test_separators_and_whitespace_are_ignored() {
        assert_eq!(validate("123-456-789-0101"), validate("1234567890101"));
        assert_eq!(validate("  1234 56789 0101\n"), validate("1234567890101"));
        assert!(validate("123-456-789-0101").is_ok());
    }

    #[test]
    fn test_zero_department_or_municipality() {
        assert_eq!(validate(&with_codes(0, 5)), Err(DpiRejection::ZeroCode));
        assert_eq!(validate(&with_codes(5, 0)), Err(DpiRejection::ZeroCode));
        assert_eq!(
            DpiRejection::ZeroCode.reason(),
            "invalid department or municipality"
        );
    }

    #[test]
    fn test_department_out_of_range() {
        for department in [23, 50, 99] {
            let err = validate(&with_codes(department, 1)).unwrap_err();
            assert_eq!(err, DpiRejection::UnknownDepartment { department });
            assert!(err.reason().contains("department"));
        }
    }

    #[test]
    fn test_every_department_boundary() {
        for (department, max) in MAX_MUNICIPALITY {
            assert!(validate(&with_codes(department, 1)).is_ok());
            assert!(validate(&with_codes(department, max)).is_ok());

            let err = validate(&with_codes(department, max + 1)).unwrap_err();
            assert!(err.reason().ends_with(&format!("department {}", department)));
        }
    }

    #[test]
    fn test_table_values_are_the_known_set() {
        let allowed = [5, 8, 11, 14, 16, 17, 19, 21, 30, 33, 34];
        assert_eq!(MAX_MUNICIPALITY.len(), 22);
        for (i, (department, max)) in MAX_MUNICIPALITY.iter().enumerate() {
            assert_eq!(*department as usize, i + 1);
            assert!(allowed.contains(max));
        }
        assert_eq!(max_municipality(0), None);
        assert_eq!(max_municipality(23), None);
        assert_eq!(max_municipality(22), Some(34));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("12a34-5678 90101");
        assert_eq!(once, "1234567890101");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_verdict_shape() {
        let ok = Verdict::from(&validate("1234567890101"));
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!({"ok": true}));

        let bad = Verdict::from(&validate("0000000000000"));
        assert_eq!(
            serde_json::to_value(&bad).unwrap(),
            serde_json::json!({"ok": false, "reason": "invalid number"})
        );
    }

    #[test]
    fn test_parse_via_from_str() {
        let dpi: Dpi = "2987 65432 2201".parse().unwrap();
        assert_eq!(dpi.department(), 22);
        assert_eq!(dpi.municipality(), 1);
        assert_eq!(dpi.to_string(), "2987654322201");
    }
}
