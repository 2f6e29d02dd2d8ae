//! Academic term identifiers.
//!
//! A term is written `"<year>-<QUARTER>"` (for example `"2021-AUTUMN"`) and is
//! stored in the warehouse as a partition key made of the year followed by the
//! quarter number (`"20214"`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermParseError {
    #[error(
        "invalid term identifier '{input}': expected '<year>-<quarter>' with quarter one of WINTER, SPRING, SUMMER, AUTUMN"
    )]
    Malformed { input: String },

    #[error("invalid term identifier '{input}': year '{year}' must be four digits")]
    InvalidYear { input: String, year: String },

    #[error(
        "invalid term identifier '{input}': unknown quarter '{quarter}', expected one of WINTER, SPRING, SUMMER, AUTUMN"
    )]
    UnknownQuarter { input: String, quarter: String },
}

/// Academic quarter, numbered the way the warehouse numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    Winter = 1,
    Spring = 2,
    Summer = 3,
    Autumn = 4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [
        Quarter::Winter,
        Quarter::Spring,
        Quarter::Summer,
        Quarter::Autumn,
    ];

    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Quarter::Winter => "WINTER",
            Quarter::Spring => "SPRING",
            Quarter::Summer => "SUMMER",
            Quarter::Autumn => "AUTUMN",
        }
    }

    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.number() == number)
    }

    /// Case-insensitive lookup by quarter name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quarter {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TermParseError::UnknownQuarter {
            input: s.to_owned(),
            quarter: s.to_owned(),
        })
    }
}

/// A parsed term identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermId {
    year: String,
    quarter: Quarter,
}

impl TermId {
    /// Build a term from parts already known to be valid.
    ///
    /// # Errors
    /// Returns `TermParseError::InvalidYear` when `year` is not four ASCII digits.
    pub fn new(year: &str, quarter: Quarter) -> Result<Self, TermParseError> {
        if !is_four_digit_year(year) {
            return Err(TermParseError::InvalidYear {
                input: format!("{year}-{quarter}"),
                year: year.to_owned(),
            });
        }
        Ok(Self {
            year: year.to_owned(),
            quarter,
        })
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    #[must_use]
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey(format!("{}{}", self.year, self.quarter.number()))
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.quarter)
    }
}

impl FromStr for TermId {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_term(s)
    }
}

/// Parse `"<year>-<quarter-name>"`.
///
/// The quarter name is matched case-insensitively; the year must be exactly
/// four ASCII digits.
///
/// # Errors
/// Returns `TermParseError` carrying the raw input when the identifier does not
/// split into exactly two parts, the year is malformed, or the quarter name is
/// not recognized.
pub fn parse_term(input: &str) -> Result<TermId, TermParseError> {
    let mut parts = input.split('-');
    let (Some(year), Some(quarter), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TermParseError::Malformed {
            input: input.to_owned(),
        });
    };

    if !is_four_digit_year(year) {
        return Err(TermParseError::InvalidYear {
            input: input.to_owned(),
            year: year.to_owned(),
        });
    }

    let quarter = Quarter::from_name(quarter).ok_or_else(|| TermParseError::UnknownQuarter {
        input: input.to_owned(),
        quarter: quarter.to_owned(),
    })?;

    Ok(TermId {
        year: year.to_owned(),
        quarter,
    })
}

fn is_four_digit_year(year: &str) -> bool {
    year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
}

/// Warehouse partition value for a term, e.g. `"20214"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey(String);

impl PartitionKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_year_and_quarter_number() {
        let term = parse_term("2021-AUTUMN").unwrap();
        assert_eq!(term.year(), "2021");
        assert_eq!(term.quarter().number(), 4);
    }

    #[test]
    fn quarter_names_are_case_insensitive() {
        assert_eq!(parse_term("2022-winter").unwrap().quarter(), Quarter::Winter);
        assert_eq!(parse_term("2022-Spring").unwrap().quarter(), Quarter::Spring);
        assert_eq!(parse_term("2022-sUmMeR").unwrap().quarter(), Quarter::Summer);
    }

    #[test]
    fn partition_key_concatenates_year_and_quarter() {
        assert_eq!(parse_term("2022-WINTER").unwrap().partition_key().as_str(), "20221");
        assert_eq!(parse_term("2021-AUTUMN").unwrap().partition_key().to_string(), "20214");
    }

    #[test]
    fn unknown_quarter_lists_valid_options() {
        let err = parse_term("2021-FALL").unwrap_err();
        assert_eq!(
            err,
            TermParseError::UnknownQuarter {
                input: "2021-FALL".to_owned(),
                quarter: "FALL".to_owned(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("2021-FALL"));
        assert!(msg.contains("WINTER, SPRING, SUMMER, AUTUMN"));
    }

    #[test]
    fn identifier_needs_exactly_two_parts() {
        for input in ["2021", "", "2021-AUTUMN-X", "2021--AUTUMN"] {
            let err = parse_term(input).unwrap_err();
            assert!(
                matches!(
                    err,
                    TermParseError::Malformed { .. } | TermParseError::UnknownQuarter { .. }
                ),
                "{input}: {err}"
            );
            assert!(err.to_string().contains(input));
        }
        assert!(matches!(
            parse_term("2021").unwrap_err(),
            TermParseError::Malformed { .. }
        ));
    }

    #[test]
    fn year_must_be_four_digits() {
        for input in ["21-AUTUMN", "20x1-AUTUMN", "20211-AUTUMN", "-AUTUMN"] {
            assert!(
                matches!(parse_term(input), Err(TermParseError::InvalidYear { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn quarter_resolves_by_number_and_name() {
        assert_eq!(Quarter::from_number(3), Some(Quarter::Summer));
        assert_eq!(Quarter::from_number(0), None);
        assert_eq!(Quarter::from_number(5), None);
        assert_eq!("autumn".parse::<Quarter>().unwrap(), Quarter::Autumn);
        assert!("fall".parse::<Quarter>().is_err());
    }

    #[test]
    fn term_renders_canonical_form() {
        let term: TermId = "2019-spring".parse().unwrap();
        assert_eq!(term.to_string(), "2019-SPRING");
        assert_eq!(TermId::new("2019", Quarter::Spring).unwrap(), term);
        assert!(TermId::new("19", Quarter::Spring).is_err());
    }
}
