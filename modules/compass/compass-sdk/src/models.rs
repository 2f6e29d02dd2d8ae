//! Public models for the compass module.
//!
//! Records serialize with the warehouse column names so downstream consumers
//! see the same keys the warehouse exposes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-supplied search predicate.
///
/// `filter_text` is untrusted input; it is only ever bound as a query
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub filter_type: SearchFilterType,
    pub filter_text: String,
}

impl SearchFilter {
    #[must_use]
    pub fn new(filter_type: impl Into<SearchFilterType>, filter_text: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            filter_text: filter_text.into(),
        }
    }
}

/// Field a [`SearchFilter`] matches against.
///
/// Unknown type strings are kept as [`SearchFilterType::Unrecognized`] so the
/// service can decide whether to ignore or reject them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchFilterType {
    StudentNumber,
    StudentName,
    StudentEmail,
    Unrecognized(String),
}

impl SearchFilterType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::StudentNumber => "student-number",
            Self::StudentName => "student-name",
            Self::StudentEmail => "student-email",
            Self::Unrecognized(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for SearchFilterType {
    fn from(raw: &str) -> Self {
        match raw {
            "student-number" => Self::StudentNumber,
            "student-name" => Self::StudentName,
            "student-email" => Self::StudentEmail,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl From<String> for SearchFilterType {
    fn from(raw: String) -> Self {
        match Self::from(raw.as_str()) {
            Self::Unrecognized(_) => Self::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<SearchFilterType> for String {
    fn from(ty: SearchFilterType) -> Self {
        match ty {
            SearchFilterType::Unrecognized(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// One student in the minimal column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentSummary {
    pub student_number: i32,
    #[serde(rename = "UWNetID")]
    pub uw_netid: Option<String>,
    pub student_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub student_email: Option<String>,
    pub external_email: Option<String>,
    pub local_phone_number: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "GPA")]
    pub gpa: Option<Decimal>,
    pub total_credits: Option<Decimal>,
    /// Every declared major, joined by `", "`.
    pub major_full_name: Option<String>,
    pub campus_desc: Option<String>,
    pub class_desc: Option<String>,
    pub enroll_status_code: Option<String>,
}

/// One (student, major) row in the extended column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentDetail {
    #[serde(flatten)]
    pub summary: StudentSummary,
    pub system_key: Option<i32>,
    pub academic_yr_qtr: Option<String>,
    pub preferred_first_name: Option<String>,
    pub preferred_middle_name: Option<String>,
    pub preferred_last_name: Option<String>,
    pub class_code: Option<i32>,
    pub exemption_code: Option<i32>,
    pub special_program_code: Option<i32>,
    pub honors_program: Option<String>,
    pub resident_code: Option<i32>,
    pub perm_addr_line1: Option<String>,
    pub perm_addr_line2: Option<String>,
    pub perm_addr_city: Option<String>,
    pub perm_addr_state: Option<String>,
    pub perm_addr_zip5: Option<String>,
    pub perm_addr_zip4: Option<String>,
    pub perm_addr_country: Option<String>,
    pub perm_addr_postal_code: Option<String>,
    pub intended_major1: Option<String>,
    pub intended_major2: Option<String>,
    pub intended_major3: Option<String>,
    pub major_abbr_code: Option<String>,
    pub major_name: Option<String>,
    pub registered_in_quarter: Option<bool>,
}

/// A warehouse row in whichever column set the service is configured for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnrollmentRecord {
    Detail(Box<StudentDetail>),
    Summary(StudentSummary),
}

impl EnrollmentRecord {
    #[must_use]
    pub fn summary(&self) -> &StudentSummary {
        match self {
            Self::Summary(s) => s,
            Self::Detail(d) => &d.summary,
        }
    }

    #[must_use]
    pub fn student_number(&self) -> i32 {
        self.summary().student_number
    }

    #[must_use]
    pub fn student_name(&self) -> Option<&str> {
        self.summary().student_name.as_deref()
    }

    #[must_use]
    pub fn as_detail(&self) -> Option<&StudentDetail> {
        match self {
            Self::Detail(d) => Some(d),
            Self::Summary(_) => None,
        }
    }
}

impl From<StudentSummary> for EnrollmentRecord {
    fn from(s: StudentSummary) -> Self {
        Self::Summary(s)
    }
}

impl From<StudentDetail> for EnrollmentRecord {
    fn from(d: StudentDetail) -> Self {
        Self::Detail(Box::new(d))
    }
}
