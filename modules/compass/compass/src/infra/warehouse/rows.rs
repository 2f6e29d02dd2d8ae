use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::FromQueryResult;

/// Row of the minimal listing.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SummaryRow {
    pub student_number: i32,
    pub uw_netid: Option<String>,
    pub student_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub student_email: Option<String>,
    pub external_email: Option<String>,
    pub local_phone_number: Option<String>,
    pub gender: Option<String>,
    pub gpa: Option<Decimal>,
    pub total_credits: Option<Decimal>,
    pub major_full_name: Option<String>,
    pub campus_desc: Option<String>,
    pub class_desc: Option<String>,
    pub enroll_status_code: Option<String>,
}

/// Row of the extended listing.
#[derive(Debug, Clone, FromQueryResult)]
pub struct DetailRow {
    pub student_number: i32,
    pub uw_netid: Option<String>,
    pub student_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub student_email: Option<String>,
    pub external_email: Option<String>,
    pub local_phone_number: Option<String>,
    pub gender: Option<String>,
    pub gpa: Option<Decimal>,
    pub total_credits: Option<Decimal>,
    pub major_full_name: Option<String>,
    pub campus_desc: Option<String>,
    pub class_desc: Option<String>,
    pub enroll_status_code: Option<String>,
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

#[derive(Debug, Clone, Copy, FromQueryResult)]
pub struct CountRow {
    pub total: i64,
}
