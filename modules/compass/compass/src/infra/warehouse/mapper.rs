use compass_sdk::{EnrollmentRecord, StudentDetail, StudentSummary};

use super::rows::{CountRow, DetailRow, SummaryRow};

impl From<SummaryRow> for StudentSummary {
    fn from(r: SummaryRow) -> Self {
        Self {
            student_number: r.student_number,
            uw_netid: r.uw_netid,
            student_name: r.student_name,
            birth_date: r.birth_date,
            student_email: r.student_email,
            external_email: r.external_email,
            local_phone_number: r.local_phone_number,
            gender: r.gender,
            gpa: r.gpa,
            total_credits: r.total_credits,
            major_full_name: r.major_full_name,
            campus_desc: r.campus_desc,
            class_desc: r.class_desc,
            enroll_status_code: r.enroll_status_code,
        }
    }
}

impl From<DetailRow> for StudentDetail {
    fn from(r: DetailRow) -> Self {
        Self {
            summary: StudentSummary {
                student_number: r.student_number,
                uw_netid: r.uw_netid,
                student_name: r.student_name,
                birth_date: r.birth_date,
                student_email: r.student_email,
                external_email: r.external_email,
                local_phone_number: r.local_phone_number,
                gender: r.gender,
                gpa: r.gpa,
                total_credits: r.total_credits,
                major_full_name: r.major_full_name,
                campus_desc: r.campus_desc,
                class_desc: r.class_desc,
                enroll_status_code: r.enroll_status_code,
            },
            system_key: r.system_key,
            academic_yr_qtr: r.academic_yr_qtr,
            preferred_first_name: r.preferred_first_name,
            preferred_middle_name: r.preferred_middle_name,
            preferred_last_name: r.preferred_last_name,
            class_code: r.class_code,
            exemption_code: r.exemption_code,
            special_program_code: r.special_program_code,
            honors_program: r.honors_program,
            resident_code: r.resident_code,
            perm_addr_line1: r.perm_addr_line1,
            perm_addr_line2: r.perm_addr_line2,
            perm_addr_city: r.perm_addr_city,
            perm_addr_state: r.perm_addr_state,
            perm_addr_zip5: r.perm_addr_zip5,
            perm_addr_zip4: r.perm_addr_zip4,
            perm_addr_country: r.perm_addr_country,
            perm_addr_postal_code: r.perm_addr_postal_code,
            intended_major1: r.intended_major1,
            intended_major2: r.intended_major2,
            intended_major3: r.intended_major3,
            major_abbr_code: r.major_abbr_code,
            major_name: r.major_name,
            registered_in_quarter: r.registered_in_quarter,
        }
    }
}

impl From<SummaryRow> for EnrollmentRecord {
    fn from(r: SummaryRow) -> Self {
        StudentSummary::from(r).into()
    }
}

impl From<DetailRow> for EnrollmentRecord {
    fn from(r: DetailRow) -> Self {
        StudentDetail::from(r).into()
    }
}

impl From<CountRow> for u64 {
    fn from(r: CountRow) -> Self {
        // COUNT never goes negative.
        u64::try_from(r.total).unwrap_or_default()
    }
}
