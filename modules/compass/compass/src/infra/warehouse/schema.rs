//! Identifiers for the warehouse tables read by the enrollment queries.
//!
//! Each source enum's `Table` variant renders as the alias the table is
//! joined under; the physical location comes from `WarehouseTables`.

use sea_orm::DeriveIden;

/// `sec.EnrolledStudent`: one row per student per enrolled quarter.
#[derive(DeriveIden, Copy, Clone)]
pub enum Enr {
    #[sea_orm(iden = "enr")]
    Table,
    #[sea_orm(iden = "SystemKey")]
    SystemKey,
    #[sea_orm(iden = "AcademicYrQtr")]
    AcademicYrQtr,
    #[sea_orm(iden = "StudentNumber")]
    StudentNumber,
    #[sea_orm(iden = "StudentName")]
    StudentName,
    #[sea_orm(iden = "BirthDate")]
    BirthDate,
    #[sea_orm(iden = "StudentEmail")]
    StudentEmail,
    #[sea_orm(iden = "ExternalEmail")]
    ExternalEmail,
    #[sea_orm(iden = "LocalPhoneNumber")]
    LocalPhoneNumber,
    #[sea_orm(iden = "Gender")]
    Gender,
    #[sea_orm(iden = "GPA")]
    Gpa,
    #[sea_orm(iden = "TotalCredits")]
    TotalCredits,
    #[sea_orm(iden = "CampusDesc")]
    CampusDesc,
    #[sea_orm(iden = "ClassDesc")]
    ClassDesc,
    #[sea_orm(iden = "EnrollStatusCode")]
    EnrollStatusCode,
    #[sea_orm(iden = "PreferredFirstName")]
    PreferredFirstName,
    #[sea_orm(iden = "PreferredMiddleName")]
    PreferredMiddleName,
    #[sea_orm(iden = "PreferredLastName")]
    PreferredLastName,
    #[sea_orm(iden = "ClassCode")]
    ClassCode,
    #[sea_orm(iden = "ExemptionCode")]
    ExemptionCode,
    #[sea_orm(iden = "SpecialProgramCode")]
    SpecialProgramCode,
    #[sea_orm(iden = "HonorsProgram")]
    HonorsProgram,
    #[sea_orm(iden = "ResidentCode")]
    ResidentCode,
    #[sea_orm(iden = "PermAddrLine1")]
    PermAddrLine1,
    #[sea_orm(iden = "PermAddrLine2")]
    PermAddrLine2,
    #[sea_orm(iden = "PermAddrCity")]
    PermAddrCity,
    #[sea_orm(iden = "PermAddrState")]
    PermAddrState,
    #[sea_orm(iden = "PermAddrZip5")]
    PermAddrZip5,
    #[sea_orm(iden = "PermAddrZip4")]
    PermAddrZip4,
    #[sea_orm(iden = "PermAddrCountry")]
    PermAddrCountry,
    #[sea_orm(iden = "PermAddrPostalCode")]
    PermAddrPostalCode,
    #[sea_orm(iden = "IntendedMajor1")]
    IntendedMajor1,
    #[sea_orm(iden = "IntendedMajor2")]
    IntendedMajor2,
    #[sea_orm(iden = "IntendedMajor3")]
    IntendedMajor3,
    #[sea_orm(iden = "RegisteredInQuarter")]
    RegisteredInQuarter,
}

/// `sec.student_1`: identity source for the login id.
#[derive(DeriveIden, Copy, Clone)]
pub enum Stu1 {
    #[sea_orm(iden = "stu1")]
    Table,
    #[sea_orm(iden = "system_key")]
    SystemKey,
    #[sea_orm(iden = "uw_netid")]
    UwNetid,
}

/// `sec.factStudentProgramEnrollment`: student to declared program.
#[derive(DeriveIden, Copy, Clone)]
pub enum Fspe {
    #[sea_orm(iden = "fspe")]
    Table,
    #[sea_orm(iden = "StudentKeyId")]
    StudentKeyId,
    #[sea_orm(iden = "MajorKeyId")]
    MajorKeyId,
    #[sea_orm(iden = "AcademicYrQtr")]
    AcademicYrQtr,
}

/// `sec.dimMajor`: major descriptors.
#[derive(DeriveIden, Copy, Clone)]
pub enum Dm {
    #[sea_orm(iden = "dm")]
    Table,
    #[sea_orm(iden = "MajorKeyId")]
    MajorKeyId,
    #[sea_orm(iden = "MajorFullName")]
    MajorFullName,
    #[sea_orm(iden = "MajorAbbrCode")]
    MajorAbbrCode,
    #[sea_orm(iden = "MajorName")]
    MajorName,
}

/// The `student_info` CTE and its snake_case output columns.
#[derive(DeriveIden, Copy, Clone, PartialEq, Eq)]
pub enum StudentInfo {
    #[sea_orm(iden = "student_info")]
    Table,
    #[sea_orm(iden = "student_number")]
    StudentNumber,
    #[sea_orm(iden = "uw_netid")]
    UwNetid,
    #[sea_orm(iden = "student_name")]
    StudentName,
    #[sea_orm(iden = "birth_date")]
    BirthDate,
    #[sea_orm(iden = "student_email")]
    StudentEmail,
    #[sea_orm(iden = "external_email")]
    ExternalEmail,
    #[sea_orm(iden = "local_phone_number")]
    LocalPhoneNumber,
    #[sea_orm(iden = "gender")]
    Gender,
    #[sea_orm(iden = "gpa")]
    Gpa,
    #[sea_orm(iden = "total_credits")]
    TotalCredits,
    #[sea_orm(iden = "major_full_name")]
    MajorFullName,
    #[sea_orm(iden = "campus_desc")]
    CampusDesc,
    #[sea_orm(iden = "class_desc")]
    ClassDesc,
    #[sea_orm(iden = "enroll_status_code")]
    EnrollStatusCode,
    #[sea_orm(iden = "system_key")]
    SystemKey,
    #[sea_orm(iden = "academic_yr_qtr")]
    AcademicYrQtr,
    #[sea_orm(iden = "preferred_first_name")]
    PreferredFirstName,
    #[sea_orm(iden = "preferred_middle_name")]
    PreferredMiddleName,
    #[sea_orm(iden = "preferred_last_name")]
    PreferredLastName,
    #[sea_orm(iden = "class_code")]
    ClassCode,
    #[sea_orm(iden = "exemption_code")]
    ExemptionCode,
    #[sea_orm(iden = "special_program_code")]
    SpecialProgramCode,
    #[sea_orm(iden = "honors_program")]
    HonorsProgram,
    #[sea_orm(iden = "resident_code")]
    ResidentCode,
    #[sea_orm(iden = "perm_addr_line1")]
    PermAddrLine1,
    #[sea_orm(iden = "perm_addr_line2")]
    PermAddrLine2,
    #[sea_orm(iden = "perm_addr_city")]
    PermAddrCity,
    #[sea_orm(iden = "perm_addr_state")]
    PermAddrState,
    #[sea_orm(iden = "perm_addr_zip5")]
    PermAddrZip5,
    #[sea_orm(iden = "perm_addr_zip4")]
    PermAddrZip4,
    #[sea_orm(iden = "perm_addr_country")]
    PermAddrCountry,
    #[sea_orm(iden = "perm_addr_postal_code")]
    PermAddrPostalCode,
    #[sea_orm(iden = "intended_major1")]
    IntendedMajor1,
    #[sea_orm(iden = "intended_major2")]
    IntendedMajor2,
    #[sea_orm(iden = "intended_major3")]
    IntendedMajor3,
    #[sea_orm(iden = "major_abbr_code")]
    MajorAbbrCode,
    #[sea_orm(iden = "major_name")]
    MajorName,
    #[sea_orm(iden = "registered_in_quarter")]
    RegisteredInQuarter,
    /// Output of the count variant.
    #[sea_orm(iden = "total")]
    Total,
}
