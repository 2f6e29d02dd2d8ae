#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use std::path::PathBuf;

use compass::{ColumnSet, CompassConfig, MajorJoin, UnknownFilterPolicy, WarehouseTables};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

const SCHEMA: &[&str] = &[
    "CREATE TABLE EnrolledStudent (
        SystemKey INTEGER NOT NULL,
        AcademicYrQtr TEXT NOT NULL,
        StudentNumber INTEGER NOT NULL,
        StudentName TEXT,
        BirthDate DATE,
        StudentEmail TEXT,
        ExternalEmail TEXT,
        LocalPhoneNumber TEXT,
        Gender TEXT,
        GPA REAL,
        TotalCredits REAL,
        CampusDesc TEXT,
        ClassDesc TEXT,
        EnrollStatusCode TEXT,
        PreferredFirstName TEXT,
        PreferredMiddleName TEXT,
        PreferredLastName TEXT,
        ClassCode INTEGER,
        ExemptionCode INTEGER,
        SpecialProgramCode INTEGER,
        HonorsProgram TEXT,
        ResidentCode INTEGER,
        PermAddrLine1 TEXT,
        PermAddrLine2 TEXT,
        PermAddrCity TEXT,
        PermAddrState TEXT,
        PermAddrZip5 TEXT,
        PermAddrZip4 TEXT,
        PermAddrCountry TEXT,
        PermAddrPostalCode TEXT,
        IntendedMajor1 TEXT,
        IntendedMajor2 TEXT,
        IntendedMajor3 TEXT,
        RegisteredInQuarter BOOLEAN
    )",
    "CREATE TABLE student_1 (system_key INTEGER NOT NULL, uw_netid TEXT)",
    "CREATE TABLE factStudentProgramEnrollment (
        StudentKeyId INTEGER NOT NULL,
        MajorKeyId INTEGER NOT NULL,
        AcademicYrQtr TEXT NOT NULL
    )",
    "CREATE TABLE dimMajor (
        MajorKeyId INTEGER NOT NULL,
        MajorFullName TEXT,
        MajorAbbrCode TEXT,
        MajorName TEXT
    )",
];

// 2021-AUTUMN (20214): five students.
//   1 ADAMS,ALICE  two majors this term, one program row duplicated
//   2 BAKER,BOB    Biology declared in 20213, Physics in 20214
//   3 CHEN,CAROL   no login id, no majors
//   4 O_NEIL,DANA  literal underscore in the name
//   5 OXNEIL,ED    would match an unescaped "O_N"
// 2022-WINTER (20221): students 1 and 6.
const DATA: &[&str] = &[
    "INSERT INTO EnrolledStudent (SystemKey, AcademicYrQtr, StudentNumber, StudentName, BirthDate,
        StudentEmail, Gender, GPA, TotalCredits, CampusDesc, ClassDesc, EnrollStatusCode,
        PreferredFirstName, ClassCode, ResidentCode, PermAddrLine1, PermAddrCity, PermAddrState,
        PermAddrZip5, IntendedMajor1, RegisteredInQuarter)
     VALUES
        (1, '20214', 1000001, 'ADAMS,ALICE', '2001-02-03', 'alice@uw.edu', 'F', 3.52, 90.0,
         'Seattle', 'Junior', '12', 'Ali', 3, 1, '1 Main St', 'Seattle', 'WA', '98195', 'PRE-BIOL', 1),
        (2, '20214', 1000002, 'BAKER,BOB', '2000-05-06', 'bob@uw.edu', 'M', 2.75, 120.0,
         'Seattle', 'Senior', '12', NULL, 4, 2, NULL, NULL, NULL, NULL, NULL, 1),
        (3, '20214', 2000003, 'CHEN,CAROL', NULL, 'carol_c@uw.edu', NULL, NULL, NULL,
         'Bothell', 'Freshman', '12', NULL, 1, 1, NULL, NULL, NULL, NULL, NULL, 0),
        (4, '20214', 1000004, 'O_NEIL,DANA', NULL, 'dana@uw.edu', NULL, NULL, NULL,
         'Tacoma', 'Sophomore', '12', NULL, 2, 1, NULL, NULL, NULL, NULL, NULL, 1),
        (5, '20214', 1000005, 'OXNEIL,ED', NULL, 'ed@uw.edu', NULL, NULL, NULL,
         'Seattle', 'Junior', '12', NULL, 3, 1, NULL, NULL, NULL, NULL, NULL, 1),
        (1, '20221', 1000001, 'ADAMS,ALICE', '2001-02-03', 'alice@uw.edu', 'F', 3.60, 105.0,
         'Seattle', 'Junior', '12', 'Ali', 3, 1, NULL, NULL, NULL, NULL, NULL, 1),
        (6, '20221', 1000006, 'EVANS,EVE', NULL, 'eve@uw.edu', NULL, NULL, NULL,
         'Seattle', 'Freshman', '12', NULL, 1, 1, NULL, NULL, NULL, NULL, NULL, 1)",
    "INSERT INTO student_1 (system_key, uw_netid) VALUES
        (1, 'alice'), (2, 'bob'), (4, 'dana'), (5, 'ed'), (6, 'eve')",
    "INSERT INTO factStudentProgramEnrollment (StudentKeyId, MajorKeyId, AcademicYrQtr) VALUES
        (1, 10, '20214'), (1, 11, '20214'), (1, 11, '20214'),
        (2, 10, '20213'), (2, 12, '20214')",
    "INSERT INTO dimMajor (MajorKeyId, MajorFullName, MajorAbbrCode, MajorName) VALUES
        (10, 'Biology', 'BIOL', 'Biology'),
        (11, 'Chemistry', 'CHEM', 'Chemistry'),
        (12, 'Physics', 'PHYS', 'Physics')",
];

pub async fn seed(conn: &DatabaseConnection) {
    for sql in SCHEMA.iter().chain(DATA) {
        conn.execute_unprepared(sql).await.unwrap();
    }
}

/// Fresh in-memory warehouse copy.
pub async fn memory_warehouse() -> DatabaseConnection {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    seed(&conn).await;
    conn
}

/// Warehouse copy in `dir`, closed again so a connector can open it.
pub async fn file_warehouse(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("edw.sqlite");
    let conn = Database::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .unwrap();
    seed(&conn).await;
    conn.close().await.unwrap();
    path
}

pub fn sqlite_config(column_set: ColumnSet, major_join: MajorJoin) -> CompassConfig {
    CompassConfig {
        column_set,
        major_join,
        unknown_filter: UnknownFilterPolicy::Ignore,
        tables: WarehouseTables::unqualified(),
        ..CompassConfig::default()
    }
}
