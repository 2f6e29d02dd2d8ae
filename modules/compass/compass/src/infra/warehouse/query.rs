//! Composition of the enrollment statements.
//!
//! Every statement starts from the `student_info` CTE: the term's enrollment
//! rows joined to identity and major sources and projected to snake_case
//! columns. The listing and the count are layered on top of it. Caller input
//! (the partition key, search text and the row cap) is always bound.

use compass_sdk::{PartitionKey, SearchFilterType};
use sea_orm::DbBackend;
use sea_orm::sea_query::{
    Alias, CommonTableExpression, Condition, Expr, Iden, JoinType, LikeExpr, Order, Query,
    SelectStatement, SimpleExpr, WithClause, WithQuery,
};

use super::schema::{Dm, Enr, Fspe, Stu1, StudentInfo};
use crate::config::{ColumnSet, CompassConfig, MajorJoin, WarehouseTables};

const LIKE_ESCAPE: char = '!';

/// Column a search predicate matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    StudentNumber,
    StudentName,
    StudentEmail,
}

impl SearchField {
    #[must_use]
    pub fn from_filter_type(ty: &SearchFilterType) -> Option<Self> {
        match ty {
            SearchFilterType::StudentNumber => Some(Self::StudentNumber),
            SearchFilterType::StudentName => Some(Self::StudentName),
            SearchFilterType::StudentEmail => Some(Self::StudentEmail),
            SearchFilterType::Unrecognized(_) => None,
        }
    }
}

/// Substring match of caller text against one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    field: SearchField,
    pattern: String,
}

impl SearchPredicate {
    /// `None` when `text` is empty, since an empty substring matches every row.
    #[must_use]
    pub fn contains(field: SearchField, text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            field,
            pattern: contains_pattern(text),
        })
    }

    #[must_use]
    pub fn field(&self) -> SearchField {
        self.field
    }

    /// The bound LIKE pattern, wildcards in the caller text escaped.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn condition(&self, backend: DbBackend) -> SimpleExpr {
        match self.field {
            SearchField::StudentNumber => {
                let text_type = match backend {
                    DbBackend::MySql => "CHAR",
                    _ => "TEXT",
                };
                Expr::expr(Expr::col(StudentInfo::StudentNumber).cast_as(Alias::new(text_type)))
                    .like(LikeExpr::new(self.pattern.clone()).escape(LIKE_ESCAPE))
            }
            SearchField::StudentName => upper_like(backend, StudentInfo::StudentName, &self.pattern),
            SearchField::StudentEmail => upper_like(backend, StudentInfo::StudentEmail, &self.pattern),
        }
    }
}

fn contains_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// `UPPER(col) LIKE UPPER(?)`: both sides fold in the database, so the
/// column and the bound pattern always use the same case mapping.
fn upper_like(backend: DbBackend, col: StudentInfo, pattern: &str) -> SimpleExpr {
    let col = quoted(backend, col);
    // Placeholder syntax inside custom expressions follows the query builder.
    let arg = match backend {
        DbBackend::Postgres => "$1",
        _ => "?",
    };
    Expr::cust_with_values(
        format!("UPPER({col}) LIKE UPPER({arg}) ESCAPE '{LIKE_ESCAPE}'"),
        [pattern.to_owned()],
    )
}

fn quoted(backend: DbBackend, col: StudentInfo) -> String {
    let name = Iden::to_string(&col);
    match backend {
        DbBackend::MySql => format!("`{name}`"),
        _ => format!("\"{name}\""),
    }
}

fn major_aggregate(backend: DbBackend) -> SimpleExpr {
    let major = quoted(backend, StudentInfo::MajorFullName);
    Expr::cust(match backend {
        DbBackend::Postgres => format!("STRING_AGG({major}, ', ')"),
        DbBackend::MySql => format!("GROUP_CONCAT({major} SEPARATOR ', ')"),
        _ => format!("GROUP_CONCAT({major}, ', ')"),
    })
}

fn distinct_students(backend: DbBackend) -> SimpleExpr {
    let number = quoted(backend, StudentInfo::StudentNumber);
    Expr::cust(format!("COUNT(DISTINCT {number})"))
}

fn summary_columns() -> Vec<(Expr, StudentInfo)> {
    vec![
        (Expr::col((Enr::Table, Enr::StudentNumber)), StudentInfo::StudentNumber),
        (Expr::col((Stu1::Table, Stu1::UwNetid)), StudentInfo::UwNetid),
        (Expr::col((Enr::Table, Enr::StudentName)), StudentInfo::StudentName),
        (Expr::col((Enr::Table, Enr::BirthDate)), StudentInfo::BirthDate),
        (Expr::col((Enr::Table, Enr::StudentEmail)), StudentInfo::StudentEmail),
        (Expr::col((Enr::Table, Enr::ExternalEmail)), StudentInfo::ExternalEmail),
        (Expr::col((Enr::Table, Enr::LocalPhoneNumber)), StudentInfo::LocalPhoneNumber),
        (Expr::col((Enr::Table, Enr::Gender)), StudentInfo::Gender),
        (Expr::col((Enr::Table, Enr::Gpa)), StudentInfo::Gpa),
        (Expr::col((Enr::Table, Enr::TotalCredits)), StudentInfo::TotalCredits),
        (Expr::col((Dm::Table, Dm::MajorFullName)), StudentInfo::MajorFullName),
        (Expr::col((Enr::Table, Enr::CampusDesc)), StudentInfo::CampusDesc),
        (Expr::col((Enr::Table, Enr::ClassDesc)), StudentInfo::ClassDesc),
        (Expr::col((Enr::Table, Enr::EnrollStatusCode)), StudentInfo::EnrollStatusCode),
    ]
}

fn detail_columns() -> Vec<(Expr, StudentInfo)> {
    vec![
        (Expr::col((Enr::Table, Enr::SystemKey)), StudentInfo::SystemKey),
        (Expr::col((Enr::Table, Enr::AcademicYrQtr)), StudentInfo::AcademicYrQtr),
        (Expr::col((Enr::Table, Enr::PreferredFirstName)), StudentInfo::PreferredFirstName),
        (Expr::col((Enr::Table, Enr::PreferredMiddleName)), StudentInfo::PreferredMiddleName),
        (Expr::col((Enr::Table, Enr::PreferredLastName)), StudentInfo::PreferredLastName),
        (Expr::col((Enr::Table, Enr::ClassCode)), StudentInfo::ClassCode),
        (Expr::col((Enr::Table, Enr::ExemptionCode)), StudentInfo::ExemptionCode),
        (Expr::col((Enr::Table, Enr::SpecialProgramCode)), StudentInfo::SpecialProgramCode),
        (Expr::col((Enr::Table, Enr::HonorsProgram)), StudentInfo::HonorsProgram),
        (Expr::col((Enr::Table, Enr::ResidentCode)), StudentInfo::ResidentCode),
        (Expr::col((Enr::Table, Enr::PermAddrLine1)), StudentInfo::PermAddrLine1),
        (Expr::col((Enr::Table, Enr::PermAddrLine2)), StudentInfo::PermAddrLine2),
        (Expr::col((Enr::Table, Enr::PermAddrCity)), StudentInfo::PermAddrCity),
        (Expr::col((Enr::Table, Enr::PermAddrState)), StudentInfo::PermAddrState),
        (Expr::col((Enr::Table, Enr::PermAddrZip5)), StudentInfo::PermAddrZip5),
        (Expr::col((Enr::Table, Enr::PermAddrZip4)), StudentInfo::PermAddrZip4),
        (Expr::col((Enr::Table, Enr::PermAddrCountry)), StudentInfo::PermAddrCountry),
        (Expr::col((Enr::Table, Enr::PermAddrPostalCode)), StudentInfo::PermAddrPostalCode),
        (Expr::col((Enr::Table, Enr::IntendedMajor1)), StudentInfo::IntendedMajor1),
        (Expr::col((Enr::Table, Enr::IntendedMajor2)), StudentInfo::IntendedMajor2),
        (Expr::col((Enr::Table, Enr::IntendedMajor3)), StudentInfo::IntendedMajor3),
        (Expr::col((Dm::Table, Dm::MajorAbbrCode)), StudentInfo::MajorAbbrCode),
        (Expr::col((Dm::Table, Dm::MajorName)), StudentInfo::MajorName),
        (Expr::col((Enr::Table, Enr::RegisteredInQuarter)), StudentInfo::RegisteredInQuarter),
    ]
}

/// Builds the listing and count statements for one column set and join
/// strategy.
#[derive(Debug, Clone)]
pub struct EnrollmentQueryBuilder {
    column_set: ColumnSet,
    major_join: MajorJoin,
    tables: WarehouseTables,
    max_rows: u64,
}

impl EnrollmentQueryBuilder {
    #[must_use]
    pub fn new(cfg: &CompassConfig) -> Self {
        Self {
            column_set: cfg.column_set,
            major_join: cfg.major_join,
            tables: cfg.tables.clone(),
            max_rows: cfg.max_rows,
        }
    }

    #[must_use]
    pub fn column_set(&self) -> ColumnSet {
        self.column_set
    }

    fn columns(&self) -> Vec<(Expr, StudentInfo)> {
        let mut cols = summary_columns();
        if self.column_set == ColumnSet::Extended {
            cols.extend(detail_columns());
        }
        cols
    }

    /// The `student_info` sub-query for one term.
    #[must_use]
    pub fn student_info(&self, partition: &PartitionKey) -> SelectStatement {
        let mut select = Query::select();
        select.distinct();
        for (source, alias) in self.columns() {
            select.expr_as(source, alias);
        }

        let program_on = match self.major_join {
            MajorJoin::AllPrograms => Condition::all()
                .add(Expr::col((Fspe::Table, Fspe::StudentKeyId)).equals((Enr::Table, Enr::SystemKey))),
            MajorJoin::TermPrograms => Condition::all()
                .add(Expr::col((Fspe::Table, Fspe::StudentKeyId)).equals((Enr::Table, Enr::SystemKey)))
                .add(
                    Expr::col((Fspe::Table, Fspe::AcademicYrQtr))
                        .equals((Enr::Table, Enr::AcademicYrQtr)),
                ),
        };

        select
            .from_as(self.tables.enrolled_student.table_ref(), Enr::Table)
            .join_as(
                JoinType::LeftJoin,
                self.tables.student.table_ref(),
                Stu1::Table,
                Expr::col((Enr::Table, Enr::SystemKey)).equals((Stu1::Table, Stu1::SystemKey)),
            )
            .join_as(
                JoinType::LeftJoin,
                self.tables.program_enrollment.table_ref(),
                Fspe::Table,
                program_on,
            )
            .join_as(
                JoinType::LeftJoin,
                self.tables.major.table_ref(),
                Dm::Table,
                Expr::col((Dm::Table, Dm::MajorKeyId)).equals((Fspe::Table, Fspe::MajorKeyId)),
            )
            .and_where(Expr::col((Enr::Table, Enr::AcademicYrQtr)).eq(partition.as_str()));

        select
    }

    fn with_student_info(&self, partition: &PartitionKey) -> WithClause {
        let cte = CommonTableExpression::new()
            .query(self.student_info(partition))
            .table_name(StudentInfo::Table)
            .to_owned();
        WithClause::new().cte(cte).to_owned()
    }

    /// Rows for the term, sorted by student name and capped at `max_rows`.
    ///
    /// The minimal column set collapses each student's majors into one
    /// `", "`-joined value; the extended set returns one row per major.
    #[must_use]
    pub fn listing(
        &self,
        backend: DbBackend,
        partition: &PartitionKey,
        search: Option<&SearchPredicate>,
    ) -> WithQuery {
        let mut select = Query::select();
        select.from(StudentInfo::Table);

        match self.column_set {
            ColumnSet::Minimal => {
                for (_, alias) in summary_columns() {
                    if alias == StudentInfo::MajorFullName {
                        select.expr_as(major_aggregate(backend), alias);
                    } else {
                        select.column(alias).group_by_col(alias);
                    }
                }
            }
            ColumnSet::Extended => {
                select.columns(self.columns().into_iter().map(|(_, alias)| alias));
            }
        }

        if let Some(search) = search {
            select.and_where(search.condition(backend));
        }

        select
            .order_by(StudentInfo::StudentName, Order::Asc)
            .order_by(StudentInfo::StudentNumber, Order::Asc)
            .limit(self.max_rows);

        select.with(self.with_student_info(partition))
    }

    /// `COUNT(DISTINCT student_number)` over the term, optionally narrowed.
    #[must_use]
    pub fn count(
        &self,
        backend: DbBackend,
        partition: &PartitionKey,
        search: Option<&SearchPredicate>,
    ) -> WithQuery {
        let mut select = Query::select();
        select
            .expr_as(distinct_students(backend), StudentInfo::Total)
            .from(StudentInfo::Table);

        if let Some(search) = search {
            select.and_where(search.condition(backend));
        }

        select.with(self.with_student_info(partition))
    }
}
