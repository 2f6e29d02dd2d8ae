use std::path::Path;

use edw_db::{DbConnConfig, DbError, config_figment};
use figment::Figment;
use sea_orm::sea_query::{Alias, IntoTableRef, TableRef};
use serde::Deserialize;
use thiserror::Error;

/// Which projection the listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnSet {
    /// One row per student with majors aggregated.
    #[default]
    Minimal,
    /// One row per (student, major) with the full address and code breakdown.
    Extended,
}

/// How program enrollments are joined to the term's enrollment rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MajorJoin {
    /// Every program the student has ever declared.
    #[default]
    AllPrograms,
    /// Only programs recorded for the same academic year-quarter.
    TermPrograms,
}

/// What to do with a search filter whose type is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownFilterPolicy {
    /// Log and run the query unfiltered.
    #[default]
    Ignore,
    Reject,
}

/// Fully qualified location of a warehouse table.
///
/// `database` requires `schema`; a bare `table` resolves against the
/// connection's default database and schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableLocation {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    pub table: String,
}

impl TableLocation {
    #[must_use]
    pub fn new(database: &str, schema: &str, table: &str) -> Self {
        Self {
            database: Some(database.to_owned()),
            schema: Some(schema.to_owned()),
            table: table.to_owned(),
        }
    }

    #[must_use]
    pub fn bare(table: &str) -> Self {
        Self {
            database: None,
            schema: None,
            table: table.to_owned(),
        }
    }

    pub(crate) fn table_ref(&self) -> TableRef {
        let table = Alias::new(&self.table);
        match (&self.database, &self.schema) {
            (Some(db), Some(schema)) => (Alias::new(db), Alias::new(schema), table).into_table_ref(),
            (_, Some(schema)) => (Alias::new(schema), table).into_table_ref(),
            (_, None) => table.into_table_ref(),
        }
    }
}

impl std::fmt::Display for TableLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in [&self.database, &self.schema].into_iter().flatten() {
            write!(f, "{part}.")?;
        }
        f.write_str(&self.table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarehouseTables {
    pub enrolled_student: TableLocation,
    pub student: TableLocation,
    pub program_enrollment: TableLocation,
    pub major: TableLocation,
}

impl Default for WarehouseTables {
    fn default() -> Self {
        Self {
            enrolled_student: TableLocation::new("EDWPresentation", "sec", "EnrolledStudent"),
            student: TableLocation::new("UWSDBDataStore", "sec", "student_1"),
            program_enrollment: TableLocation::new(
                "EDWPresentation",
                "sec",
                "factStudentProgramEnrollment",
            ),
            major: TableLocation::new("EDWPresentation", "sec", "dimMajor"),
        }
    }
}

impl WarehouseTables {
    /// Unqualified table names, for a warehouse copy in a single database.
    #[must_use]
    pub fn unqualified() -> Self {
        Self {
            enrolled_student: TableLocation::bare("EnrolledStudent"),
            student: TableLocation::bare("student_1"),
            program_enrollment: TableLocation::bare("factStudentProgramEnrollment"),
            major: TableLocation::bare("dimMajor"),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &TableLocation> {
        [
            &self.enrolled_student,
            &self.student,
            &self.program_enrollment,
            &self.major,
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompassConfig {
    #[serde(default)]
    pub column_set: ColumnSet,
    #[serde(default)]
    pub major_join: MajorJoin,
    #[serde(default = "default_max_rows")]
    pub max_rows: u64,
    #[serde(default)]
    pub unknown_filter: UnknownFilterPolicy,
    /// Database requested when the service opens its own connection.
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub tables: WarehouseTables,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            column_set: ColumnSet::default(),
            major_join: MajorJoin::default(),
            max_rows: default_max_rows(),
            unknown_filter: UnknownFilterPolicy::default(),
            database: default_database(),
            tables: WarehouseTables::default(),
        }
    }
}

fn default_max_rows() -> u64 {
    250
}

fn default_database() -> String {
    "EDWPresentation".to_owned()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] DbError),

    #[error("compass.max_rows must be greater than zero")]
    ZeroMaxRows,

    #[error("table '{table}' names database '{database}' without a schema")]
    DatabaseWithoutSchema { table: String, database: String },
}

impl CompassConfig {
    /// # Errors
    /// Returns `ConfigError` when the row cap is zero or a table names a
    /// database without a schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == 0 {
            return Err(ConfigError::ZeroMaxRows);
        }
        for loc in self.tables.iter() {
            if let (Some(database), None) = (&loc.database, &loc.schema) {
                return Err(ConfigError::DatabaseWithoutSchema {
                    table: loc.table.clone(),
                    database: database.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Top-level configuration: the warehouse connection plus compass settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EdwConfig {
    pub connection: DbConnConfig,
    #[serde(default)]
    pub compass: CompassConfig,
}

impl EdwConfig {
    /// Load from an optional YAML file layered under `EDW_*` variables.
    ///
    /// # Errors
    /// Returns `ConfigError` when the sources cannot be read or fail validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&config_figment(path))
    }

    /// # Errors
    /// Returns `ConfigError` when extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let cfg: Self = figment.extract().map_err(DbError::from)?;
        cfg.compass.validate()?;
        Ok(cfg)
    }
}
