//! Warehouse access: schema identifiers, statement composition, and row
//! decoding.

pub mod mapper;
pub mod query;
pub mod rows;
pub mod schema;

pub use query::{EnrollmentQueryBuilder, SearchField, SearchPredicate};
