//! # pgprep
//!
//! A fluent SELECT builder that assembles parameterized Postgres query text
//! and the matching ordered list of bound values.
//!
//! ## Features
//!
//! - **Automatic placeholder numbering**: `$1, $2, ...` indices are computed
//!   at build time from which clauses are actually populated — no string
//!   replacement, no caller-side index bookkeeping
//! - **Canonical clause order**: WHERE, OFFSET, LIMIT always render in that
//!   physical order, whatever order the caller chains them in
//! - **Optional-friendly**: `_opt` variants skip a clause on `None`, so
//!   optional filters need no branching at the call site
//! - **Driver-ready**: parameters implement `ToSql`;
//!   [`Statement::params_ref`] yields the slice shape `tokio-postgres` takes
//!
//! ## Usage
//!
//! ```ignore
//! use pgprep::query;
//!
//! let stmt = query()
//!     .select("*")
//!     .from("\"USERS\"")
//!     .where_eq("name", "taro")
//!     .where_eq_opt("age", age_filter)
//!     .order_by_desc("created_at")
//!     .offset(20)
//!     .limit(10)
//!     .build();
//!
//! let rows = client.query(&stmt.sql, &stmt.params_ref()).await?;
//!
//! // Total row count for the same filters, as column "found":
//! let count_stmt = query()
//!     .select("*")
//!     .from("\"USERS\"")
//!     .where_eq("name", "taro")
//!     .build_count();
//! ```

pub mod error;
pub mod param;
pub mod query;
pub mod value;

pub use error::{QueryError, QueryResult};
pub use param::{Clause, ParamLedger};
pub use query::{QueryBuilder, Statement};
pub use value::SqlValue;

/// Create an empty [`QueryBuilder`].
pub fn query() -> QueryBuilder {
    QueryBuilder::new()
}

/// Create a [`QueryBuilder`] seeded with a raw base-query prefix.
///
/// # Example
/// ```ignore
/// let stmt = pgprep::query_with_base("SELECT * FROM \"USERS\"")
///     .where_eq("name", "taro")
///     .build();
/// ```
pub fn query_with_base(base: &str) -> QueryBuilder {
    QueryBuilder::with_base(base)
}

#[cfg(test)]
mod tests;
