//! Fluent SELECT builder and its assembled output.
//!
//! `QueryBuilder` accumulates clause fragments in any call order and renders
//! them in the fixed physical order base, SELECT, FROM, WHERE, ORDER BY,
//! OFFSET, LIMIT, trailing fragments. Placeholder numbers inside WHERE,
//! OFFSET and LIMIT come from a [`ParamLedger`] built fresh on every render,
//! so `$n` in the text always lines up with the n-th returned value.

use crate::error::{QueryError, QueryResult};
use crate::param::{Clause, ParamLedger};
use crate::value::SqlValue;
use tokio_postgres::types::ToSql;

/// Projection used by [`QueryBuilder::build_count`]: total matching rows,
/// aliased `found`, independent of any LIMIT applied to the data query.
const COUNT_PROJECTION: &str = "count(*) OVER() as found";

/// One equality predicate of the WHERE clause.
#[derive(Clone, Debug)]
struct FieldValue {
    field: String,
    value: SqlValue,
}

/// One ORDER BY term.
#[derive(Clone, Debug)]
struct FieldOrder {
    field: String,
    ascending: bool,
}

/// A finished query: SQL text plus the values bound to its placeholders.
///
/// The i-th value (1-based) binds to `$i` in `sql`.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// Parameter refs in the shape `tokio-postgres` query methods take.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }

    /// Check that `$n` placeholders are contiguous from `$1` and that the
    /// highest one matches the number of bound values.
    ///
    /// Builder-produced statements always pass; this exists for statements
    /// that were concatenated or edited after assembly.
    pub fn verify(&self) -> QueryResult<()> {
        let mut seen = Vec::new();
        let bytes = self.sql.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    // The slice is pure ASCII digits; parse cannot fail.
                    if let Ok(n) = self.sql[start..end].parse::<usize>() {
                        seen.push(n);
                    }
                    i = end;
                    continue;
                }
            }
            i += 1;
        }

        let highest = seen.iter().copied().max().unwrap_or(0);
        if highest != self.params.len() {
            return Err(QueryError::PlaceholderMismatch {
                placeholders: highest,
                params: self.params.len(),
            });
        }
        for n in 1..=highest {
            if !seen.contains(&n) {
                return Err(QueryError::PlaceholderGap { missing: n });
            }
        }
        Ok(())
    }
}

/// Fluent builder for parameterized SELECT statements.
///
/// Every mutator consumes and returns the builder, so chains read top to
/// bottom and a builder is never shared between threads of control. No
/// mutator can fail: absent optional values mean "omit this clause", and
/// malformed fragments pass through verbatim into the output text.
///
/// [`build`](QueryBuilder::build) and [`build_count`](QueryBuilder::build_count)
/// are pure readers of the accumulated state; calling them repeatedly
/// without intervening mutation yields identical statements.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    base: Option<String>,
    select_cols: Vec<String>,
    from_expr: Option<String>,
    where_eq: Vec<FieldValue>,
    order_clauses: Vec<FieldOrder>,
    offset: Option<i64>,
    limit: Option<i64>,
    tail: Vec<String>,
}

/// Trim a fragment and strip a single trailing separator from `seps`,
/// provided at least one character precedes it.
fn strip_trailing(input: &str, seps: &[char]) -> String {
    let trimmed = input.trim();
    match trimmed.char_indices().last() {
        Some((i, c)) if i > 0 && seps.contains(&c) => trimmed[..i].to_string(),
        _ => trimmed.to_string(),
    }
}

impl QueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from a raw base-query prefix.
    ///
    /// The prefix is trimmed and a single trailing `;` is stripped, so a
    /// caller-supplied terminator is never duplicated at build time.
    pub fn with_base(query: &str) -> Self {
        Self {
            base: Some(strip_trailing(query, &[';'])),
            ..Self::default()
        }
    }

    /// Append a column expression to the SELECT list. Multi-callable;
    /// columns are joined with `, ` at build time. A trailing `,` or `;`
    /// on the fragment is stripped.
    pub fn select(mut self, fragment: &str) -> Self {
        self.select_cols.push(strip_trailing(fragment, &[';', ',']));
        self
    }

    /// Set the FROM (and JOIN) text. Last call wins; same trailing-character
    /// stripping as [`select`](QueryBuilder::select).
    pub fn from(mut self, fragment: &str) -> Self {
        self.from_expr = Some(strip_trailing(fragment, &[';', ',']));
        self
    }

    /// Append an equality predicate. Multi-callable; predicates are joined
    /// with ` AND ` in call order. The field passes through verbatim — the
    /// caller pre-quotes identifiers.
    pub fn where_eq(mut self, field: &str, value: impl Into<SqlValue>) -> Self {
        self.where_eq.push(FieldValue {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    /// Like [`where_eq`](QueryBuilder::where_eq), but a no-op on `None`.
    /// Supports optional filters without caller-side branching.
    pub fn where_eq_opt(self, field: &str, value: Option<impl Into<SqlValue>>) -> Self {
        match value {
            Some(v) => self.where_eq(field, v),
            None => self,
        }
    }

    /// Append an ORDER BY term.
    pub fn order_by(mut self, field: &str, ascending: bool) -> Self {
        self.order_clauses.push(FieldOrder {
            field: field.to_string(),
            ascending,
        });
        self
    }

    /// Like [`order_by`](QueryBuilder::order_by), but a no-op on `None`.
    pub fn order_by_opt(self, field: &str, ascending: Option<bool>) -> Self {
        match ascending {
            Some(asc) => self.order_by(field, asc),
            None => self,
        }
    }

    /// Append `field ASC`.
    pub fn order_by_asc(self, field: &str) -> Self {
        self.order_by(field, true)
    }

    /// Append `field DESC`.
    pub fn order_by_desc(self, field: &str) -> Self {
        self.order_by(field, false)
    }

    /// Set OFFSET. Rendered as `OFFSET $n` with the value bound. Zero is a
    /// set value, not "absent".
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Like [`offset`](QueryBuilder::offset), but a no-op on `None`.
    pub fn offset_opt(self, n: Option<i64>) -> Self {
        match n {
            Some(n) => self.offset(n),
            None => self,
        }
    }

    /// Set LIMIT. Rendered as `LIMIT $n` with the value bound. Zero is a
    /// set value, not "absent".
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Like [`limit`](QueryBuilder::limit), but a no-op on `None`.
    pub fn limit_opt(self, n: Option<i64>) -> Self {
        match n {
            Some(n) => self.limit(n),
            None => self,
        }
    }

    /// Append a raw fragment after all structured clauses. A trailing `;`
    /// is stripped; the single build-time terminator still applies.
    pub fn append(mut self, fragment: &str) -> Self {
        self.tail.push(strip_trailing(fragment, &[';']));
        self
    }

    /// Like [`append`](QueryBuilder::append), but a no-op on `None`.
    pub fn append_opt(self, fragment: Option<&str>) -> Self {
        match fragment {
            Some(f) => self.append(f),
            None => self,
        }
    }

    /// Render the query text and its parameter list.
    pub fn build(&self) -> Statement {
        let statement = self.assemble(false);
        tracing::debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "built query"
        );
        statement
    }

    /// Render a row-count variant of the query.
    ///
    /// Replaces the SELECT list with `count(*) OVER() as found`, forces
    /// `LIMIT 1`, and omits ORDER BY and OFFSET — none of them affect the
    /// count. Offset/limit values are likewise excluded from the returned
    /// parameters since the emitted text never references them.
    pub fn build_count(&self) -> Statement {
        let statement = self.assemble(true);
        tracing::debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "built count query"
        );
        statement
    }

    /// The rendered SQL text (for debugging and assertions).
    pub fn to_sql(&self) -> String {
        self.assemble(false).sql
    }

    /// The rendered count SQL text (for debugging and assertions).
    pub fn to_count_sql(&self) -> String {
        self.assemble(true).sql
    }

    /// Render clause fragments in canonical physical order, joined by
    /// single spaces with exactly one trailing `;`.
    fn assemble(&self, count_mode: bool) -> Statement {
        let mut ledger = ParamLedger::new();
        ledger.extend_where(self.where_eq.iter().map(|p| p.value.clone()));
        if !count_mode {
            if let Some(n) = self.offset {
                ledger.set_offset(n);
            }
            if let Some(n) = self.limit {
                ledger.set_limit(n);
            }
        }

        let mut parts: Vec<String> = Vec::new();

        if let Some(base) = &self.base {
            parts.push(base.clone());
        }

        if count_mode {
            parts.push(format!("SELECT {COUNT_PROJECTION}"));
        } else if !self.select_cols.is_empty() {
            parts.push(format!("SELECT {}", self.select_cols.join(", ")));
        }

        if let Some(from) = &self.from_expr {
            parts.push(format!("FROM {from}"));
        }

        if !self.where_eq.is_empty() {
            let start = ledger.start_index(&[]);
            let predicates: Vec<String> = self
                .where_eq
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{} = ${}", p.field, start + i))
                .collect();
            parts.push(format!("WHERE {}", predicates.join(" AND ")));
        }

        if count_mode {
            parts.push("LIMIT 1".to_string());
        } else {
            if !self.order_clauses.is_empty() {
                let terms: Vec<String> = self
                    .order_clauses
                    .iter()
                    .map(|o| {
                        let dir = if o.ascending { "ASC" } else { "DESC" };
                        format!("{} {dir}", o.field)
                    })
                    .collect();
                parts.push(format!("ORDER BY {}", terms.join(", ")));
            }

            if self.offset.is_some() {
                parts.push(format!("OFFSET ${}", ledger.start_index(&[Clause::Where])));
            }

            if self.limit.is_some() {
                parts.push(format!(
                    "LIMIT ${}",
                    ledger.start_index(&[Clause::Where, Clause::Offset])
                ));
            }
        }

        parts.extend(self.tail.iter().cloned());

        let params = if count_mode {
            ledger.params_for(&[Clause::Where])
        } else {
            ledger.params()
        };

        Statement {
            sql: format!("{};", parts.join(" ")),
            params,
        }
    }
}
