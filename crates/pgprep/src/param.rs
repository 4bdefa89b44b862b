//! Per-clause parameter ledger.
//!
//! SQL places WHERE before OFFSET before LIMIT, yet placeholder numbers are
//! assigned left-to-right across the final query text, and any of the three
//! clauses may be absent. The mapping from clause kind to "first placeholder
//! number" therefore cannot be computed statically; [`ParamLedger`]
//! recomputes it from which earlier clauses are actually populated, so the
//! off-by-one arithmetic lives in exactly one place.

use crate::value::SqlValue;

/// The clause kinds that carry bound parameters, in canonical order.
///
/// The set and its physical ordering are a closed contract; see
/// [`Clause::CANONICAL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clause {
    Where,
    Offset,
    Limit,
}

impl Clause {
    /// Canonical physical order: WHERE, then OFFSET, then LIMIT.
    pub const CANONICAL: [Clause; 3] = [Clause::Where, Clause::Offset, Clause::Limit];
}

/// Tracks accumulated WHERE values plus the optional OFFSET/LIMIT scalars
/// and computes 1-based placeholder start indices per clause.
///
/// Created empty for each build pass, populated once, flattened once into
/// the final parameter list, then dropped.
#[derive(Clone, Debug, Default)]
pub struct ParamLedger {
    where_values: Vec<SqlValue>,
    offset: Option<i64>,
    limit: Option<i64>,
}

impl ParamLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one parameter to the WHERE sequence.
    pub fn push_where(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.where_values.push(value.into());
        self
    }

    /// Append parameters to the WHERE sequence, preserving order.
    /// Repeatable; an empty iterator is a no-op.
    pub fn extend_where(&mut self, values: impl IntoIterator<Item = SqlValue>) -> &mut Self {
        self.where_values.extend(values);
        self
    }

    /// Set the OFFSET scalar. Last write wins; no validation.
    pub fn set_offset(&mut self, n: i64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    /// Set the LIMIT scalar. Last write wins; no validation.
    pub fn set_limit(&mut self, n: i64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Accumulated WHERE parameters, in push order.
    pub fn where_values(&self) -> &[SqlValue] {
        &self.where_values
    }

    /// The OFFSET scalar, if set.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// The LIMIT scalar, if set.
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Number of placeholder slots the clause contributes: `where.len()`
    /// for WHERE, 1 or 0 for OFFSET/LIMIT depending on presence.
    pub fn slots(&self, clause: Clause) -> usize {
        match clause {
            Clause::Where => self.where_values.len(),
            Clause::Offset => usize::from(self.offset.is_some()),
            Clause::Limit => usize::from(self.limit.is_some()),
        }
    }

    /// 1-based starting placeholder index for the next clause, given the
    /// clause kinds that precede it in canonical order.
    ///
    /// An empty `preceding` slice returns 1: if the clause were first, its
    /// first placeholder is `$1`. Unpopulated clauses contribute zero
    /// slots, so callers may always pass the full canonical prefix.
    pub fn start_index(&self, preceding: &[Clause]) -> usize {
        1 + preceding.iter().map(|c| self.slots(*c)).sum::<usize>()
    }

    /// Flatten the ledger into an ordered parameter list restricted to the
    /// given clause kinds.
    ///
    /// Concatenation always follows canonical clause order, whatever the
    /// order of `clauses`. Clauses that contribute nothing are skipped, so
    /// the result may be empty.
    pub fn params_for(&self, clauses: &[Clause]) -> Vec<SqlValue> {
        let mut out = Vec::with_capacity(clauses.iter().map(|c| self.slots(*c)).sum());
        for clause in Clause::CANONICAL {
            if !clauses.contains(&clause) {
                continue;
            }
            match clause {
                Clause::Where => out.extend(self.where_values.iter().cloned()),
                Clause::Offset => out.extend(self.offset.map(SqlValue::Int)),
                Clause::Limit => out.extend(self.limit.map(SqlValue::Int)),
            }
        }
        out
    }

    /// Flatten the full ledger in canonical order: WHERE values, then the
    /// OFFSET scalar if set, then the LIMIT scalar if set.
    pub fn params(&self) -> Vec<SqlValue> {
        self.params_for(&Clause::CANONICAL)
    }
}
