//! Scalar parameter values.
//!
//! `SqlValue` is the only shape a bound parameter can take: a string or a
//! number. The builder never inspects a value, it only positions it, so the
//! enum stays closed and comparable (which is what the tests rely on).

use bytes::BytesMut;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A scalar bound to a `$n` placeholder.
///
/// Implements [`ToSql`] by delegating to the wrapped scalar, so a finished
/// parameter list can be handed to `tokio-postgres` as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    /// Text parameter (`TEXT`, `VARCHAR`, ...).
    Text(String),
    /// Integer parameter (`BIGINT`).
    Int(i64),
    /// Floating-point parameter (`DOUBLE PRECISION`).
    Float(f64),
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Text(v) => write!(f, "{v}"),
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            SqlValue::Text(v) => v.to_sql(ty, out),
            SqlValue::Int(v) => v.to_sql(ty, out),
            SqlValue::Float(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <String as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_pick_the_right_variant() {
        assert_eq!(SqlValue::from("taro"), SqlValue::Text("taro".to_string()));
        assert_eq!(SqlValue::from(1i32), SqlValue::Int(1));
        assert_eq!(SqlValue::from(1i64), SqlValue::Int(1));
        assert_eq!(SqlValue::from(0.5f64), SqlValue::Float(0.5));
    }

    #[test]
    fn display_renders_the_scalar() {
        assert_eq!(SqlValue::from("taro").to_string(), "taro");
        assert_eq!(SqlValue::from(42i64).to_string(), "42");
    }
}
