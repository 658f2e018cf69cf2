//! Range and comparison predicates.

use std::fmt;
use std::str::FromStr;

use sciql_result::Error;

use crate::literal::Literal;

/// Interval predicate `low (<|<=) v (<|<=) high`, optionally negated.
///
/// A [`Literal::Null`] bound leaves that side unbounded and its inclusive
/// flag is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct RangePredicate {
    pub low: Literal,
    pub high: Literal,
    pub include_low: bool,
    pub include_high: bool,
    pub anti: bool,
}

impl RangePredicate {
    pub fn new(
        low: impl Into<Literal>,
        high: impl Into<Literal>,
        include_low: bool,
        include_high: bool,
        anti: bool,
    ) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
            include_low,
            include_high,
            anti,
        }
    }

    /// Inclusive `[low, high]`.
    pub fn between(low: impl Into<Literal>, high: impl Into<Literal>) -> Self {
        Self::new(low, high, true, true, false)
    }

    /// `v == value`.
    pub fn equals(value: impl Into<Literal>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value, true, true, false)
    }

    /// Builds the predicate a comparison `v <op> value` stands for.
    pub fn theta(op: ThetaOp, value: impl Into<Literal>) -> Self {
        let value = value.into();
        match op {
            ThetaOp::Eq => Self::new(value.clone(), value, true, true, false),
            ThetaOp::NotEq => Self::new(value.clone(), value, true, true, true),
            ThetaOp::Lt => Self::new(Literal::Null, value, false, false, false),
            ThetaOp::LtEq => Self::new(Literal::Null, value, false, true, false),
            ThetaOp::Gt => Self::new(value, Literal::Null, false, false, false),
            ThetaOp::GtEq => Self::new(value, Literal::Null, true, false, false),
        }
    }

    /// Negated copy of this predicate.
    pub fn negated(mut self) -> Self {
        self.anti = !self.anti;
        self
    }

    /// Both bounds present, equal and inclusive.
    pub fn is_point(&self) -> bool {
        !self.low.is_null() && self.low == self.high && self.include_low && self.include_high
    }

    pub fn is_unbounded(&self) -> bool {
        self.low.is_null() && self.high.is_null()
    }
}

impl fmt::Display for RangePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anti {
            f.write_str("NOT ")?;
        }
        let open = if self.include_low { '[' } else { '(' };
        let close = if self.include_high { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.low, self.high)
    }
}

/// Comparison operators accepted by theta selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThetaOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl FromStr for ThetaOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(ThetaOp::Eq),
            "!=" | "<>" => Ok(ThetaOp::NotEq),
            "<" => Ok(ThetaOp::Lt),
            "<=" => Ok(ThetaOp::LtEq),
            ">" => Ok(ThetaOp::Gt),
            ">=" => Ok(ThetaOp::GtEq),
            other => Err(Error::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for ThetaOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ThetaOp::Eq => "=",
            ThetaOp::NotEq => "!=",
            ThetaOp::Lt => "<",
            ThetaOp::LtEq => "<=",
            ThetaOp::Gt => ">",
            ThetaOp::GtEq => ">=",
        };
        f.write_str(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operator_tokens() {
        assert_eq!("==".parse::<ThetaOp>().unwrap(), ThetaOp::Eq);
        assert_eq!("<>".parse::<ThetaOp>().unwrap(), ThetaOp::NotEq);
        assert_eq!(">=".parse::<ThetaOp>().unwrap(), ThetaOp::GtEq);
        let err = "~".parse::<ThetaOp>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperator(tok) if tok == "~"));
    }

    #[test]
    fn theta_maps_to_ranges() {
        let lt = RangePredicate::theta(ThetaOp::Lt, 5);
        assert!(lt.low.is_null());
        assert_eq!(lt.high, Literal::Int128(5));
        assert!(!lt.include_high);

        let ge = RangePredicate::theta(ThetaOp::GtEq, 5);
        assert_eq!(ge.low, Literal::Int128(5));
        assert!(ge.high.is_null());
        assert!(ge.include_low);

        assert!(RangePredicate::theta(ThetaOp::Eq, 5).is_point());
        let ne = RangePredicate::theta(ThetaOp::NotEq, 5);
        assert!(ne.is_point() && ne.anti);
    }

    #[test]
    fn display_shows_bounds() {
        let pred = RangePredicate::new(1, Literal::Null, false, true, true);
        assert_eq!(pred.to_string(), "NOT (1, NULL]");
    }
}
