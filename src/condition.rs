//! Query conditions: construction, validation against the registry and
//! matching against a single record.
//!
//! A [`Condition`] is only obtainable through [`make_condition`], so every
//! condition in existence has already been checked against the registry.
//! Operands are normalised during that check (units converted to the
//! field's declared unit, vocabulary tokens verified), which is why
//! [`Condition::matches`] cannot fail.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use serde::Serialize;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::record::Record;
use crate::registry::{ParameterSpec, Registry};
use crate::units::Unit;
use crate::vocabulary::{self, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionKind {
    Present,
    Equals,
    OneOf,
    Range,
}
impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConditionKind::Present => write!(f, "present"),
            ConditionKind::Equals => write!(f, "equals"),
            ConditionKind::OneOf => write!(f, "one-of"),
            ConditionKind::Range => write!(f, "range"),
        }
    }
}

// ------------- Operands -------------
/// A number, optionally tagged with the unit it is expressed in.
/// Without a unit the number is taken to be in the field's declared unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Option<String>,
}
impl Quantity {
    pub fn new(value: f64) -> Self {
        Self { value, unit: None }
    }
    pub fn with_unit(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: Some(unit.into()),
        }
    }
    pub fn value(&self) -> f64 {
        self.value
    }
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
    /// The value expressed in the declared unit of `spec`.
    fn normalized(&self, spec: &ParameterSpec) -> Result<f64> {
        if self.value.is_nan() {
            return Err(invalid(spec, "numeric operand is NaN"));
        }
        let Some(unit) = &self.unit else {
            return Ok(self.value);
        };
        let mismatch = || QueryError::UnitMismatch {
            parameter: spec.name().to_string(),
            expected: spec.unit().unwrap_or("dimensionless").to_string(),
            found: unit.clone(),
        };
        let given = Unit::parse(unit).map_err(|_| mismatch())?;
        let factor = given.factor_to(&spec.dimension()).ok_or_else(mismatch)?;
        Ok(self.value * factor)
    }
}
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.value, unit),
            None => write!(f, "{}", self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Quantity(Quantity),
}
impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}
impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}
impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Quantity(Quantity::new(n))
    }
}
impl From<Quantity> for Literal {
    fn from(q: Quantity) -> Self {
        Literal::Quantity(q)
    }
}

/// A numeric interval; either side may be unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    lo: Bound<Quantity>,
    hi: Bound<Quantity>,
}
impl Interval {
    pub fn new(lo: Bound<Quantity>, hi: Bound<Quantity>) -> Self {
        Self { lo, hi }
    }
    /// `lo ≤ value ≤ hi`; a `None` side is unbounded.
    pub fn closed(lo: Option<Quantity>, hi: Option<Quantity>) -> Self {
        let included = |q: Option<Quantity>| q.map_or(Bound::Unbounded, Bound::Included);
        Self::new(included(lo), included(hi))
    }
    pub fn between(lo: impl Into<Quantity>, hi: impl Into<Quantity>) -> Self {
        Self::new(Bound::Included(lo.into()), Bound::Included(hi.into()))
    }
    pub fn at_least(lo: impl Into<Quantity>) -> Self {
        Self::new(Bound::Included(lo.into()), Bound::Unbounded)
    }
    pub fn at_most(hi: impl Into<Quantity>) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(hi.into()))
    }
    pub fn greater_than(lo: impl Into<Quantity>) -> Self {
        Self::new(Bound::Excluded(lo.into()), Bound::Unbounded)
    }
    pub fn less_than(hi: impl Into<Quantity>) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(hi.into()))
    }
}
impl From<f64> for Quantity {
    fn from(n: f64) -> Self {
        Quantity::new(n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Literal(Literal),
    Set(Vec<Literal>),
    Interval(Interval),
}
impl From<Literal> for Operand {
    fn from(l: Literal) -> Self {
        Operand::Literal(l)
    }
}
impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Literal(s.into())
    }
}
impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Literal(n.into())
    }
}
impl From<Quantity> for Operand {
    fn from(q: Quantity) -> Self {
        Operand::Literal(q.into())
    }
}
impl From<Interval> for Operand {
    fn from(i: Interval) -> Self {
        Operand::Interval(i)
    }
}
impl<L: Into<Literal>> From<Vec<L>> for Operand {
    fn from(set: Vec<L>) -> Self {
        Operand::Set(set.into_iter().map(Into::into).collect())
    }
}

// ------------- Condition -------------
// The normalised form a condition is evaluated in.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Present,
    Text(Vec<String>),
    Number { values: Vec<f64>, tolerance: f64 },
    Range { lo: Bound<f64>, hi: Bound<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    parameter: &'static str,
    kind: ConditionKind,
    vocabulary: Option<Vocabulary>,
    predicate: Predicate,
}

fn invalid(spec: &ParameterSpec, reason: impl Into<String>) -> QueryError {
    QueryError::InvalidPredicateKind {
        parameter: spec.name().to_string(),
        reason: reason.into(),
    }
}

/// Validates `(parameter, kind, operand)` against `registry` and returns the
/// resulting immutable condition.
pub fn make_condition(
    registry: &Registry,
    parameter: &str,
    kind: ConditionKind,
    operand: impl Into<Operand>,
) -> Result<Condition> {
    let spec = registry.lookup(parameter)?;
    let predicate = match (kind, operand.into()) {
        (ConditionKind::Present, Operand::None) => Predicate::Present,
        (ConditionKind::Present, _) => return Err(invalid(spec, "present takes no operand")),
        (ConditionKind::Range, _) if spec.is_categorical() => {
            return Err(invalid(spec, "range is not defined on a categorical field"));
        }
        (ConditionKind::Range, Operand::Interval(interval)) => Predicate::Range {
            lo: normalized_bound(spec, interval.lo)?,
            hi: normalized_bound(spec, interval.hi)?,
        },
        (ConditionKind::Range, _) => return Err(invalid(spec, "range requires a numeric interval")),
        (ConditionKind::Equals, Operand::Literal(literal)) => literals(spec, vec![literal])?,
        (ConditionKind::Equals, _) => return Err(invalid(spec, "equals requires a single literal")),
        (ConditionKind::OneOf, Operand::Set(set)) if set.is_empty() => {
            return Err(invalid(spec, "one-of requires at least one value"));
        }
        (ConditionKind::OneOf, Operand::Set(set)) => literals(spec, set)?,
        (ConditionKind::OneOf, Operand::Literal(literal)) => literals(spec, vec![literal])?,
        (ConditionKind::OneOf, _) => return Err(invalid(spec, "one-of requires a set of literals")),
    };
    let condition = Condition {
        parameter: spec.name(),
        kind,
        vocabulary: spec.vocabulary(),
        predicate,
    };
    debug!(%condition, "condition validated");
    Ok(condition)
}

fn normalized_bound(spec: &ParameterSpec, bound: Bound<Quantity>) -> Result<Bound<f64>> {
    Ok(match bound {
        Bound::Included(q) => Bound::Included(q.normalized(spec)?),
        Bound::Excluded(q) => Bound::Excluded(q.normalized(spec)?),
        Bound::Unbounded => Bound::Unbounded,
    })
}

fn literals(spec: &ParameterSpec, literals: Vec<Literal>) -> Result<Predicate> {
    if spec.is_categorical() {
        let mut texts: Vec<String> = Vec::with_capacity(literals.len());
        for literal in literals {
            let Literal::Text(text) = literal else {
                return Err(invalid(spec, "numeric operand for a categorical field"));
            };
            if let Some(vocabulary) = spec.vocabulary() {
                if !vocabulary.contains(&text) {
                    return Err(QueryError::InvalidToken {
                        parameter: spec.name().to_string(),
                        vocabulary: vocabulary.label(),
                        token: text,
                        allowed: vocabulary.tokens().join(", "),
                    });
                }
            }
            if !texts.contains(&text) {
                texts.push(text);
            }
        }
        Ok(Predicate::Text(texts))
    } else {
        let values = literals
            .into_iter()
            .map(|literal| match literal {
                Literal::Quantity(q) => q.normalized(spec),
                Literal::Text(_) => Err(invalid(spec, "text operand for a numeric field")),
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(Predicate::Number { values, tolerance: 0.0 })
    }
}

impl Condition {
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }
    pub fn kind(&self) -> ConditionKind {
        self.kind
    }
    /// Sets the absolute tolerance, in the field's declared unit, used by a
    /// numeric equals or one-of condition.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !(tolerance >= 0.0 && tolerance.is_finite()) {
            return Err(QueryError::InvalidPredicateKind {
                parameter: self.parameter.to_string(),
                reason: format!("tolerance must be finite and non-negative, got {tolerance}"),
            });
        }
        match &mut self.predicate {
            Predicate::Number { tolerance: t, .. } => *t = tolerance,
            _ => {
                return Err(QueryError::InvalidPredicateKind {
                    parameter: self.parameter.to_string(),
                    reason: format!("tolerance only applies to numeric equality, not {}", self.kind),
                });
            }
        }
        Ok(self)
    }
    pub fn tolerance(&self) -> Option<f64> {
        match self.predicate {
            Predicate::Number { tolerance, .. } => Some(tolerance),
            _ => None,
        }
    }

    /// True when the record measured the parameter and the value satisfies the predicate.
    /// Absent or malformed values never match.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(slot) = record.get(self.parameter) else {
            return false;
        };
        match &self.predicate {
            Predicate::Present => true,
            Predicate::Text(texts) => match slot.value.as_text() {
                Some(text) if self.vocabulary.is_some() => {
                    vocabulary::tokens_of(text).any(|token| texts.iter().any(|t| t == token))
                }
                Some(text) => texts.iter().any(|t| t == text),
                None => false,
            },
            Predicate::Number { values, tolerance } => slot.value.as_number().is_some_and(|v| {
                values.iter().any(|&l| v == l || (v - l).abs() <= *tolerance)
            }),
            Predicate::Range { lo, hi } => slot
                .value
                .as_number()
                .is_some_and(|v| (*lo, *hi).contains(&v)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.predicate {
            Predicate::Present => write!(f, "exist({})", self.parameter),
            Predicate::Text(texts) if texts.len() == 1 => write!(f, "{} == {}", self.parameter, texts[0]),
            Predicate::Text(texts) => write!(f, "{} in ({})", self.parameter, texts.join(", ")),
            Predicate::Number { values, tolerance } => {
                let joined = values.iter().map(f64::to_string).collect::<Vec<_>>().join(", ");
                if values.len() == 1 && self.kind == ConditionKind::Equals {
                    write!(f, "{} == {}", self.parameter, joined)?;
                } else {
                    write!(f, "{} in ({})", self.parameter, joined)?;
                }
                if *tolerance > 0.0 {
                    write!(f, " ± {tolerance}")?;
                }
                Ok(())
            }
            Predicate::Range { lo, hi } => {
                write!(f, "{} in ", self.parameter)?;
                match lo {
                    Bound::Included(l) => write!(f, "[{l}, ")?,
                    Bound::Excluded(l) => write!(f, "({l}, ")?,
                    Bound::Unbounded => write!(f, "(-inf, ")?,
                }
                match hi {
                    Bound::Included(h) => write!(f, "{h}]")?,
                    Bound::Excluded(h) => write!(f, "{h})")?,
                    Bound::Unbounded => write!(f, "inf)")?,
                }
                Ok(())
            }
        }
    }
}
