//! Evaluation of validated conditions over record sequences.
//!
//! Conditions are combined with logical AND; the only disjunction is the one
//! inside a single one-of condition. Filtering is lazy, single-pass and
//! order-preserving, and holds no state beyond the input iterator itself.

use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;

use tracing::debug;

use crate::condition::{Condition, ConditionKind, Operand, make_condition};
use crate::error::Result;
use crate::record::Record;
use crate::registry::Registry;

/// True when `record` satisfies every condition. Stops at the first failure.
pub fn satisfies(conditions: &[Condition], record: &Record) -> bool {
    conditions.iter().all(|c| c.matches(record))
}

/// Lazily selects the records satisfying all `conditions`, in input order.
///
/// The returned [`Selection`] is `Clone` whenever the underlying iterator
/// is, so a selection over a slice can be restarted freely.
pub fn evaluate<I>(conditions: &[Condition], records: I) -> Selection<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    Selection {
        conditions,
        records: records.into_iter(),
    }
}

#[derive(Debug, Clone)]
pub struct Selection<'c, I> {
    conditions: &'c [Condition],
    records: I,
}

impl<I> Iterator for Selection<'_, I>
where
    I: Iterator,
    I::Item: Borrow<Record>,
{
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        let conditions = self.conditions;
        self.records.find(|record| satisfies(conditions, record.borrow()))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}
impl<I> FusedIterator for Selection<'_, I>
where
    I: FusedIterator,
    I::Item: Borrow<Record>,
{
}

// ------------- Columns -------------
/// Accumulates which registry parameters appear in a set of records.
#[derive(Debug, Clone)]
pub struct Columns<'r> {
    registry: &'r Registry,
    seen: Vec<bool>,
}
impl<'r> Columns<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            seen: vec![false; registry.len()],
        }
    }
    pub fn observe(&mut self, record: &Record) {
        for name in record.names() {
            if let Some(position) = self.registry.position(name) {
                self.seen[position] = true;
            }
        }
    }
    /// The observed names, in registry order.
    pub fn names(&self) -> Vec<&'static str> {
        self.registry
            .all_names()
            .zip(&self.seen)
            .filter_map(|(name, &seen)| seen.then_some(name))
            .collect()
    }
}

/// Registry names present in at least one of `records`, in registry order.
pub fn present_parameters<I>(registry: &Registry, records: I) -> Vec<&'static str>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let mut columns = Columns::new(registry);
    for record in records {
        columns.observe(record.borrow());
    }
    columns.names()
}

// ------------- Query -------------
/// A conjunction of conditions validated against one registry.
#[derive(Debug, Clone)]
pub struct Query<'r> {
    registry: &'r Registry,
    conditions: Vec<Condition>,
}

impl<'r> Query<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            conditions: Vec::new(),
        }
    }
    /// Adds a condition, validating it first. Nothing is added on failure.
    pub fn and(mut self, parameter: &str, kind: ConditionKind, operand: impl Into<Operand>) -> Result<Self> {
        let condition = make_condition(self.registry, parameter, kind, operand)?;
        self.push(condition);
        Ok(self)
    }
    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
        debug!(conditions = self.conditions.len(), query = %self, "query extended");
    }
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
    pub fn len(&self) -> usize {
        self.conditions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
    pub fn matches(&self, record: &Record) -> bool {
        satisfies(&self.conditions, record)
    }
    pub fn select<I>(&self, records: I) -> Selection<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Record>,
    {
        evaluate(&self.conditions, records)
    }
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for condition in &self.conditions {
            if !first {
                write!(f, " && ")?;
            }
            write!(f, "{condition}")?;
            first = false;
        }
        Ok(())
    }
}
