//! Parsing of condition strings into validated queries.
//!
//! The grammar (see `query.pest`) follows the catalogue's own filter
//! syntax: conditions joined by `&&`, comparisons such as `F0 >= 100 Hz`,
//! membership functions `type(...)`, `bincomp(...)` and `assoc(...)`,
//! `PARAM in (...)` and `exist(PARAM)`. There is no `||`; alternatives for
//! one parameter are written as a single membership condition.

use pest::Parser;
use pest::error::{Error as PestError, LineColLocation};
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;

use crate::condition::{Condition, ConditionKind, Interval, Literal, Operand, Quantity, make_condition};
use crate::engine::Query;
use crate::error::{QueryError, Result};
use crate::registry::Registry;

#[derive(Parser)]
#[grammar = "query.pest"]
struct ConditionGrammar;

pub struct QueryParser<'r> {
    registry: &'r Registry,
    tolerance: f64,
}

impl<'r> QueryParser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry, tolerance: 0.0 }
    }
    /// Tolerance given to numeric `==` conditions, in the field's declared unit.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn parse(&self, text: &str) -> Result<Query<'r>> {
        let root = ConditionGrammar::parse(Rule::query, text)
            .map_err(from_pest)?
            .next()
            .ok_or_else(|| unexpected("empty query"))?;
        if let Some(disjunction) = root.clone().into_inner().find(|p| p.as_rule() == Rule::disjunction) {
            let (line, col) = disjunction.line_col();
            return Err(QueryError::Parse {
                message: "'||' is not supported; list alternatives for one parameter in a single membership condition"
                    .to_string(),
                line: Some(line),
                col: Some(col),
            });
        }
        let mut query = Query::new(self.registry);
        for pair in root.into_inner() {
            let condition = match pair.as_rule() {
                Rule::exist => {
                    let parameter = first_inner(&pair)?;
                    make_condition(self.registry, parameter.as_str(), ConditionKind::Present, Operand::None)?
                }
                Rule::membership => {
                    let mut inner = pair.into_inner();
                    let function = inner.next().ok_or_else(|| unexpected("membership without function"))?;
                    let parameter = function.as_str().to_ascii_uppercase();
                    let set = inner.map(literal).collect::<Result<Vec<_>>>()?;
                    make_condition(self.registry, &parameter, ConditionKind::OneOf, Operand::Set(set))?
                }
                Rule::inclusion => {
                    let mut inner = pair.into_inner();
                    let parameter = inner.next().ok_or_else(|| unexpected("inclusion without parameter"))?;
                    let set = inner.map(literal).collect::<Result<Vec<_>>>()?;
                    make_condition(self.registry, parameter.as_str(), ConditionKind::OneOf, Operand::Set(set))?
                }
                Rule::comparison => self.comparison(pair)?,
                Rule::EOI => continue,
                rule => return Err(unexpected(&format!("{rule:?}"))),
            };
            query.push(condition);
        }
        debug!(%query, "query parsed");
        Ok(query)
    }

    fn comparison(&self, pair: Pair<Rule>) -> Result<Condition> {
        let mut inner = pair.into_inner();
        let (Some(parameter), Some(operator), Some(operand)) = (inner.next(), inner.next(), inner.next()) else {
            return Err(unexpected("incomplete comparison"));
        };
        let parameter = parameter.as_str();
        let operand = literal(operand)?;
        // a text operand is passed through so that validation reports the misuse
        let interval = |bound: fn(Quantity) -> Interval| match &operand {
            Literal::Quantity(q) => Operand::Interval(bound(q.clone())),
            Literal::Text(_) => Operand::Literal(operand.clone()),
        };
        match operator.as_str() {
            "==" | "=" => {
                let numeric = matches!(operand, Literal::Quantity(_));
                let condition = make_condition(self.registry, parameter, ConditionKind::Equals, operand)?;
                if numeric && self.tolerance > 0.0 {
                    condition.with_tolerance(self.tolerance)
                } else {
                    Ok(condition)
                }
            }
            "<=" => make_condition(self.registry, parameter, ConditionKind::Range, interval(|q| Interval::at_most(q))),
            ">=" => make_condition(self.registry, parameter, ConditionKind::Range, interval(|q| Interval::at_least(q))),
            "<" => make_condition(self.registry, parameter, ConditionKind::Range, interval(|q| Interval::less_than(q))),
            ">" => make_condition(self.registry, parameter, ConditionKind::Range, interval(|q| Interval::greater_than(q))),
            other => Err(unexpected(&format!("operator {other}"))),
        }
    }
}

/// Parses `text` against `registry` with no equality tolerance.
pub fn parse_query<'r>(registry: &'r Registry, text: &str) -> Result<Query<'r>> {
    QueryParser::new(registry).parse(text)
}

fn literal(pair: Pair<Rule>) -> Result<Literal> {
    match pair.as_rule() {
        Rule::quantity => {
            let mut inner = pair.into_inner();
            let number = inner.next().ok_or_else(|| unexpected("quantity without number"))?;
            let value = number.as_str().parse::<f64>().map_err(|e| QueryError::Parse {
                message: format!("invalid number {:?}: {e}", number.as_str()),
                line: Some(number.line_col().0),
                col: Some(number.line_col().1),
            })?;
            Ok(Literal::Quantity(match inner.next() {
                Some(unit) => Quantity::with_unit(value, unit.as_str()),
                None => Quantity::new(value),
            }))
        }
        Rule::string => Ok(Literal::Text(
            pair.into_inner().next().map_or("", |text| text.as_str()).to_string(),
        )),
        Rule::bare => Ok(Literal::Text(pair.as_str().to_string())),
        rule => Err(unexpected(&format!("{rule:?} in literal position"))),
    }
}

fn first_inner<'i>(pair: &Pair<'i, Rule>) -> Result<Pair<'i, Rule>> {
    pair.clone()
        .into_inner()
        .next()
        .ok_or_else(|| unexpected(&format!("empty {:?}", pair.as_rule())))
}

fn unexpected(what: &str) -> QueryError {
    QueryError::Parse {
        message: format!("unexpected grammar structure: {what}"),
        line: None,
        col: None,
    }
}

fn from_pest(e: PestError<Rule>) -> QueryError {
    let (line, col) = match e.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    QueryError::Parse {
        message: e.variant.message().to_string(),
        line: Some(line),
        col: Some(col),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn parse(text: &str) -> Result<Query<'static>> {
        parse_query(Registry::global(), text)
    }

    #[test]
    fn comparisons_become_one_sided_ranges() {
        let query = parse("F0 >= 1 && F0 < 10").unwrap();
        assert_eq!(query.len(), 2);
        assert!(query.conditions().iter().all(|c| c.kind() == ConditionKind::Range));
        assert!(query.matches(&Record::new().with_value("F0", 1.0)));
        assert!(!query.matches(&Record::new().with_value("F0", 10.0)));
    }

    #[test]
    fn functions_map_to_vocabulary_fields() {
        let query = parse("type(RADIO, XINS) && BINCOMP(He)").unwrap();
        assert_eq!(query.conditions()[0].parameter(), "TYPE");
        assert_eq!(query.conditions()[1].parameter(), "BINCOMP");
        assert_eq!(query.conditions()[1].kind(), ConditionKind::OneOf);
    }

    #[test]
    fn units_follow_numbers() {
        let query = parse("DIST <= 500 pc").unwrap();
        assert!(query.matches(&Record::new().with_value("DIST", 0.4)));
        assert!(matches!(parse("DIST <= 500 Hz"), Err(QueryError::UnitMismatch { .. })));
    }

    #[test]
    fn quoted_and_bare_text() {
        let query = parse(r#"JNAME == "J0437-4715" && PSRB == B1913+16"#).unwrap();
        let record = Record::new()
            .with_value("JNAME", "J0437-4715")
            .with_value("PSRB", "B1913+16");
        assert!(query.matches(&record));
    }

    #[test]
    fn exist_and_inclusion() {
        let query = parse("exist(PMRA) && ASSOC in (GC, SNR)").unwrap();
        assert_eq!(query.conditions()[0].kind(), ConditionKind::Present);
        assert_eq!(query.conditions()[1].kind(), ConditionKind::OneOf);
    }

    #[test]
    fn disjunction_is_rejected_with_position() {
        let err = parse("F0 > 1 || F0 < 0").unwrap_err();
        assert!(matches!(err, QueryError::Parse { line: Some(1), col: Some(8), .. }));
    }

    #[test]
    fn quoted_text_may_contain_bars() {
        let query = parse(r#"JNAME == "a||b""#).unwrap();
        assert!(query.matches(&Record::new().with_value("JNAME", "a||b")));
    }

    #[test]
    fn multi_factor_units() {
        let query = parse("DM > 10 cm^-3 pc && F0 < 1 kHz").unwrap();
        assert_eq!(query.len(), 2);
        assert!(query.matches(&Record::new().with_value("DM", 12.0).with_value("F0", 900.0)));
    }

    #[test]
    fn syntax_errors_carry_positions() {
        let err = parse("F0 >= ").unwrap_err();
        assert!(matches!(err, QueryError::Parse { line: Some(1), .. }));
        assert!(parse("").is_err());
    }

    #[test]
    fn semantic_errors_come_from_the_registry() {
        assert_eq!(parse("BOGUS == x").unwrap_err(), QueryError::UnknownParameter("BOGUS".into()));
        assert!(matches!(parse("TYPE >= 3"), Err(QueryError::InvalidPredicateKind { .. })));
        assert!(matches!(parse("type(PULSAR)"), Err(QueryError::InvalidToken { .. })));
    }

    #[test]
    fn tolerance_applies_to_numeric_equality() {
        let query = QueryParser::new(Registry::global()).tolerance(0.5).parse("F0 == 10 && TYPE == RADIO").unwrap();
        assert_eq!(query.conditions()[0].tolerance(), Some(0.5));
        assert_eq!(query.conditions()[1].tolerance(), None);
    }
}
