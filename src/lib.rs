//! psrquery – parameter registry and condition evaluation for the ATNF pulsar catalogue.
//!
//! The catalogue describes each pulsar with a fixed set of named parameters
//! (`F0`, `DM`, `TYPE`, `BINCOMP`, ...). This crate knows that set and lets
//! callers express selections over catalogue records:
//! * A [`registry::Registry`] holds one [`registry::ParameterSpec`] per parameter:
//!   whether it carries an uncertainty and a reference, its declared unit,
//!   and whether it is numeric or categorical.
//! * A [`condition::Condition`] is a validated `(parameter, kind, operand)` triple.
//!   It can only be built through [`condition::make_condition`], which rejects
//!   unknown names, categorical ranges, foreign vocabulary tokens and
//!   incompatible units up front.
//! * [`engine::evaluate`] applies a conjunction of conditions to any
//!   sequence of [`record::Record`]s, lazily and in input order.
//!
//! ## Modules
//! * [`registry`] – The parameter registry and its keeper-style builder.
//! * [`parameters`] – The built-in parameter tables, grouped by partition.
//! * [`vocabulary`] – Closed token sets for `TYPE`, `BINCOMP` and `ASSOC`.
//! * [`units`] – Unit parsing and dimensional compatibility.
//! * [`record`] – Catalogue records as received from the fetch/parse layer.
//! * [`condition`] – Condition construction, validation and matching.
//! * [`engine`] – Conjunctive evaluation and the [`engine::Query`] builder.
//! * [`query`] – A pest grammar for condition strings such as `F0 > 100 && type(HE)`.
//! * [`settings`] – Layered settings (defaults, file, environment).
//!
//! ## Quick Start
//! ```
//! use psrquery::{Record, Registry, parse_query};
//! let registry = Registry::global();
//! let query = parse_query(registry, "F0 >= 100 Hz && type(RADIO)").unwrap();
//! let records = vec![
//!     Record::new().with_value("F0", 173.7).with_value("TYPE", "RADIO"),
//!     Record::new().with_value("F0", 1.4).with_value("TYPE", "RADIO"),
//!     Record::new().with_value("F0", 300.0),
//! ];
//! let selected: Vec<&Record> = query.select(&records).collect();
//! assert_eq!(selected, vec![&records[0]]);
//! ```
//!
//! Conditions can also be built without the grammar:
//! ```
//! use psrquery::{ConditionKind, Interval, Query, Quantity, Registry};
//! let query = Query::new(Registry::global())
//!     .and("DIST", ConditionKind::Range, Interval::at_most(Quantity::with_unit(2.0, "kpc")))?
//!     .and("BINCOMP", ConditionKind::OneOf, vec!["He", "CO"])?;
//! assert_eq!(query.to_string(), "DIST in (-inf, 2] && BINCOMP in (He, CO)");
//! # Ok::<(), psrquery::QueryError>(())
//! ```

pub mod condition;
pub mod engine;
pub mod error;
pub mod parameters;
pub mod query;
pub mod record;
pub mod registry;
pub mod settings;
pub mod units;
pub mod vocabulary;

pub use condition::{Condition, ConditionKind, Interval, Literal, Operand, Quantity, make_condition};
pub use engine::{Columns, Query, Selection, evaluate, present_parameters, satisfies};
pub use error::{QueryError, Result};
pub use query::{QueryParser, parse_query};
pub use record::{Record, Slot, Value};
pub use registry::{Nature, ParameterSpec, Partition, Registry, RegistryBuilder};
pub use settings::Settings;
pub use vocabulary::{Association, BinaryCompanion, PulsarType, Vocabulary};
