use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

// parameter names are short ASCII mnemonics, so a fast non-DoS-resistant hash is fine
use seahash::SeaHasher;

use lazy_static::lazy_static;
use serde::Serialize;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::parameters::{self, Row};
use crate::record::Record;
use crate::units::Unit;
use crate::vocabulary::Vocabulary;

pub type NameHasher = BuildHasherDefault<SeaHasher>;

lazy_static! {
    static ref ATNF: Registry =
        Registry::atnf().expect("the built-in ATNF parameter table is inconsistent");
}

// ------------- Partition -------------
/// Documentation grouping of parameters. Has no effect on lookup or evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Partition {
    General,
    Timing,
    Binary,
    Derived,
}
impl Partition {
    pub const ALL: [Partition; 4] = [
        Partition::General,
        Partition::Timing,
        Partition::Binary,
        Partition::Derived,
    ];
    fn rows(&self) -> &'static [Row] {
        match self {
            Partition::General => parameters::GENERAL,
            Partition::Timing => parameters::TIMING,
            Partition::Binary => parameters::BINARY,
            Partition::Derived => parameters::DERIVED,
        }
    }
}
impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Partition::General => "general",
            Partition::Timing => "timing",
            Partition::Binary => "binary",
            Partition::Derived => "derived",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Nature {
    Numeric,
    Categorical,
}

// ------------- ParameterSpec -------------
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: &'static str,
    partition: Partition,
    has_reference: bool,
    has_error: bool,
    unit: Option<&'static str>,
    dimension: Unit,
    nature: Nature,
    vocabulary: Option<Vocabulary>,
}

impl ParameterSpec {
    /// A numeric parameter; its unit must parse.
    pub fn numeric(
        name: &'static str,
        partition: Partition,
        has_reference: bool,
        has_error: bool,
        unit: Option<&'static str>,
    ) -> Result<Self> {
        Ok(Self {
            name,
            partition,
            has_reference,
            has_error,
            unit,
            dimension: Unit::of(unit)?,
            nature: Nature::Numeric,
            vocabulary: None,
        })
    }
    pub fn categorical(
        name: &'static str,
        partition: Partition,
        has_reference: bool,
        has_error: bool,
        vocabulary: Option<Vocabulary>,
    ) -> Self {
        Self {
            name,
            partition,
            has_reference,
            has_error,
            unit: None,
            dimension: Unit::DIMENSIONLESS,
            nature: Nature::Categorical,
            vocabulary,
        }
    }
    // It's intentional to only expose the fields through getters, since this
    // keeps a spec immutable once it has been kept by a registry.
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn partition(&self) -> Partition {
        self.partition
    }
    pub fn has_reference(&self) -> bool {
        self.has_reference
    }
    pub fn has_error(&self) -> bool {
        self.has_error
    }
    pub fn unit(&self) -> Option<&'static str> {
        self.unit
    }
    /// The parsed form of [`ParameterSpec::unit`].
    pub fn dimension(&self) -> Unit {
        self.dimension
    }
    pub fn nature(&self) -> Nature {
        self.nature
    }
    pub fn is_categorical(&self) -> bool {
        self.nature == Nature::Categorical
    }
    pub fn vocabulary(&self) -> Option<Vocabulary> {
        self.vocabulary
    }
}
impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(unit) = self.unit {
            write!(f, " [{unit}]")?;
        }
        if let Some(vocabulary) = self.vocabulary {
            write!(f, " <{vocabulary}>")?;
        }
        write!(
            f,
            " (error: {}, reference: {})",
            if self.has_error { "yes" } else { "no" },
            if self.has_reference { "yes" } else { "no" }
        )
    }
}

// ------------- Registry -------------
#[derive(Debug)]
pub struct RegistryBuilder {
    version: String,
    kept: HashMap<&'static str, usize, NameHasher>,
    specs: Vec<ParameterSpec>,
}
impl RegistryBuilder {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            kept: HashMap::default(),
            specs: Vec::new(),
        }
    }
    /// Keeps a spec, failing if its name was kept before.
    pub fn keep(&mut self, spec: ParameterSpec) -> Result<()> {
        match self.kept.entry(spec.name()) {
            Entry::Occupied(e) => Err(QueryError::DuplicateParameter(e.key().to_string())),
            Entry::Vacant(e) => {
                e.insert(self.specs.len());
                self.specs.push(spec);
                Ok(())
            }
        }
    }
    /// Keeps every row of a partition table, looking up categorical fields in `categorical`.
    pub fn keep_rows(
        &mut self,
        partition: Partition,
        rows: &[Row],
        categorical: &[(&str, Option<Vocabulary>)],
    ) -> Result<()> {
        for &(name, has_reference, has_error, unit) in rows {
            let spec = match categorical.iter().find(|c| c.0 == name) {
                Some(&(_, vocabulary)) => {
                    ParameterSpec::categorical(name, partition, has_reference, has_error, vocabulary)
                }
                None => ParameterSpec::numeric(name, partition, has_reference, has_error, unit)?,
            };
            self.keep(spec)?;
        }
        Ok(())
    }
    pub fn build(self) -> Registry {
        Registry {
            version: self.version,
            index: self.kept,
            specs: self.specs,
        }
    }
}

/// The closed table of queryable parameters.
///
/// Built once through a [`RegistryBuilder`] and read-only afterwards, so a
/// single instance can be shared by any number of threads.
#[derive(Debug)]
pub struct Registry {
    version: String,
    index: HashMap<&'static str, usize, NameHasher>,
    specs: Vec<ParameterSpec>,
}

impl Registry {
    /// Builds the registry for the ATNF catalogue from the built-in tables.
    pub fn atnf() -> Result<Registry> {
        let mut builder = RegistryBuilder::new(parameters::ATNF_VERSION);
        for partition in Partition::ALL {
            builder.keep_rows(partition, partition.rows(), parameters::CATEGORICAL)?;
        }
        let registry = builder.build();
        debug!(version = %registry.version, parameters = registry.len(), "registry built");
        Ok(registry)
    }
    /// The process-wide ATNF registry, built on first use.
    pub fn global() -> &'static Registry {
        &ATNF
    }

    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn len(&self) -> usize {
        self.specs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
    pub fn lookup(&self, name: &str) -> Result<&ParameterSpec> {
        self.index
            .get(name)
            .map(|&i| &self.specs[i])
            .ok_or_else(|| QueryError::UnknownParameter(name.to_string()))
    }
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
    pub fn supports_error(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.has_error())
    }
    pub fn supports_reference(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.has_reference())
    }
    pub fn unit_of(&self, name: &str) -> Result<Option<&'static str>> {
        Ok(self.lookup(name)?.unit())
    }
    /// Construction order position of a parameter.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
    pub fn specs(&self) -> &[ParameterSpec] {
        &self.specs
    }
    /// Every recognised name, in construction order.
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|s| s.name())
    }
    pub fn names_in(&self, partition: Partition) -> impl Iterator<Item = &'static str> + '_ {
        self.specs
            .iter()
            .filter(move |s| s.partition() == partition)
            .map(|s| s.name())
    }

    pub fn vocabulary(&self, vocabulary: Vocabulary) -> &'static [&'static str] {
        vocabulary.tokens()
    }
    pub fn vocabularies(&self) -> impl Iterator<Item = (Vocabulary, &'static [&'static str])> {
        Vocabulary::ALL.into_iter().map(|v| (v, v.tokens()))
    }
    pub fn is_valid_token(&self, vocabulary: Vocabulary, token: &str) -> bool {
        vocabulary.contains(token)
    }

    /// Fails with the first record key that is not a registered parameter.
    pub fn validate_record(&self, record: &Record) -> Result<()> {
        match record.names().find(|name| !self.contains(name)) {
            Some(unknown) => Err(QueryError::UnknownParameter(unknown.to_string())),
            None => Ok(()),
        }
    }
}
