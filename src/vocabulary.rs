//! Closed vocabularies used by categorical conditions.
//!
//! Each vocabulary is a tagged enumeration whose variants carry the exact
//! catalogue token. Tokens are case-sensitive (`He` is a helium white dwarf,
//! `HE` a high-energy pulsar).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

macro_rules! closed_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident = $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant ),+
        }
        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];
            pub const TOKENS: &'static [&'static str] = &[ $( $token ),+ ];
            pub const LABEL: &'static str = $label;
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }
        }
        impl FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $token => Ok($name::$variant), )+
                    _ => Err(format!("{s:?} is not a {} token", $label)),
                }
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

closed_vocabulary! {
    /// Emission class codes carried by the `TYPE` field.
    PulsarType = "pulsar type" {
        /// Anomalous X-ray pulsar or soft gamma-ray repeater with detected pulsations.
        Axp => "AXP",
        /// One or more stellar companions.
        Binary => "BINARY",
        /// Spin-powered, pulsed from radio to infrared or higher.
        HighEnergy => "HE",
        /// Spin-powered, pulsed only at infrared or higher.
        NonRadio => "NRAD",
        Radio => "RADIO",
        /// Intermittently pulsed radio emission.
        Rrat => "RRAT",
        /// Isolated neutron star with pulsed thermal X-rays and no radio emission.
        Xins => "XINS",
    }
}

closed_vocabulary! {
    /// Companion classes carried by the `BINCOMP` field.
    BinaryCompanion = "binary companion" {
        MainSequence => "MS",
        NeutronStar => "NS",
        /// CO or ONeMg white dwarf.
        CarbonOxygenWhiteDwarf => "CO",
        HeliumWhiteDwarf => "He",
        /// Ultra-light companion or planet, below 0.08 solar masses.
        UltraLight => "UL",
    }
}

closed_vocabulary! {
    /// Associated object classes carried by the `ASSOC` field. The catalogue
    /// list is not exhaustive; these are the classes conditions may name.
    Association = "association" {
        GlobularCluster => "GC",
        SupernovaRemnant => "SNR",
    }
}

/// Names one of the closed vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Vocabulary {
    PulsarType,
    BinaryCompanion,
    Association,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 3] = [
        Vocabulary::PulsarType,
        Vocabulary::BinaryCompanion,
        Vocabulary::Association,
    ];

    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            Vocabulary::PulsarType => PulsarType::TOKENS,
            Vocabulary::BinaryCompanion => BinaryCompanion::TOKENS,
            Vocabulary::Association => Association::TOKENS,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Vocabulary::PulsarType => PulsarType::LABEL,
            Vocabulary::BinaryCompanion => BinaryCompanion::LABEL,
            Vocabulary::Association => Association::LABEL,
        }
    }
    pub fn contains(&self, token: &str) -> bool {
        self.tokens().contains(&token)
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Splits a catalogue value of a vocabulary field into bare tokens.
///
/// Values hold comma separated entries that may carry a `:qualifier`
/// (`GC:47Tuc`) or a `[reference]` suffix (`HE[ktk+03]`); only the leading
/// class token of each entry is kept.
pub fn tokens_of(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|entry| {
            let end = entry.find(|c: char| c == ':' || c == '[').unwrap_or(entry.len());
            &entry[..end]
        })
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_case_sensitive() {
        assert_eq!("He".parse::<BinaryCompanion>(), Ok(BinaryCompanion::HeliumWhiteDwarf));
        assert!("HE".parse::<BinaryCompanion>().is_err());
        assert_eq!("HE".parse::<PulsarType>(), Ok(PulsarType::HighEnergy));
        assert!(Vocabulary::BinaryCompanion.contains("He"));
        assert!(!Vocabulary::BinaryCompanion.contains("he"));
    }

    #[test]
    fn every_variant_round_trips_through_its_token() {
        for t in PulsarType::ALL {
            assert_eq!(t.as_str().parse::<PulsarType>().unwrap(), *t);
        }
        assert_eq!(Vocabulary::Association.tokens(), &["GC", "SNR"]);
    }

    #[test]
    fn catalogue_values_split_into_class_tokens() {
        let tokens: Vec<&str> = tokens_of("GC:47Tuc,SNR:W44").collect();
        assert_eq!(tokens, vec!["GC", "SNR"]);
        let tokens: Vec<&str> = tokens_of("HE[ktk+03] RADIO").collect();
        assert_eq!(tokens, vec!["HE", "RADIO"]);
        assert_eq!(tokens_of("").count(), 0);
    }
}
