//! Physical units for numeric parameters.
//!
//! A unit string is read as a product of factors separated by whitespace or
//! `*`. A `/` turns the factor that follows it into a divisor, so
//! `erg s^-1/kpc^2` is `erg s^-1 kpc^-2`. Each factor is either a bare
//! numeric scale (`1e-6`) or an atom with an optional SI prefix and an
//! optional integer exponent (`cm^-3`, `kpc^2`, `mas`).
//!
//! Units reduce to a scale relative to SI and a vector of base dimensions
//! (length, time, mass, angle, current). Two units are compatible when their
//! dimension vectors are identical; converting between them multiplies by
//! the ratio of their scales.

use std::f64::consts::PI;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{QueryError, Result};

const BASE_NAMES: [&str; 5] = ["m", "s", "kg", "rad", "A"];

const L: [i8; 5] = [1, 0, 0, 0, 0];
const T: [i8; 5] = [0, 1, 0, 0, 0];
const M: [i8; 5] = [0, 0, 1, 0, 0];
const ANGLE: [i8; 5] = [0, 0, 0, 1, 0];
const CURRENT: [i8; 5] = [0, 0, 0, 0, 1];
const FREQUENCY: [i8; 5] = [0, -1, 0, 0, 0];
const ENERGY: [i8; 5] = [2, -2, 1, 0, 0];
const FLUX_DENSITY: [i8; 5] = [0, -2, 1, 0, 0];
const MAGNETIC_FIELD: [i8; 5] = [0, -2, 1, 0, -1];

const DAY: f64 = 86_400.0;
const JULIAN_YEAR: f64 = 365.25 * DAY;

// (symbol, SI scale, dimensions, accepts an SI prefix)
const ATOMS: &[(&str, f64, [i8; 5], bool)] = &[
    ("m", 1.0, L, true),
    ("s", 1.0, T, true),
    ("g", 1e-3, M, true),
    ("rad", 1.0, ANGLE, true),
    ("deg", PI / 180.0, ANGLE, false),
    ("arcmin", PI / 10_800.0, ANGLE, false),
    ("arcsec", PI / 648_000.0, ANGLE, false),
    ("mas", PI / 648_000_000.0, ANGLE, false),
    ("Hz", 1.0, FREQUENCY, true),
    ("Jy", 1e-26, FLUX_DENSITY, true),
    ("erg", 1e-7, ENERGY, false),
    ("J", 1.0, ENERGY, true),
    ("G", 1e-4, MAGNETIC_FIELD, false),
    ("T", 1.0, MAGNETIC_FIELD, true),
    ("A", 1.0, CURRENT, true),
    ("pc", 3.085_677_581_491_367_3e16, L, true),
    ("au", 1.495_978_707e11, L, false),
    ("yr", JULIAN_YEAR, T, true),
    ("d", DAY, T, false),
    ("h", 3_600.0, T, false),
    ("min", 60.0, T, false),
    ("M_sun", 1.988_409_870_698_051e30, M, false),
];

const PREFIXES: &[(&str, f64)] = &[
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
];

lazy_static! {
    static ref FACTOR: Regex = Regex::new(r"^(?P<atom>[A-Za-zµ_]+)(?:\^(?P<exp>[+-]?\d+))?$").unwrap();
    static ref SCALE: Regex = Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    scale: f64,
    dims: [i8; 5],
}

impl Unit {
    pub const DIMENSIONLESS: Unit = Unit { scale: 1.0, dims: [0; 5] };

    pub fn parse(text: &str) -> Result<Unit> {
        let invalid = |reason: &str| QueryError::InvalidUnit {
            unit: text.to_string(),
            reason: reason.to_string(),
        };
        let spaced = text.replace('/', " / ").replace('*', " ");
        let mut unit = Unit::DIMENSIONLESS;
        let mut divide_next = false;
        let mut factors = 0;
        for token in spaced.split_whitespace() {
            if token == "/" {
                if divide_next {
                    return Err(invalid("repeated '/'"));
                }
                divide_next = true;
                continue;
            }
            let factor = Self::factor(token).ok_or_else(|| invalid(&format!("unrecognised factor {token:?}")))?;
            let factor = if divide_next { factor.checked_powi(-1) } else { Some(factor) };
            unit = factor
                .and_then(|f| unit.checked_mul(f))
                .ok_or_else(|| invalid(&format!("factor {token:?} is out of range")))?;
            divide_next = false;
            factors += 1;
        }
        if divide_next {
            return Err(invalid("dangling '/'"));
        }
        if factors == 0 {
            return Err(invalid("empty unit"));
        }
        Ok(unit)
    }

    /// The unit a parameter is declared in; parameters without one are dimensionless.
    pub fn of(declared: Option<&str>) -> Result<Unit> {
        declared.map_or(Ok(Unit::DIMENSIONLESS), Unit::parse)
    }

    fn factor(token: &str) -> Option<Unit> {
        if SCALE.is_match(token) {
            let scale = token.parse::<f64>().ok()?;
            return Unit::checked(scale, [0; 5]);
        }
        let captures = FACTOR.captures(token)?;
        let exponent = match captures.name("exp") {
            Some(e) => e.as_str().parse::<i32>().ok()?,
            None => 1,
        };
        Self::atom(captures.name("atom")?.as_str())?.checked_powi(exponent)
    }

    fn atom(symbol: &str) -> Option<Unit> {
        if let Some(&(_, scale, dims, _)) = ATOMS.iter().find(|a| a.0 == symbol) {
            return Some(Unit { scale, dims });
        }
        PREFIXES.iter().find_map(|&(prefix, multiplier)| {
            let rest = symbol.strip_prefix(prefix)?;
            ATOMS
                .iter()
                .find(|a| a.0 == rest && a.3)
                .map(|&(_, scale, dims, _)| Unit { scale: scale * multiplier, dims })
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
    pub fn is_dimensionless(&self) -> bool {
        self.dims == [0; 5]
    }
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dims == other.dims
    }
    /// Multiplier taking a value in `self` to a value in `target`.
    pub fn factor_to(&self, target: &Unit) -> Option<f64> {
        self.is_compatible(target)
            .then(|| self.scale / target.scale)
            .filter(|f| f.is_finite() && *f != 0.0)
    }
    /// `self` raised to `exponent`, or `None` when a dimension exponent
    /// leaves the `i8` range or the scale stops being a finite non-zero number.
    pub fn checked_powi(self, exponent: i32) -> Option<Unit> {
        let mut dims = self.dims;
        for d in dims.iter_mut() {
            *d = i8::try_from(i32::from(*d).checked_mul(exponent)?).ok()?;
        }
        Unit::checked(self.scale.powi(exponent), dims)
    }
    /// The product of two units, with the same range checks as [`Unit::checked_powi`].
    pub fn checked_mul(self, other: Unit) -> Option<Unit> {
        let mut dims = self.dims;
        for (d, o) in dims.iter_mut().zip(other.dims) {
            *d = d.checked_add(o)?;
        }
        Unit::checked(self.scale * other.scale, dims)
    }
    fn checked(scale: f64, dims: [i8; 5]) -> Option<Unit> {
        (scale.is_finite() && scale != 0.0).then_some(Unit { scale, dims })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.scale)?;
        for (name, d) in BASE_NAMES.iter().zip(self.dims) {
            match d {
                0 => (),
                1 => write!(f, " {name}")?,
                _ => write!(f, " {name}^{d}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }

    #[test]
    fn prefixed_lengths_convert() {
        let kpc = Unit::parse("kpc").unwrap();
        let pc = Unit::parse("pc").unwrap();
        assert!(close(kpc.factor_to(&pc).unwrap(), 1e3));
        assert!(close(Unit::parse("MHz").unwrap().factor_to(&Unit::parse("Hz").unwrap()).unwrap(), 1e6));
    }

    #[test]
    fn division_applies_to_next_factor() {
        let a = Unit::parse("erg s^-1/kpc^2").unwrap();
        let b = Unit::parse("erg s^-1 kpc^-2").unwrap();
        assert!(a.is_compatible(&b));
        assert!(close(a.factor_to(&b).unwrap(), 1.0));
        let pm = Unit::parse("mas/yr").unwrap();
        assert_eq!(pm.dims, [0, -1, 0, 1, 0]);
    }

    #[test]
    fn atoms_win_over_prefixes() {
        // "mas" is milliarcsecond and "min" is minute, not milli-anything
        assert!(Unit::parse("mas").unwrap().is_compatible(&Unit::parse("deg").unwrap()));
        assert!(close(Unit::parse("min").unwrap().scale(), 60.0));
        assert!(close(Unit::parse("ms").unwrap().scale(), 1e-3));
    }

    #[test]
    fn frequency_and_inverse_time_agree() {
        let hz = Unit::parse("Hz").unwrap();
        let per_s = Unit::parse("s^-1").unwrap();
        assert!(close(hz.factor_to(&per_s).unwrap(), 1.0));
        assert!(hz.factor_to(&Unit::parse("s").unwrap()).is_none());
    }

    #[test]
    fn bare_scale_is_dimensionless() {
        let u = Unit::parse("1e-6").unwrap();
        assert!(u.is_dimensionless());
        assert!(close(u.scale(), 1e-6));
        assert_eq!(Unit::of(None).unwrap(), Unit::DIMENSIONLESS);
    }

    #[test]
    fn every_atom_and_prefixed_atom_parses() {
        for &(symbol, scale, dims, prefixable) in ATOMS {
            let unit = Unit::parse(symbol).unwrap();
            assert_eq!(unit.dims, dims);
            assert!(close(unit.scale(), scale), "{symbol}");
            if !prefixable {
                continue;
            }
            for &(prefix, multiplier) in PREFIXES {
                let prefixed = format!("{prefix}{symbol}");
                if ATOMS.iter().any(|a| a.0 == prefixed) {
                    continue;
                }
                let unit = Unit::parse(&prefixed).unwrap();
                assert_eq!(unit.dims, dims);
                assert!(close(unit.scale(), scale * multiplier), "{prefixed}");
            }
        }
    }

    #[test]
    fn exponent_overflow_is_rejected() {
        // 2 * 127 does not fit a dimension exponent
        assert!(matches!(Unit::parse("m^127 m"), Err(QueryError::InvalidUnit { .. })));
        assert!(Unit::parse("m^256").is_err());
        assert!(Unit::parse("m^-128").is_ok());
        assert!(Unit::parse("1/m^-128").is_err());
        assert!(Unit::parse("m^-2147483648").is_err());
        assert!(Unit::parse("s^99999999999").is_err());
    }

    #[test]
    fn non_finite_scales_are_rejected() {
        assert!(Unit::parse("pc^20/pc^20").is_err());
        assert!(Unit::parse("1e400").is_err());
        assert!(Unit::parse("0 m").is_err());
        let tiny = Unit::parse("1e-300 m").unwrap();
        let huge = Unit::parse("1e300 m").unwrap();
        assert!(huge.factor_to(&tiny).is_none());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(Unit::parse("furlong"), Err(QueryError::InvalidUnit { .. })));
        assert!(Unit::parse("").is_err());
        assert!(Unit::parse("km/").is_err());
        assert!(Unit::parse("km//s").is_err());
    }
}
