//! The ATNF pulsar catalogue parameter table.
//!
//! Each row is `(name, has_reference, has_error, unit)`. Rows are grouped in
//! the four partitions the catalogue documentation uses; the registry merges
//! them into one namespace in this order.

use crate::vocabulary::Vocabulary;

/// Catalogue version the table describes.
pub const ATNF_VERSION: &str = "1.59";

pub(crate) type Row = (&'static str, bool, bool, Option<&'static str>);

/// Fields whose values are names, codes or sexagesimal strings rather than numbers.
pub(crate) const CATEGORICAL: &[(&str, Option<Vocabulary>)] = &[
    ("NAME", None),
    ("JNAME", None),
    ("BNAME", None),
    ("PSRJ", None),
    ("PSRB", None),
    ("RAJ", None),
    ("DECJ", None),
    ("TYPE", Some(Vocabulary::PulsarType)),
    ("ASSOC", Some(Vocabulary::Association)),
    ("SURVEY", None),
    ("CLK", None),
    ("EPHEM", None),
    ("UNITS", None),
    ("BINARY", None),
    ("BINCOMP", Some(Vocabulary::BinaryCompanion)),
];

// general and astrometric parameters
pub(crate) const GENERAL: &[Row] = &[
    ("NAME", true, false, None),
    ("JNAME", true, false, None),
    ("BNAME", true, false, None),
    ("PSRJ", true, false, None),
    ("PSRB", true, false, None),
    ("RAJ", true, true, None),
    ("DECJ", true, true, None),
    ("PMRA", true, true, Some("mas/yr")),
    ("PMDEC", true, true, Some("mas/yr")),
    ("PX", true, true, Some("mas")),
    ("POSEPOCH", true, false, Some("d")),
    ("ELONG", true, true, Some("deg")),
    ("ELAT", true, true, Some("deg")),
    ("PMELONG", true, true, Some("mas/yr")),
    ("PMELAT", true, true, Some("mas/yr")),
    ("GL", false, false, Some("deg")),
    ("GB", false, false, Some("deg")),
    ("RAJD", false, false, Some("deg")),
    ("DECJD", false, false, Some("deg")),
    ("TYPE", false, false, None),
    ("PML", false, false, Some("mas/yr")),
    ("PMB", false, false, Some("mas/yr")),
    ("DIST", false, false, Some("kpc")),
    ("DIST_DM", true, false, Some("kpc")),
    ("DIST_DM1", true, false, Some("kpc")),
    ("DIST1", false, false, Some("kpc")),
    ("DIST_AMN", true, true, Some("kpc")),
    ("DIST_AMX", true, false, Some("kpc")),
    ("DIST_A", true, true, Some("kpc")),
    ("DMSINB", false, false, Some("cm^-3 pc")),
    ("ZZ", false, false, Some("kpc")),
    ("XX", false, false, Some("kpc")),
    ("YY", false, false, Some("kpc")),
    ("ASSOC", false, false, None),
    ("SURVEY", false, false, None),
    ("OSURVEY", false, false, None),
    ("DATE", false, false, Some("yr")),
    ("NGLT", false, false, None),
    ("GLEP", false, false, Some("d")),
    ("GLPH", false, false, None),
    ("GLF0", false, false, Some("Hz")),
    ("GLF1", false, false, Some("Hz/s")),
    ("GLF0D", false, false, Some("Hz")),
    ("GLTD", false, false, Some("d")),
    ("CLK", true, false, None),
    ("EPHEM", true, false, None),
];

// timing solution and profile parameters
pub(crate) const TIMING: &[Row] = &[
    ("P0", true, true, Some("s")),
    ("P1", true, true, None),
    ("F0", true, true, Some("Hz")),
    ("F1", true, true, Some("s^-2")),
    ("F2", true, true, Some("s^-3")),
    ("F3", true, true, Some("s^-4")),
    ("F4", true, true, Some("s^-5")),
    ("F5", true, true, Some("s^-6")),
    ("F6", false, false, Some("s^-7")),
    ("F7", false, false, Some("s^-8")),
    ("F8", false, false, Some("s^-9")),
    ("F9", false, false, Some("s^-10")),
    ("PEPOCH", true, false, Some("d")),
    ("DM", true, true, Some("cm^-3 pc")),
    ("DM1", true, true, Some("cm^-3 pc/yr")),
    ("DMEPOCH", true, false, Some("d")),
    ("DM2", true, true, Some("cm^-3 pc yr^-2")),
    ("DM3", true, true, Some("cm^-3 pc yr^-3")),
    ("DM4", false, false, Some("cm^-3 pc yr^-4")),
    ("DM5", false, false, Some("cm^-3 pc yr^-5")),
    ("DM6", false, false, Some("cm^-3 pc yr^-6")),
    ("DM7", false, false, Some("cm^-3 pc yr^-7")),
    ("DM8", false, false, Some("cm^-3 pc yr^-8")),
    ("DM9", false, false, Some("cm^-3 pc yr^-9")),
    ("RM", true, true, Some("rad m^-2")),
    ("W50", true, true, Some("ms")),
    ("W10", true, true, Some("ms")),
    ("UNITS", true, false, None),
    ("TAU_SC", true, true, Some("s")),
    ("SI414", false, false, None),
    ("S400", true, true, Some("mJy")),
    ("S1400", true, true, Some("mJy")),
    ("S2000", true, true, Some("mJy")),
    ("S30", false, false, Some("mJy")),
    ("S40", true, true, Some("mJy")),
    ("S50", true, true, Some("mJy")),
    ("S60", true, true, Some("mJy")),
    ("S80", true, true, Some("mJy")),
    ("S100", true, true, Some("mJy")),
    ("S150", true, true, Some("mJy")),
    ("S200", true, true, Some("mJy")),
    ("S300", true, true, Some("mJy")),
    ("S600", true, true, Some("mJy")),
    ("S700", true, true, Some("mJy")),
    ("S800", true, true, Some("mJy")),
    ("S900", true, true, Some("mJy")),
    ("S1600", true, true, Some("mJy")),
    ("S3000", true, true, Some("mJy")),
    ("S4000", true, false, Some("mJy")),
    ("S5000", true, true, Some("mJy")),
    ("S6000", true, true, Some("mJy")),
    ("S8000", true, true, Some("mJy")),
    ("S10G", false, false, Some("mJy")),
    ("S20G", false, false, Some("mJy")),
    ("S50G", false, false, Some("mJy")),
    ("S100G", true, true, Some("mJy")),
    ("S150G", true, true, Some("mJy")),
    ("SPINDX", true, true, None),
];

// binary system parameters
pub(crate) const BINARY: &[Row] = &[
    ("BINARY", true, false, None),
    ("T0", true, true, Some("d")),
    ("PB", true, true, Some("d")),
    ("A1", true, true, Some("s")),
    ("OM", true, true, Some("deg")),
    ("ECC", true, true, None),
    ("TASC", true, true, Some("d")),
    ("EPS1", true, true, None),
    ("EPS2", true, true, None),
    ("MINMASS", false, false, Some("M_sun")),
    ("MEDMASS", false, false, Some("M_sun")),
    ("BINCOMP", true, false, None),
    ("FB0", true, true, Some("Hz")),
    ("FB1", true, true, Some("Hz s^-1")),
    ("FB2", true, true, Some("Hz s^-2")),
    ("OMDOT", true, true, Some("deg/yr")),
    ("OM2DOT", true, true, Some("deg/yr^2")),
    ("A1DOT", true, true, Some("s s^-1")),
    ("A12DOT", true, true, Some("s s^-2")),
    ("ECCDOT", true, true, Some("s^-1")),
    ("ECC2DOT", false, false, Some("s^-2")),
    ("PBDOT", true, true, None),
    ("GAMMA", true, true, Some("s")),
    ("T0_2", true, true, Some("d")),
    ("PB_2", true, true, Some("d")),
    ("A1_2", true, true, Some("s")),
    ("OM_2", true, true, Some("deg")),
    ("ECC_2", true, true, None),
    ("OMDOT_2", false, false, Some("deg/yr")),
    ("PBDOT_2", false, false, None),
    ("EPS1_2", true, true, None),
    ("EPS2_2", true, true, None),
    ("TASC_2", true, true, Some("d")),
    ("T0_3", true, true, Some("d")),
    ("PB_3", true, true, Some("d")),
    ("A1_3", true, true, Some("s")),
    ("OM_3", true, true, Some("deg")),
    ("ECC_3", true, true, None),
    ("OMDOT_3", false, false, Some("deg/yr")),
    ("PBDOT_3", false, false, None),
    ("PPNGAMMA", false, false, Some("s")),
    ("SINI", true, true, None),
    ("SINI_2", true, true, None),
    ("SINI_3", true, true, None),
    ("XPBDOT", false, false, None),
    ("KOM", true, true, Some("deg")),
    ("KIN", true, true, Some("deg")),
    ("M2", true, true, Some("M_sun")),
    ("M2_2", true, true, Some("M_sun")),
    ("M2_3", true, true, Some("M_sun")),
    ("MASS_Q", true, true, None),
    ("MASS_Q_2", false, false, None),
    ("OM_ASC", true, true, Some("deg")),
    ("OM_ASC_2", false, false, Some("deg")),
    ("DTHETA", true, true, Some("1e-6")),
    ("XOMDOT", false, false, Some("deg/yr")),
    ("H3", true, true, Some("s")),
    ("H4", true, true, Some("s")),
    ("STIG", true, true, None),
    ("MASSFN", false, false, Some("M_sun")),
    ("UPRMASS", false, false, Some("M_sun")),
    ("MINOMDOT", false, false, Some("deg/yr")),
];

// derived parameters
pub(crate) const DERIVED: &[Row] = &[
    ("R_LUM", false, false, Some("mJy kpc^2")),
    ("R_LUM14", false, false, Some("mJy kpc^2")),
    ("AGE", false, false, Some("yr")),
    ("BSURF", false, false, Some("G")),
    ("EDOT", false, false, Some("erg/s")),
    ("EDOTD2", false, false, Some("erg s^-1/kpc^2")),
    ("PMTOT", false, false, Some("mas/yr")),
    ("VTRANS", false, false, Some("km/s")),
    ("P1_I", false, false, None),
    ("AGE_I", false, false, Some("yr")),
    ("BSURF_I", false, false, Some("G")),
    ("B_LC", false, false, Some("G")),
];
