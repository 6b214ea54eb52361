use serde::{Deserialize, Serialize};

use crate::reference::ReferenceStandard;

/// The six comparison profiles a spectrum can be classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardProfile {
    Am15dAstmE927,
    Am15gAstmE927,
    Am0AstmE927,
    Am15gIecTable1,
    Am15gIecTable2,
    Am15gAstmE927Nir,
}

impl StandardProfile {
    /// The reference spectrum the profile's error metrics compare against.
    pub fn reference(&self) -> ReferenceStandard {
        match self {
            StandardProfile::Am15dAstmE927 => ReferenceStandard::Am15D,
            StandardProfile::Am0AstmE927 => ReferenceStandard::Am0,
            StandardProfile::Am15gAstmE927
            | StandardProfile::Am15gIecTable1
            | StandardProfile::Am15gIecTable2
            | StandardProfile::Am15gAstmE927Nir => ReferenceStandard::Am15G,
        }
    }
}

impl std::fmt::Display for StandardProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StandardProfile::Am15dAstmE927 => "AM1.5D Direct Normal ASTM E927-19",
            StandardProfile::Am15gAstmE927 => "AM1.5G Hemispherical ASTM E927-19",
            StandardProfile::Am0AstmE927 => "AM0 Extra-Terrestrial ASTM E927-19",
            StandardProfile::Am15gIecTable1 => "AM1.5G IEC 60904-9 Ed.3 Table 1",
            StandardProfile::Am15gIecTable2 => "AM1.5G IEC 60904-9 Ed.3 Table 2",
            StandardProfile::Am15gAstmE927Nir => {
                "AM1.5G Hemispherical ASTM E927-19, Limited Range [700 - 1100 nm]"
            }
        };
        write!(f, "{}", name)
    }
}

/// One wavelength interval of a comparison profile and the share of total
/// irradiance the standard expects inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavelengthBin {
    pub lower_nm: u32,
    pub upper_nm: u32,
    pub target_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDefinition {
    pub profile: StandardProfile,
    pub reference: ReferenceStandard,
    pub bins: Vec<WavelengthBin>,
}

impl BandDefinition {
    /// Wavelength coverage the input spectrum must span, from the first
    /// bin's lower bound to the last bin's upper bound.
    pub fn required_range_nm(&self) -> (u32, u32) {
        (
            self.bins.first().map(|b| b.lower_nm).unwrap_or(0),
            self.bins.last().map(|b| b.upper_nm).unwrap_or(0),
        )
    }
}

/// Spectral-match letter grade. Variant order is best to worst so that
/// `Ord::max` picks the worse of two grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchClass {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    U,
}

impl std::fmt::Display for MatchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchClass::APlus => write!(f, "A+"),
            MatchClass::A => write!(f, "A"),
            MatchClass::B => write!(f, "B"),
            MatchClass::C => write!(f, "C"),
            MatchClass::U => write!(f, "U"),
        }
    }
}
