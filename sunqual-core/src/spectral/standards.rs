//! Comparison-profile catalog: the wavelength bins and target irradiance
//! shares of ASTM E927-19 and IEC 60904-9 Ed.3, one table per profile.

use sunqual_schemas::standard::{BandDefinition, StandardProfile, WavelengthBin};

// (lower nm, upper nm, target share of total irradiance in percent)

const AM15D_ASTM_E927: &[(u32, u32, f64)] = &[
    (400, 500, 16.75),
    (500, 600, 19.49),
    (600, 700, 18.36),
    (700, 800, 15.08),
    (800, 900, 12.82),
    (900, 1100, 16.69),
];

const AM15G_ASTM_E927: &[(u32, u32, f64)] = &[
    (400, 500, 18.21),
    (500, 600, 19.73),
    (600, 700, 18.20),
    (700, 800, 14.79),
    (800, 900, 12.39),
    (900, 1100, 15.89),
];

const AM0_ASTM_E927: &[(u32, u32, f64)] = &[
    (350, 400, 4.67),
    (400, 500, 16.80),
    (500, 600, 16.68),
    (600, 700, 14.28),
    (700, 800, 11.31),
    (800, 900, 8.98),
    (900, 1100, 13.50),
    (1100, 1400, 12.56),
];

const AM15G_IEC_TABLE1: &[(u32, u32, f64)] = &[
    (400, 500, 18.4),
    (500, 600, 19.9),
    (600, 700, 18.4),
    (700, 800, 14.9),
    (800, 900, 12.5),
    (900, 1100, 15.9),
];

const AM15G_IEC_TABLE2: &[(u32, u32, f64)] = &[
    (300, 470, 16.61),
    (470, 561, 16.74),
    (561, 657, 16.67),
    (657, 772, 16.63),
    (772, 919, 16.66),
    (919, 1200, 16.69),
];

const AM15G_ASTM_E927_NIR: &[(u32, u32, f64)] = &[
    (700, 800, 34.4),
    (800, 900, 28.7),
    (900, 1100, 36.9),
];

/// Bin table and reference standard for a comparison profile.
pub fn band_definition(profile: StandardProfile) -> BandDefinition {
    let table = match profile {
        StandardProfile::Am15dAstmE927 => AM15D_ASTM_E927,
        StandardProfile::Am15gAstmE927 => AM15G_ASTM_E927,
        StandardProfile::Am0AstmE927 => AM0_ASTM_E927,
        StandardProfile::Am15gIecTable1 => AM15G_IEC_TABLE1,
        StandardProfile::Am15gIecTable2 => AM15G_IEC_TABLE2,
        StandardProfile::Am15gAstmE927Nir => AM15G_ASTM_E927_NIR,
    };
    BandDefinition {
        profile,
        reference: profile.reference(),
        bins: table
            .iter()
            .map(|&(lower_nm, upper_nm, target_pct)| WavelengthBin {
                lower_nm,
                upper_nm,
                target_pct,
            })
            .collect(),
    }
}

pub const ALL_PROFILES: [StandardProfile; 6] = [
    StandardProfile::Am15dAstmE927,
    StandardProfile::Am15gAstmE927,
    StandardProfile::Am0AstmE927,
    StandardProfile::Am15gIecTable1,
    StandardProfile::Am15gIecTable2,
    StandardProfile::Am15gAstmE927Nir,
];

#[cfg(test)]
mod tests {
    use super::*;
    use sunqual_schemas::reference::ReferenceStandard;

    #[test]
    fn required_ranges_match_the_standards() {
        let expect = [
            (StandardProfile::Am15dAstmE927, (400, 1100)),
            (StandardProfile::Am15gAstmE927, (400, 1100)),
            (StandardProfile::Am0AstmE927, (350, 1400)),
            (StandardProfile::Am15gIecTable1, (400, 1100)),
            (StandardProfile::Am15gIecTable2, (300, 1200)),
            (StandardProfile::Am15gAstmE927Nir, (700, 1100)),
        ];
        for (profile, range) in expect {
            assert_eq!(band_definition(profile).required_range_nm(), range);
        }
    }

    #[test]
    fn bins_are_contiguous_and_increasing() {
        for profile in ALL_PROFILES {
            let band = band_definition(profile);
            assert!(!band.bins.is_empty());
            for pair in band.bins.windows(2) {
                assert_eq!(pair[0].upper_nm, pair[1].lower_nm, "{}", profile);
            }
            for bin in &band.bins {
                assert!(bin.lower_nm < bin.upper_nm);
                assert!(bin.target_pct > 0.0);
            }
        }
    }

    #[test]
    fn profiles_compare_against_their_reference() {
        assert_eq!(
            band_definition(StandardProfile::Am15dAstmE927).reference,
            ReferenceStandard::Am15D
        );
        assert_eq!(
            band_definition(StandardProfile::Am0AstmE927).reference,
            ReferenceStandard::Am0
        );
        assert_eq!(
            band_definition(StandardProfile::Am15gIecTable2).reference,
            ReferenceStandard::Am15G
        );
    }

    #[test]
    fn am0_carries_eight_bins() {
        assert_eq!(band_definition(StandardProfile::Am0AstmE927).bins.len(), 8);
        assert_eq!(
            band_definition(StandardProfile::Am15gAstmE927Nir).bins.len(),
            3
        );
    }
}
