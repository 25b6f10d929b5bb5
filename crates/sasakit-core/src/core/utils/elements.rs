use phf::{Map, phf_map};

// Van der Waals radii in Angstroms (Mantina et al. 2009, Bondi 1964 for transition metals).
static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.10, "D" => 1.10, "HE" => 1.40,
    "LI" => 1.81, "BE" => 1.53, "B" => 1.92, "C" => 1.70, "N" => 1.55, "O" => 1.52,
    "F" => 1.47, "NE" => 1.54,
    "NA" => 2.27, "MG" => 1.73, "AL" => 1.84, "SI" => 2.10, "P" => 1.80, "S" => 1.80,
    "CL" => 1.75, "AR" => 1.88,
    "K" => 2.75, "CA" => 2.31, "NI" => 1.63, "CU" => 1.40, "ZN" => 1.39,
    "GA" => 1.87, "GE" => 2.11, "AS" => 1.85, "SE" => 1.90, "BR" => 1.83, "KR" => 2.02,
    "RB" => 3.03, "SR" => 2.49, "PD" => 1.63, "AG" => 1.72, "CD" => 1.58,
    "IN" => 1.93, "SN" => 2.17, "SB" => 2.06, "TE" => 2.06, "I" => 1.98, "XE" => 2.16,
    "CS" => 3.43, "BA" => 2.68, "PT" => 1.75, "AU" => 1.66, "HG" => 1.55,
    "TL" => 1.96, "PB" => 2.02, "BI" => 2.07, "PO" => 1.97, "AT" => 2.02, "RN" => 2.20,
    "FR" => 3.48, "RA" => 2.83, "U" => 1.86,
};

/// Looks up the van der Waals radius of an element.
///
/// The symbol is matched case-insensitively after trimming. Returns `None` for
/// unrecognized symbols.
pub fn vdw_radius(element: &str) -> Option<f64> {
    let symbol = element.trim().to_ascii_uppercase();
    VDW_RADII.get(symbol.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vdw_radius_returns_known_values() {
        assert_eq!(vdw_radius("C"), Some(1.70));
        assert_eq!(vdw_radius("O"), Some(1.52));
        assert_eq!(vdw_radius("SE"), Some(1.90));
    }

    #[test]
    fn vdw_radius_is_case_insensitive_and_trims() {
        assert_eq!(vdw_radius(" se "), Some(1.90));
        assert_eq!(vdw_radius("Zn"), Some(1.39));
    }

    #[test]
    fn vdw_radius_returns_none_for_unknown_symbol() {
        assert_eq!(vdw_radius("XX"), None);
        assert_eq!(vdw_radius(""), None);
    }
}
