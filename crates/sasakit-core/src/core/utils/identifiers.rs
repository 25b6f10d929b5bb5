use phf::{Set, phf_set};

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    // Protein main chain
    "N", "CA", "C", "O", "OXT",
    // Nucleic acid backbone
    "P", "OP1", "OP2", "OP3", "O1P", "O2P", "O3P",
    "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "O2'", "C1'",
};

/// Returns `true` if the atom belongs to the main chain of a protein or nucleic acid.
///
/// Names are compared after trimming the PDB column padding, so `" CA "` and `"CA"`
/// are equivalent. The comparison is case-sensitive.
pub fn is_backbone_atom(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(atom_name.trim())
}

/// Returns `true` if the atom is a hydrogen or deuterium.
///
/// The element symbol is authoritative when present. Otherwise the atom name is
/// inspected after skipping leading digits, following the PDB convention for names
/// such as `1HB` or `HD21`.
pub fn is_hydrogen(atom_name: &str, element: Option<&str>) -> bool {
    if let Some(symbol) = element.map(str::trim).filter(|s| !s.is_empty()) {
        return symbol.eq_ignore_ascii_case("H") || symbol.eq_ignore_ascii_case("D");
    }
    let first_letter = atom_name
        .trim()
        .chars()
        .find(|c| !c.is_ascii_digit())
        .map(|c| c.to_ascii_uppercase());
    matches!(first_letter, Some('H') | Some('D'))
}

/// Derives an element symbol from an atom name when the element column is missing.
///
/// Leading digits are skipped and the first letter is taken as the symbol. Two-letter
/// elements cannot be told apart from names like `CA` this way, so the result is a
/// best effort used only for radius guessing and `symbol` selections.
pub fn element_from_atom_name(atom_name: &str) -> Option<String> {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}
