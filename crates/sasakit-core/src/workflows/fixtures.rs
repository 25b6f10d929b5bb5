use crate::core::classifier::registry::ClassifierRegistry;
use crate::core::models::builder::LoadOptions;
use crate::core::models::structure::{AtomSpec, Structure};

/// A three-residue fragment with realistic backbone geometry.
pub(crate) fn tripeptide() -> Structure {
    let mut s = Structure::with_classifier(
        ClassifierRegistry::get("protor").unwrap(),
        LoadOptions::default(),
    );
    let atoms: [(&str, &str, i32, [f64; 3]); 17] = [
        ("N", "ALA", 1, [0.000, 0.000, 0.000]),
        ("CA", "ALA", 1, [1.458, 0.000, 0.000]),
        ("C", "ALA", 1, [2.009, 1.420, 0.000]),
        ("O", "ALA", 1, [1.251, 2.390, 0.000]),
        ("CB", "ALA", 1, [1.988, -0.773, -1.199]),
        ("N", "GLY", 2, [3.332, 1.536, 0.000]),
        ("CA", "GLY", 2, [3.970, 2.845, 0.000]),
        ("C", "GLY", 2, [5.486, 2.700, 0.000]),
        ("O", "GLY", 2, [6.009, 1.586, 0.000]),
        ("N", "SER", 3, [6.191, 3.825, 0.000]),
        ("CA", "SER", 3, [7.644, 3.816, 0.000]),
        ("C", "SER", 3, [8.163, 5.248, 0.000]),
        ("O", "SER", 3, [7.374, 6.193, 0.000]),
        ("CB", "SER", 3, [8.175, 3.044, -1.199]),
        ("OG", "SER", 3, [9.591, 3.018, -1.183]),
        ("OXT", "SER", 3, [9.395, 5.402, 0.000]),
        ("C1", "UNK", 4, [12.0, 6.0, 0.0]),
    ];
    for (name, res, num, pos) in atoms {
        s.add_atom(AtomSpec::new(name, res, num.into(), 'A', pos)).unwrap();
    }
    s
}

