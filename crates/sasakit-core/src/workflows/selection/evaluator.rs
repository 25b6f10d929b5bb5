use super::parser::{self, Expr};
use super::{SelectionError, lexer};
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::engine::result::SasaResult;
use itertools::Itertools;
use tracing::{debug, instrument};

impl Expr {
    pub fn matches(&self, atom: &Atom) -> bool {
        match self {
            Expr::ResidueName(names) => names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(&atom.residue_name)),
            Expr::ResidueNumber(ranges) => ranges.iter().any(|r| r.contains(atom.residue_number)),
            Expr::AtomName(names) => names.iter().any(|n| n.eq_ignore_ascii_case(&atom.name)),
            Expr::Symbol(symbols) => atom
                .symbol()
                .is_some_and(|s| symbols.iter().any(|x| x.eq_ignore_ascii_case(&s))),
            Expr::Chain(chains) => chains.contains(&atom.chain),
            Expr::And(a, b) => a.matches(atom) && b.matches(atom),
            Expr::Or(a, b) => a.matches(atom) || b.matches(atom),
            Expr::Not(a) => !a.matches(atom),
        }
    }
}

/// A named, parsed selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    name: String,
    expr: Expr,
}

impl Selection {
    /// Parses `name, expression`. Error positions are byte offsets into
    /// `definition`.
    pub fn parse(definition: &str) -> Result<Self, SelectionError> {
        let syntax = |message: String, position: usize| SelectionError::Syntax {
            selection: definition.to_string(),
            message,
            position,
        };

        let Some((name, body)) = definition.split_once(',') else {
            return Err(syntax(
                "expected '<name>, <expression>'".into(),
                definition.len(),
            ));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(syntax("selection name is empty".into(), 0));
        }

        let offset = definition.len() - body.len();
        let expr = lexer::tokenize(body, offset)
            .and_then(|tokens| parser::parse(&tokens, definition.len()))
            .map_err(|e| syntax(e.message, e.position))?;

        Ok(Self {
            name: name.to_string(),
            expr,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn matches(&self, atom: &Atom) -> bool {
        self.expr.matches(atom)
    }
}

/// Summed area of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionArea {
    pub name: String,
    pub area: f64,
    /// Number of atoms that matched.
    pub atoms: usize,
}

/// Evaluates every selection against `structure` and sums the matching atom
/// areas from `result`.
///
/// All definitions are parsed before any area is summed, so one malformed
/// selection fails the whole batch.
#[instrument(skip_all, name = "select_area", fields(selections = definitions.len()))]
pub fn select_area(
    definitions: &[&str],
    structure: &Structure,
    result: &SasaResult,
) -> Result<Vec<SelectionArea>, SelectionError> {
    if structure.len() != result.len() {
        return Err(SelectionError::ResultMismatch {
            structure: structure.len(),
            result: result.len(),
        });
    }

    let selections: Vec<Selection> = definitions
        .iter()
        .map(|d| Selection::parse(d))
        .try_collect()?;

    let mut areas = selections
        .iter()
        .map(|s| SelectionArea {
            name: s.name.clone(),
            area: 0.0,
            atoms: 0,
        })
        .collect_vec();

    for (atom, &area) in structure.atoms().iter().zip(result.atom_areas()) {
        for (selection, total) in selections.iter().zip(areas.iter_mut()) {
            if selection.matches(atom) {
                total.area += area;
                total.atoms += 1;
            }
        }
    }

    for area in &areas {
        debug!(selection = %area.name, atoms = area.atoms, area = area.area, "Selection evaluated");
    }
    Ok(areas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::AtomSpec;
    use crate::engine::config::Parameters;
    use crate::workflows::calc;
    use crate::workflows::fixtures::tripeptide;
    use crate::workflows::tree::ResultTree;

    fn computed() -> (Structure, SasaResult) {
        let structure = tripeptide();
        let result = calc::run(&structure, &Parameters::default()).unwrap();
        (structure, result)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn parse_splits_name_and_expression() {
        let s = Selection::parse("  backbone , name N+CA+C+O").unwrap();
        assert_eq!(s.name(), "backbone");
        assert_eq!(
            s.expr(),
            &Expr::AtomName(vec!["N".into(), "CA".into(), "C".into(), "O".into()])
        );
    }

    #[test]
    fn parse_errors_point_into_the_full_definition() {
        match Selection::parse("s1, resn ala and") {
            Err(SelectionError::Syntax {
                selection,
                position,
                ..
            }) => {
                assert_eq!(selection, "s1, resn ala and");
                assert_eq!(position, 16);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
        assert!(matches!(
            Selection::parse("s1, resn ala # x"),
            Err(SelectionError::Syntax { position: 13, .. })
        ));
        assert!(matches!(
            Selection::parse("resn ala"),
            Err(SelectionError::Syntax { position: 8, .. })
        ));
        assert!(matches!(
            Selection::parse(" , resn ala"),
            Err(SelectionError::Syntax { position: 0, .. })
        ));
    }

    #[test]
    fn matching_is_case_insensitive_for_names_but_not_chains() {
        let (structure, _) = computed();
        let ca = &structure.atoms()[1];
        assert!(Selection::parse("a, resn Ala and name ca").unwrap().matches(ca));
        assert!(Selection::parse("a, symbol c").unwrap().matches(ca));
        assert!(Selection::parse("a, chain A").unwrap().matches(ca));
        assert!(!Selection::parse("a, chain a").unwrap().matches(ca));
        assert!(!Selection::parse("a, not resi 1").unwrap().matches(ca));
    }

    #[test]
    fn selection_areas_sum_matching_atoms() {
        let (structure, result) = computed();
        let areas = select_area(&["s1, resn ala", "s2, resi 1"], &structure, &result).unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "s1");
        assert_eq!(areas[0].atoms, 5);
        assert!(close(areas[0].area, areas[1].area));

        let expected: f64 = result.atom_areas()[..5].iter().sum();
        assert!(close(areas[0].area, expected));
    }

    #[test]
    fn whole_structure_selection_equals_total() {
        let (structure, result) = computed();
        let areas = select_area(
            &["all, chain A or not chain A", "none, chain A and not chain A"],
            &structure,
            &result,
        )
        .unwrap();
        assert!(close(areas[0].area, result.total()));
        assert_eq!(areas[0].atoms, structure.len());
        assert_eq!(areas[1].area, 0.0);
        assert_eq!(areas[1].atoms, 0);
    }

    #[test]
    fn residue_selection_matches_result_tree_node() {
        let (structure, result) = computed();
        let tree = ResultTree::build(&structure, &result, structure.classifier()).unwrap();
        let gly = tree.residue('A', 2.into()).unwrap();
        let areas = select_area(&["gly, resn gly and chain A"], &structure, &result).unwrap();
        assert!(close(areas[0].area, gly.area().total));
    }

    #[test]
    fn one_malformed_selection_fails_the_batch() {
        let (structure, result) = computed();
        let err = select_area(&["ok, resn ala", "bad, resi"], &structure, &result).unwrap_err();
        assert!(matches!(err, SelectionError::Syntax { ref selection, .. } if selection == "bad, resi"));
    }

    #[test]
    fn mismatched_result_is_rejected() {
        let (structure, _) = computed();
        let other = calc::run(&tripeptide_without_last(), &Parameters::default()).unwrap();
        assert!(matches!(
            select_area(&["s, resn ala"], &structure, &other),
            Err(SelectionError::ResultMismatch { .. })
        ));
    }

    fn tripeptide_without_last() -> Structure {
        let full = tripeptide();
        let mut s = Structure::new();
        for atom in &full.atoms()[..full.len() - 1] {
            let p = atom.position;
            s.add_atom(
                AtomSpec::new(
                    &atom.name,
                    &atom.residue_name,
                    atom.residue_number,
                    atom.chain,
                    [p.x, p.y, p.z],
                )
                .with_radius(atom.radius()),
            )
            .unwrap();
        }
        s
    }
}
