use super::calc::check_result;
use super::error::CalcError;
use crate::core::classifier::Classifier;
use crate::core::classifier::reference::{ReferenceTable, ResidueReference};
use crate::core::models::atom::{AtomClass, ResidueNumber};
use crate::core::models::structure::Structure;
use crate::engine::result::SasaResult;
use std::collections::HashMap;
use std::ops::AddAssign;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLevel {
    Structure,
    Chain,
    Residue,
    Atom,
}

/// Absolute (or relative) areas carried by every node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeArea {
    pub total: f64,
    pub main_chain: f64,
    pub side_chain: f64,
    pub polar: f64,
    pub apolar: f64,
    pub unknown: f64,
}

impl NodeArea {
    fn for_atom(area: f64, class: AtomClass, is_backbone: bool) -> Self {
        let mut node = NodeArea {
            total: area,
            ..NodeArea::default()
        };
        if is_backbone {
            node.main_chain = area;
        } else {
            node.side_chain = area;
        }
        match class {
            AtomClass::Polar => node.polar = area,
            AtomClass::Apolar => node.apolar = area,
            AtomClass::Unknown => node.unknown = area,
        }
        node
    }

    /// Divides each component by the matching reference value.
    ///
    /// Components whose reference is not positive are NaN, as is `unknown`,
    /// which has no reference.
    pub fn relative_to(&self, reference: &ResidueReference) -> NodeArea {
        let ratio = |area: f64, reference: f64| {
            if reference > 0.0 { area / reference } else { f64::NAN }
        };
        NodeArea {
            total: ratio(self.total, reference.total),
            main_chain: ratio(self.main_chain, reference.main_chain),
            side_chain: ratio(self.side_chain, reference.side_chain),
            polar: ratio(self.polar, reference.polar),
            apolar: ratio(self.apolar, reference.apolar),
            unknown: f64::NAN,
        }
    }

    fn undefined() -> Self {
        NodeArea {
            total: f64::NAN,
            main_chain: f64::NAN,
            side_chain: f64::NAN,
            polar: f64::NAN,
            apolar: f64::NAN,
            unknown: f64::NAN,
        }
    }
}

impl AddAssign for NodeArea {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.main_chain += rhs.main_chain;
        self.side_chain += rhs.side_chain;
        self.polar += rhs.polar;
        self.apolar += rhs.apolar;
        self.unknown += rhs.unknown;
    }
}

/// One level of aggregation. Children are kept in insertion order and can also
/// be looked up by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    level: NodeLevel,
    name: String,
    residue_name: Option<String>,
    area: NodeArea,
    relative: Option<NodeArea>,
    atom_index: Option<usize>,
    children: Vec<Node>,
    child_index: HashMap<String, usize>,
}

impl Node {
    fn new(level: NodeLevel, name: String) -> Self {
        Self {
            level,
            name,
            residue_name: None,
            area: NodeArea::default(),
            relative: None,
            atom_index: None,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    fn child_or_insert(&mut self, key: String, make: impl FnOnce(String) -> Node) -> &mut Node {
        let index = match self.child_index.get(&key) {
            Some(&index) => index,
            None => {
                self.children.push(make(key.clone()));
                self.child_index.insert(key, self.children.len() - 1);
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    fn push_child(&mut self, child: Node) {
        let index = self.children.len();
        self.child_index.entry(child.name.clone()).or_insert(index);
        self.children.push(child);
    }

    pub fn level(&self) -> NodeLevel {
        self.level
    }

    /// Chain label, residue number (e.g. `82A`) or atom name, depending on level.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Residue name for residue and atom nodes.
    pub fn residue_name(&self) -> Option<&str> {
        self.residue_name.as_deref()
    }

    pub fn area(&self) -> &NodeArea {
        &self.area
    }

    /// Relative areas; only residue nodes carry them.
    pub fn relative(&self) -> Option<&NodeArea> {
        self.relative.as_ref()
    }

    /// Whether a reference existed for this residue type.
    pub fn is_relative_defined(&self) -> bool {
        self.relative.is_some_and(|r| !r.total.is_nan())
    }

    /// Index of the atom in the structure, for atom nodes.
    pub fn atom_index(&self) -> Option<usize> {
        self.atom_index
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.child_index.get(key).map(|&i| &self.children[i])
    }

    /// All nodes at `level` below (or at) this one, in order.
    pub fn descendants(&self, level: NodeLevel) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect(level, &mut out);
        out
    }

    fn collect<'a>(&'a self, level: NodeLevel, out: &mut Vec<&'a Node>) {
        if self.level == level {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect(level, out);
        }
    }
}

/// Structure, chain, residue and atom aggregation of a [`SasaResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTree {
    root: Node,
}

impl ResultTree {
    /// Builds the tree with the built-in reference table.
    ///
    /// With `classifier` set, atoms are relabelled by it; otherwise the classes
    /// assigned when the structure was built are used.
    pub fn build(
        structure: &Structure,
        result: &SasaResult,
        classifier: Option<&dyn Classifier>,
    ) -> Result<Self, CalcError> {
        Self::build_with_reference(
            structure,
            result,
            classifier,
            &ReferenceTable::builtin(),
        )
    }

    #[instrument(skip_all, name = "result_tree_build", fields(atoms = structure.len()))]
    pub fn build_with_reference(
        structure: &Structure,
        result: &SasaResult,
        classifier: Option<&dyn Classifier>,
        reference: &ReferenceTable,
    ) -> Result<Self, CalcError> {
        check_result(structure, result)?;
        let atoms = structure.atoms();
        let areas = result.atom_areas();
        let mut root = Node::new(NodeLevel::Structure, format!("model {}", structure.model()));

        for span in structure.residues() {
            let chain = root.child_or_insert(span.chain.to_string(), |key| {
                Node::new(NodeLevel::Chain, key)
            });
            let residue = chain.child_or_insert(span.number.to_string(), |key| {
                let mut node = Node::new(NodeLevel::Residue, key);
                node.residue_name = Some(span.name.clone());
                node
            });

            for index in span.atoms.clone() {
                let atom = &atoms[index];
                let class = classifier
                    .map_or(atom.class(), |c| c.classify(&atom.residue_name, &atom.name));
                let mut node = Node::new(NodeLevel::Atom, atom.name.clone());
                node.residue_name = Some(atom.residue_name.clone());
                node.atom_index = Some(index);
                node.area = NodeArea::for_atom(areas[index], class, atom.is_backbone());
                residue.area += node.area;
                residue.push_child(node);
            }
        }

        for chain in &mut root.children {
            for residue in &mut chain.children {
                let relative = residue
                    .residue_name
                    .as_deref()
                    .and_then(|name| reference.get(name))
                    .map_or_else(NodeArea::undefined, |r| residue.area.relative_to(r));
                residue.relative = Some(relative);
                chain.area += residue.area;
            }
            root.area += chain.area;
        }

        debug!(
            chains = root.children.len(),
            total = root.area.total,
            "Result tree built"
        );
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn chain(&self, label: char) -> Option<&Node> {
        self.root.child(&label.to_string())
    }

    pub fn residue(&self, chain: char, number: ResidueNumber) -> Option<&Node> {
        self.chain(chain)?.child(&number.to_string())
    }

    pub fn residues(&self) -> impl Iterator<Item = &Node> {
        self.root.children.iter().flat_map(|chain| chain.children.iter())
    }
}
