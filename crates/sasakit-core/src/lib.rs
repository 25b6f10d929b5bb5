//! # SASAKit Core Library
//!
//! A high-performance library for computing the solvent accessible surface area (SASA)
//! of macromolecular structures from atomic coordinates and radii.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separated:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Atom`), the atom
//!   classification system (`Classifier`, standard radius tables), minimal coordinate
//!   readers and the caller-facing diagnostics channel.
//!
//! - **[`engine`]: The Logic Core.** Calculation parameters, the spatial neighbor index,
//!   and the two surface-area algorithms: Shrake-Rupley sphere sampling and Lee-Richards
//!   slicing. Work is distributed over a dedicated worker pool.
//!
//! - **[`workflows`]: The Public API.** Entry points that tie `core` and `engine`
//!   together: running a calculation on a structure, aggregating atom areas into a
//!   structure/chain/residue/atom tree with relative areas, and evaluating named
//!   atom selections against a result.
//!
//! ```ignore
//! use sasakit::core::classifier::registry::ClassifierRegistry;
//! use sasakit::core::io::{pdb::PdbReader, traits::AtomSource};
//! use sasakit::core::models::builder::{LoadOptions, structure_from_records};
//! use sasakit::engine::config::Parameters;
//! use sasakit::workflows;
//!
//! let classifier = ClassifierRegistry::get("protor")?;
//! let records = PdbReader::read_from_path("1ubq.pdb")?;
//! let structure = structure_from_records(&records, Some(classifier), &LoadOptions::default(), &Default::default())?;
//! let result = workflows::calc::run(&structure, &Parameters::default())?;
//! println!("Total SASA: {:.2}", result.total());
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
