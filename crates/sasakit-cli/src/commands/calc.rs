use crate::cli::CalcArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::logging;
use sasakit::core::classifier::Classifier;
use sasakit::core::classifier::reference::ReferenceTable;
use sasakit::core::classifier::registry::ClassifierRegistry;
use sasakit::core::io::{pdb::PdbReader, traits::AtomSource};
use sasakit::core::models::builder::{ModelMode, structure_array, structure_from_records};
use sasakit::core::models::structure::Structure;
use sasakit::engine::config::Algorithm;
use sasakit::engine::result::SasaResult;
use sasakit::workflows::calc::{self, ClassAreas, classify_areas};
use sasakit::workflows::selection::{SelectionArea, select_area};
use sasakit::workflows::tree::ResultTree;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};

pub fn run(args: CalcArgs, threads: Option<usize>) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args, threads)?;
    for report in calculate(&config)? {
        print!("{}", report);
    }
    Ok(())
}

/// Loads, calculates and formats one report per structure.
fn calculate(config: &AppConfig) -> Result<Vec<String>> {
    let classifier: Arc<dyn Classifier> = ClassifierRegistry::resolve(&config.classifier)?;
    let reference = match &config.reference {
        Some(path) => ReferenceTable::load(path)?,
        None => ReferenceTable::builtin(),
    };

    info!("Loading input structure from {:?}", &config.input_path);
    let records =
        PdbReader::read_from_path(&config.input_path).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;

    let reporter = logging::diagnostic_reporter();
    let structures = if config.options.models == ModelMode::Separate || config.options.separate_chains
    {
        structure_array(&records, Some(classifier.clone()), &config.options, &reporter)?
    } else {
        vec![structure_from_records(
            &records,
            Some(classifier.clone()),
            &config.options,
            &reporter,
        )?]
    };

    let definitions: Vec<&str> = config.selections.iter().map(String::as_str).collect();
    let source = config.input_path.display().to_string();

    let mut reports = Vec::with_capacity(structures.len());
    for structure in &structures {
        let result = calc::run(structure, &config.parameters)?;
        let classes = classify_areas(structure, &result, None)?;
        let tree = ResultTree::build_with_reference(structure, &result, None, &reference)?;
        let selections = if definitions.is_empty() {
            Vec::new()
        } else {
            select_area(&definitions, structure, &result)?
        };
        if classes.unknown > 0.0 {
            warn!(
                "{:.2} A^2 belongs to atoms {} could not classify",
                classes.unknown,
                classifier.name()
            );
        }

        reports.push(format_report(&Report {
            source: &source,
            classifier: classifier.name(),
            config,
            structure,
            result: &result,
            classes: &classes,
            tree: &tree,
            selections: &selections,
        })?);
    }
    Ok(reports)
}

struct Report<'a> {
    source: &'a str,
    classifier: &'a str,
    config: &'a AppConfig,
    structure: &'a Structure,
    result: &'a SasaResult,
    classes: &'a ClassAreas,
    tree: &'a ResultTree,
    selections: &'a [SelectionArea],
}

fn format_report(report: &Report) -> Result<String> {
    let params = report.result.parameters();
    let mut out = String::new();

    writeln!(out, "## sasakit {} ##\n", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "PARAMETERS")?;
    writeln!(out, "algorithm    : {}", params.algorithm())?;
    writeln!(out, "probe-radius : {:.2}", params.probe_radius())?;
    writeln!(out, "threads      : {}", params.n_threads())?;
    match params.algorithm() {
        Algorithm::LeeRichards => {
            writeln!(out, "slices       : {}", params.n_slices())?;
        }
        Algorithm::ShrakeRupley => {
            writeln!(out, "testpoints   : {}", params.n_points())?;
        }
    }

    let chains: String = report.structure.chain_labels().iter().collect();
    writeln!(out, "\nINPUT")?;
    writeln!(out, "source  : {}", report.source)?;
    writeln!(out, "chains  : {}", chains)?;
    writeln!(out, "model   : {}", report.structure.model())?;
    writeln!(out, "atoms   : {}", report.structure.len())?;
    writeln!(out, "radii   : {}", report.classifier)?;

    writeln!(out, "\nRESULTS (A^2)")?;
    writeln!(out, "Total   : {:>12.2}", report.result.total())?;
    writeln!(out, "Apolar  : {:>12.2}", report.classes.apolar)?;
    writeln!(out, "Polar   : {:>12.2}", report.classes.polar)?;
    if report.classes.unknown > 0.0 {
        writeln!(out, "Unknown : {:>12.2}", report.classes.unknown)?;
    }
    for chain in report.tree.root().children() {
        writeln!(out, "CHAIN {} : {:>10.2}", chain.name(), chain.area().total)?;
    }

    if !report.selections.is_empty() {
        let width = report
            .selections
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0);
        writeln!(out, "\nSELECTIONS")?;
        for selection in report.selections {
            writeln!(
                out,
                "{:<width$} : {:>12.2}",
                selection.name,
                selection.area,
                width = width
            )?;
        }
    }

    if report.config.print_residues {
        writeln!(out, "\nRESIDUES (A^2, relative %)")?;
        for chain in report.tree.root().children() {
            for residue in chain.children() {
                let relative = residue
                    .relative()
                    .filter(|_| residue.is_relative_defined())
                    .map_or_else(|| "N/A".to_string(), |r| format!("{:.1}", r.total * 100.0));
                writeln!(
                    out,
                    "RES {:<3} {} {:>5} {:>9.2} {:>7}",
                    residue.residue_name().unwrap_or("?"),
                    chain.name(),
                    residue.name(),
                    residue.area().total,
                    relative
                )?;
            }
        }
    }
    out.push('\n');
    Ok(out)
}
