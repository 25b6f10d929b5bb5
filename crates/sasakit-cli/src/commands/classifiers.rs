use crate::error::Result;
use sasakit::core::classifier::Classifier;
use sasakit::core::classifier::registry::ClassifierRegistry;

pub fn run() -> Result<()> {
    print!("{}", listing()?);
    Ok(())
}

fn listing() -> Result<String> {
    let mut out = String::from("Standard classifiers:\n");
    for name in ClassifierRegistry::names() {
        let classifier = ClassifierRegistry::get(name)?;
        let marker = if name == ClassifierRegistry::DEFAULT { " (default)" } else { "" };
        out.push_str(&format!("  {:<10}{}{}\n", name, classifier.name(), marker));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_standard_classifier() {
        let out = listing().unwrap();
        assert!(out.contains("protor    ProtOr (default)"));
        assert!(out.contains("oons"));
        assert!(out.contains("naccess"));
    }
}
