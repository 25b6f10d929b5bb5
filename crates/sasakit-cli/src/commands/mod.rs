pub mod calc;
pub mod classifiers;
