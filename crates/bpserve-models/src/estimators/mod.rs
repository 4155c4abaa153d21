//! Built-in estimators
//!
//! Each estimator is plain data decoded from an artifact plus the math to
//! evaluate it. Structural checks run once at load time so prediction only
//! has to check the input width.

mod linear;
mod logistic;
mod tree;

pub use linear::LinearRegression;
pub use logistic::LogisticRegression;
pub use tree::DecisionTreeClassifier;

use bpserve_core::{Error, FeatureMatrix, Label, Result};

/// Reject inputs whose column count differs from what the estimator was fitted on
pub(crate) fn check_width(x: &FeatureMatrix, expected: usize, type_name: &str) -> Result<()> {
    if x.n_features() != expected {
        return Err(Error::prediction(format!(
            "X has {} features, but {} is expecting {} features as input",
            x.n_features(),
            type_name,
            expected
        )));
    }
    Ok(())
}

/// Index of the largest value; the first one wins on ties
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Map each probability row to the class with the highest probability
pub(crate) fn classes_from_proba(proba: &ndarray::Array2<f64>, classes: &[Label]) -> Vec<Label> {
    proba
        .rows()
        .into_iter()
        .map(|row| {
            let values: Vec<f64> = row.to_vec();
            classes[argmax(&values)].clone()
        })
        .collect()
}
