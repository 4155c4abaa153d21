use super::check_width;
use crate::model::Predict;
use bpserve_core::{Error, FeatureMatrix, Label, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Ordinary least squares regressor: `y = x . coef + intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRegression {
    pub const TYPE_NAME: &'static str = "LinearRegression";

    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.coef.is_empty() {
            return Err(Error::artifact("LinearRegression has no coefficients"));
        }
        Ok(())
    }
}

impl Predict for LinearRegression {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>> {
        check_width(x, self.n_features(), Self::TYPE_NAME)?;
        let coef = ArrayView1::from(self.coef.as_slice());
        let y = x.view().dot(&coef) + self.intercept;
        Ok(y.iter().map(|v| Label::Float(*v)).collect())
    }
}
