use super::{check_width, classes_from_proba};
use crate::model::{Predict, PredictProba};
use bpserve_core::{Error, FeatureMatrix, Label, Result};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Logistic regression classifier.
///
/// Two classes use a single coefficient row and the sigmoid. More classes
/// use one row per class and the softmax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<Label>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticRegression {
    pub const TYPE_NAME: &'static str = "LogisticRegression";

    pub fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.classes.len() < 2 {
            return Err(Error::artifact(
                "LogisticRegression needs at least two classes",
            ));
        }
        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coef.len() != expected_rows {
            return Err(Error::artifact(format!(
                "LogisticRegression with {} classes needs {} coefficient rows, found {}",
                self.classes.len(),
                expected_rows,
                self.coef.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(Error::artifact(format!(
                "LogisticRegression has {} coefficient rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let width = self.n_features();
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(Error::artifact(
                "LogisticRegression coefficient rows must be non-empty and equally long",
            ));
        }
        Ok(())
    }

    /// Raw decision values, one column per coefficient row
    fn decision_function(&self, x: &FeatureMatrix) -> Array2<f64> {
        let mut scores = Array2::zeros((x.n_samples(), self.coef.len()));
        for (k, (w, b)) in self.coef.iter().zip(&self.intercept).enumerate() {
            let w = ArrayView1::from(w.as_slice());
            scores.column_mut(k).assign(&(x.view().dot(&w) + *b));
        }
        scores
    }
}

impl PredictProba for LogisticRegression {
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Array2<f64>> {
        check_width(x, self.n_features(), Self::TYPE_NAME)?;
        let scores = self.decision_function(x);

        if self.is_binary() {
            let mut proba = Array2::zeros((x.n_samples(), 2));
            for (i, z) in scores.column(0).iter().enumerate() {
                let p = sigmoid(*z);
                proba[[i, 0]] = 1.0 - p;
                proba[[i, 1]] = p;
            }
            return Ok(proba);
        }

        let mut proba = scores;
        for mut row in proba.axis_iter_mut(Axis(0)) {
            let max = row.fold(f64::NEG_INFINITY, |m, v| m.max(*v));
            row.mapv_inplace(|v| (v - max).exp());
            let sum = row.sum();
            row.mapv_inplace(|v| v / sum);
        }
        Ok(proba)
    }
}

impl Predict for LogisticRegression {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>> {
        let proba = self.predict_proba(x)?;
        Ok(classes_from_proba(&proba, &self.classes))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn binary() -> LogisticRegression {
        LogisticRegression {
            classes: vec![Label::Int(0), Label::Int(1)],
            coef: vec![vec![1.0, -1.0]],
            intercept: vec![0.0],
        }
    }

    #[test]
    fn test_binary_proba_and_class() {
        let model = binary();
        let x = FeatureMatrix::from_json(&json!([[3.0, 1.0], [0.0, 4.0]])).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert_eq!(proba.dim(), (2, 2));
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
        assert!((proba[[0, 1]] - sigmoid(2.0)).abs() < 1e-12);

        assert_eq!(
            model.predict(&x).unwrap(),
            vec![Label::Int(1), Label::Int(0)]
        );
    }

    #[test]
    fn test_multiclass_softmax() {
        let model = LogisticRegression {
            classes: vec!["low".into(), "normal".into(), "high".into()],
            coef: vec![vec![-1.0], vec![0.0], vec![1.0]],
            intercept: vec![0.0, 0.5, 0.0],
        };
        let x = FeatureMatrix::from_json(&json!([[5.0], [0.0], [-5.0]])).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert_eq!(proba.dim(), (3, 3));
        assert!((proba.row(1).sum() - 1.0).abs() < 1e-12);

        let labels = model.predict(&x).unwrap();
        assert_eq!(
            labels,
            vec![
                Label::from("high"),
                Label::from("normal"),
                Label::from("low")
            ]
        );
    }

    #[test]
    fn test_validate_rejects_mismatched_intercepts() {
        let mut model = binary();
        model.intercept = vec![0.0, 1.0];
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ragged_coefficients() {
        let model = LogisticRegression {
            classes: vec![Label::Int(0), Label::Int(1), Label::Int(2)],
            coef: vec![vec![1.0, 2.0], vec![1.0], vec![0.0, 0.0]],
            intercept: vec![0.0; 3],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_wrong_width() {
        let x = FeatureMatrix::from_json(&json!([1.0, 2.0, 3.0])).unwrap();
        assert!(binary().predict(&x).is_err());
    }
}
