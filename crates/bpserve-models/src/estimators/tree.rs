use super::{check_width, classes_from_proba};
use crate::model::{Predict, PredictProba};
use bpserve_core::{Error, FeatureMatrix, Label, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;

/// Decision tree classifier stored as flat node arrays.
///
/// Node `i` is a leaf when `children_left[i] == -1`. Otherwise a sample goes
/// to `children_left[i]` when `x[feature[i]] <= threshold[i]` and to
/// `children_right[i]` otherwise. `value[i]` holds per-class weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    pub classes: Vec<Label>,
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTreeClassifier {
    pub const TYPE_NAME: &'static str = "DecisionTreeClassifier";

    pub(crate) fn validate(&self) -> Result<()> {
        let nodes = self.children_left.len();
        if nodes == 0 {
            return Err(Error::artifact("DecisionTreeClassifier has no nodes"));
        }
        if self.classes.is_empty() || self.n_features == 0 {
            return Err(Error::artifact(
                "DecisionTreeClassifier needs at least one class and one feature",
            ));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|len| *len != nodes)
        {
            return Err(Error::artifact(
                "DecisionTreeClassifier node arrays differ in length",
            ));
        }

        for i in 0..nodes {
            if self.value[i].len() != self.classes.len() {
                return Err(Error::artifact(format!(
                    "node {i} has {} class weights, expected {}",
                    self.value[i].len(),
                    self.classes.len()
                )));
            }
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF && right == LEAF {
                continue;
            }
            let in_range = |child: i64| child > i as i64 && (child as usize) < nodes;
            if !in_range(left) || !in_range(right) {
                return Err(Error::artifact(format!(
                    "node {i} has invalid children ({left}, {right})"
                )));
            }
            if self.feature[i] < 0 || self.feature[i] as usize >= self.n_features {
                return Err(Error::artifact(format!(
                    "node {i} splits on feature {} of {}",
                    self.feature[i], self.n_features
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to the leaf reached by `sample`
    fn leaf_for(&self, sample: ArrayView1<'_, f64>) -> usize {
        // validate() guarantees children point forward, so this terminates
        let mut node = 0;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if sample[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }
}

impl PredictProba for DecisionTreeClassifier {
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Array2<f64>> {
        check_width(x, self.n_features, Self::TYPE_NAME)?;
        let view = x.view();
        let mut proba = Array2::zeros((x.n_samples(), self.classes.len()));

        for (i, sample) in view.rows().into_iter().enumerate() {
            let weights = &self.value[self.leaf_for(sample)];
            let total: f64 = weights.iter().sum();
            for (k, w) in weights.iter().enumerate() {
                proba[[i, k]] = if total > 0.0 { w / total } else { 0.0 };
            }
        }
        Ok(proba)
    }
}

impl Predict for DecisionTreeClassifier {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>> {
        let proba = self.predict_proba(x)?;
        Ok(classes_from_proba(&proba, &self.classes))
    }
}
