use serde::{Deserialize, Serialize};
use std::fmt;

use hp_core::{Error, InputFrame, PredictiveModel, Result};

/// Marks a node with no children.
const LEAF: i64 = -1;

/// A fitted regression tree in flat array form.
///
/// Node `i` is a leaf when both children are `-1`. Otherwise a row goes to
/// `children_left[i]` when `row[feature[i]] <= threshold[i]`, and to
/// `children_right[i]` when not.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl fmt::Debug for RegressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegressionTree")
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl RegressionTree {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF && self.children_right[node] == LEAF
    }

    /// Check the tree is well formed for `n_features` inputs.
    ///
    /// Children must point past their parent, which rules out cycles and
    /// guarantees that traversal terminates.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(Error::Model("tree has no nodes".to_string()));
        }
        if [self.children_left.len(), self.children_right.len(), self.feature.len(), self.threshold.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err(Error::Model("tree arrays have different lengths".to_string()));
        }

        for node in 0..n {
            if self.is_leaf(node) {
                if !self.value[node].is_finite() {
                    return Err(Error::Model(format!("leaf {} has a non-finite value", node)));
                }
                continue;
            }
            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(Error::Model(format!(
                        "node {} has invalid child index {}",
                        node, child
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(Error::Model(format!(
                    "node {} splits on feature {} but the model has {} features",
                    node, feature, n_features
                )));
            }
            if !self.threshold[node].is_finite() {
                return Err(Error::Model(format!("node {} has a non-finite threshold", node)));
            }
        }
        Ok(())
    }

    /// Route one row to its leaf. Assumes `validate` has passed.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// Random forest regressor: the mean of its trees.
#[derive(Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    pub feature_names: Vec<String>,
    pub trees: Vec<RegressionTree>,
}

impl fmt::Debug for RandomForestRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForestRegressor")
            .field("features", &self.feature_names.len())
            .field("trees", &self.trees.len())
            .finish()
    }
}

impl RandomForestRegressor {
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(Error::Model("forest has no feature names".to_string()));
        }
        if self.trees.is_empty() {
            return Err(Error::Model("forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.feature_names.len())
                .map_err(|e| Error::Model(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

impl PredictiveModel for RandomForestRegressor {
    fn name(&self) -> &str {
        "RandomForest"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, frame: &InputFrame) -> Result<Vec<f64>> {
        frame.check_columns(&self.feature_names)?;
        let n_trees = self.trees.len() as f64;
        Ok(frame
            .rows
            .iter()
            .map(|row| self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / n_trees)
            .collect())
    }
}
