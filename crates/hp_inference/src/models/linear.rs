use serde::{Deserialize, Serialize};

use hp_core::{Error, InputFrame, PredictiveModel, Result};

/// Ordinary linear regressor: `intercept + sum(coefficients[i] * x[i])`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(Error::Model("linear model has no feature names".to_string()));
        }
        if self.coefficients.len() != self.feature_names.len() {
            return Err(Error::Model(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::Model("linear model has non-finite weights".to_string()));
        }
        Ok(())
    }
}

impl PredictiveModel for LinearRegressor {
    fn name(&self) -> &str {
        "Linear"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, frame: &InputFrame) -> Result<Vec<f64>> {
        frame.check_columns(&self.feature_names)?;
        Ok(frame
            .rows
            .iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, w)| x * w)
                        .sum::<f64>()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_prediction() {
        let model = LinearRegressor {
            feature_names: vec!["a".to_string(), "b".to_string()],
            intercept: 10_000.0,
            coefficients: vec![2.0, 100.0],
        };
        model.validate().unwrap();
        let frame = InputFrame {
            columns: model.feature_names.clone(),
            rows: vec![vec![500.0, 3.0]],
        };
        assert_eq!(model.predict(&frame).unwrap(), vec![11_300.0]);
    }

    #[test]
    fn test_coefficient_count_must_match() {
        let model = LinearRegressor {
            feature_names: vec!["a".to_string(), "b".to_string()],
            intercept: 0.0,
            coefficients: vec![1.0],
        };
        assert!(matches!(model.validate(), Err(Error::Model(_))));
    }
}
