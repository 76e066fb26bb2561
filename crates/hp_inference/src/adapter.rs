//! The boundary between a collected record and the loaded model.
//!
//! [`estimate`] never panics and never returns a bare model error: every
//! failure is folded into an [`EstimateFailure`] that the caller can show
//! inline and then carry on serving.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use hp_core::{Error, FeatureRecord, InputFrame, PredictiveModel};

use crate::currency::format_currency;

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub formatted: String,
}

impl Estimate {
    pub fn message(&self) -> String {
        format!("Estimated Property Value: {}", self.formatted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input columns did not match what the model was trained on.
    Schema,
    /// The model returned an error or panicked.
    Model,
    /// The model produced no usable number.
    NonNumeric,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("An error occurred during prediction: {detail}")]
pub struct EstimateFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl EstimateFailure {
    fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl From<Error> for EstimateFailure {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::Schema(_) => FailureKind::Schema,
            Error::NonNumeric(_) => FailureKind::NonNumeric,
            _ => FailureKind::Model,
        };
        Self::new(kind, err.to_string())
    }
}

/// Run one record through the model and format the result.
pub fn estimate(model: &dyn PredictiveModel, record: &FeatureRecord) -> Result<Estimate, EstimateFailure> {
    let started = Instant::now();
    let result = run(model, record);
    match &result {
        Ok(estimate) => debug!(
            model = model.name(),
            value = estimate.value,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "estimate ready"
        ),
        Err(failure) => warn!(model = model.name(), kind = ?failure.kind, "{}", failure),
    }
    result
}

fn run(model: &dyn PredictiveModel, record: &FeatureRecord) -> Result<Estimate, EstimateFailure> {
    let frame = InputFrame::single(record);
    frame.check_columns(model.feature_names())?;

    let outputs = panic::catch_unwind(AssertUnwindSafe(|| model.predict(&frame)))
        .map_err(|payload| EstimateFailure::new(FailureKind::Model, panic_message(&*payload)))??;

    let value = match outputs.as_slice() {
        [value] => *value,
        other => {
            return Err(EstimateFailure::new(
                FailureKind::NonNumeric,
                format!("expected exactly one prediction, got {}", other.len()),
            ))
        }
    };
    if !value.is_finite() {
        return Err(EstimateFailure::new(
            FailureKind::NonNumeric,
            format!("model returned {}", value),
        ));
    }

    Ok(Estimate {
        value,
        formatted: format_currency(value),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("model panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("model panicked: {}", msg)
    } else {
        "model panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::{Feature, FormCollector, Result};
    use std::sync::Mutex;

    #[derive(Debug)]
    enum Behaviour {
        Fixed(f64),
        Many(Vec<f64>),
        Fail,
        Panic,
    }

    #[derive(Debug)]
    struct StubModel {
        columns: Vec<String>,
        behaviour: Behaviour,
        calls: Mutex<Vec<InputFrame>>,
    }

    impl StubModel {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                columns: Feature::columns(),
                behaviour,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl PredictiveModel for StubModel {
        fn name(&self) -> &str {
            "Stub"
        }

        fn feature_names(&self) -> &[String] {
            &self.columns
        }

        fn predict(&self, frame: &InputFrame) -> Result<Vec<f64>> {
            self.calls.lock().unwrap().push(frame.clone());
            match &self.behaviour {
                Behaviour::Fixed(v) => Ok(vec![*v]),
                Behaviour::Many(values) => Ok(values.clone()),
                Behaviour::Fail => Err(Error::Inference("tree ensemble exploded".to_string())),
                Behaviour::Panic => panic!("index out of bounds"),
            }
        }
    }

    fn defaults() -> FeatureRecord {
        FormCollector::new().defaults()
    }

    #[test]
    fn test_defaults_format_as_currency() {
        let model = StubModel::new(Behaviour::Fixed(215_432.7));
        let estimate = estimate(&model, &defaults()).unwrap();
        assert_eq!(estimate.value, 215_432.7);
        assert_eq!(estimate.formatted, "$215,432.70");
        assert_eq!(estimate.message(), "Estimated Property Value: $215,432.70");
    }

    #[test]
    fn test_model_sees_one_row_in_schema_order() {
        let model = StubModel::new(Behaviour::Fixed(1.0));
        let record = defaults();
        estimate(&model, &record).unwrap();

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].columns, Feature::columns());
        assert_eq!(calls[0].rows, vec![record.to_row().to_vec()]);
    }

    #[test]
    fn test_model_error_becomes_failure() {
        let model = StubModel::new(Behaviour::Fail);
        let failure = estimate(&model, &defaults()).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Model);
        assert!(failure.to_string().starts_with("An error occurred during prediction:"));
        assert!(failure.to_string().contains("tree ensemble exploded"));
    }

    #[test]
    fn test_model_panic_becomes_failure() {
        let model = StubModel::new(Behaviour::Panic);
        let failure = estimate(&model, &defaults()).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Model);
        assert!(failure.detail.contains("index out of bounds"));
    }

    #[test]
    fn test_output_must_be_single_finite_number() {
        let model = StubModel::new(Behaviour::Many(vec![1.0, 2.0]));
        assert_eq!(estimate(&model, &defaults()).unwrap_err().kind, FailureKind::NonNumeric);

        let model = StubModel::new(Behaviour::Many(vec![]));
        assert_eq!(estimate(&model, &defaults()).unwrap_err().kind, FailureKind::NonNumeric);

        let model = StubModel::new(Behaviour::Fixed(f64::NAN));
        assert_eq!(estimate(&model, &defaults()).unwrap_err().kind, FailureKind::NonNumeric);
    }

    #[test]
    fn test_schema_mismatch_skips_model() {
        let mut model = StubModel::new(Behaviour::Fixed(1.0));
        model.columns.swap(0, 1);
        let failure = estimate(&model, &defaults()).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Schema);
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_each_roof_style_reaches_model() {
        let collector = FormCollector::new();
        let model = StubModel::new(Behaviour::Fixed(1.0));
        let spec = collector.field(Feature::RoofStyle).unwrap();
        let hp_core::Control::Select { encoding, .. } = spec.control else {
            panic!("roof style is a dropdown");
        };

        for label in encoding.labels() {
            let mut raw = collector.default_inputs();
            raw.insert(spec.key().to_string(), label.to_string());
            let record = collector.collect(&raw).unwrap();
            estimate(&model, &record).unwrap();
        }

        let calls = model.calls.lock().unwrap();
        let idx = Feature::RoofStyle.index();
        let codes: Vec<f64> = calls.iter().map(|f| f.rows[0][idx]).collect();
        assert_eq!(codes, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        for call in calls.iter() {
            for (i, value) in call.rows[0].iter().enumerate() {
                if i != idx {
                    assert_eq!(*value, calls[0].rows[0][i]);
                }
            }
        }
    }
}
