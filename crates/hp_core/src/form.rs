//! Input controls for the estimate form and the collector that turns a
//! submitted form into a [`FeatureRecord`].
//!
//! Fields are listed in display order, which is not the model's column order.
//! The collector writes each value through its [`Feature`], so the record is
//! always assembled in training order regardless of how the form is laid out.

use std::collections::HashMap;
use tracing::debug;

use crate::encoding::{CategoricalEncoding, CENTRAL_AIR, PAVED_DRIVE, ROOF_STYLE};
use crate::types::{Feature, FeatureRecord, FEATURE_COUNT};
use crate::{Error, Result};

use Section::{AmenitiesAndBasement as Amenities, ConstructionAndAge as Construction, PropertyDetails as Property};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PropertyDetails,
    ConstructionAndAge,
    AmenitiesAndBasement,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::PropertyDetails,
        Section::ConstructionAndAge,
        Section::AmenitiesAndBasement,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::PropertyDetails => "Property Details",
            Section::ConstructionAndAge => "Construction & Age",
            Section::AmenitiesAndBasement => "Amenities & Basement",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Control {
    /// Bounded slider.
    Slider { min: f64, max: f64, default: f64, step: f64 },
    /// Numeric entry, optionally bounded above.
    Number { min: f64, max: Option<f64>, default: f64, step: f64 },
    /// Dropdown over a fixed label set.
    Select { encoding: &'static CategoricalEncoding, default_index: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub feature: Feature,
    pub label: &'static str,
    pub section: Section,
    pub control: Control,
}

impl FieldSpec {
    pub fn key(&self) -> &'static str {
        self.feature.key()
    }

    /// Encoded default value.
    pub fn default_value(&self) -> f64 {
        match self.control {
            Control::Slider { default, .. } | Control::Number { default, .. } => default,
            Control::Select { encoding, default_index } => encoding
                .label_at(default_index)
                .and_then(|label| encoding.encode(label))
                .map(f64::from)
                .unwrap_or(0.0),
        }
    }

    /// Default as it would appear in the form.
    pub fn default_input(&self) -> String {
        match self.control {
            Control::Slider { default, .. } | Control::Number { default, .. } => default.to_string(),
            Control::Select { encoding, default_index } => {
                encoding.label_at(default_index).unwrap_or_default().to_string()
            }
        }
    }

    pub fn min(&self) -> Option<f64> {
        match self.control {
            Control::Slider { min, .. } | Control::Number { min, .. } => Some(min),
            Control::Select { .. } => None,
        }
    }

    /// Parse and bound one raw form value. Blank input takes the default.
    pub fn read(&self, raw: Option<&str>) -> Result<f64> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        match self.control {
            Control::Slider { min, max, default, .. } => {
                let value = parse_number(self, raw, default)?;
                Ok(value.max(min).min(max))
            }
            Control::Number { min, max, default, .. } => {
                let value = parse_number(self, raw, default)?.max(min);
                Ok(max.map_or(value, |max| value.min(max)))
            }
            Control::Select { encoding, .. } => match raw {
                None => Ok(self.default_value()),
                Some(label) => encoding.encode(label).map(f64::from).ok_or_else(|| {
                    Error::UnknownLabel {
                        field: self.label.to_string(),
                        label: label.to_string(),
                    }
                }),
            },
        }
    }
}

fn parse_number(spec: &FieldSpec, raw: Option<&str>, default: f64) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: f64 = raw
        .parse()
        .map_err(|_| Error::invalid_input(spec.label, format!("'{}' is not a number", raw)))?;
    if !value.is_finite() {
        return Err(Error::invalid_input(spec.label, "value must be finite"));
    }
    Ok(value)
}

const fn slider(feature: Feature, label: &'static str, section: Section, min: f64, max: f64, default: f64) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        section,
        control: Control::Slider { min, max, default, step: 1.0 },
    }
}

const fn number(feature: Feature, label: &'static str, section: Section, default: f64, step: f64) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        section,
        control: Control::Number { min: 0.0, max: None, default, step },
    }
}

const fn year(feature: Feature, label: &'static str, default: f64) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        section: Section::ConstructionAndAge,
        control: Control::Number { min: 1800.0, max: Some(2024.0), default, step: 1.0 },
    }
}

const fn select(
    feature: Feature,
    label: &'static str,
    section: Section,
    encoding: &'static CategoricalEncoding,
    default_index: usize,
) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        section,
        control: Control::Select { encoding, default_index },
    }
}

/// Every form field, in display order.
pub static FIELDS: [FieldSpec; FEATURE_COUNT] = [
    slider(Feature::OverallQual, "Overall Quality (1-10)", Property, 1.0, 10.0, 5.0),
    number(Feature::GrLivArea, "Above Grade Living Area (sq ft)", Property, 1500.0, 50.0),
    number(Feature::FirstFlrSf, "First Floor Area (sq ft)", Property, 1000.0, 50.0),
    number(Feature::LotFrontage, "Street Connected Length (ft)", Property, 65.0, 10.0),
    number(Feature::LotArea, "Total Lot Size (sq ft)", Property, 8000.0, 100.0),
    select(Feature::RoofStyle, "Roof Style", Property, &ROOF_STYLE, 1),
    year(Feature::YearBuilt, "Original Construction Year", 1980.0),
    year(Feature::YearRemodAdd, "Remodel Year", 2000.0),
    number(Feature::MasVnrArea, "Masonry Veneer Area (sq ft)", Construction, 0.0, 10.0),
    select(Feature::CentralAir, "Central Air Conditioning", Construction, &CENTRAL_AIR, 1),
    select(Feature::PavedDrive, "Paved Driveway", Construction, &PAVED_DRIVE, 2),
    slider(Feature::Fireplaces, "Number of Fireplaces", Construction, 0.0, 5.0, 0.0),
    slider(Feature::FullBath, "Full Bathrooms Above Grade", Amenities, 0.0, 5.0, 2.0),
    number(Feature::GarageArea, "Garage Area (sq ft)", Amenities, 400.0, 50.0),
    slider(Feature::BsmtFullBath, "Basement Full Bathrooms", Amenities, 0.0, 3.0, 0.0),
    number(Feature::BsmtFinSf1, "Finished Basement Area (sq ft)", Amenities, 500.0, 50.0),
    number(Feature::WoodDeckSf, "Wood Deck Area (sq ft)", Amenities, 0.0, 10.0),
    number(Feature::OpenPorchSf, "Open Porch Area (sq ft)", Amenities, 0.0, 10.0),
];

/// Collects form submissions into feature records.
#[derive(Debug, Clone, Copy)]
pub struct FormCollector {
    fields: &'static [FieldSpec; FEATURE_COUNT],
}

impl Default for FormCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormCollector {
    pub fn new() -> Self {
        Self { fields: &FIELDS }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, feature: Feature) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.feature == feature)
    }

    pub fn section(&self, section: Section) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(move |f| f.section == section)
    }

    /// Record with every field at its default.
    pub fn defaults(&self) -> FeatureRecord {
        let mut record = FeatureRecord::default();
        for spec in self.fields.iter() {
            record.set(spec.feature, spec.default_value());
        }
        record
    }

    /// Form values as the user would first see them, keyed by form key.
    pub fn default_inputs(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|spec| (spec.key().to_string(), spec.default_input()))
            .collect()
    }

    /// Build a record from raw form values keyed by form key.
    ///
    /// Keys that do not name a field are ignored.
    pub fn collect(&self, raw: &HashMap<String, String>) -> Result<FeatureRecord> {
        let mut columns = Vec::with_capacity(FEATURE_COUNT);
        for spec in self.fields.iter() {
            let value = spec.read(raw.get(spec.key()).map(String::as_str))?;
            columns.push((spec.feature.column(), value));
        }
        let record = FeatureRecord::from_columns(columns)?;
        debug!(fields = FEATURE_COUNT, "collected feature record");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_catalog_covers_every_feature_once() {
        let features: HashSet<Feature> = FIELDS.iter().map(|f| f.feature).collect();
        assert_eq!(features.len(), FEATURE_COUNT);
        for feature in Feature::ALL {
            assert!(features.contains(&feature), "{} has no control", feature);
        }
    }

    #[test]
    fn test_control_mix() {
        let selects = FIELDS.iter().filter(|f| matches!(f.control, Control::Select { .. })).count();
        let bounded = FIELDS
            .iter()
            .filter(|f| match f.control {
                Control::Slider { .. } => true,
                Control::Number { max, .. } => max.is_some(),
                Control::Select { .. } => false,
            })
            .count();
        assert_eq!(selects, 3);
        assert_eq!(bounded, 6);
        assert_eq!(FIELDS.len() - selects - bounded, 9);
    }

    #[test]
    fn test_defaults() {
        let record = FormCollector::new().defaults();
        assert_eq!(record.overall_qual, 5.0);
        assert_eq!(record.gr_liv_area, 1500.0);
        assert_eq!(record.year_built, 1980.0);
        assert_eq!(record.year_remod_add, 2000.0);
        assert_eq!(record.full_bath, 2.0);
        assert_eq!(record.garage_area, 400.0);
        assert_eq!(record.lot_area, 8000.0);
        assert_eq!(record.roof_style, 1.0);
        assert_eq!(record.central_air, 1.0);
        assert_eq!(record.paved_drive, 2.0);
    }

    #[test]
    fn test_empty_submission_yields_defaults() {
        let collector = FormCollector::new();
        let record = collector.collect(&HashMap::new()).unwrap();
        assert_eq!(record, collector.defaults());

        let record = collector.collect(&collector.default_inputs()).unwrap();
        assert_eq!(record, collector.defaults());
    }

    #[test]
    fn test_values_never_below_minimum() {
        let collector = FormCollector::new();
        let raw: HashMap<String, String> = FIELDS
            .iter()
            .filter(|f| f.min().is_some())
            .map(|f| (f.key().to_string(), "-1000000".to_string()))
            .collect();
        let record = collector.collect(&raw).unwrap();
        for spec in FIELDS.iter() {
            if let Some(min) = spec.min() {
                assert!(record.get(spec.feature) >= min, "{} below minimum", spec.label);
            }
        }
        assert_eq!(record.overall_qual, 1.0);
        assert_eq!(record.year_built, 1800.0);
        assert_eq!(record.gr_liv_area, 0.0);
    }

    #[test]
    fn test_upper_bounds_clamp() {
        let collector = FormCollector::new();
        let record = collector
            .collect(&form(&[("overall_qual", "42"), ("year_remod_add", "2100"), ("lot_area", "250000")]))
            .unwrap();
        assert_eq!(record.overall_qual, 10.0);
        assert_eq!(record.year_remod_add, 2024.0);
        assert_eq!(record.lot_area, 250000.0);
    }

    #[test]
    fn test_categorical_labels_are_encoded() {
        let collector = FormCollector::new();
        let record = collector
            .collect(&form(&[
                ("roof_style", "Hip"),
                ("central_air", "No (N)"),
                ("paved_drive", "Partial Paved (P)"),
            ]))
            .unwrap();
        assert_eq!(record.roof_style, 3.0);
        assert_eq!(record.central_air, 0.0);
        assert_eq!(record.paved_drive, 1.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let collector = FormCollector::new();
        let err = collector.collect(&form(&[("roof_style", "Dome")])).unwrap_err();
        assert!(matches!(err, Error::UnknownLabel { ref label, .. } if label == "Dome"));
        assert!(err.is_input_error());

        let err = collector.collect(&form(&[("garage_area", "lots")])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));

        let err = collector.collect(&form(&[("garage_area", "inf")])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_ignores_unrelated_keys() {
        let collector = FormCollector::new();
        let record = collector.collect(&form(&[("submit", "Generate Estimate")])).unwrap();
        assert_eq!(record, collector.defaults());
    }

    #[test]
    fn test_remodel_before_construction_is_accepted() {
        let collector = FormCollector::new();
        let record = collector
            .collect(&form(&[("year_built", "2010"), ("year_remod_add", "1950")]))
            .unwrap();
        assert_eq!(record.year_built, 2010.0);
        assert_eq!(record.year_remod_add, 1950.0);
    }
}
