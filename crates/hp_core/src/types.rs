use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Number of features the estimator consumes.
pub const FEATURE_COUNT: usize = 18;

/// One input column of the price model.
///
/// The declaration order of `Feature::ALL` is the column order the model was
/// trained on. Anything that builds model input must go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    OverallQual,
    GrLivArea,
    GarageArea,
    FirstFlrSf,
    YearBuilt,
    FullBath,
    YearRemodAdd,
    MasVnrArea,
    Fireplaces,
    BsmtFinSf1,
    LotFrontage,
    WoodDeckSf,
    OpenPorchSf,
    BsmtFullBath,
    PavedDrive,
    LotArea,
    CentralAir,
    RoofStyle,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::OverallQual,
        Feature::GrLivArea,
        Feature::GarageArea,
        Feature::FirstFlrSf,
        Feature::YearBuilt,
        Feature::FullBath,
        Feature::YearRemodAdd,
        Feature::MasVnrArea,
        Feature::Fireplaces,
        Feature::BsmtFinSf1,
        Feature::LotFrontage,
        Feature::WoodDeckSf,
        Feature::OpenPorchSf,
        Feature::BsmtFullBath,
        Feature::PavedDrive,
        Feature::LotArea,
        Feature::CentralAir,
        Feature::RoofStyle,
    ];

    /// Column name as it appears in the training data.
    pub fn column(&self) -> &'static str {
        match self {
            Feature::OverallQual => "Overall Qual",
            Feature::GrLivArea => "Gr Liv Area",
            Feature::GarageArea => "Garage Area",
            Feature::FirstFlrSf => "1st Flr SF",
            Feature::YearBuilt => "Year Built",
            Feature::FullBath => "Full Bath",
            Feature::YearRemodAdd => "Year Remod/Add",
            Feature::MasVnrArea => "Mas Vnr Area",
            Feature::Fireplaces => "Fireplaces",
            Feature::BsmtFinSf1 => "BsmtFin SF 1",
            Feature::LotFrontage => "Lot Frontage",
            Feature::WoodDeckSf => "Wood Deck SF",
            Feature::OpenPorchSf => "Open Porch SF",
            Feature::BsmtFullBath => "Bsmt Full Bath",
            Feature::PavedDrive => "Paved Drive",
            Feature::LotArea => "Lot Area",
            Feature::CentralAir => "Central Air",
            Feature::RoofStyle => "Roof Style",
        }
    }

    /// Form key used by the web form and the CLI `--set` flag.
    pub fn key(&self) -> &'static str {
        match self {
            Feature::OverallQual => "overall_qual",
            Feature::GrLivArea => "gr_liv_area",
            Feature::GarageArea => "garage_area",
            Feature::FirstFlrSf => "first_flr_sf",
            Feature::YearBuilt => "year_built",
            Feature::FullBath => "full_bath",
            Feature::YearRemodAdd => "year_remod_add",
            Feature::MasVnrArea => "mas_vnr_area",
            Feature::Fireplaces => "fireplaces",
            Feature::BsmtFinSf1 => "bsmt_fin_sf_1",
            Feature::LotFrontage => "lot_frontage",
            Feature::WoodDeckSf => "wood_deck_sf",
            Feature::OpenPorchSf => "open_porch_sf",
            Feature::BsmtFullBath => "bsmt_full_bath",
            Feature::PavedDrive => "paved_drive",
            Feature::LotArea => "lot_area",
            Feature::CentralAir => "central_air",
            Feature::RoofStyle => "roof_style",
        }
    }

    /// Position of this feature in the model input.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_column(column: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.column() == column)
    }

    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Column names in training order.
    pub fn columns() -> Vec<String> {
        Feature::ALL.iter().map(|f| f.column().to_string()).collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The 18 numeric inputs for a single estimate.
///
/// Categorical fields hold their integer code.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub overall_qual: f64,
    pub gr_liv_area: f64,
    pub garage_area: f64,
    pub first_flr_sf: f64,
    pub year_built: f64,
    pub full_bath: f64,
    pub year_remod_add: f64,
    pub mas_vnr_area: f64,
    pub fireplaces: f64,
    pub bsmt_fin_sf_1: f64,
    pub lot_frontage: f64,
    pub wood_deck_sf: f64,
    pub open_porch_sf: f64,
    pub bsmt_full_bath: f64,
    pub paved_drive: f64,
    pub lot_area: f64,
    pub central_air: f64,
    pub roof_style: f64,
}

impl FeatureRecord {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::OverallQual => self.overall_qual,
            Feature::GrLivArea => self.gr_liv_area,
            Feature::GarageArea => self.garage_area,
            Feature::FirstFlrSf => self.first_flr_sf,
            Feature::YearBuilt => self.year_built,
            Feature::FullBath => self.full_bath,
            Feature::YearRemodAdd => self.year_remod_add,
            Feature::MasVnrArea => self.mas_vnr_area,
            Feature::Fireplaces => self.fireplaces,
            Feature::BsmtFinSf1 => self.bsmt_fin_sf_1,
            Feature::LotFrontage => self.lot_frontage,
            Feature::WoodDeckSf => self.wood_deck_sf,
            Feature::OpenPorchSf => self.open_porch_sf,
            Feature::BsmtFullBath => self.bsmt_full_bath,
            Feature::PavedDrive => self.paved_drive,
            Feature::LotArea => self.lot_area,
            Feature::CentralAir => self.central_air,
            Feature::RoofStyle => self.roof_style,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::OverallQual => &mut self.overall_qual,
            Feature::GrLivArea => &mut self.gr_liv_area,
            Feature::GarageArea => &mut self.garage_area,
            Feature::FirstFlrSf => &mut self.first_flr_sf,
            Feature::YearBuilt => &mut self.year_built,
            Feature::FullBath => &mut self.full_bath,
            Feature::YearRemodAdd => &mut self.year_remod_add,
            Feature::MasVnrArea => &mut self.mas_vnr_area,
            Feature::Fireplaces => &mut self.fireplaces,
            Feature::BsmtFinSf1 => &mut self.bsmt_fin_sf_1,
            Feature::LotFrontage => &mut self.lot_frontage,
            Feature::WoodDeckSf => &mut self.wood_deck_sf,
            Feature::OpenPorchSf => &mut self.open_porch_sf,
            Feature::BsmtFullBath => &mut self.bsmt_full_bath,
            Feature::PavedDrive => &mut self.paved_drive,
            Feature::LotArea => &mut self.lot_area,
            Feature::CentralAir => &mut self.central_air,
            Feature::RoofStyle => &mut self.roof_style,
        };
        *slot = value;
    }

    /// Values in training column order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        Feature::ALL.map(|f| self.get(f))
    }

    /// `(column, value)` pairs in training column order.
    pub fn columns(&self) -> Vec<(&'static str, f64)> {
        Feature::ALL.iter().map(|f| (f.column(), self.get(*f))).collect()
    }

    /// Build a record from named columns in any order.
    ///
    /// Every column must appear exactly once, unknown names are rejected and
    /// values must be finite.
    pub fn from_columns<'a, I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut record = FeatureRecord::default();
        let mut seen = [false; FEATURE_COUNT];

        for (name, value) in columns {
            let feature = Feature::from_column(name)
                .ok_or_else(|| Error::Schema(format!("unexpected column '{}'", name)))?;
            if seen[feature.index()] {
                return Err(Error::Schema(format!("duplicate column '{}'", name)));
            }
            if !value.is_finite() {
                return Err(Error::Schema(format!("column '{}' is not a finite number", name)));
            }
            seen[feature.index()] = true;
            record.set(feature, value);
        }

        let missing: Vec<&str> = Feature::ALL
            .iter()
            .filter(|f| !seen[f.index()])
            .map(|f| f.column())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Schema(format!("missing columns: {}", missing.join(", "))));
        }

        Ok(record)
    }
}

/// Tabular model input: named columns and one or more rows of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl InputFrame {
    /// Single-row frame with columns in training order.
    pub fn single(record: &FeatureRecord) -> Self {
        Self {
            columns: Feature::columns(),
            rows: vec![record.to_row().to_vec()],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check the frame against the columns a model was trained on.
    pub fn check_columns(&self, expected: &[String]) -> Result<()> {
        if self.columns != expected {
            return Err(Error::Schema(format!(
                "input columns {:?} do not match trained columns {:?}",
                self.columns, expected
            )));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected.len() {
                return Err(Error::Schema(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    expected.len()
                )));
            }
        }
        Ok(())
    }
}
