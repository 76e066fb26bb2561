use std::ops::RangeInclusive;

/// Fixed label to integer code mapping for one categorical field.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoricalEncoding {
    name: &'static str,
    options: &'static [(&'static str, u8)],
}

pub static PAVED_DRIVE: CategoricalEncoding = CategoricalEncoding {
    name: "Paved Drive",
    options: &[
        ("No Paved Drive (N)", 0),
        ("Partial Paved (P)", 1),
        ("Paved (Y)", 2),
    ],
};

pub static CENTRAL_AIR: CategoricalEncoding = CategoricalEncoding {
    name: "Central Air",
    options: &[("No (N)", 0), ("Yes (Y)", 1)],
};

pub static ROOF_STYLE: CategoricalEncoding = CategoricalEncoding {
    name: "Roof Style",
    options: &[
        ("Flat", 0),
        ("Gable", 1),
        ("Gambrel", 2),
        ("Hip", 3),
        ("Mansard", 4),
        ("Shed", 5),
    ],
};

impl CategoricalEncoding {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.options.iter().map(|(label, _)| *label)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn encode(&self, label: &str) -> Option<u8> {
        self.options
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, code)| *code)
    }

    pub fn label_for(&self, code: u8) -> Option<&'static str> {
        self.options
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(label, _)| *label)
    }

    /// Label at a display position.
    pub fn label_at(&self, index: usize) -> Option<&'static str> {
        self.options.get(index).map(|(label, _)| *label)
    }

    pub fn code_range(&self) -> RangeInclusive<u8> {
        let min = self.options.iter().map(|(_, c)| *c).min().unwrap_or(0);
        let max = self.options.iter().map(|(_, c)| *c).max().unwrap_or(0);
        min..=max
    }
}
