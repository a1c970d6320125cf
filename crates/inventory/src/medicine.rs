use core::str::FromStr;

use serde::{Deserialize, Serialize};

use remedystock_core::{DomainError, DomainResult, Entity, MedicineId, ValueObject};

use crate::draft::{parse_form_int, parse_threshold};

/// Threshold applied when the add form leaves it blank or invalid.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Product category of a medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Dilutions,
    Biochemics,
    #[serde(rename = "Mother Tinctures")]
    MotherTinctures,
    Tablets,
    Ointments,
}

impl Category {
    /// Every category, in selector order.
    pub const ALL: [Category; 5] = [
        Category::Dilutions,
        Category::Biochemics,
        Category::MotherTinctures,
        Category::Tablets,
        Category::Ointments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dilutions => "Dilutions",
            Category::Biochemics => "Biochemics",
            Category::MotherTinctures => "Mother Tinctures",
            Category::Tablets => "Tablets",
            Category::Ointments => "Ointments",
        }
    }
}

impl ValueObject for Category {}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased with separators dropped, so "Mother Tinctures", "mother-tinctures"
/// and "MOTHER_TINCTURES" all compare equal.
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize_label(c.as_str()) == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {}", s.trim())))
    }
}

/// Barcode printed on a medicine package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for Barcode {}

impl core::fmt::Display for Barcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A medicine record held in the inventory.
///
/// `stock` is unsigned, so the "never negative" invariant is carried by the type;
/// decrements saturate at zero in [`Medicine::adjust_stock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub potency: String,
    pub company: String,
    pub category: Category,
    pub stock: u32,
    pub low_stock_threshold: u32,
    pub barcode: Barcode,
}

impl Medicine {
    /// A record is low on stock when it is at or below its threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }

    /// Apply `delta`, clamping the result to `0..=u32::MAX`. Returns the new stock.
    pub fn adjust_stock(&mut self, delta: i64) -> u32 {
        let next = (i64::from(self.stock) + delta).clamp(0, i64::from(u32::MAX));
        self.stock = next as u32;
        self.stock
    }

    /// Overwrite a single field. No validation happens here.
    pub fn apply_field(&mut self, field: MedicineField) {
        match field {
            MedicineField::Name(v) => self.name = v,
            MedicineField::Potency(v) => self.potency = v,
            MedicineField::Company(v) => self.company = v,
            MedicineField::Category(v) => self.category = v,
            MedicineField::Stock(v) => self.stock = v,
            MedicineField::LowStockThreshold(v) => self.low_stock_threshold = v,
            MedicineField::Barcode(v) => self.barcode = v,
        }
    }
}

impl Entity for Medicine {
    type Id = MedicineId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A single-field edit applied in place while a record is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum MedicineField {
    Name(String),
    Potency(String),
    Company(String),
    Category(Category),
    Stock(u32),
    LowStockThreshold(u32),
    Barcode(Barcode),
}

impl MedicineField {
    /// Field names accepted by [`MedicineField::parse`].
    pub const NAMES: [&'static str; 7] = [
        "name",
        "potency",
        "company",
        "category",
        "stock",
        "threshold",
        "barcode",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MedicineField::Name(_) => "name",
            MedicineField::Potency(_) => "potency",
            MedicineField::Company(_) => "company",
            MedicineField::Category(_) => "category",
            MedicineField::Stock(_) => "stock",
            MedicineField::LowStockThreshold(_) => "threshold",
            MedicineField::Barcode(_) => "barcode",
        }
    }

    /// Build an edit from raw input text, the way an inline edit box would.
    ///
    /// Stock uses the form-field integer rule (leading digits, `0` when nothing
    /// parses) and saturates at zero. The threshold follows the add-form rule, so
    /// it never drops below 1. Text fields are taken verbatim.
    pub fn parse(field: &str, raw: &str) -> DomainResult<Self> {
        let edit = match normalize_label(field).as_str() {
            "name" => MedicineField::Name(raw.to_string()),
            "potency" => MedicineField::Potency(raw.to_string()),
            "company" => MedicineField::Company(raw.to_string()),
            "category" => MedicineField::Category(raw.parse()?),
            "stock" => {
                MedicineField::Stock(parse_form_int(raw).unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32)
            }
            "threshold" | "lowstockthreshold" => MedicineField::LowStockThreshold(parse_threshold(raw)),
            "barcode" => MedicineField::Barcode(Barcode::new(raw.trim())),
            _ => {
                return Err(DomainError::validation(format!(
                    "unknown field: {field} (expected one of {})",
                    Self::NAMES.join(", ")
                )));
            }
        };
        Ok(edit)
    }
}
