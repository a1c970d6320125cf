//! Add-form input and its validation.

use serde::{Deserialize, Serialize};

use remedystock_core::{DomainError, DomainResult};

use crate::medicine::{Barcode, Category, DEFAULT_LOW_STOCK_THRESHOLD};

/// Notification text for an incomplete add form.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields including barcode!";

/// Parse an integer the way a browser form field is read: optional leading
/// whitespace and sign, then as many digits as follow. Trailing junk is ignored.
///
/// Returns `None` when no digit is found. Values beyond `i64` saturate.
pub fn parse_form_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen.then(|| if negative { -value } else { value })
}

/// Read a low-stock threshold. Anything below 1, or nothing parseable, gives
/// [`DEFAULT_LOW_STOCK_THRESHOLD`].
pub(crate) fn parse_threshold(raw: &str) -> u32 {
    parse_form_int(raw)
        .filter(|t| *t >= 1)
        .map(|t| t.min(i64::from(u32::MAX)) as u32)
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
}

/// Raw add-form contents, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: String,
    pub potency: String,
    pub company: String,
    pub category: Category,
    pub stock: String,
    pub low_stock_threshold: String,
    pub barcode: String,
}

impl Default for MedicineDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            potency: String::new(),
            company: String::new(),
            category: Category::default(),
            stock: "0".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD.to_string(),
            barcode: String::new(),
        }
    }
}

/// A validated draft, ready to be given an id and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicine {
    pub name: String,
    pub potency: String,
    pub company: String,
    pub category: Category,
    pub stock: u32,
    pub low_stock_threshold: u32,
    pub barcode: Barcode,
}

impl MedicineDraft {
    /// Check required fields and normalize the numeric ones.
    ///
    /// Text fields are trimmed; whitespace-only counts as empty. Stock falls back
    /// to `0` and the threshold to [`DEFAULT_LOW_STOCK_THRESHOLD`] when they do
    /// not parse. Barcode uniqueness is the store's concern.
    pub fn validate(&self) -> DomainResult<NewMedicine> {
        let name = self.name.trim();
        let potency = self.potency.trim();
        let company = self.company.trim();
        let barcode = self.barcode.trim();

        if [name, potency, company, barcode].iter().any(|f| f.is_empty()) {
            return Err(DomainError::validation(MISSING_FIELDS_MESSAGE));
        }

        let stock = parse_form_int(&self.stock)
            .unwrap_or(0)
            .clamp(0, i64::from(u32::MAX)) as u32;

        let low_stock_threshold = parse_threshold(&self.low_stock_threshold);

        Ok(NewMedicine {
            name: name.to_string(),
            potency: potency.to_string(),
            company: company.to_string(),
            category: self.category,
            stock,
            low_stock_threshold,
            barcode: Barcode::new(barcode),
        })
    }
}
