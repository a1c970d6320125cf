//! Fixed starting inventory loaded on every process start.

use remedystock_core::MedicineId;

use crate::medicine::{Barcode, Category, DEFAULT_LOW_STOCK_THRESHOLD, Medicine};

const SEED: [(i64, &str, &str, &str, Category, u32, &str); 6] = [
    (1, "Arnica Montana", "200", "SBL", Category::Dilutions, 25, "8901231234567"),
    (2, "Belladonna", "30", "Dr. Reckeweg", Category::Dilutions, 8, "8901231234568"),
    (3, "Calendula", "1M", "Hahnemann", Category::Dilutions, 15, "8901231234569"),
    (4, "Calcarea Phos", "6X", "SBL", Category::Biochemics, 5, "8901231234570"),
    (5, "Ferrum Phos", "12X", "Dr. Reckeweg", Category::Biochemics, 12, "8901231234571"),
    (6, "Natrum Mur", "200", "Schwabe", Category::Dilutions, 20, "8901231234572"),
];

/// The seed list, in display order.
pub fn seed_medicines() -> Vec<Medicine> {
    SEED.iter()
        .map(|&(id, name, potency, company, category, stock, barcode)| Medicine {
            id: MedicineId::from_raw(id),
            name: name.to_string(),
            potency: potency.to_string(),
            company: company.to_string(),
            category,
            stock,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            barcode: Barcode::new(barcode),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_has_unique_ids_and_barcodes() {
        let seed = seed_medicines();
        assert_eq!(seed.len(), 6);
        let ids: HashSet<_> = seed.iter().map(|m| m.id).collect();
        let codes: HashSet<_> = seed.iter().map(|m| m.barcode.clone()).collect();
        assert_eq!(ids.len(), seed.len());
        assert_eq!(codes.len(), seed.len());
    }

    #[test]
    fn seed_contains_two_low_stock_records() {
        let low: Vec<_> = seed_medicines()
            .into_iter()
            .filter(Medicine::is_low_stock)
            .map(|m| m.name)
            .collect();
        assert_eq!(low, vec!["Belladonna", "Calcarea Phos"]);
    }
}
