//! Known Category Catalog
//!
//! Distinct normalized values seen in the dataset, used by clients to offer
//! valid choices for each request field.

use crate::filter::BrandAllowlist;
use crate::normalizer::NormalizedAttributes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sorted distinct categories per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub brands: Vec<String>,
    pub fuels: Vec<String>,
    pub gears: Vec<String>,
    /// Models offered by each brand
    pub models_by_brand: BTreeMap<String, Vec<String>>,
}

impl CategoryCatalog {
    /// Build a catalog from normalized rows, keeping only allowed brands
    pub fn build<'a, I>(rows: I, allowlist: &BrandAllowlist) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedAttributes>,
    {
        let mut fuels = BTreeSet::new();
        let mut gears = BTreeSet::new();
        let mut models: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for row in rows.into_iter().filter(|r| allowlist.contains(r.brand())) {
            fuels.insert(row.fuel().to_string());
            gears.insert(row.gear().to_string());
            models
                .entry(row.brand().to_string())
                .or_default()
                .insert(row.model().to_string());
        }

        Self {
            brands: models.keys().cloned().collect(),
            fuels: fuels.into_iter().collect(),
            gears: gears.into_iter().collect(),
            models_by_brand: models
                .into_iter()
                .map(|(brand, set)| (brand, set.into_iter().collect()))
                .collect(),
        }
    }

    /// Models known for a brand, empty when the brand is unknown
    pub fn models_for(&self, brand: &str) -> &[String] {
        self.models_by_brand
            .get(brand)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}
