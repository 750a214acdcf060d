//! Brand Allowlist Filter

use crate::normalizer::{normalize, NormalizedRecord};
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::debug;

/// Brands recognized by default
const DEFAULT_BRANDS: [&str; 5] = [
    "gm - chevrolet",
    "vw - volkswagen",
    "fiat",
    "ford",
    "toyota",
];

/// Anything that exposes a normalized brand
pub trait Branded {
    fn brand(&self) -> &str;
}

impl Branded for NormalizedRecord {
    fn brand(&self) -> &str {
        self.attributes.brand()
    }
}

/// Fixed set of recognized brand identifiers
///
/// Entries are stored normalized, so membership is checked against
/// normalized brands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandAllowlist {
    brands: BTreeSet<String>,
}

impl BrandAllowlist {
    /// Create an allowlist from arbitrary brand names
    pub fn new<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        Self {
            brands: brands.into_iter().map(normalize).collect(),
        }
    }

    /// Check whether a normalized brand is allowed
    pub fn contains(&self, brand: &str) -> bool {
        self.brands.contains(brand)
    }

    /// Iterate allowed brands in lexicographic order
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Keep only items whose brand is allowed
    ///
    /// May return an empty vector; callers decide whether that is fatal.
    pub fn filter<T: Branded>(&self, items: Vec<T>) -> Vec<T> {
        let before = items.len();
        let kept: Vec<T> = items
            .into_iter()
            .filter(|item| self.contains(item.brand()))
            .collect();
        debug!("Brand filter kept {} of {} rows", kept.len(), before);
        kept
    }
}

impl Default for BrandAllowlist {
    fn default() -> Self {
        Self::new(DEFAULT_BRANDS)
    }
}
