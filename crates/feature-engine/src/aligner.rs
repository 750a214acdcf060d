//! Frozen Column Alignment
//!
//! One-hot encoding of a single request can never reproduce every category
//! seen at training time. [`FrozenColumns::align`] reindexes such a row
//! against the training column list: missing columns become 0 and columns
//! the training run never produced are dropped.
//!
//! A request whose brand, model, fuel or gear never appeared in training
//! ends up with all-zero indicators for that field. The model then falls
//! back on whatever baseline its intercept encodes, so such estimates are
//! less accurate. The dropped columns are reported on [`Alignment`] so
//! callers can flag them.

use crate::error::FeatureError;
use crate::features::{EncodedFrame, FeatureVector};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Ordered feature names fixed when training completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FrozenColumns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FrozenColumns {
    /// Freeze a column list; names must be unique
    pub fn new(names: Vec<String>) -> Result<Self, FeatureError> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(FeatureError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { names, index })
    }

    /// Freeze the columns of a training frame
    pub fn from_frame(frame: &EncodedFrame) -> Self {
        // EncodedFrame already guarantees unique names.
        let names = frame.columns().to_vec();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Source column in `frame` for each frozen column, in frozen order
    fn source_indices(&self, frame: &EncodedFrame) -> Vec<Option<usize>> {
        self.names
            .iter()
            .map(|name| frame.column_index(name))
            .collect()
    }

    /// Align a single encoded row to the frozen columns
    ///
    /// Output has exactly `self.len()` entries in frozen order.
    pub fn align(&self, frame: &EncodedFrame) -> Result<Alignment, FeatureError> {
        if frame.n_rows() != 1 {
            return Err(FeatureError::NotSingleRow(frame.n_rows()));
        }

        let row = frame.row(0);
        let values: Array1<f64> = self
            .source_indices(frame)
            .into_iter()
            .map(|src| src.map_or(0.0, |j| row[j]))
            .collect();

        let dropped: Vec<String> = frame
            .columns()
            .iter()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect();

        if !dropped.is_empty() {
            debug!("Alignment dropped columns unknown to training: {:?}", dropped);
        }

        Ok(Alignment {
            vector: FeatureVector::new(values),
            dropped,
        })
    }

    /// Align every row of a frame to the frozen columns
    pub fn align_frame(&self, frame: &EncodedFrame) -> Array2<f64> {
        let sources = self.source_indices(frame);
        let mut aligned = Array2::<f64>::zeros((frame.n_rows(), self.len()));

        for (i, row) in frame.values().rows().into_iter().enumerate() {
            for (k, src) in sources.iter().enumerate() {
                if let Some(j) = src {
                    aligned[(i, k)] = row[*j];
                }
            }
        }

        aligned
    }
}

impl TryFrom<Vec<String>> for FrozenColumns {
    type Error = FeatureError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<FrozenColumns> for Vec<String> {
    fn from(columns: FrozenColumns) -> Self {
        columns.names
    }
}

/// Result of aligning one request row
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Model-ready vector in frozen column order
    pub vector: FeatureVector,
    /// Encoded columns absent from training, dropped during alignment
    pub dropped: Vec<String>,
}

impl Alignment {
    /// Columns naming categories the model never saw
    pub fn unseen_categories(&self) -> &[String] {
        &self.dropped
    }

    /// True when at least one categorical value was unknown to training
    pub fn is_degraded(&self) -> bool {
        !self.dropped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CategoricalEncoder;
    use crate::features::YEAR_MODEL_COLUMN;
    use data_validator::{NormalizedAttributes, VehicleAttributes};
    use ndarray::array;
    use proptest::prelude::*;

    fn row(brand: &str, model: &str, fuel: &str, gear: &str, year: i32) -> NormalizedAttributes {
        NormalizedAttributes::from(&VehicleAttributes::new(brand, model, fuel, gear, year))
    }

    fn frozen(names: &[&str]) -> FrozenColumns {
        FrozenColumns::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_unseen_brand_zero_fills() {
        let columns = frozen(&["year_model", "brand_fiat", "fuel_gasoline"]);
        let encoded = CategoricalEncoder::new()
            .encode(&[row("toyota", "corolla", "gasoline", "manual", 2020)])
            .unwrap();

        let alignment = columns.align(&encoded).unwrap();

        assert_eq!(alignment.vector.to_vec(), vec![2020.0, 0.0, 1.0]);
        assert!(alignment.is_degraded());
        assert_eq!(
            alignment.unseen_categories(),
            ["brand_toyota", "model_corolla", "gear_manual"]
        );
    }

    #[test]
    fn test_known_row_copies_values() {
        let training = CategoricalEncoder::new()
            .encode(&[
                row("fiat", "uno", "gasoline", "manual", 2015),
                row("ford", "ka", "gasoline", "manual", 2018),
            ])
            .unwrap();
        let columns = FrozenColumns::from_frame(&training);

        let request = CategoricalEncoder::new()
            .encode(&[row("Fiat", " UNO", "gasoline", "Manual", 2015)])
            .unwrap();
        let alignment = columns.align(&request).unwrap();

        assert_eq!(alignment.vector.values(), training.row(0));
        assert!(!alignment.is_degraded());
    }

    #[test]
    fn test_align_requires_single_row() {
        let columns = frozen(&["year_model"]);
        let frame = EncodedFrame::new(vec!["year_model".into()], array![[1.0], [2.0]]).unwrap();
        assert_eq!(
            columns.align(&frame).unwrap_err(),
            FeatureError::NotSingleRow(2)
        );
    }

    #[test]
    fn test_align_frame_reorders_and_fills() {
        let columns = frozen(&["b", "year_model", "c"]);
        let frame = EncodedFrame::new(
            vec!["year_model".into(), "a".into(), "b".into()],
            array![[2010.0, 1.0, 0.0], [2011.0, 0.0, 1.0]],
        )
        .unwrap();

        let aligned = columns.align_frame(&frame);
        assert_eq!(aligned, array![[0.0, 2010.0, 0.0], [1.0, 2011.0, 0.0]]);
    }

    #[test]
    fn test_duplicate_frozen_columns_rejected() {
        let err = FrozenColumns::new(vec!["a".into(), "a".into()]).unwrap_err();
        assert_eq!(err, FeatureError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_serde_keeps_order() {
        let columns = frozen(&["year_model", "brand_fiat", "brand_ford"]);
        let json = serde_json::to_string(&columns).unwrap();
        assert_eq!(json, r#"["year_model","brand_fiat","brand_ford"]"#);

        let back: FrozenColumns = serde_json::from_str(&json).unwrap();
        assert_eq!(back, columns);
        assert!(serde_json::from_str::<FrozenColumns>(r#"["a","a"]"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_alignment_copies_present_columns_in_frozen_order(
            filler in prop::collection::hash_set("x[a-z]{1,3}_[a-z]{1,3}", 0..10),
            keep in prop::collection::vec(any::<bool>(), 4),
            order_seed in any::<u64>(),
            brand in "[a-z]{1,3}",
            model in "[a-z]{1,3}",
            year in 1950i32..2030,
        ) {
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};

            let encoded = CategoricalEncoder::new()
                .encode(&[row(&brand, &model, "gasoline", "manual", year)])
                .unwrap();
            // indicator columns of the row, in field order
            let indicators: Vec<String> = encoded.columns()[1..].to_vec();
            let kept: Vec<String> = indicators
                .iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(name, _)| name.clone())
                .collect();

            let mut names: Vec<String> = filler.into_iter().collect();
            names.extend(kept.iter().cloned());
            names.push(YEAR_MODEL_COLUMN.to_string());
            names.sort_by_key(|name| {
                let mut hasher = DefaultHasher::new();
                (order_seed, name).hash(&mut hasher);
                hasher.finish()
            });
            let columns = FrozenColumns::new(names.clone()).unwrap();

            let alignment = columns.align(&encoded).unwrap();

            prop_assert_eq!(alignment.vector.len(), names.len());
            for (k, name) in names.iter().enumerate() {
                let expected = if name == YEAR_MODEL_COLUMN {
                    f64::from(year)
                } else if kept.contains(name) {
                    1.0
                } else {
                    0.0
                };
                prop_assert_eq!(alignment.vector.values()[k], expected);
            }

            let dropped: Vec<&String> = indicators.iter().filter(|c| !kept.contains(c)).collect();
            prop_assert_eq!(alignment.dropped.iter().collect::<Vec<_>>(), dropped);
        }
    }
}
