//! Feature vocabulary
//!
//! The vocabulary fixes the shape of every feature vector produced by the
//! encoder: the ordered feature list, the bin edges for numeric features,
//! and the known category set for categorical features. It is built once at
//! training time and travels with the model parameters, so a model can only
//! ever be applied to vectors encoded against its own vocabulary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::record::{normalize, LabeledClaim};

/// Feature names in canonical vector order
pub const FEATURE_AGE: &str = "age";
pub const FEATURE_CLAIM_AMOUNT: &str = "claim_amount";
pub const FEATURE_PREVIOUS_CLAIMS: &str = "previous_claims";
pub const FEATURE_TREATMENT: &str = "treatment";
pub const FEATURE_HOSPITAL: &str = "hospital";
pub const FEATURE_HISTORY: &str = "history";

/// Discretization scheme for a single feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureKind {
    /// Numeric feature bucketed by ascending bin edges.
    ///
    /// A value equal to an edge always lands in the upper bucket, so
    /// boundary values bucket deterministically.
    Numeric { bin_edges: Vec<Decimal> },
    /// Categorical feature with a sorted known-category set.
    ///
    /// Values outside the set map to a dedicated unseen bucket (the last
    /// index) rather than failing.
    Categorical { categories: Vec<String> },
}

impl FeatureKind {
    /// Number of distinct encoded values this feature can take
    pub fn cardinality(&self) -> usize {
        match self {
            FeatureKind::Numeric { bin_edges } => bin_edges.len() + 1,
            FeatureKind::Categorical { categories } => categories.len() + 1,
        }
    }

    /// Bucket index for a numeric value
    pub fn bucket(&self, value: Decimal) -> Option<usize> {
        match self {
            FeatureKind::Numeric { bin_edges } => {
                Some(bin_edges.iter().filter(|edge| value >= **edge).count())
            }
            FeatureKind::Categorical { .. } => None,
        }
    }

    /// Category index for a categorical value (already normalized)
    pub fn category_index(&self, value: &str) -> Option<usize> {
        match self {
            FeatureKind::Categorical { categories } => Some(
                categories
                    .binary_search_by(|known| known.as_str().cmp(value))
                    .unwrap_or(categories.len()),
            ),
            FeatureKind::Numeric { .. } => None,
        }
    }
}

/// A named feature and its discretization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureKind,
}

/// The ordered feature set known to a trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVocabulary {
    features: Vec<FeatureSpec>,
}

impl FeatureVocabulary {
    pub fn new(features: Vec<FeatureSpec>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    /// Number of features, and therefore the fixed vector length
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Builds a vocabulary from a training corpus
    ///
    /// Numeric bin edges are placed at corpus quantiles; categorical sets
    /// collect every observed normalized value. Construction is fully
    /// deterministic for a given corpus.
    pub fn from_corpus(corpus: &[LabeledClaim], numeric_bins: usize) -> Self {
        let ages: Vec<Decimal> = corpus
            .iter()
            .map(|c| Decimal::from(c.record.age))
            .collect();
        let amounts: Vec<Decimal> = corpus.iter().map(|c| c.record.claim_amount).collect();
        let prior_counts: Vec<Decimal> = corpus
            .iter()
            .map(|c| Decimal::from(c.record.previous_claims))
            .collect();

        let treatments = collect_categories(corpus, |c| normalize(&c.record.treatment));
        let hospitals = collect_categories(corpus, |c| normalize(&c.record.hospital));
        let histories = collect_categories(corpus, |c| c.record.primary_history_tag());

        Self::new(vec![
            FeatureSpec {
                name: FEATURE_AGE.to_string(),
                kind: FeatureKind::Numeric {
                    bin_edges: quantile_edges(ages, numeric_bins),
                },
            },
            FeatureSpec {
                name: FEATURE_CLAIM_AMOUNT.to_string(),
                kind: FeatureKind::Numeric {
                    bin_edges: quantile_edges(amounts, numeric_bins),
                },
            },
            FeatureSpec {
                name: FEATURE_PREVIOUS_CLAIMS.to_string(),
                kind: FeatureKind::Numeric {
                    bin_edges: quantile_edges(prior_counts, numeric_bins),
                },
            },
            FeatureSpec {
                name: FEATURE_TREATMENT.to_string(),
                kind: FeatureKind::Categorical {
                    categories: treatments,
                },
            },
            FeatureSpec {
                name: FEATURE_HOSPITAL.to_string(),
                kind: FeatureKind::Categorical {
                    categories: hospitals,
                },
            },
            FeatureSpec {
                name: FEATURE_HISTORY.to_string(),
                kind: FeatureKind::Categorical {
                    categories: histories,
                },
            },
        ])
    }
}

fn collect_categories<F>(corpus: &[LabeledClaim], extract: F) -> Vec<String>
where
    F: Fn(&LabeledClaim) -> String,
{
    let set: BTreeSet<String> = corpus.iter().map(extract).collect();
    set.into_iter().collect()
}

/// Quantile-based bin edges over a value sample
///
/// Edges are strictly increasing; duplicate quantiles collapse, so skewed
/// samples yield fewer buckets rather than empty ones.
fn quantile_edges(mut values: Vec<Decimal>, bins: usize) -> Vec<Decimal> {
    if values.is_empty() || bins < 2 {
        return Vec::new();
    }
    values.sort();

    let n = values.len();
    let mut edges = Vec::with_capacity(bins - 1);
    for q in 1..bins {
        let idx = (q * n) / bins;
        let edge = values[idx.min(n - 1)];
        if edges.last().map_or(true, |last| *last < edge) && edge > values[0] {
            edges.push(edge);
        }
    }
    edges
}
