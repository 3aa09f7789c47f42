use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::IndexError;

/// Sparse weighted-term vector.
///
/// Entries are kept sorted by term index with no repeats, so two vectors
/// can be compared with a single merge pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary `(index, weight)` pairs.
    ///
    /// Pairs are sorted, repeated indices are summed and zero weights dropped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let mut pairs: Vec<(u32, f64)> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(i, _)| i);

        let mut entries: Vec<(u32, f64)> = Vec::with_capacity(pairs.len());
        for (i, w) in pairs {
            match entries.last_mut() {
                Some(last) if last.0 == i => last.1 += w,
                _ => entries.push((i, w)),
            }
        }
        entries.retain(|&(_, w)| w != 0.0);

        Self { entries }
    }

    /// Build from a dense row, skipping zeros.
    pub fn from_dense(values: &[f64]) -> Self {
        Self::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &w)| (i as u32, w)),
        )
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: u32) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length. A zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;

        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Equal => {
                    dot += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }

        dot
    }

    /// Cosine similarity, defined as 0 when either vector has zero norm.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            return 0.0;
        }
        // Rounding can push identical directions a hair over 1.
        (self.dot(other) / norms).min(1.0)
    }

    /// Check shape and weights against a vocabulary of `dimension` terms.
    pub fn validate(&self, scope: &str, row: usize, dimension: usize) -> Result<(), IndexError> {
        for window in self.entries.windows(2) {
            if window[0].0 >= window[1].0 {
                return Err(IndexError::UnsortedVector {
                    scope: scope.to_string(),
                    row,
                });
            }
        }

        for &(i, w) in &self.entries {
            if i as usize >= dimension {
                return Err(IndexError::DimensionMismatch {
                    scope: scope.to_string(),
                    row,
                    position: i as usize,
                    dimension,
                });
            }
            if !w.is_finite() || w < 0.0 {
                return Err(IndexError::InvalidWeight {
                    scope: scope.to_string(),
                    row,
                    weight: w,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_merges_and_sorts() {
        let v = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn test_cosine_identical_direction() {
        let a = SparseVector::from_dense(&[1.0, 1.0]);
        let b = SparseVector::from_dense(&[3.0, 3.0]);
        assert!((a.cosine(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_disjoint_is_zero() {
        let a = SparseVector::from_dense(&[1.0, 0.0]);
        let b = SparseVector::from_dense(&[0.0, 2.0]);
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn test_cosine_zero_norm() {
        let a = SparseVector::new();
        let b = SparseVector::from_dense(&[1.0, 2.0]);
        assert_eq!(a.cosine(&b), 0.0);
        assert_eq!(b.cosine(&a), 0.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = SparseVector::from_dense(&[3.0, 4.0]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let v = SparseVector::from_dense(&[0.0, 0.0, 1.0]);
        assert!(v.validate("journals", 0, 3).is_ok());
        assert_eq!(
            v.validate("journals", 0, 2),
            Err(IndexError::DimensionMismatch {
                scope: "journals".to_string(),
                row: 0,
                position: 2,
                dimension: 2,
            })
        );
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let v = SparseVector::from_pairs(vec![(0, -1.0)]);
        assert!(matches!(
            v.validate("journals", 4, 1),
            Err(IndexError::InvalidWeight { row: 4, .. })
        ));
    }
}
