use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::IndexError;
use crate::tokenizer::Tokenizer;
use crate::vector::SparseVector;

/// Closed term space: term -> column index, plus one IDF weight per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: HashMap<String, u32>,
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Assemble from precomputed `(term, index)` pairs and an IDF table.
    pub fn new(terms: HashMap<String, u32>, idf: Vec<f64>) -> Result<Self, IndexError> {
        let vocabulary = Self { terms, idf };
        vocabulary.validate("vocabulary")?;
        Ok(vocabulary)
    }

    /// Learn terms and smoothed IDF weights from a document collection.
    ///
    /// Terms get indices in sorted order; `idf = ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(documents: &[S], tokenizer: &Tokenizer) -> Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = tokenizer.terms(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut terms = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (position, (term, df)) in doc_freq.into_iter().enumerate() {
            terms.insert(term, position as u32);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { terms, idf }
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.terms.get(term).copied()
    }

    pub fn idf(&self, index: u32) -> f64 {
        self.idf.get(index as usize).copied().unwrap_or(0.0)
    }

    /// Encode text as an L2-normalized tf-idf vector.
    ///
    /// Terms outside the vocabulary are ignored; text with no known term
    /// yields the zero vector.
    pub fn transform(&self, text: &str, tokenizer: &Tokenizer) -> SparseVector {
        let pairs = tokenizer
            .term_frequencies(text)
            .into_iter()
            .filter_map(|(term, tf)| {
                self.index_of(&term)
                    .map(|index| (index, tf as f64 * self.idf(index)))
            });

        let mut vector = SparseVector::from_pairs(pairs);
        vector.l2_normalize();
        vector
    }

    /// Check that every term index is in range, unique, and has a valid weight.
    pub fn validate(&self, scope: &str) -> Result<(), IndexError> {
        if self.terms.len() != self.idf.len() {
            return Err(IndexError::IdfLengthMismatch {
                scope: scope.to_string(),
                terms: self.terms.len(),
                weights: self.idf.len(),
            });
        }

        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.terms {
            let position = index as usize;
            if position >= self.idf.len() {
                return Err(IndexError::TermOutOfRange {
                    scope: scope.to_string(),
                    term: term.clone(),
                    position,
                    dimension: self.idf.len(),
                });
            }
            if seen[position] {
                return Err(IndexError::DuplicateTermIndex {
                    scope: scope.to_string(),
                    position,
                });
            }
            seen[position] = true;
        }

        if let Some((position, &weight)) = self
            .idf
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(IndexError::InvalidIdf {
                scope: scope.to_string(),
                position,
                weight,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantum_vocabulary() -> Vocabulary {
        let terms = HashMap::from([("quantum".to_string(), 0), ("computing".to_string(), 1)]);
        Vocabulary::new(terms, vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_transform_is_unit_length() {
        let vocabulary = quantum_vocabulary();
        let v = vocabulary.transform("Quantum computing", &Tokenizer::new());
        let expected = 1.0 / 2f64.sqrt();
        assert!((v.get(0) - expected).abs() < 1e-12);
        assert!((v.get(1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let vocabulary = quantum_vocabulary();
        let tokenizer = Tokenizer::new();
        assert_eq!(
            vocabulary.transform("quantum computing devices", &tokenizer),
            vocabulary.transform("quantum computing", &tokenizer)
        );
        assert!(vocabulary.transform("biology", &tokenizer).is_empty());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let vocabulary = quantum_vocabulary();
        let tokenizer = Tokenizer::new();
        let text = "computing quantum quantum";
        assert_eq!(vocabulary.transform(text, &tokenizer), vocabulary.transform(text, &tokenizer));
    }

    #[test]
    fn test_fit_sorted_indices_and_smooth_idf() {
        let docs = ["graph theory", "graph networks"];
        let vocabulary = Vocabulary::fit(&docs, &Tokenizer::new());

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.index_of("graph"), Some(0));
        assert_eq!(vocabulary.index_of("networks"), Some(1));
        assert_eq!(vocabulary.index_of("theory"), Some(2));

        // df = n gives idf exactly 1
        assert!((vocabulary.idf(0) - 1.0).abs() < 1e-12);
        let rare = (3.0f64 / 2.0).ln() + 1.0;
        assert!((vocabulary.idf(2) - rare).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_out_of_range_term() {
        let terms = HashMap::from([("quantum".to_string(), 1)]);
        let err = Vocabulary::new(terms, vec![1.0]).unwrap_err();
        assert!(matches!(err, IndexError::TermOutOfRange { position: 1, .. }));
    }

    #[test]
    fn test_new_rejects_duplicate_index() {
        let terms = HashMap::from([("a1".to_string(), 0), ("b2".to_string(), 0)]);
        let err = Vocabulary::new(terms, vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, IndexError::DuplicateTermIndex { position: 0, .. }));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let terms = HashMap::from([("quantum".to_string(), 0)]);
        let err = Vocabulary::new(terms, vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::IdfLengthMismatch {
                terms: 1,
                weights: 2,
                ..
            }
        ));
    }
}
