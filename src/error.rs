use thiserror::Error;

/// Errors observable by callers of [`crate::Recommender::recommend`].
///
/// An empty result is not an error: it is an empty `Vec`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    #[error("query contains no content words (adjectives or nouns)")]
    InvalidQuery,

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] IndexError),
}

/// Malformed index artifacts or configuration, detected at load time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndexError {
    #[error("{scope}: vocabulary has {terms} terms but {weights} idf weights")]
    IdfLengthMismatch {
        scope: String,
        terms: usize,
        weights: usize,
    },

    #[error("{scope}: term '{term}' maps to index {position}, outside dimension {dimension}")]
    TermOutOfRange {
        scope: String,
        term: String,
        position: usize,
        dimension: usize,
    },

    #[error("{scope}: index {position} is assigned to more than one term")]
    DuplicateTermIndex { scope: String, position: usize },

    #[error("{scope}: invalid idf weight {weight} at index {position}")]
    InvalidIdf {
        scope: String,
        position: usize,
        weight: f64,
    },

    #[error("{scope}: row {row} references term {position}, outside dimension {dimension}")]
    DimensionMismatch {
        scope: String,
        row: usize,
        position: usize,
        dimension: usize,
    },

    #[error("{scope}: row {row} has invalid weight {weight}")]
    InvalidWeight {
        scope: String,
        row: usize,
        weight: f64,
    },

    #[error("{scope}: row {row} is not sorted by term index or repeats a term")]
    UnsortedVector { scope: String, row: usize },

    #[error("journal {journal_id}: {vectors} article vectors but {metadata} metadata rows")]
    MetadataMismatch {
        journal_id: usize,
        vectors: usize,
        metadata: usize,
    },

    #[error("journal at position {position} carries id {id}")]
    JournalIdMismatch { position: usize, id: usize },

    #[error("{name} must be positive")]
    InvalidThreshold { name: &'static str },
}
