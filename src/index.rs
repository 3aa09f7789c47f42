use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::vector::SparseVector;
use crate::vocabulary::Vocabulary;

/// Display metadata for one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub title: String,
    pub url: String,
}

impl ArticleMeta {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Articles of a single journal, in that journal's own term space.
///
/// Row `i` of `vectors` and `metadata` both describe article id `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCollection {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<SparseVector>,
    pub metadata: Vec<ArticleMeta>,
}

impl ArticleCollection {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn article(&self, article_id: usize) -> Option<&ArticleMeta> {
        self.metadata.get(article_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: usize,
    #[serde(default)]
    pub name: String,
    /// Aggregate vector in the journal-level vocabulary.
    pub vector: SparseVector,
    pub articles: ArticleCollection,
}

/// The complete, read-only retrieval index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    vocabulary: Vocabulary,
    journals: Vec<Journal>,
}

impl Index {
    /// Validate artifacts and assemble the index.
    ///
    /// Any shape or weight defect is reported here, never at query time.
    pub fn new(vocabulary: Vocabulary, journals: Vec<Journal>) -> Result<Self, IndexError> {
        let index = Self { vocabulary, journals };
        index.validate()?;
        Ok(index)
    }

    /// Re-run validation on an index restored from storage.
    pub fn from_stored(stored: Index) -> Result<Self, IndexError> {
        Self::new(stored.vocabulary, stored.journals)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn journals(&self) -> &[Journal] {
        &self.journals
    }

    pub fn journal(&self, journal_id: usize) -> Option<&Journal> {
        self.journals.get(journal_id)
    }

    /// One row per journal, aligned with journal ids.
    pub fn journal_vectors(&self) -> impl Iterator<Item = &SparseVector> {
        self.journals.iter().map(|j| &j.vector)
    }

    fn validate(&self) -> Result<(), IndexError> {
        self.vocabulary.validate("journal vocabulary")?;
        let dimension = self.vocabulary.len();

        for (position, journal) in self.journals.iter().enumerate() {
            if journal.id != position {
                return Err(IndexError::JournalIdMismatch {
                    position,
                    id: journal.id,
                });
            }
            journal.vector.validate("journal vectors", position, dimension)?;

            let scope = format!("journal {} articles", journal.id);
            let articles = &journal.articles;
            articles.vocabulary.validate(&scope)?;
            if articles.vectors.len() != articles.metadata.len() {
                return Err(IndexError::MetadataMismatch {
                    journal_id: journal.id,
                    vectors: articles.vectors.len(),
                    metadata: articles.metadata.len(),
                });
            }
            for (row, vector) in articles.vectors.iter().enumerate() {
                vector.validate(&scope, row, articles.vocabulary.len())?;
            }
        }

        Ok(())
    }

    pub fn stats(&self) -> IndexStats {
        let total_articles = self.journals.iter().map(|j| j.articles.len()).sum();
        IndexStats {
            total_journals: self.journals.len(),
            total_articles,
            journal_terms: self.vocabulary.len(),
            avg_article_terms: if self.journals.is_empty() {
                0.0
            } else {
                self.journals
                    .iter()
                    .map(|j| j.articles.vocabulary.len())
                    .sum::<usize>() as f64
                    / self.journals.len() as f64
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_journals: usize,
    pub total_articles: usize,
    pub journal_terms: usize,
    /// Mean size of the per-journal article vocabularies.
    pub avg_article_terms: f64,
}
