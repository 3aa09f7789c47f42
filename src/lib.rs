// Re-export main components
pub mod api;
pub mod builder;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod normalizer;
pub mod ranking;
pub mod storage;
pub mod tagger;
pub mod tokenizer;
pub mod vector;
pub mod vocabulary;

// Re-export commonly used types
pub use builder::IndexBuilder;
pub use document::{Corpus, CorpusArticle, CorpusJournal};
pub use engine::{ArticleLink, RecommendOptions, Recommendation, Recommender, ScoredArticle};
pub use error::{IndexError, RecommendError};
pub use index::{ArticleCollection, ArticleMeta, Index, IndexStats, Journal};
pub use normalizer::QueryNormalizer;
pub use storage::Storage;
pub use tokenizer::Tokenizer;
pub use vector::SparseVector;
pub use vocabulary::Vocabulary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::Arc;

    #[test]
    fn test_basic_workflow() -> Result<()> {
        let corpus = Corpus {
            journals: vec![CorpusJournal::new("Computing").with_article(CorpusArticle::new(
                "Rust Programming Language",
                "https://www.rust-lang.org",
                "Rust is a blazingly fast and memory-efficient language",
            ))],
        };

        let index = IndexBuilder::new().build(&corpus)?;
        let storage = Storage::in_memory()?;
        storage.save_index(&index)?;

        let index = storage.load_index()?.expect("index was saved");
        let recommender = Recommender::new(Arc::new(index), RecommendOptions::default())?;

        let results = recommender.recommend("fast programming language")?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://www.rust-lang.org");

        Ok(())
    }
}
