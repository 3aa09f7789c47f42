use tracing::info;

use crate::document::{Corpus, CorpusJournal};
use crate::error::IndexError;
use crate::index::{ArticleCollection, ArticleMeta, Index, Journal};
use crate::tokenizer::Tokenizer;
use crate::vocabulary::Vocabulary;

/// Offline construction of an [`Index`] from raw journal/article text.
///
/// The journal vocabulary is fit over one document per journal (all of its
/// articles concatenated); each journal then gets its own article vocabulary
/// fit over that journal's articles only.
pub struct IndexBuilder {
    tokenizer: Tokenizer,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    pub fn build(&self, corpus: &Corpus) -> Result<Index, IndexError> {
        let journal_docs: Vec<String> = corpus
            .journals
            .iter()
            .map(CorpusJournal::searchable_text)
            .collect();
        let vocabulary = Vocabulary::fit(&journal_docs, &self.tokenizer);

        let journals = corpus
            .journals
            .iter()
            .zip(&journal_docs)
            .enumerate()
            .map(|(id, (journal, doc))| Journal {
                id,
                name: journal.name.clone(),
                vector: vocabulary.transform(doc, &self.tokenizer),
                articles: self.build_articles(journal),
            })
            .collect::<Vec<_>>();

        info!(
            journals = journals.len(),
            terms = vocabulary.len(),
            "built journal index"
        );

        Index::new(vocabulary, journals)
    }

    fn build_articles(&self, journal: &CorpusJournal) -> ArticleCollection {
        let docs: Vec<String> = journal
            .articles
            .iter()
            .map(|a| a.searchable_text())
            .collect();
        let vocabulary = Vocabulary::fit(&docs, &self.tokenizer);

        let vectors = docs
            .iter()
            .map(|doc| vocabulary.transform(doc, &self.tokenizer))
            .collect();
        let metadata = journal
            .articles
            .iter()
            .map(|a| ArticleMeta::new(a.title.clone(), a.url.clone()))
            .collect();

        ArticleCollection {
            vocabulary,
            vectors,
            metadata,
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CorpusArticle;

    fn corpus() -> Corpus {
        Corpus {
            journals: vec![
                CorpusJournal::new("Physics")
                    .with_article(CorpusArticle::new(
                        "Quantum entanglement",
                        "http://p/0",
                        "qubits and entanglement",
                    ))
                    .with_article(CorpusArticle::new(
                        "Laser optics",
                        "http://p/1",
                        "photons in cavities",
                    )),
                CorpusJournal::new("Biology")
                    .with_article(CorpusArticle::new(
                        "Cell division",
                        "http://b/0",
                        "mitosis in cells",
                    )),
            ],
        }
    }

    #[test]
    fn test_build_shapes() {
        let index = IndexBuilder::new().build(&corpus()).unwrap();

        assert_eq!(index.journals().len(), 2);
        let physics = index.journal(0).unwrap();
        assert_eq!(physics.name, "Physics");
        assert_eq!(physics.articles.len(), 2);
        assert_eq!(physics.articles.article(1).unwrap().url, "http://p/1");

        // Per-journal vocabularies are independent
        assert!(physics.articles.vocabulary.index_of("photons").is_some());
        assert!(index.journal(1).unwrap().articles.vocabulary.index_of("photons").is_none());
        assert!(index.vocabulary().index_of("mitosis").is_some());
    }

    #[test]
    fn test_built_vectors_are_unit_length() {
        let index = IndexBuilder::new().build(&corpus()).unwrap();
        for journal in index.journals() {
            assert!((journal.vector.norm() - 1.0).abs() < 1e-9);
            for v in &journal.articles.vectors {
                assert!((v.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_empty_corpus() {
        let index = IndexBuilder::new().build(&Corpus::default()).unwrap();
        assert!(index.journals().is_empty());
    }
}
