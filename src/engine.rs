use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{IndexError, RecommendError};
use crate::index::{Index, IndexStats, Journal};
use crate::normalizer::QueryNormalizer;
use crate::ranking::{rank_by_similarity, Scored};
use crate::tokenizer::Tokenizer;

/// Cascade limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendOptions {
    /// Max journals selected by the coarse pass.
    pub journal_threshold: usize,
    /// Max articles kept per selected journal.
    pub article_threshold: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            journal_threshold: 4,
            article_threshold: 10,
        }
    }
}

impl RecommendOptions {
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.journal_threshold == 0 {
            return Err(IndexError::InvalidThreshold {
                name: "journal_threshold",
            });
        }
        if self.article_threshold == 0 {
            return Err(IndexError::InvalidThreshold {
                name: "article_threshold",
            });
        }
        Ok(())
    }

    /// Upper bound on the number of returned records.
    pub fn max_results(&self) -> usize {
        self.journal_threshold * self.article_threshold
    }
}

/// Display record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    pub title: String,
    pub url: String,
    pub article_id: usize,
    pub journal_id: usize,
}

/// An article that survived the fine pass, with its similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredArticle {
    pub score: f64,
    pub article_id: usize,
    pub journal_id: usize,
}

/// Full trace of one query through the cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub normalized: String,
    /// Journals chosen by the coarse pass, best first.
    pub journals: Vec<Scored>,
    /// Merged article hits, in output order.
    pub hits: Vec<ScoredArticle>,
    pub articles: Vec<ArticleLink>,
}

/// Two-tier recommender over a shared, immutable [`Index`].
pub struct Recommender {
    index: Arc<Index>,
    options: RecommendOptions,
    normalizer: QueryNormalizer,
    tokenizer: Tokenizer,
}

impl Recommender {
    pub fn new(index: Arc<Index>, options: RecommendOptions) -> Result<Self, IndexError> {
        options.validate()?;
        Ok(Self {
            index,
            options,
            normalizer: QueryNormalizer::new(),
            tokenizer: Tokenizer::new(),
        })
    }

    pub fn options(&self) -> &RecommendOptions {
        &self.options
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Ranked article records for a raw query.
    ///
    /// No match at any stage gives an empty list; a query without content
    /// words gives [`RecommendError::InvalidQuery`].
    pub fn recommend(&self, raw_query: &str) -> Result<Vec<ArticleLink>, RecommendError> {
        self.recommend_detailed(raw_query, &self.options)
            .map(|r| r.articles)
    }

    /// Like [`Recommender::recommend`], with explicit limits and the scored trace.
    ///
    /// Zero limits give [`RecommendError::InvalidOptions`].
    pub fn recommend_detailed(
        &self,
        raw_query: &str,
        options: &RecommendOptions,
    ) -> Result<Recommendation, RecommendError> {
        options.validate()?;
        let normalized = self.normalizer.normalize(raw_query)?;
        debug!(query = raw_query, normalized = %normalized, "normalized query");

        let journals = self.select_journals(&normalized, options.journal_threshold);
        debug!(selected = journals.len(), "journal pass");

        let hits: Vec<ScoredArticle> = journals
            .par_iter()
            .filter_map(|s| self.index.journal(s.index))
            .flat_map_iter(|journal| {
                self.select_articles(journal, &normalized, options.article_threshold)
            })
            .collect();
        debug!(candidates = hits.len(), "article pass");

        let (hits, articles) = self.assemble(hits);

        Ok(Recommendation {
            normalized,
            journals,
            hits,
            articles,
        })
    }

    /// Coarse pass: journals most similar to the query in the journal term space.
    pub fn select_journals(&self, normalized: &str, limit: usize) -> Vec<Scored> {
        let query = self.index.vocabulary().transform(normalized, &self.tokenizer);
        rank_by_similarity(&query, self.index.journal_vectors(), limit)
    }

    /// Fine pass for one journal, in that journal's own article term space.
    pub fn select_articles(
        &self,
        journal: &Journal,
        normalized: &str,
        limit: usize,
    ) -> Vec<ScoredArticle> {
        let articles = &journal.articles;
        let query = articles.vocabulary.transform(normalized, &self.tokenizer);

        rank_by_similarity(&query, &articles.vectors, limit)
            .into_iter()
            .map(|s| ScoredArticle {
                score: s.score,
                article_id: s.index,
                journal_id: journal.id,
            })
            .collect()
    }

    /// Global ordering plus metadata lookup.
    ///
    /// Score descending, then journal id ascending, then article id ascending.
    fn assemble(&self, mut hits: Vec<ScoredArticle>) -> (Vec<ScoredArticle>, Vec<ArticleLink>) {
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.journal_id.cmp(&b.journal_id))
                .then(a.article_id.cmp(&b.article_id))
        });

        let articles = hits
            .iter()
            .filter_map(|hit| {
                let meta = self
                    .index
                    .journal(hit.journal_id)?
                    .articles
                    .article(hit.article_id)?;
                Some(ArticleLink {
                    title: meta.title.clone(),
                    url: meta.url.clone(),
                    article_id: hit.article_id,
                    journal_id: hit.journal_id,
                })
            })
            .collect();

        (hits, articles)
    }
}
