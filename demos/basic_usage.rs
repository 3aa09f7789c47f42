use paperscout::{Corpus, CorpusArticle, CorpusJournal, IndexBuilder, RecommendOptions, Recommender};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    println!("=== paperscout Basic Usage Example ===\n");

    // A tiny corpus: two journals with a few articles each
    let corpus = Corpus {
        journals: vec![
            CorpusJournal::new("Journal of Quantum Information")
                .with_article(CorpusArticle::new(
                    "Intro to Quantum Computing",
                    "https://example.org/quantum/0",
                    "Qubits, superposition and quantum gates for computing.",
                ))
                .with_article(CorpusArticle::new(
                    "Surface Codes",
                    "https://example.org/quantum/1",
                    "Quantum error correction with topological surface codes.",
                )),
            CorpusJournal::new("Marine Biology Letters")
                .with_article(CorpusArticle::new(
                    "Kelp Forests",
                    "https://example.org/marine/0",
                    "Seaweed growth and coastal ecosystems.",
                ))
                .with_article(CorpusArticle::new(
                    "Coral Bleaching",
                    "https://example.org/marine/1",
                    "Ocean warming and coral reef decline.",
                )),
        ],
    };

    // Build the two-tier index in memory
    let index = IndexBuilder::new().build(&corpus)?;
    let stats = index.stats();
    println!(
        "✓ Indexed {} journals, {} articles\n",
        stats.total_journals, stats.total_articles
    );

    let recommender = Recommender::new(Arc::new(index), RecommendOptions::default())?;

    for query in ["quantum computing devices", "seaweed", "the of and"] {
        println!("--- Query: '{}' ---", query);
        match recommender.recommend(query) {
            Ok(articles) if articles.is_empty() => println!("No matches"),
            Ok(articles) => {
                for (i, article) in articles.iter().enumerate() {
                    println!("{}. {}", i + 1, article.title);
                    println!("   {}", article.url);
                }
            }
            Err(err) => println!("Rejected: {}", err),
        }
        println!();
    }

    // Explicit limits plus the scored trace
    let options = RecommendOptions {
        journal_threshold: 1,
        article_threshold: 1,
    };
    let trace = recommender.recommend_detailed("quantum error correction", &options)?;
    println!("Normalized query: '{}'", trace.normalized);
    for hit in &trace.hits {
        println!(
            "  [Score: {:.4}] journal {} article {}",
            hit.score, hit.journal_id, hit.article_id
        );
    }

    Ok(())
}
