use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use paperscout::api::{create_router, INVALID_QUERY_MESSAGE, NO_MATCHES_MESSAGE};
use paperscout::storage::load_corpus;
use paperscout::{IndexBuilder, RecommendError, RecommendOptions, Recommender, Storage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Research article recommender over a journal index",
    long_about = None
)]
struct Cli {
    /// Path of the sled database holding the index
    #[arg(long, env = "PAPERSCOUT_DB", default_value = "paperscout.db", global = true)]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the index from a JSON corpus (optionally .gz) and store it
    Index {
        #[arg(short, long)]
        corpus: String,
    },
    /// Recommend articles for a query
    Query {
        query: String,
        #[command(flatten)]
        limits: Limits,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "PAPERSCOUT_ADDR", default_value = "0.0.0.0:3000")]
        addr: SocketAddr,
        #[command(flatten)]
        limits: Limits,
    },
    /// Print index statistics
    Stats,
}

#[derive(Args, Debug, Clone, Copy)]
struct Limits {
    /// Max journals considered per query
    #[arg(long, env = "PAPERSCOUT_JOURNAL_THRESHOLD", default_value_t = 4)]
    journal_threshold: usize,
    /// Max articles returned per selected journal
    #[arg(long, env = "PAPERSCOUT_ARTICLE_THRESHOLD", default_value_t = 10)]
    article_threshold: usize,
}

impl From<Limits> for RecommendOptions {
    fn from(limits: Limits) -> Self {
        Self {
            journal_threshold: limits.journal_threshold,
            article_threshold: limits.article_threshold,
        }
    }
}

/// Open the database and build a recommender; a missing or malformed index is fatal.
fn load_recommender(db: &str, options: RecommendOptions) -> Result<Recommender> {
    let storage = Storage::open(db)?;
    let start = Instant::now();
    let Some(index) = storage.load_index()? else {
        bail!("No index in {}; run `paperscout index --corpus <file>` first", db);
    };
    tracing::info!(
        journals = index.journals().len(),
        elapsed = ?start.elapsed(),
        "loaded index"
    );
    Ok(Recommender::new(Arc::new(index), options)?)
}

fn build_index(db: &str, corpus_path: &str) -> Result<()> {
    let start = Instant::now();
    let corpus = load_corpus(corpus_path)?;
    let index = IndexBuilder::new()
        .build(&corpus)
        .context("Corpus produced an invalid index")?;
    println!(
        "Indexed {} journals in {:?}",
        index.journals().len(),
        start.elapsed()
    );

    let storage = Storage::open(db)?;
    storage.replace_index(&index, corpus_path)?;
    Ok(())
}

fn run_query(recommender: &Recommender, query: &str) -> Result<()> {
    let start = Instant::now();
    let outcome = recommender.recommend(query);
    let duration = start.elapsed();

    match outcome {
        Err(RecommendError::InvalidQuery) => {
            println!("{}", INVALID_QUERY_MESSAGE);
        }
        Err(err) => return Err(err.into()),
        Ok(articles) if articles.is_empty() => {
            println!("{}", NO_MATCHES_MESSAGE);
        }
        Ok(articles) => {
            println!("Found {} articles in {:?}", articles.len(), duration);
            println!();
            for (i, article) in articles.iter().enumerate() {
                println!("{}. {}", i + 1, article.title);
                println!("   {}", article.url);
                println!(
                    "   Article ID: {} | Journal ID: {}",
                    article.article_id, article.journal_id
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paperscout=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Index { corpus } => build_index(&cli.db, &corpus)?,
        Command::Query { query, limits } => {
            let recommender = load_recommender(&cli.db, limits.into())?;
            run_query(&recommender, &query)?;
        }
        Command::Serve { addr, limits } => {
            let recommender = load_recommender(&cli.db, limits.into())?;
            let app = create_router(Arc::new(recommender));
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(%addr, "server listening");
            axum::serve(listener, app).await?;
        }
        Command::Stats => {
            let storage = Storage::open(&cli.db)?;
            let Some(index) = storage.load_index()? else {
                bail!("No index in {}", cli.db);
            };
            let stats = index.stats();
            println!("Journals: {}", stats.total_journals);
            println!("Articles: {}", stats.total_articles);
            println!("Journal vocabulary terms: {}", stats.journal_terms);
            println!("Average article vocabulary terms: {:.2}", stats.avg_article_terms);
            if let Some(corpus) = storage.corpus_source()? {
                println!("Built from: {}", corpus);
            }
        }
    }

    Ok(())
}
