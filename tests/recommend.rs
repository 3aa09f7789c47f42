use paperscout::{
    ArticleCollection, ArticleLink, ArticleMeta, Corpus, CorpusArticle, CorpusJournal, Index,
    IndexBuilder, Journal, RecommendError, RecommendOptions, Recommender, SparseVector, Vocabulary,
};
use std::collections::HashMap;
use std::sync::Arc;

fn vocabulary(terms: &[&str]) -> Vocabulary {
    let map = terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i as u32))
        .collect::<HashMap<_, _>>();
    Vocabulary::new(map, vec![1.0; terms.len()]).unwrap()
}

fn library() -> Corpus {
    let journal = |name: &str, articles: &[(&str, &str)]| {
        articles
            .iter()
            .enumerate()
            .fold(CorpusJournal::new(name), |j, (i, (title, text))| {
                j.with_article(CorpusArticle::new(*title, format!("http://{}/{}", name, i), *text))
            })
    };

    Corpus {
        journals: vec![
            journal("physics", &[
                ("Quantum error correction", "surface codes protect quantum information"),
                ("Quantum computing hardware", "superconducting qubits and quantum gates"),
                ("Laser cooling", "cold atoms trapped with laser light"),
                ("Dark matter searches", "detectors for weakly interacting particles"),
            ]),
            journal("computing", &[
                ("Neural networks for vision", "deep convolutional networks classify images"),
                ("Quantum algorithms", "quantum speedup for search and factoring"),
                ("Distributed databases", "replication and consensus in storage systems"),
                ("Compiler optimization", "register allocation and loop transformations"),
                ("Neural machine translation", "sequence models translate languages"),
            ]),
            journal("biology", &[
                ("Protein folding", "structure prediction of protein chains"),
                ("Neural development", "growth of neural circuits in embryos"),
                ("Marine ecology", "coral reef ecosystems and fish populations"),
            ]),
            journal("chemistry", &[
                ("Catalysis", "metal catalysts for green synthesis"),
                ("Quantum chemistry", "electronic structure with density functional theory"),
            ]),
            journal("geology", &[
                ("Volcanic eruptions", "magma chambers and eruption forecasting"),
            ]),
        ],
    }
}

fn recommender(options: RecommendOptions) -> Recommender {
    let index = IndexBuilder::new().build(&library()).unwrap();
    Recommender::new(Arc::new(index), options).unwrap()
}

const QUERIES: &[&str] = &[
    "quantum computing",
    "neural networks",
    "deep neural structure",
    "protein structure prediction",
    "quantum chemistry theory",
    "marine ecosystems",
    "volcanic eruptions",
];

#[test]
fn test_content_free_queries_are_invalid() {
    let recommender = recommender(RecommendOptions::default());
    for query in ["the of and", "", "   ", "?!", "running", "to and from"] {
        assert_eq!(recommender.recommend(query), Err(RecommendError::InvalidQuery), "{query:?}");
    }
}

#[test]
fn test_result_length_is_bounded() {
    let options = RecommendOptions {
        journal_threshold: 2,
        article_threshold: 2,
    };
    let recommender = recommender(options);
    for query in QUERIES {
        let results = recommender.recommend(query).unwrap();
        assert!(results.len() <= options.max_results(), "{query}");
    }
}

#[test]
fn test_results_sorted_and_positive() {
    let recommender = recommender(RecommendOptions::default());
    for query in QUERIES {
        let trace = recommender
            .recommend_detailed(query, recommender.options())
            .unwrap();

        assert!(trace.journals.iter().all(|j| j.score > 0.0), "{query}");
        assert!(trace.hits.iter().all(|h| h.score > 0.0 && h.score <= 1.0), "{query}");
        assert!(
            trace.hits.windows(2).all(|w| w[0].score >= w[1].score),
            "{query}"
        );

        // Every hit comes from a journal picked by the coarse pass
        for hit in &trace.hits {
            assert!(trace.journals.iter().any(|j| j.index == hit.journal_id));
        }
        assert_eq!(trace.hits.len(), trace.articles.len());
    }
}

#[test]
fn test_quantum_query_spans_journals() {
    let recommender = recommender(RecommendOptions::default());
    let results = recommender.recommend("quantum computing").unwrap();

    let journals: Vec<usize> = results.iter().map(|r| r.journal_id).collect();
    assert!(journals.contains(&0));
    assert!(journals.contains(&1));
    assert!(!journals.contains(&4));
}

#[test]
fn test_journal_threshold_limits_journals() {
    let options = RecommendOptions {
        journal_threshold: 1,
        article_threshold: 10,
    };
    let recommender = recommender(options);
    let trace = recommender.recommend_detailed("quantum", &options).unwrap();

    assert_eq!(trace.journals.len(), 1);
    let first = trace.journals[0].index;
    assert!(trace.hits.iter().all(|h| h.journal_id == first));
}

#[test]
fn test_recommend_is_deterministic() {
    let recommender = recommender(RecommendOptions::default());
    for query in QUERIES {
        let first = recommender.recommend(query).unwrap();
        for _ in 0..5 {
            assert_eq!(recommender.recommend(query).unwrap(), first);
        }
    }
}

#[test]
fn test_exact_single_term_match_ranks_first() {
    let journal = |id: usize, vector: &[f64], term: &str, title: &str| Journal {
        id,
        name: term.to_string(),
        vector: SparseVector::from_dense(vector),
        articles: ArticleCollection {
            vocabulary: vocabulary(&[term]),
            vectors: vec![SparseVector::from_dense(&[1.0])],
            metadata: vec![ArticleMeta::new(title, format!("http://{}/0", term))],
        },
    };

    let graphene = journal(0, &[1.0, 0.0], "graphene", "Graphene");
    let other = journal(1, &[0.0, 1.0], "zeolite", "Zeolites");

    let index = Index::new(vocabulary(&["graphene", "zeolite"]), vec![graphene, other]).unwrap();
    let recommender = Recommender::new(Arc::new(index), RecommendOptions::default()).unwrap();

    let trace = recommender
        .recommend_detailed("graphene", recommender.options())
        .unwrap();
    assert_eq!(trace.articles.len(), 1);
    assert_eq!(trace.articles[0].title, "Graphene");
    assert!((trace.hits[0].score - 1.0).abs() < 1e-12);
}

#[test]
fn test_quantum_computing_scenario() {
    let journal = Journal {
        id: 0,
        name: "J0".to_string(),
        vector: SparseVector::from_dense(&[1.0, 1.0]),
        articles: ArticleCollection {
            vocabulary: vocabulary(&["quantum", "computing"]),
            vectors: vec![SparseVector::from_dense(&[1.0, 1.0])],
            metadata: vec![ArticleMeta::new("Intro to Quantum Computing", "http://x/0")],
        },
    };
    let index = Index::new(vocabulary(&["quantum", "computing"]), vec![journal]).unwrap();
    let recommender = Recommender::new(Arc::new(index), RecommendOptions::default()).unwrap();

    assert_eq!(
        recommender.recommend("quantum computing devices").unwrap(),
        vec![ArticleLink {
            title: "Intro to Quantum Computing".to_string(),
            url: "http://x/0".to_string(),
            article_id: 0,
            journal_id: 0,
        }]
    );
}

#[test]
fn test_concurrent_queries_share_one_index() {
    let recommender = Arc::new(recommender(RecommendOptions::default()));
    let expected = recommender.recommend("neural networks").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let recommender = Arc::clone(&recommender);
            std::thread::spawn(move || recommender.recommend("neural networks").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
