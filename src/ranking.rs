use crate::vector::SparseVector;

/// A candidate row that scored above zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub index: usize,
    pub score: f64,
}

impl Scored {
    pub fn new(index: usize, score: f64) -> Self {
        Self { index, score }
    }
}

/// Rank candidate rows by cosine similarity to `query`.
///
/// Rows scoring 0 or less are dropped. At most `limit` rows are returned,
/// best first; equal scores keep ascending row order.
pub fn rank_by_similarity<'a, I>(query: &SparseVector, candidates: I, limit: usize) -> Vec<Scored>
where
    I: IntoIterator<Item = &'a SparseVector>,
{
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<Scored> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| Scored::new(index, query.cosine(candidate)))
        .filter(|s| s.score > 0.0)
        .collect();

    // Sort by score descending, then row ascending
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    scored.truncate(limit);

    scored
}
