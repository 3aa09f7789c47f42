use crate::error::RecommendError;
use crate::tagger::Tagger;

/// Reduces a free-text query to its content words.
pub struct QueryNormalizer {
    tagger: Tagger,
}

impl QueryNormalizer {
    pub fn new() -> Self {
        Self {
            tagger: Tagger::new(),
        }
    }

    /// Adjectives first, then nouns, each group in input order.
    ///
    /// Fails with [`RecommendError::InvalidQuery`] when neither group has a word.
    pub fn normalize(&self, text: &str) -> Result<String, RecommendError> {
        let tagged = self.tagger.tag(text);

        let adjectives: Vec<&str> = tagged
            .iter()
            .filter(|(_, tag)| tag.is_adjective())
            .map(|(word, _)| word.as_str())
            .collect();
        let nouns: Vec<&str> = tagged
            .iter()
            .filter(|(_, tag)| tag.is_noun())
            .map(|(word, _)| word.as_str())
            .collect();

        if adjectives.is_empty() && nouns.is_empty() {
            return Err(RecommendError::InvalidQuery);
        }

        Ok(format!("{} {}", adjectives.join(" "), nouns.join(" "))
            .trim()
            .to_string())
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
