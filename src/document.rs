use serde::{Deserialize, Serialize};

/// Raw corpus accepted by the offline index builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub journals: Vec<CorpusJournal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusJournal {
    #[serde(default)]
    pub name: String,
    pub articles: Vec<CorpusArticle>,
}

/// One article as supplied to the builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusArticle {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "abstract", alias = "text", default)]
    pub text: String,
}

impl CorpusArticle {
    pub fn new(title: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            text: text.into(),
        }
    }

    /// Get the full searchable text (title + abstract)
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.text)
    }
}

impl CorpusJournal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            articles: Vec::new(),
        }
    }

    pub fn with_article(mut self, article: CorpusArticle) -> Self {
        self.articles.push(article);
        self
    }

    /// All articles of the journal concatenated into one document.
    pub fn searchable_text(&self) -> String {
        self.articles
            .iter()
            .map(CorpusArticle::searchable_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_accepts_text_or_abstract() {
        let a: CorpusArticle =
            serde_json::from_str(r#"{"title":"T","url":"u","text":"body"}"#).unwrap();
        let b: CorpusArticle = serde_json::from_str(r#"{"title":"T","abstract":"body"}"#).unwrap();
        assert_eq!(a.text, "body");
        assert_eq!(b.text, "body");
        assert_eq!(b.url, "");
    }

    #[test]
    fn test_journal_searchable_text() {
        let journal = CorpusJournal::new("Physics")
            .with_article(CorpusArticle::new("Qubits", "http://x/0", "superposition"))
            .with_article(CorpusArticle::new("Lasers", "http://x/1", "photons"));
        assert_eq!(journal.searchable_text(), "Qubits superposition Lasers photons");
    }
}
