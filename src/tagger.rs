//! Part-of-speech tagging for query normalization.
//!
//! A closed-class lexicon, suffix rules for open-class words and a small set
//! of contextual corrections. Tags follow the Penn Treebank names so the
//! adjective (`JJ*`) and noun (`NN*`) families can be picked out by prefix.

use std::collections::HashMap;

use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Noun,
    PluralNoun,
    ProperNoun,
    Adjective,
    Comparative,
    Superlative,
    Verb,
    VerbPast,
    VerbGerund,
    VerbParticiple,
    VerbPresent,
    VerbThirdPerson,
    Modal,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Pronoun,
    PossessivePronoun,
    WhWord,
    To,
    Existential,
    Possessive,
    Number,
    Interjection,
    Punctuation,
}

impl Tag {
    pub fn penn(self) -> &'static str {
        match self {
            Tag::Noun => "NN",
            Tag::PluralNoun => "NNS",
            Tag::ProperNoun => "NNP",
            Tag::Adjective => "JJ",
            Tag::Comparative => "JJR",
            Tag::Superlative => "JJS",
            Tag::Verb => "VB",
            Tag::VerbPast => "VBD",
            Tag::VerbGerund => "VBG",
            Tag::VerbParticiple => "VBN",
            Tag::VerbPresent => "VBP",
            Tag::VerbThirdPerson => "VBZ",
            Tag::Modal => "MD",
            Tag::Adverb => "RB",
            Tag::Determiner => "DT",
            Tag::Preposition => "IN",
            Tag::Conjunction => "CC",
            Tag::Pronoun => "PRP",
            Tag::PossessivePronoun => "PRP$",
            Tag::WhWord => "WDT",
            Tag::To => "TO",
            Tag::Existential => "EX",
            Tag::Possessive => "POS",
            Tag::Number => "CD",
            Tag::Interjection => "UH",
            Tag::Punctuation => ".",
        }
    }

    pub fn is_noun(self) -> bool {
        self.penn().starts_with("NN")
    }

    pub fn is_adjective(self) -> bool {
        self.penn().starts_with("JJ")
    }

    /// Tags after which a word reads as the head of a noun phrase.
    fn opens_noun_phrase(self) -> bool {
        matches!(
            self,
            Tag::Determiner | Tag::PossessivePronoun | Tag::Possessive | Tag::Number
        ) || self.is_adjective()
    }
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "from", "up", "down", "over",
    "under", "since", "until", "upon", "within", "without", "among", "across", "toward",
    "towards", "via", "per", "than", "if", "because", "while", "although", "though", "whether",
    "as", "like", "near", "onto", "beyond", "despite", "throughout", "unlike", "versus", "vs",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "one", "something",
    "anything", "nothing", "everything", "someone", "anyone", "everyone",
];

const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const WH_WORDS: &[&str] = &[
    "what", "which", "who", "whom", "whose", "where", "when", "why", "how", "whatever",
    "whichever",
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would", "ca", "wo",
];

const ADVERBS: &[&str] = &[
    "not", "n't", "very", "also", "too", "just", "only", "really", "quite", "rather", "almost",
    "already", "always", "never", "often", "sometimes", "here", "now", "then", "again",
    "still", "even", "ever", "soon", "so", "however", "perhaps", "maybe", "well", "else",
    "together", "away",
];

const VERBS_PAST: &[&str] = &["was", "were", "had", "did", "went", "made", "said", "got"];

const VERBS_PARTICIPLE: &[&str] = &["been", "done", "gone", "known", "seen", "given", "taken"];

const VERBS: &[&str] = &[
    "be", "get", "make", "go", "know", "take", "see", "come", "think", "look", "want", "give",
    "find", "tell", "ask", "seem", "feel", "try", "leave", "call", "keep", "let", "begin",
    "help", "show", "hear", "play", "run", "move", "live", "believe", "bring", "happen",
    "write", "provide", "sit", "stand", "lose", "pay", "meet", "include", "continue", "learn",
    "lead", "understand", "watch", "follow", "stop", "create", "speak", "read", "allow", "add",
    "spend", "grow", "walk", "win", "offer", "remember", "consider", "appear", "buy", "wait",
    "serve", "die", "send", "expect", "build", "stay", "fall", "cut", "reach", "kill", "remain",
    "suggest", "raise", "pass", "sell", "require", "explain", "improve", "discover", "explore",
    "recommend", "search", "need", "compute",
];

const ADJECTIVES: &[&str] = &[
    "new", "good", "high", "old", "great", "big", "small", "large", "long", "young", "little",
    "important", "different", "early", "late", "hard", "major", "better", "best", "free",
    "full", "real", "strong", "whole", "true", "recent", "certain", "clear", "deep", "low",
    "open", "short", "simple", "quick", "fast", "slow", "wide", "rare", "common", "modern",
    "novel", "robust", "efficient", "main", "key", "general", "specific", "human", "social",
    "natural", "neural", "quantum", "dark", "hot", "cold", "green", "red", "blue", "black",
    "white", "wild", "safe", "smart", "rich", "poor", "public", "private", "global", "local",
    "urban", "rural", "fresh", "other", "same", "many", "much", "more", "most", "few",
    "several", "own", "next", "last", "first", "second", "third", "similar", "various",
];

const INTERJECTIONS: &[&str] = &["oh", "yes", "hello", "hi", "please", "ok", "okay", "wow"];

lazy_static::lazy_static! {
    static ref LEXICON: HashMap<&'static str, Tag> = {
        let groups: &[(Tag, &[&str])] = &[
            (Tag::Determiner, DETERMINERS),
            (Tag::Preposition, PREPOSITIONS),
            (Tag::Conjunction, CONJUNCTIONS),
            (Tag::Pronoun, PRONOUNS),
            (Tag::PossessivePronoun, POSSESSIVE_PRONOUNS),
            (Tag::WhWord, WH_WORDS),
            (Tag::To, &["to"]),
            (Tag::Existential, &["there"]),
            (Tag::Modal, MODALS),
            (Tag::Adverb, ADVERBS),
            (Tag::VerbPresent, &["am", "are", "have", "do"]),
            (Tag::VerbThirdPerson, &["is", "has", "does"]),
            (Tag::VerbPast, VERBS_PAST),
            (Tag::VerbParticiple, VERBS_PARTICIPLE),
            (Tag::VerbGerund, &["being", "having", "doing", "going"]),
            (Tag::Verb, VERBS),
            (Tag::Adjective, ADJECTIVES),
            (Tag::Interjection, INTERJECTIONS),
        ];
        let mut lexicon = HashMap::new();
        for (tag, words) in groups {
            for word in *words {
                lexicon.insert(*word, *tag);
            }
        }
        lexicon
    };
}

/// Open-class words whose adjective- or verb-looking suffix would mislead
/// the rules below.
const NOUN_EXCEPTIONS: &[&str] = &[
    "journal", "animal", "signal", "material", "proposal", "survival", "approval",
    "capital", "hospital", "interval", "arrival", "rival", "terminal", "potential",
    "chemical", "clinical", "individual", "manual", "principal", "criminal",
    "thing", "string", "ring", "king", "spring", "wing", "morning", "evening",
    "building", "meeting", "ceiling", "clothing", "offspring", "pudding", "sibling",
    "engineering", "computing", "programming", "learning", "marketing", "manufacturing",
    "nursing", "mining", "networking", "banking", "accounting", "modeling", "modelling",
    "processing", "planning", "training", "funding", "housing", "teaching", "farming",
    "fishing", "shipping", "printing", "painting", "writing", "reasoning", "forecasting",
    "seed", "speed", "bed", "feed", "creed", "bread", "shed", "hundred", "greed", "weed",
    "seaweed", "reed", "breed", "steed",
    "analysis", "basis", "thesis", "hypothesis", "synthesis", "diagnosis", "crisis",
    "physics", "mathematics", "economics", "genetics", "statistics", "ethics",
    "robotics", "linguistics", "politics", "electronics", "dynamics", "mechanics",
    "news", "series", "species", "bus", "virus", "status", "corpus", "focus", "campus",
    "apparatus", "nucleus", "stimulus", "consensus", "bonus", "census", "lens", "gas",
    "family", "body", "study", "policy", "theory", "technology", "biology", "energy",
    "history", "city", "society", "industry", "economy", "security", "privacy",
    "quality", "quantity", "ability", "community", "strategy", "therapy", "discovery",
    "delivery", "recovery", "battery", "memory", "library", "territory", "category",
    "summary", "dictionary", "inventory", "boundary", "salary", "anniversary",
    "beneficiary", "diary", "documentary", "glossary", "itinerary", "secretary",
    "sanctuary", "commentary", "vocabulary", "artery", "machinery",
];

/// Nouns that read as verbs after "to", a modal or a subject pronoun.
const VERB_NOUNS: &[&str] = &[
    "study", "work", "design", "control", "process", "report", "review", "test", "use",
    "change", "plan", "model", "measure", "increase", "decrease", "support", "answer",
    "focus", "impact", "effect", "result", "estimate", "survey",
];

/// Suffixes marking an adjective, checked in order.
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ical", "ous", "ful", "ive", "able", "ible", "less", "ish", "ic", "al", "ary", "ian",
    "ese", "esque", "oid", "ient", "ant", "ent", "ular", "like",
];

/// Suffixes marking a noun, checked before the adjective suffixes.
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ist", "ance", "ence", "ship", "hood",
    "dom", "ology", "graphy", "er", "or", "ure", "age", "ery", "logy", "nomy", "metry",
];

pub struct Tagger {
    tokenizer: Tokenizer,
}

impl Tagger {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Tokenize and tag raw text. Words keep their input spelling.
    pub fn tag(&self, text: &str) -> Vec<(String, Tag)> {
        let words = self.tokenizer.words(text);
        let tags = self.tag_words(&words);
        words.into_iter().zip(tags).collect()
    }

    /// Tag an already tokenized sentence.
    pub fn tag_words(&self, words: &[String]) -> Vec<Tag> {
        let mut tags: Vec<Tag> = words
            .iter()
            .enumerate()
            .map(|(position, word)| initial_tag(word, position == 0))
            .collect();
        apply_context_rules(words, &mut tags);
        tags
    }
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_tag(word: &str, sentence_start: bool) -> Tag {
    if word.chars().all(|c| !c.is_alphanumeric()) {
        return Tag::Punctuation;
    }

    let lower = word.to_lowercase();
    if lower == "'s" {
        return Tag::Possessive;
    }
    if let Some(tag) = LEXICON.get(lower.as_str()) {
        return *tag;
    }
    if is_number(&lower) {
        return Tag::Number;
    }
    if NOUN_EXCEPTIONS.contains(&lower.as_str()) {
        return Tag::Noun;
    }

    let capitalized = word.chars().next().map_or(false, char::is_uppercase);
    if capitalized && !sentence_start {
        return Tag::ProperNoun;
    }

    suffix_tag(&lower)
}

fn suffix_tag(lower: &str) -> Tag {
    let len = lower.chars().count();

    if len > 4 && lower.ends_with("ing") {
        return Tag::VerbGerund;
    }
    if len > 3 && lower.ends_with("ly") {
        return Tag::Adverb;
    }
    if len > 4 && lower.ends_with("est") {
        return Tag::Superlative;
    }
    if len > 3 && lower.ends_with("ed") {
        return Tag::VerbPast;
    }
    if len > 4 && (lower.ends_with("ize") || lower.ends_with("ise") || lower.ends_with("ify")) {
        return Tag::Verb;
    }

    if len > 3 && lower.ends_with('s') && !ends_with_any(lower, &["ss", "us", "is"]) {
        let singular = &lower[..lower.len() - 1];
        return match LEXICON.get(singular) {
            Some(Tag::Verb) => Tag::VerbThirdPerson,
            _ => Tag::PluralNoun,
        };
    }

    if len > 5 && ends_with_any(lower, NOUN_SUFFIXES) {
        return Tag::Noun;
    }
    if len > 4 && ends_with_any(lower, ADJECTIVE_SUFFIXES) {
        return Tag::Adjective;
    }

    Tag::Noun
}

/// Contextual corrections over the initial, word-local tags.
fn apply_context_rules(words: &[String], tags: &mut [Tag]) {
    for i in 0..tags.len() {
        let prev = if i > 0 { Some(tags[i - 1]) } else { None };
        let next = tags.get(i + 1).copied();
        let lower = words[i].to_lowercase();

        tags[i] = match tags[i] {
            // "the running", "data cleaning", "cleaning tools"
            Tag::VerbGerund => {
                if prev.map_or(false, |p| p.opens_noun_phrase() || p.is_noun()) {
                    Tag::Noun
                } else if next.map_or(false, Tag::is_noun) {
                    Tag::Adjective
                } else {
                    Tag::VerbGerund
                }
            }
            // "the proposed method", "supervised learning", "has improved"
            Tag::VerbPast | Tag::VerbParticiple => {
                if prev.map_or(false, Tag::opens_noun_phrase)
                    || next.map_or(false, |n| n.is_noun() || n == Tag::VerbGerund)
                {
                    Tag::Adjective
                } else if i > 0 && (is_auxiliary(&words[i - 1]) || prev == Some(Tag::Modal)) {
                    Tag::VerbParticiple
                } else {
                    tags[i]
                }
            }
            // "to study", "can model", "we design"
            Tag::Noun
                if VERB_NOUNS.contains(&lower.as_str())
                    && matches!(prev, Some(Tag::To) | Some(Tag::Modal) | Some(Tag::Pronoun)) =>
            {
                Tag::Verb
            }
            Tag::PluralNoun if prev == Some(Tag::Pronoun) => Tag::VerbThirdPerson,
            // "the run", "a study", "for search engines"
            Tag::Verb if prev.map_or(false, Tag::opens_noun_phrase) => Tag::Noun,
            Tag::Verb
                if next.map_or(false, Tag::is_noun)
                    && matches!(
                        prev,
                        Some(Tag::Preposition) | Some(Tag::Conjunction) | Some(Tag::Punctuation)
                    ) =>
            {
                Tag::Noun
            }
            Tag::VerbThirdPerson if prev.map_or(false, Tag::opens_noun_phrase) => Tag::PluralNoun,
            tag => tag,
        };
    }
}

fn is_auxiliary(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "is" | "are" | "was" | "were" | "be" | "been" | "being" | "has" | "have" | "had" | "am"
    )
}

fn is_number(lower: &str) -> bool {
    lower.chars().any(|c| c.is_ascii_digit())
        && lower
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/' | '%'))
}

fn ends_with_any(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| word.ends_with(s))
}
