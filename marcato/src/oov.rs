use crate::model::Model;

/// Configuration of the out-of-vocabulary word classifier.
///
/// The heuristic tables are given at construction, so multiple configurations can coexist
/// without interference.
#[derive(Clone)]
pub struct OovConfig {
    /// Suffix/tag rules tried in order. The first matching suffix decides the proxy tag.
    pub suffix_rules: Vec<(String, String)>,

    /// Proxy tag of words consisting entirely of numeric characters.
    pub numeral_tag: String,

    /// Proxy tag of words starting with an uppercase letter.
    pub proper_noun_tag: String,

    /// Proxy tag of words containing no alphanumeric character.
    pub punctuation_tag: String,

    /// Proxy tag used when the out-of-vocabulary distribution is empty.
    pub fallback_tag: String,
}

impl Default for OovConfig {
    fn default() -> Self {
        let suffix_rules = [
            ("able", "JJ"),
            ("ible", "JJ"),
            ("al", "JJ"),
            ("an", "JJ"),
            ("ar", "JJ"),
            ("ed", "VBD"),
            ("en", "VBN"),
            ("er", "JJR"),
            ("or", "NN"),
            ("est", "JJS"),
            ("ing", "VBG"),
            ("ish", "JJ"),
            ("ous", "JJ"),
            ("ful", "JJ"),
            ("less", "JJ"),
            ("ive", "JJ"),
            ("ly", "RB"),
            ("ment", "NN"),
            ("ness", "NN"),
            ("y", "JJ"),
        ];
        Self {
            suffix_rules: suffix_rules
                .iter()
                .map(|&(suffix, tag)| (suffix.to_string(), tag.to_string()))
                .collect(),
            numeral_tag: "CD".to_string(),
            proper_noun_tag: "NNP".to_string(),
            punctuation_tag: ".".to_string(),
            fallback_tag: "NN".to_string(),
        }
    }
}

/// Classifier assigning proxy tags to words unseen in training.
pub struct OovClassifier {
    config: OovConfig,
}

impl OovClassifier {
    /// Creates a new classifier.
    pub fn new(config: OovConfig) -> Self {
        Self { config }
    }

    /// Determines the proxy tag of an out-of-vocabulary word.
    ///
    /// The rules are tried in a fixed order, and the first match wins: the ordered suffix rules,
    /// then the numeral rule, then the uppercase rule, then the no-alphanumeric rule. When no rule
    /// matches, the tag maximizing the out-of-vocabulary distribution of `model` is returned,
    /// with ties broken by the tag enumeration order.
    pub fn classify<'a>(&'a self, word: &str, model: &'a Model) -> &'a str {
        for (suffix, tag) in &self.config.suffix_rules {
            if word.ends_with(suffix.as_str()) {
                return tag;
            }
        }
        if !word.is_empty() && word.chars().all(char::is_numeric) {
            return &self.config.numeral_tag;
        }
        if word.chars().next().map_or(false, char::is_uppercase) {
            return &self.config.proper_noun_tag;
        }
        if !word.chars().any(char::is_alphanumeric) {
            return &self.config.punctuation_tag;
        }
        let mut best = None;
        for (tag_id, &prob) in model.oov.iter().enumerate() {
            if best.map_or(true, |(_, best_prob)| prob > best_prob) {
                best = Some((tag_id, prob));
            }
        }
        match best {
            Some((tag_id, _)) => model.tags[tag_id].as_str(),
            None => self.config.fallback_tag.as_str(),
        }
    }
}
