use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::model::Model;
use crate::utils::{SerializableHashMap, SerializableHashSet};

pub struct Indexer<K> {
    ids: HashMap<K, usize>,
    keys: Vec<K>,
}

impl<K> Indexer<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            keys: vec![],
        }
    }

    pub fn get_id<Q: ?Sized>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Eq + Hash,
    {
        if let Some(&id) = self.ids.get(key) {
            id
        } else {
            let id = self.ids.len();
            self.keys.push(key.to_owned());
            self.ids.insert(key.to_owned(), id);
            id
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

/// Trainer.
///
/// A trainer accumulates frequency tables over tagged sentences and estimates the probability
/// model in a single pass. Tags are numbered in the order of their first occurrence, and this
/// order is kept in the model as the canonical tie-break order of the decoder.
///
/// # Examples
///
/// ```
/// use marcato::{CorpusReader, Predictor, Trainer};
///
/// let corpus = "Dogs\tNNS\nrun\tVBP\n\nCats\tNNS\nsleep\tVBP\n";
/// let mut reader = CorpusReader::new(corpus.as_bytes());
/// let mut trainer = Trainer::new();
/// while let Some(sentence) = reader.next_sentence().unwrap() {
///     trainer.push_sentence(&sentence);
/// }
///
/// let model = trainer.train();
/// let predictor = Predictor::new(model);
/// let tags = predictor.predict(&["Dogs", "run"]).unwrap();
/// assert_eq!(vec!["NNS", "VBP"], tags);
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "train")))]
pub struct Trainer {
    tags: Indexer<String>,
    tag_counts: Vec<u64>,
    word_tag_counts: Vec<HashMap<String, u64>>,
    bigram_counts: Vec<HashMap<usize, u64>>,
    vocab: HashSet<String>,
    rare_words: HashMap<String, Option<usize>>,
    n_tokens: u64,
}

impl Trainer {
    /// Creates a new trainer.
    pub fn new() -> Self {
        Self {
            tags: Indexer::new(),
            tag_counts: vec![],
            word_tag_counts: vec![],
            bigram_counts: vec![],
            vocab: HashSet::new(),
            rare_words: HashMap::new(),
            n_tokens: 0,
        }
    }

    /// Adds a sentence to the training data.
    ///
    /// # Arguments
    ///
    /// * `sentence` - Word/tag pairs of a sentence.
    pub fn push_sentence(&mut self, sentence: &[(String, String)]) {
        let mut prev_id: Option<usize> = None;
        for (word, tag) in sentence {
            let tag_id = self.tags.get_id(tag.as_str());
            if tag_id == self.tag_counts.len() {
                self.tag_counts.push(0);
                self.word_tag_counts.push(HashMap::new());
                self.bigram_counts.push(HashMap::new());
            }
            self.tag_counts[tag_id] += 1;
            *self.word_tag_counts[tag_id].entry(word.clone()).or_insert(0) += 1;
            if let Some(prev_id) = prev_id {
                *self.bigram_counts[prev_id].entry(tag_id).or_insert(0) += 1;
            }
            prev_id = Some(tag_id);
            self.vocab.insert(word.clone());
            // Words seen more than once are struck from the singleton index for good, whatever
            // their tags.
            self.rare_words
                .entry(word.clone())
                .and_modify(|first_tag| *first_tag = None)
                .or_insert(Some(tag_id));
            self.n_tokens += 1;
        }
    }

    /// Estimates the probability tables from the accumulated counts.
    ///
    /// Each stored probability is the relative frequency of an observed event, so every prior,
    /// transition, and emission row sums to 1 where it is defined. The out-of-vocabulary
    /// distribution is estimated from the tags of words seen exactly once, falling back to the
    /// uniform distribution when no such word exists.
    ///
    /// # Returns
    ///
    /// A trained model. Training data without a single token yields a model with an empty tag
    /// set, which the predictor refuses to decode with.
    pub fn train(self) -> Model {
        let n_tags = self.tags.len();
        let n_tokens = self.n_tokens as f64;

        let priors = self
            .tag_counts
            .iter()
            .map(|&count| count as f64 / n_tokens)
            .collect();

        let mut transitions = Vec::with_capacity(n_tags);
        for row in &self.bigram_counts {
            let total: u64 = row.values().sum();
            let mut probs = HashMap::with_capacity(row.len());
            for (&next_id, &count) in row {
                probs.insert(next_id, count as f64 / total as f64);
            }
            transitions.push(SerializableHashMap(probs));
        }

        let mut likelihoods = Vec::with_capacity(n_tags);
        for (tag_id, row) in self.word_tag_counts.iter().enumerate() {
            let tag_count = self.tag_counts[tag_id] as f64;
            let mut probs = HashMap::with_capacity(row.len());
            for (word, &count) in row {
                probs.insert(word.clone(), count as f64 / tag_count);
            }
            likelihoods.push(SerializableHashMap(probs));
        }

        let mut singleton_counts = vec![0u64; n_tags];
        let mut n_singletons = 0u64;
        for &tag_id in self.rare_words.values().flatten() {
            singleton_counts[tag_id] += 1;
            n_singletons += 1;
        }
        let oov = if n_tags == 0 {
            vec![]
        } else if n_singletons == 0 {
            vec![1.0 / n_tags as f64; n_tags]
        } else {
            singleton_counts
                .iter()
                .map(|&count| count as f64 / n_singletons as f64)
                .collect()
        };

        Model {
            tags: self.tags.keys().to_vec(),
            priors,
            transitions,
            likelihoods,
            oov,
            vocab: SerializableHashSet(self.vocab),
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::corpus::CorpusReader;

    fn train_from(corpus: &str) -> Model {
        let mut reader = CorpusReader::new(corpus.as_bytes());
        let mut trainer = Trainer::new();
        while let Some(sentence) = reader.next_sentence().unwrap() {
            trainer.push_sentence(&sentence);
        }
        trainer.train()
    }

    #[test]
    fn test_trainer_tags_in_first_seen_order() {
        let model = train_from("a\tX\nb\tY\n\nc\tX\nd\tZ\n");

        assert_eq!(&["X", "Y", "Z"], model.tags());
    }

    #[test]
    fn test_trainer_prior_probabilities() {
        let model = train_from("Dogs\tNNS\nrun\tVBP\n\nCats\tNNS\nsleep\tVBP\n");

        assert_eq!(&[0.5, 0.5], model.prior_probabilities());
    }

    #[test]
    fn test_trainer_rows_sum_to_one() {
        let corpus = "the\tDT\ndog\tNN\nbarks\tVBZ\n\nthe\tDT\ncat\tNN\nsleeps\tVBZ\n\na\tDT\ndog\tNN\n";
        let model = train_from(corpus);

        let priors: f64 = model.prior_probabilities().iter().sum();
        assert!((priors - 1.0).abs() < 1e-9);

        for row in &model.transitions {
            if !row.is_empty() {
                let total: f64 = row.values().sum();
                assert!((total - 1.0).abs() < 1e-9);
            }
        }
        for row in &model.likelihoods {
            if !row.is_empty() {
                let total: f64 = row.values().sum();
                assert!((total - 1.0).abs() < 1e-9);
            }
        }
        let oov: f64 = model.oov_probabilities().iter().sum();
        assert!((oov - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trainer_transitions_ignore_sentence_final_positions() {
        // "dog"/NN ends the last sentence, but the NN row is still normalized over the observed
        // bigrams only.
        let corpus = "the\tDT\ndog\tNN\nbarks\tVBZ\n\nthe\tDT\ncat\tNN\nsleeps\tVBZ\n\na\tDT\ndog\tNN\n";
        let model = train_from(corpus);

        let nn = model.tag_id("NN").unwrap();
        let vbz = model.tag_id("VBZ").unwrap();
        assert_eq!(Some(&1.0), model.transitions[nn].get(&vbz));
    }

    #[test]
    fn test_trainer_transitions_do_not_cross_sentence_boundaries() {
        let model = train_from("a\tX\n\nb\tY\n");

        let x = model.tag_id("X").unwrap();
        assert!(model.transitions[x].is_empty());
    }

    #[test]
    fn test_trainer_push_sentence_accumulates_bigrams() {
        let mut trainer = Trainer::new();
        trainer.push_sentence(&[
            ("the".to_string(), "DT".to_string()),
            ("dog".to_string(), "NN".to_string()),
        ]);
        trainer.push_sentence(&[
            ("the".to_string(), "DT".to_string()),
            ("run".to_string(), "VB".to_string()),
        ]);
        let model = trainer.train();

        let dt = model.tag_id("DT").unwrap();
        let nn = model.tag_id("NN").unwrap();
        let vb = model.tag_id("VB").unwrap();
        assert_eq!(Some(&0.5), model.transitions[dt].get(&nn));
        assert_eq!(Some(&0.5), model.transitions[dt].get(&vb));
        assert!(model.transitions[nn].is_empty());
    }

    #[test]
    fn test_trainer_likelihoods() {
        let corpus = "the\tDT\ndog\tNN\n\nthe\tDT\ncat\tNN\n\na\tDT\ndog\tNN\n";
        let model = train_from(corpus);

        let dt = model.tag_id("DT").unwrap();
        let nn = model.tag_id("NN").unwrap();
        assert_eq!(Some(&(2.0 / 3.0)), model.likelihoods[dt].get("the"));
        assert_eq!(Some(&(1.0 / 3.0)), model.likelihoods[dt].get("a"));
        assert_eq!(Some(&(2.0 / 3.0)), model.likelihoods[nn].get("dog"));
        assert_eq!(None, model.likelihoods[nn].get("the"));
    }

    #[test]
    fn test_trainer_oov_from_singletons() {
        // "x" occurs twice; "y" and "z" are singletons carrying tag B.
        let model = train_from("x\tA\nx\tA\ny\tB\n\nz\tB\n");

        assert_eq!(&[0.0, 1.0], model.oov_probabilities());
    }

    #[test]
    fn test_trainer_oov_repeated_word_with_distinct_tags() {
        let model = train_from("w\tA\n\nw\tB\n\nu\tB\n");

        assert_eq!(&[0.0, 1.0], model.oov_probabilities());
    }

    #[test]
    fn test_trainer_oov_uniform_without_singletons() {
        let model = train_from("a\tX\nb\tY\n\na\tX\nb\tY\n");

        assert_eq!(&[0.5, 0.5], model.oov_probabilities());
    }

    #[test]
    fn test_trainer_empty_stream() {
        let model = train_from("\n\n");

        assert_eq!(0, model.n_tags());
        assert_eq!(0, model.n_words());
        assert!(model.prior_probabilities().is_empty());
        assert!(model.oov_probabilities().is_empty());
    }

    #[test]
    fn test_trainer_vocabulary() {
        let model = train_from("Dogs\tNNS\nrun\tVBP\n\nCats\tNNS\nsleep\tVBP\n");

        assert_eq!(4, model.n_words());
        assert!(model.contains_word("Dogs"));
        assert!(!model.contains_word("Birds"));
    }
}
