use crate::errors::{MarcatoError, Result};
use crate::model::Model;
use crate::oov::{OovClassifier, OovConfig};

// Probability substituted for events never observed in training.
const FLOOR_PROB: f64 = 1e-6;

/// Predictor.
///
/// A predictor decodes the most probable tag sequence of a sentence with the Viterbi algorithm.
/// Probabilities of events absent from the model tables are substituted by a fixed positive
/// floor, so a decode never fails on unseen words or transitions.
pub struct Predictor {
    model: Model,
    oov: OovClassifier,
}

impl Predictor {
    /// Creates a new predictor.
    ///
    /// # Arguments
    ///
    /// * `model` - A model data.
    ///
    /// # Returns
    ///
    /// A new predictor with the default out-of-vocabulary word classifier.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            oov: OovClassifier::new(OovConfig::default()),
        }
    }

    /// Sets the configuration of the out-of-vocabulary word classifier.
    ///
    /// # Arguments
    ///
    /// * `config` - A configuration.
    ///
    /// # Returns
    ///
    /// A predictor with the specified configuration.
    pub fn oov_config(mut self, config: OovConfig) -> Self {
        self.oov = OovClassifier::new(config);
        self
    }

    /// Returns whether the given word was observed in the training data.
    pub fn is_known_word(&self, word: &str) -> bool {
        self.model.contains_word(word)
    }

    // Known words are looked up as themselves; other words are looked up by the proxy tag
    // assigned by the classifier.
    fn emission_key<'a>(&'a self, word: &'a str) -> &'a str {
        if self.model.vocab.contains(word) {
            word
        } else {
            self.oov.classify(word, &self.model)
        }
    }

    fn emission_prob(&self, tag_id: usize, word_key: &str) -> f64 {
        self.model.likelihoods[tag_id]
            .get(word_key)
            .copied()
            .unwrap_or(FLOOR_PROB)
    }

    fn transition_prob(&self, prev_id: usize, tag_id: usize) -> f64 {
        self.model.transitions[prev_id]
            .get(&tag_id)
            .copied()
            .unwrap_or(FLOOR_PROB)
    }

    /// Predicts part-of-speech tags of the given sentence.
    ///
    /// # Arguments
    ///
    /// * `words` - Tokens of a sentence.
    ///
    /// # Returns
    ///
    /// The most probable tag of each token, in token order. Score ties are resolved in favor of
    /// the tag enumerated first, so repeated calls produce identical results.
    ///
    /// # Errors
    ///
    /// [`MarcatoError::ModelNotTrained`] will be returned if the model contains no tags.
    /// [`MarcatoError::EmptySentence`] will be returned if `words` is empty.
    pub fn predict<S>(&self, words: &[S]) -> Result<Vec<&str>>
    where
        S: AsRef<str>,
    {
        let n_tags = self.model.n_tags();
        if n_tags == 0 {
            return Err(MarcatoError::model_not_trained());
        }
        let n_words = words.len();
        if n_words == 0 {
            return Err(MarcatoError::empty_sentence());
        }

        let mut scores = vec![0.0; n_words * n_tags];
        let mut back_pointers = vec![0; n_words * n_tags];

        let word_key = self.emission_key(words[0].as_ref());
        for (tag_id, score) in scores[..n_tags].iter_mut().enumerate() {
            *score = self.model.priors[tag_id] * self.emission_prob(tag_id, word_key);
        }

        for t in 1..n_words {
            let word_key = self.emission_key(words[t].as_ref());
            let (prev_rows, cur_rows) = scores.split_at_mut(t * n_tags);
            let prev_row = &prev_rows[(t - 1) * n_tags..];
            for (tag_id, score) in cur_rows[..n_tags].iter_mut().enumerate() {
                let mut best_prev = 0;
                let mut best_score = f64::NEG_INFINITY;
                for (prev_id, &prev_score) in prev_row.iter().enumerate() {
                    let cand = prev_score * self.transition_prob(prev_id, tag_id);
                    if cand > best_score {
                        best_score = cand;
                        best_prev = prev_id;
                    }
                }
                *score = best_score * self.emission_prob(tag_id, word_key);
                back_pointers[t * n_tags + tag_id] = best_prev;
            }
        }

        let mut best_tag = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (tag_id, &score) in scores[(n_words - 1) * n_tags..].iter().enumerate() {
            if score > best_score {
                best_score = score;
                best_tag = tag_id;
            }
        }

        let mut path = vec![0; n_words];
        path[n_words - 1] = best_tag;
        for t in (1..n_words).rev() {
            path[t - 1] = back_pointers[t * n_tags + path[t]];
        }
        Ok(path
            .into_iter()
            .map(|tag_id| self.model.tags[tag_id].as_str())
            .collect())
    }
}
