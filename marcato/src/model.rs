use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::errors::{MarcatoError, Result};
use crate::utils::{SerializableHashMap, SerializableHashSet};

/// Model data.
///
/// A model holds the probability tables estimated from a tagged corpus. Tags are identified by
/// their position in the tag list, which is the order of their first occurrence in the training
/// data. The tables record observed events only; probabilities of unobserved events are
/// substituted by the decoder.
#[derive(Decode, Encode)]
pub struct Model {
    pub(crate) tags: Vec<String>,
    pub(crate) priors: Vec<f64>,
    pub(crate) transitions: Vec<SerializableHashMap<usize, f64>>,
    pub(crate) likelihoods: Vec<SerializableHashMap<String, f64>>,
    pub(crate) oov: Vec<f64>,
    pub(crate) vocab: SerializableHashSet<String>,
}

impl Model {
    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        bincode::encode_into_std_write(self, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is. When the read data contains
    /// tables inconsistent with its tag list, [`MarcatoError::InvalidModel`] will be returned.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let model: Self = bincode::decode_from_std_read(rdr, bincode::config::standard())?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let n_tags = self.tags.len();
        if self.priors.len() != n_tags {
            return Err(MarcatoError::invalid_model(format!(
                "priors must contain {n_tags} entries"
            )));
        }
        if self.transitions.len() != n_tags {
            return Err(MarcatoError::invalid_model(format!(
                "transitions must contain {n_tags} rows"
            )));
        }
        if self.likelihoods.len() != n_tags {
            return Err(MarcatoError::invalid_model(format!(
                "likelihoods must contain {n_tags} rows"
            )));
        }
        if self.oov.len() != n_tags {
            return Err(MarcatoError::invalid_model(format!(
                "oov must contain {n_tags} entries"
            )));
        }
        for row in &self.transitions {
            if row.keys().any(|&next_id| next_id >= n_tags) {
                return Err(MarcatoError::invalid_model(
                    "transition rows must refer to listed tags",
                ));
            }
        }
        Ok(())
    }

    /// Returns the tags in their enumeration order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the number of tags.
    pub fn n_tags(&self) -> usize {
        self.tags.len()
    }

    /// Returns the number of known words.
    pub fn n_words(&self) -> usize {
        self.vocab.len()
    }

    /// Returns whether the given word was observed in the training data.
    pub fn contains_word(&self, word: &str) -> bool {
        self.vocab.contains(word)
    }

    /// Returns the identifier of the given tag.
    pub fn tag_id(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    /// Returns the prior probabilities in tag enumeration order.
    pub fn prior_probabilities(&self) -> &[f64] {
        &self.priors
    }

    /// Returns the out-of-vocabulary probabilities in tag enumeration order.
    pub fn oov_probabilities(&self) -> &[f64] {
        &self.oov
    }

    /// Returns all transition probabilities as (previous tag, next tag, probability) entries.
    ///
    /// Entries are ordered by the enumeration order of the previous tag, then of the next tag,
    /// so repeated calls produce identical listings.
    pub fn transition_entries(&self) -> Vec<(&str, &str, f64)> {
        let mut entries = vec![];
        for (prev_id, row) in self.transitions.iter().enumerate() {
            let mut sorted: Vec<_> = row.iter().map(|(&next_id, &prob)| (next_id, prob)).collect();
            sorted.sort_unstable_by_key(|&(next_id, _)| next_id);
            for (next_id, prob) in sorted {
                entries.push((self.tags[prev_id].as_str(), self.tags[next_id].as_str(), prob));
            }
        }
        entries
    }

    /// Returns all emission probabilities as (tag, word, probability) entries.
    ///
    /// Entries are ordered by the enumeration order of the tag, then by the word, so repeated
    /// calls produce identical listings.
    pub fn likelihood_entries(&self) -> Vec<(&str, &str, f64)> {
        let mut entries = vec![];
        for (tag_id, row) in self.likelihoods.iter().enumerate() {
            let mut sorted: Vec<_> = row.iter().map(|(word, &prob)| (word.as_str(), prob)).collect();
            sorted.sort_unstable_by_key(|&(word, _)| word);
            for (word, prob) in sorted {
                entries.push((self.tags[tag_id].as_str(), word, prob));
            }
        }
        entries
    }

    /// Replaces the out-of-vocabulary probability table.
    ///
    /// # Arguments
    ///
    /// * `probs` - Tag/probability pairs covering every tag of the model exactly once.
    ///
    /// # Errors
    ///
    /// [`MarcatoError::InvalidArgument`] will be returned if a tag is unknown, missing, or given
    /// twice, if a probability lies outside `[0, 1]`, or if the probabilities do not sum to 1
    /// within `1e-6`.
    pub fn replace_oov_probabilities<I>(&mut self, probs: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut new_oov = vec![None; self.tags.len()];
        for (tag, prob) in probs {
            let tag_id = self.tag_id(&tag).ok_or_else(|| {
                MarcatoError::invalid_argument("probs", format!("unknown tag: {tag}"))
            })?;
            if !(0.0..=1.0).contains(&prob) {
                return Err(MarcatoError::invalid_argument(
                    "probs",
                    format!("probability out of range: {prob}"),
                ));
            }
            if new_oov[tag_id].replace(prob).is_some() {
                return Err(MarcatoError::invalid_argument(
                    "probs",
                    format!("duplicate tag: {tag}"),
                ));
            }
        }
        let mut oov = Vec::with_capacity(new_oov.len());
        for (tag_id, prob) in new_oov.into_iter().enumerate() {
            oov.push(prob.ok_or_else(|| {
                MarcatoError::invalid_argument(
                    "probs",
                    format!("missing tag: {}", self.tags[tag_id]),
                )
            })?);
        }
        let total: f64 = oov.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(MarcatoError::invalid_argument(
                "probs",
                format!("probabilities must sum to 1, found: {total}"),
            ));
        }
        self.oov = oov;
        Ok(())
    }
}
