use std::io::{BufRead, Write};

use crate::errors::Result;
use crate::predictor::Predictor;

/// Counters reported by [`TaggingPipeline::run()`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TaggingSummary {
    /// The number of decoded sentences.
    pub n_sentences: usize,

    /// The number of tagged tokens.
    pub n_tokens: usize,
}

/// Tagging pipeline.
///
/// A pipeline reads one token per line, decodes a sentence at every blank line, and writes one
/// `word<TAB>tag` pair per line. Blank lines are echoed, so the output keeps the sentence
/// boundaries of the input.
pub struct TaggingPipeline {
    predictor: Predictor,
}

impl TaggingPipeline {
    /// Creates a new pipeline.
    ///
    /// # Arguments
    ///
    /// * `predictor` - A predictor.
    pub fn new(predictor: Predictor) -> Self {
        Self { predictor }
    }

    /// Tags every sentence of a token stream.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A reader of the token stream.
    /// * `wtr` - A writer of the tagged stream.
    ///
    /// # Returns
    ///
    /// A summary of the decoded stream.
    ///
    /// # Errors
    ///
    /// [`MarcatoError::ModelNotTrained`](crate::errors::MarcatoError::ModelNotTrained) is
    /// returned if the model contains no tags, and
    /// [`MarcatoError::IOError`](crate::errors::MarcatoError::IOError) is returned if reading or
    /// writing fails.
    pub fn run<R, W>(&self, rdr: R, wtr: &mut W) -> Result<TaggingSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = TaggingSummary::default();
        let mut sentence = vec![];
        for line in rdr.lines() {
            let line = line?;
            let token = line.trim();
            if token.is_empty() {
                self.flush_sentence(&mut sentence, wtr, &mut summary)?;
                wtr.write_all(b"\n")?;
            } else {
                sentence.push(token.to_string());
            }
        }
        self.flush_sentence(&mut sentence, wtr, &mut summary)?;
        Ok(summary)
    }

    fn flush_sentence<W>(
        &self,
        sentence: &mut Vec<String>,
        wtr: &mut W,
        summary: &mut TaggingSummary,
    ) -> Result<()>
    where
        W: Write,
    {
        if sentence.is_empty() {
            return Ok(());
        }
        let tags = self.predictor.predict(sentence)?;
        for (word, tag) in sentence.iter().zip(tags) {
            writeln!(wtr, "{word}\t{tag}")?;
        }
        summary.n_sentences += 1;
        summary.n_tokens += sentence.len();
        sentence.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hashbrown::{HashMap, HashSet};

    use crate::errors::MarcatoError;
    use crate::model::Model;
    use crate::utils::{SerializableHashMap, SerializableHashSet};

    fn sample_model() -> Model {
        let mut nns_words = HashMap::new();
        nns_words.insert("Dogs".to_string(), 0.5);
        nns_words.insert("Cats".to_string(), 0.5);
        let mut vbp_words = HashMap::new();
        vbp_words.insert("run".to_string(), 0.5);
        vbp_words.insert("sleep".to_string(), 0.5);
        let mut nns_next = HashMap::new();
        nns_next.insert(1, 1.0);
        let mut vocab = HashSet::new();
        for word in ["Dogs", "Cats", "run", "sleep"] {
            vocab.insert(word.to_string());
        }
        Model {
            tags: vec!["NNS".to_string(), "VBP".to_string()],
            priors: vec![0.5, 0.5],
            transitions: vec![
                SerializableHashMap(nns_next),
                SerializableHashMap(HashMap::new()),
            ],
            likelihoods: vec![
                SerializableHashMap(nns_words),
                SerializableHashMap(vbp_words),
            ],
            oov: vec![0.5, 0.5],
            vocab: SerializableHashSet(vocab),
        }
    }

    fn run_pipeline(input: &str) -> Result<String> {
        let pipeline = TaggingPipeline::new(Predictor::new(sample_model()));
        let mut output = vec![];
        pipeline.run(input.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_pipeline_stream() {
        let output = run_pipeline("Dogs\nrun\n\nCats\nsleep\n").unwrap();

        assert_eq!("Dogs\tNNS\nrun\tVBP\n\nCats\tNNS\nsleep\tVBP\n", output);
    }

    #[test]
    fn test_pipeline_echoes_consecutive_blank_lines() {
        let output = run_pipeline("Dogs\n\n\nrun\n").unwrap();

        assert_eq!("Dogs\tNNS\n\n\nrun\tVBP\n", output);
    }

    #[test]
    fn test_pipeline_flushes_unterminated_sentence() {
        let output = run_pipeline("Dogs").unwrap();

        assert_eq!("Dogs\tNNS\n", output);
    }

    #[test]
    fn test_pipeline_trims_token_whitespace() {
        let output = run_pipeline(" Dogs \nrun\n").unwrap();

        assert_eq!("Dogs\tNNS\nrun\tVBP\n", output);
    }

    #[test]
    fn test_pipeline_empty_input() {
        let output = run_pipeline("").unwrap();

        assert_eq!("", output);
    }

    #[test]
    fn test_pipeline_blank_input() {
        let output = run_pipeline("\n\n").unwrap();

        assert_eq!("\n\n", output);
    }

    #[test]
    fn test_pipeline_summary() {
        let pipeline = TaggingPipeline::new(Predictor::new(sample_model()));
        let mut output = vec![];
        let summary = pipeline
            .run("Dogs\nrun\n\nCats\nsleep\n\nDogs\n".as_bytes(), &mut output)
            .unwrap();

        assert_eq!(3, summary.n_sentences);
        assert_eq!(5, summary.n_tokens);
    }

    #[test]
    fn test_pipeline_untrained_model() {
        let model = Model {
            tags: vec![],
            priors: vec![],
            transitions: vec![],
            likelihoods: vec![],
            oov: vec![],
            vocab: SerializableHashSet(HashSet::new()),
        };
        let pipeline = TaggingPipeline::new(Predictor::new(model));
        let mut output = vec![];
        let result = pipeline.run("Dogs\n".as_bytes(), &mut output);

        assert!(matches!(result, Err(MarcatoError::ModelNotTrained(_))));
        assert_eq!(
            "ModelNotTrainedError: the model contains no tags",
            result.unwrap_err().to_string()
        );
        assert!(output.is_empty());
    }
}
