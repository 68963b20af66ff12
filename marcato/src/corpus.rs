use std::io::BufRead;

use crate::errors::{MarcatoError, Result};

/// Reader of tagged corpora.
///
/// Each non-blank line of the source must contain exactly one word and one tag separated by
/// whitespace. Blank lines delimit sentences.
///
/// # Examples
///
/// ```
/// use marcato::CorpusReader;
///
/// let corpus = "Dogs\tNNS\nrun\tVBP\n\nCats\tNNS\nsleep\tVBP\n";
/// let mut reader = CorpusReader::new(corpus.as_bytes());
///
/// let sentence = reader.next_sentence().unwrap().unwrap();
/// assert_eq!(
///     vec![
///         ("Dogs".to_string(), "NNS".to_string()),
///         ("run".to_string(), "VBP".to_string()),
///     ],
///     sentence,
/// );
/// ```
pub struct CorpusReader<R> {
    rdr: R,
    line_number: usize,
}

impl<R> CorpusReader<R>
where
    R: BufRead,
{
    /// Creates a new corpus reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A line-oriented data source.
    pub fn new(rdr: R) -> Self {
        Self {
            rdr,
            line_number: 0,
        }
    }

    /// Reads the next sentence.
    ///
    /// # Returns
    ///
    /// Word/tag pairs of the next sentence, or [`None`] when the source is exhausted. A sentence
    /// left unterminated at the end of the source is still returned.
    ///
    /// # Errors
    ///
    /// [`MarcatoError::Format`] will be returned if a non-blank line does not contain exactly one
    /// word and one tag. [`MarcatoError::IOError`] will be returned if `rdr` generates an error.
    pub fn next_sentence(&mut self) -> Result<Option<Vec<(String, String)>>> {
        let mut sentence = vec![];
        let mut line = String::new();
        loop {
            line.clear();
            if self.rdr.read_line(&mut line)? == 0 {
                if sentence.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(sentence));
            }
            self.line_number += 1;
            if line.trim().is_empty() {
                if !sentence.is_empty() {
                    return Ok(Some(sentence));
                }
                continue;
            }
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(word), Some(tag), None) => {
                    sentence.push((word.to_string(), tag.to_string()));
                }
                _ => {
                    return Err(MarcatoError::invalid_format(
                        self.line_number,
                        format!("expected a word and a tag, found: {:?}", line.trim_end()),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|&(word, tag)| (word.to_string(), tag.to_string()))
            .collect()
    }

    #[test]
    fn test_corpus_reader_sentences() {
        let corpus = "Dogs\tNNS\nrun\tVBP\n\nCats\tNNS\nsleep\tVBP\n";
        let mut reader = CorpusReader::new(corpus.as_bytes());

        assert_eq!(
            pairs(&[("Dogs", "NNS"), ("run", "VBP")]),
            reader.next_sentence().unwrap().unwrap()
        );
        assert_eq!(
            pairs(&[("Cats", "NNS"), ("sleep", "VBP")]),
            reader.next_sentence().unwrap().unwrap()
        );
        assert!(reader.next_sentence().unwrap().is_none());
    }

    #[test]
    fn test_corpus_reader_empty_source() {
        let mut reader = CorpusReader::new("".as_bytes());

        assert!(reader.next_sentence().unwrap().is_none());
    }

    #[test]
    fn test_corpus_reader_blank_lines_only() {
        let mut reader = CorpusReader::new("\n\n\n".as_bytes());

        assert!(reader.next_sentence().unwrap().is_none());
    }

    #[test]
    fn test_corpus_reader_consecutive_blank_lines() {
        let corpus = "Dogs\tNNS\n\n\n\nrun\tVBP\n";
        let mut reader = CorpusReader::new(corpus.as_bytes());

        assert_eq!(
            pairs(&[("Dogs", "NNS")]),
            reader.next_sentence().unwrap().unwrap()
        );
        assert_eq!(
            pairs(&[("run", "VBP")]),
            reader.next_sentence().unwrap().unwrap()
        );
        assert!(reader.next_sentence().unwrap().is_none());
    }

    #[test]
    fn test_corpus_reader_unterminated_sentence() {
        let mut reader = CorpusReader::new("Dogs\tNNS".as_bytes());

        assert_eq!(
            pairs(&[("Dogs", "NNS")]),
            reader.next_sentence().unwrap().unwrap()
        );
        assert!(reader.next_sentence().unwrap().is_none());
    }

    #[test]
    fn test_corpus_reader_crlf_lines() {
        let corpus = "Dogs\tNNS\r\n\r\nrun\tVBP\r\n";
        let mut reader = CorpusReader::new(corpus.as_bytes());

        assert_eq!(
            pairs(&[("Dogs", "NNS")]),
            reader.next_sentence().unwrap().unwrap()
        );
        assert_eq!(
            pairs(&[("run", "VBP")]),
            reader.next_sentence().unwrap().unwrap()
        );
    }

    #[test]
    fn test_corpus_reader_missing_tag() {
        let corpus = "Dogs\tNNS\n\nrun\n";
        let mut reader = CorpusReader::new(corpus.as_bytes());

        assert!(reader.next_sentence().unwrap().is_some());
        let e = reader.next_sentence();

        assert!(e.is_err());
        assert_eq!(
            "FormatError: line 3: expected a word and a tag, found: \"run\"",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_corpus_reader_extra_field() {
        let corpus = "Dogs NNS extra\n";
        let mut reader = CorpusReader::new(corpus.as_bytes());

        let e = reader.next_sentence();

        assert!(e.is_err());
        assert_eq!(
            "FormatError: line 1: expected a word and a tag, found: \"Dogs NNS extra\"",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_corpus_reader_format_error_line_number() {
        let corpus = "Dogs\tNNS\nrun\tVBP\n\nCats\n";
        let mut reader = CorpusReader::new(corpus.as_bytes());

        assert!(reader.next_sentence().unwrap().is_some());
        match reader.next_sentence() {
            Err(MarcatoError::Format(e)) => assert_eq!(4, e.line_number()),
            _ => panic!("unexpected result"),
        }
    }
}
