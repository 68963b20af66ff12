use std::fs::File;
use std::io::stdin;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use marcato::{CorpusReader, Model, Predictor};

#[derive(Clone, Debug)]
enum EvaluationMetric {
    TokenAccuracy,
    SentenceAccuracy,
}

impl FromStr for EvaluationMetric {
    type Err = &'static str;
    fn from_str(metric: &str) -> Result<Self, Self::Err> {
        match metric {
            "token" => Ok(Self::TokenAccuracy),
            "sentence" => Ok(Self::SentenceAccuracy),
            _ => Err("Could not parse a metric value"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of Marcato.")]
struct Args {
    /// The model file to use when analyzing text
    #[arg(long)]
    model: PathBuf,

    /// Evaluation metric: {token, sentence}.
    /// token: evaluates each token.
    /// sentence: evaluates each sentence as a whole.
    #[arg(long, default_value = "token")]
    metric: EvaluationMetric,
}

fn accuracy(n_correct: usize, n_total: usize) -> String {
    if n_total == 0 {
        "N/A".to_string()
    } else {
        (n_correct as f64 / n_total as f64).to_string()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let predictor = Predictor::new(model);

    eprintln!("Start tagging");

    let mut n_known = 0;
    let mut n_known_correct = 0;
    let mut n_unknown = 0;
    let mut n_unknown_correct = 0;
    let mut n_sentences = 0;
    let mut n_sentences_correct = 0;

    let mut reader = CorpusReader::new(stdin().lock());
    while let Some(sentence) = reader.next_sentence()? {
        let words: Vec<&str> = sentence.iter().map(|(word, _)| word.as_str()).collect();
        let tags = predictor.predict(&words)?;
        let mut matched = true;
        for ((word, gold), predicted) in sentence.iter().zip(tags) {
            let correct = gold.as_str() == predicted;
            if predictor.is_known_word(word) {
                n_known += 1;
                if correct {
                    n_known_correct += 1;
                }
            } else {
                n_unknown += 1;
                if correct {
                    n_unknown_correct += 1;
                }
            }
            if !correct {
                matched = false;
            }
        }
        n_sentences += 1;
        if matched {
            n_sentences_correct += 1;
        }
    }

    match args.metric {
        EvaluationMetric::TokenAccuracy => {
            let n_tokens = n_known + n_unknown;
            let n_correct = n_known_correct + n_unknown_correct;
            println!("Accuracy: {}", accuracy(n_correct, n_tokens));
            println!("Known-word accuracy: {}", accuracy(n_known_correct, n_known));
            println!("Unknown-word accuracy: {}", accuracy(n_unknown_correct, n_unknown));
            println!(
                "Known: {}, Known correct: {}, Unknown: {}, Unknown correct: {}",
                n_known, n_known_correct, n_unknown, n_unknown_correct
            );
        }
        EvaluationMetric::SentenceAccuracy => {
            println!("Sentence accuracy: {}", accuracy(n_sentences_correct, n_sentences));
            println!(
                "Sentences: {}, Correct: {}",
                n_sentences, n_sentences_correct
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!("0.5", accuracy(1, 2));
        assert_eq!("1", accuracy(3, 3));
    }

    #[test]
    fn test_accuracy_empty_total() {
        assert_eq!("N/A", accuracy(0, 0));
    }
}
