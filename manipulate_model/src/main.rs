use std::fs;
use std::path::PathBuf;

use clap::Parser;
use marcato::Model;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(about = "A program to manipulate trained models.")]
struct Args {
    /// Input path of the model file
    #[arg(long)]
    model_in: PathBuf,

    /// Output path of the model file
    #[arg(long)]
    model_out: Option<PathBuf>,

    /// Output the prior probabilities contained in the model.
    #[arg(long)]
    dump_priors: Option<PathBuf>,

    /// Output the transition probabilities contained in the model.
    #[arg(long)]
    dump_transitions: Option<PathBuf>,

    /// Output the emission probabilities contained in the model.
    #[arg(long)]
    dump_likelihoods: Option<PathBuf>,

    /// Output the out-of-vocabulary probabilities contained in the model.
    #[arg(long)]
    dump_oov: Option<PathBuf>,

    /// Replace the out-of-vocabulary probabilities if the argument is specified.
    #[arg(long)]
    replace_oov: Option<PathBuf>,
}

#[derive(Deserialize, Serialize)]
struct TagProbabilityRecord {
    tag: String,
    probability: f64,
}

#[derive(Serialize)]
struct TransitionRecord {
    prev_tag: String,
    next_tag: String,
    probability: f64,
}

#[derive(Serialize)]
struct LikelihoodRecord {
    tag: String,
    word: String,
    probability: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(fs::File::open(args.model_in)?)?;
    let mut model = Model::read(&mut f)?;

    if let Some(path) = args.dump_priors {
        eprintln!("Saving prior probability file...");
        let file = fs::File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for (tag, &probability) in model.tags().iter().zip(model.prior_probabilities()) {
            wtr.serialize(TagProbabilityRecord {
                tag: tag.clone(),
                probability,
            })?;
        }
    }

    if let Some(path) = args.dump_transitions {
        eprintln!("Saving transition probability file...");
        let file = fs::File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for (prev_tag, next_tag, probability) in model.transition_entries() {
            wtr.serialize(TransitionRecord {
                prev_tag: prev_tag.to_string(),
                next_tag: next_tag.to_string(),
                probability,
            })?;
        }
    }

    if let Some(path) = args.dump_likelihoods {
        eprintln!("Saving emission probability file...");
        let file = fs::File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for (tag, word, probability) in model.likelihood_entries() {
            wtr.serialize(LikelihoodRecord {
                tag: tag.to_string(),
                word: word.to_string(),
                probability,
            })?;
        }
    }

    if let Some(path) = args.dump_oov {
        eprintln!("Saving out-of-vocabulary probability file...");
        let file = fs::File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for (tag, &probability) in model.tags().iter().zip(model.oov_probabilities()) {
            wtr.serialize(TagProbabilityRecord {
                tag: tag.clone(),
                probability,
            })?;
        }
    }

    if let Some(path) = args.replace_oov {
        eprintln!("Loading out-of-vocabulary probability file...");
        let file = fs::File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut probs = vec![];
        for result in rdr.deserialize() {
            let record: TagProbabilityRecord = result?;
            probs.push((record.tag, record.probability));
        }
        model.replace_oov_probabilities(probs)?;
    }

    if let Some(path) = args.model_out {
        eprintln!("Saving model file...");
        let mut f = zstd::Encoder::new(fs::File::create(path)?, 19)?;
        model.write(&mut f)?;
        f.finish()?;
    }

    Ok(())
}
