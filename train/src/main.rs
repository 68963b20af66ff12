use std::fs::File;
use std::io::{prelude::*, stderr, BufReader};
use std::path::PathBuf;

use clap::Parser;
use marcato::{CorpusReader, Trainer};

#[derive(Parser, Debug)]
#[command(about = "A program to train models of Marcato.")]
struct Args {
    /// A tagged training corpus
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading dataset...");
    let mut trainer = Trainer::new();
    let mut n_sents = 0;
    for path in args.corpus {
        eprintln!("Loading {path:?} ...");
        let f = File::open(path)?;
        let mut reader = CorpusReader::new(BufReader::new(f));
        while let Some(sentence) = reader.next_sentence()? {
            if n_sents % 10000 == 0 {
                eprint!("# of sentences: {n_sents}\r");
                stderr().flush()?;
            }
            trainer.push_sentence(&sentence);
            n_sents += 1;
        }
        eprintln!("# of sentences: {n_sents}");
    }

    eprintln!("Start training...");
    let model = trainer.train();
    eprintln!("Finish training.");
    eprintln!("# of tags: {}", model.n_tags());
    eprintln!("# of known words: {}", model.n_words());

    let mut f = zstd::Encoder::new(File::create(args.model)?, 19)?;
    f.multithread(args.zstd_workers)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
