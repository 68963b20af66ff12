use std::fs::File;
use std::io::{prelude::*, stdin, stdout, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use marcato::{Model, Predictor, TaggingPipeline};

#[derive(Parser, Debug)]
#[command(about = "A program to perform part-of-speech tagging.")]
struct Args {
    /// The model file to use when analyzing text
    #[arg(long)]
    model: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let pipeline = TaggingPipeline::new(Predictor::new(model));

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Please input tokens, one per line, followed by a blank line per sentence:");
    }

    eprintln!("Start tagging");
    let start = Instant::now();
    let mut out = BufWriter::new(stdout().lock());
    let summary = pipeline.run(stdin().lock(), &mut out)?;
    out.flush()?;
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [tokens/sec]",
        summary.n_tokens as f64 / duration.as_secs_f64()
    );

    Ok(())
}
