#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Marcato
//!
//! Marcato is a part-of-speech tagger based on a bigram hidden Markov model.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, stdin, BufReader};
//!
//! use marcato::{Model, Predictor};
//!
//! let mut f = BufReader::new(File::open("model.bin").unwrap());
//! let model = Model::read(&mut f).unwrap();
//! let predictor = Predictor::new(model);
//!
//! for line in stdin().lock().lines() {
//!     let line = line.unwrap();
//!     let words: Vec<_> = line.split(' ').collect();
//!     let tags = predictor.predict(&words).unwrap();
//!     for (word, tag) in words.iter().zip(tags) {
//!         println!("{word}\t{tag}");
//!     }
//! }
//! ```
//!
//! Training requires **crate feature** `train`. For more details, see [`Trainer`].

pub mod errors;

mod utils;

mod corpus;
mod model;
mod oov;
mod pipeline;
mod predictor;

#[cfg(feature = "train")]
mod trainer;

pub use corpus::CorpusReader;
pub use model::Model;
pub use oov::OovConfig;
pub use pipeline::{TaggingPipeline, TaggingSummary};
pub use predictor::Predictor;

#[cfg(feature = "train")]
pub use trainer::Trainer;
