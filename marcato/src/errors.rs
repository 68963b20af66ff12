//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = MarcatoError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum MarcatoError {
    Format(FormatError),
    EmptySentence(EmptySentenceError),
    ModelNotTrained(ModelNotTrainedError),
    InvalidModel(InvalidModelError),
    InvalidArgument(InvalidArgumentError),
    DecodeError(bincode::error::DecodeError),
    EncodeError(bincode::error::EncodeError),
    IOError(std::io::Error),
}

impl MarcatoError {
    pub(crate) fn invalid_format<S>(line_number: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Format(FormatError {
            line_number,
            msg: msg.into(),
        })
    }

    pub(crate) fn empty_sentence() -> Self {
        Self::EmptySentence(EmptySentenceError)
    }

    pub(crate) fn model_not_trained() -> Self {
        Self::ModelNotTrained(ModelNotTrainedError)
    }

    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for MarcatoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Format(e) => e.fmt(f),
            Self::EmptySentence(e) => e.fmt(f),
            Self::ModelNotTrained(e) => e.fmt(f),
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::DecodeError(e) => e.fmt(f),
            Self::EncodeError(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for MarcatoError {}

/// Error used when a corpus line is malformed.
#[derive(Debug)]
pub struct FormatError {
    /// Number of the offending line.
    pub(crate) line_number: usize,

    /// Error message.
    pub(crate) msg: String,
}

impl FormatError {
    /// Returns the 1-based number of the offending line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FormatError: line {}: {}", self.line_number, self.msg)
    }
}

impl Error for FormatError {}

/// Error used when an empty sentence is given to the decoder.
#[derive(Debug)]
pub struct EmptySentenceError;

impl fmt::Display for EmptySentenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EmptySentenceError: the sentence contains no tokens")
    }
}

impl Error for EmptySentenceError {}

/// Error used when decoding is attempted with a model containing no tags.
#[derive(Debug)]
pub struct ModelNotTrainedError;

impl fmt::Display for ModelNotTrainedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ModelNotTrainedError: the model contains no tags")
    }
}

impl Error for ModelNotTrainedError {}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<bincode::error::DecodeError> for MarcatoError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DecodeError(error)
    }
}

impl From<bincode::error::EncodeError> for MarcatoError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::EncodeError(error)
    }
}

impl From<std::io::Error> for MarcatoError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
