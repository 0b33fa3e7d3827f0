//! Error and warning taxonomy for parsing and rendering.

use std::fmt;
use thiserror::Error;

/// Fatal errors. Any of these aborts the conversion.
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("structural error: {0}")]
    Structural(String),

    #[error("multiple references with id \"{0}\"")]
    DuplicateKey(String),

    #[error("no reference found for id \"{0}\"")]
    MissingKey(String),

    #[error("cannot expand text, odd number of expansion markers \"{0}\"")]
    MalformedInput(&'static str),

    #[error("no generator for tag \"{0}\"")]
    UnknownTag(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Non-fatal anomalies found while parsing. The offending node is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnrecognisedTag(String),
    UnrecognisedHeaderTag(String),
    DefHeaderWithoutBody,
    DefBodyWithoutHeader,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognisedTag(name) => write!(f, "unrecognised tag \"{}\"", name),
            Warning::UnrecognisedHeaderTag(name) => {
                write!(f, "unrecognised header tag \"{}\"", name)
            }
            Warning::DefHeaderWithoutBody => write!(f, "defheader without defbody"),
            Warning::DefBodyWithoutHeader => write!(f, "defbody without defheader"),
        }
    }
}

/// Accumulates warnings during a parse so callers decide where they go.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, warning: Warning) {
        log::debug!("parser warning: {}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
