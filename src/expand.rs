//! `$$NAME$$` tag expansion for header text.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Delimits a tag name on both sides.
pub const MARKER: &str = "$$";

type Generator = Box<dyn Fn() -> String>;

/// Replaces marker-delimited tag names with generated values.
pub struct TagExpander {
    generators: HashMap<String, Generator>,
}

impl TagExpander {
    /// An expander with no generators registered.
    pub fn empty() -> Self {
        TagExpander {
            generators: HashMap::new(),
        }
    }

    /// The standard `SCRIPTNAME` and `TIMESTAMP` generators.
    pub fn standard(program: impl Into<String>) -> Self {
        let program = program.into();
        Self::empty()
            .with("SCRIPTNAME", move || program.clone())
            .with("TIMESTAMP", || format_timestamp(&Utc::now()))
    }

    /// Register (or replace) the generator for `name`.
    pub fn with(mut self, name: &str, generator: impl Fn() -> String + 'static) -> Self {
        self.generators.insert(name.to_string(), Box::new(generator));
        self
    }

    pub fn expand(&self, text: &str) -> Result<String> {
        let segments: Vec<&str> = text.split(MARKER).collect();
        if segments.len() % 2 == 0 {
            return Err(Error::MalformedInput(MARKER));
        }

        let mut out = String::with_capacity(text.len());
        for (i, segment) in segments.iter().enumerate() {
            if i % 2 == 0 || segment.is_empty() {
                out.push_str(segment);
                continue;
            }
            let generator = self
                .generators
                .get(*segment)
                .ok_or_else(|| Error::UnknownTag(segment.to_string()))?;
            out.push_str(&generator());
        }
        Ok(out)
    }
}

/// `2009/Mar/07 14:05:09Z`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y/%b/%d %H:%M:%SZ").to_string()
}
