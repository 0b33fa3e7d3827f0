//! Renderer module — trait-based format dispatch.

pub mod nroff;

use crate::error::Result;
use crate::expand::TagExpander;
use crate::model::Document;
use anyhow::anyhow;
use std::io::Write;

/// Names accepted by [`create_renderer`].
pub const FORMATS: &[&str] = &["nroff"];

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document, out: &mut dyn Write) -> Result<()>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, tags: TagExpander) -> anyhow::Result<Box<dyn Renderer>> {
    match format {
        "nroff" => Ok(Box::new(nroff::NroffRenderer::new(tags))),
        _ => Err(anyhow!(
            "unknown format: {}. Use {}",
            format,
            FORMATS.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_format_is_registered() {
        for name in FORMATS {
            assert!(create_renderer(name, TagExpander::empty()).is_ok(), "{}", name);
        }
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("html", TagExpander::empty()).err().unwrap();
        assert!(err.to_string().contains("unknown format: html"));
    }
}
