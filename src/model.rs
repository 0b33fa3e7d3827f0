//! Data model for a parsed man page — format-agnostic.

use std::collections::HashMap;

/// Complete parsed page from a single XML definition.
#[derive(Debug, Default)]
pub struct Document {
    pub title: String,
    pub section: String,
    pub extra1: String,
    pub extra2: String,
    pub extra3: String,
    pub sections: Vec<Section<Block>>,
    /// `<references>` groups, rendered after the content sections
    pub references: Vec<Section<Reference>>,
    /// Id → reference, shared by all groups
    pub reftable: HashMap<String, Reference>,
    /// Header comment text with `$$NAME$$` markers still in place
    pub header: String,
}

impl Document {
    pub fn reference(&self, id: &str) -> Option<&Reference> {
        self.reftable.get(id)
    }
}

/// A titled list of content: blocks for ordinary sections,
/// references for reference groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    pub name: String,
    pub content: Vec<T>,
}

/// A `<reference>` as read from the input, before numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    pub id: String,
    pub name: String,
    pub href: String,
}

/// A numbered reference. Indices start at 1 in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub name: String,
    pub href: String,
    pub index: usize,
}

impl Reference {
    pub fn numbered(raw: RawReference, index: usize) -> Self {
        Reference {
            id: raw.id,
            name: raw.name,
            href: raw.href,
            index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Style {
    /// No markup; never produced by the XML parser
    Plain,
    Bold,
    Italic,
    Code,
    Quoted,
    Indent,
}

impl Style {
    /// Flow styles sit inline with the surrounding text.
    pub fn is_flow(self) -> bool {
        matches!(
            self,
            Style::Plain | Style::Bold | Style::Italic | Style::Quoted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletPoint {
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub header: Vec<Block>,
    pub body: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub name: String,
    pub content: Vec<Block>,
}

/// A content block inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(String),
    Style { style: Style, content: Vec<Block> },
    Paragraph(Vec<Block>),
    BulletList(Vec<BulletPoint>),
    DefinitionList(Vec<Definition>),
    OptionList(Vec<OptionItem>),
    CrossReference { id: String, content: Vec<Block> },
}

impl Block {
    /// True for blocks rendered inline with adjacent text.
    pub fn is_flow(&self) -> bool {
        match self {
            Block::CrossReference { .. } => true,
            Block::Style { style, .. } => style.is_flow(),
            _ => false,
        }
    }

    /// Short name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Style { .. } => "style",
            Block::Paragraph(_) => "paragraph",
            Block::BulletList(_) => "bullet list",
            Block::DefinitionList(_) => "definition list",
            Block::OptionList(_) => "option list",
            Block::CrossReference { .. } => "cross-reference",
        }
    }

    /// Code and indent styles, which end on a directive line.
    pub fn is_structural_style(&self) -> bool {
        matches!(self, Block::Style { style, .. } if !style.is_flow())
    }
}
