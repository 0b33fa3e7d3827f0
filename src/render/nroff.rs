//! nroff renderer using the `man` macro package.
//!
//! Text blocks lose their surrounding whitespace when split into lines, so
//! the renderer tracks the previous sibling at each nesting level to decide
//! when a single space or a line break has to be put back between flow
//! blocks and structural ones.

use crate::error::{Error, Result};
use crate::expand::TagExpander;
use crate::model::*;
use crate::render::Renderer;
use crate::text::{collapse_whitespace, dedent, escape, is_blank};
use std::io::Write;

const COMMENT: &str = ".\\\"";
const BOLD: &str = "\\fB";
const ITALIC: &str = "\\fI";
const ROMAN: &str = "\\fR";
const OPEN_QUOTE: &str = "\\(lq";
const CLOSE_QUOTE: &str = "\\(rq";
const RULE_WIDTH: usize = 74;

pub struct NroffRenderer {
    tags: TagExpander,
}

impl NroffRenderer {
    pub fn new(tags: TagExpander) -> Self {
        NroffRenderer { tags }
    }
}

impl Renderer for NroffRenderer {
    fn render(&self, doc: &Document, out: &mut dyn Write) -> Result<()> {
        if !doc.header.is_empty() {
            let header = self.tags.expand(&doc.header)?;
            for line in header.split('\n') {
                if line.is_empty() {
                    writeln!(out, "{}", COMMENT)?;
                } else {
                    writeln!(out, "{} {}", COMMENT, line)?;
                }
            }
            writeln!(out, "{}", COMMENT)?;
        }

        let mut ctx = Context { out, doc };
        ctx.page_title()?;
        for section in &doc.sections {
            ctx.section_heading(&section.name)?;
            ctx.blocks(&section.content)?;
            writeln!(ctx.out)?;
        }
        for group in &doc.references {
            ctx.section_heading(&group.name)?;
            ctx.references(&group.content)?;
            writeln!(ctx.out)?;
        }
        Ok(())
    }
}

/// Where a block sits among its siblings.
#[derive(Clone, Copy)]
struct Position<'b> {
    index: usize,
    prev: Option<&'b Block>,
}

impl Position<'_> {
    fn is_first(&self) -> bool {
        self.index == 0
    }
}

struct Context<'a> {
    out: &'a mut dyn Write,
    doc: &'a Document,
}

impl Context<'_> {
    fn page_title(&mut self) -> Result<()> {
        let doc = self.doc;
        write!(self.out, ".TH")?;
        for field in [&doc.title, &doc.section, &doc.extra1, &doc.extra2, &doc.extra3] {
            if !field.is_empty() {
                write!(self.out, " \"{}\"", field)?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn section_heading(&mut self, name: &str) -> Result<()> {
        writeln!(self.out, "{}", COMMENT)?;
        writeln!(self.out, "{} {}", COMMENT, "=".repeat(RULE_WIDTH))?;
        writeln!(self.out, "{}", COMMENT)?;
        writeln!(self.out, ".SH \"{}\"", name)?;
        Ok(())
    }

    fn references(&mut self, references: &[Reference]) -> Result<()> {
        for (index, reference) in references.iter().enumerate() {
            if index > 0 {
                writeln!(self.out)?;
            }
            write!(
                self.out,
                ".IP \"{}.\" 4\n{}\n.RS 4\n{}\n.RE",
                reference.index,
                escape(&reference.name),
                escape(&reference.href)
            )?;
        }
        Ok(())
    }

    /// Render a sibling list. Position tracking starts afresh at each level.
    fn blocks(&mut self, blocks: &[Block]) -> Result<()> {
        let mut prev = None;
        for (index, block) in blocks.iter().enumerate() {
            self.block(Position { index, prev }, block)?;
            prev = Some(block);
        }
        Ok(())
    }

    fn block(&mut self, pos: Position<'_>, block: &Block) -> Result<()> {
        match block {
            Block::Text(text) => self.text(pos, text),
            Block::Style { style, content } => self.style(pos, *style, content),
            Block::Paragraph(content) => self.paragraph(pos, content),
            Block::BulletList(points) => self.bullet_list(points),
            Block::DefinitionList(definitions) => self.definition_list(definitions),
            Block::OptionList(options) => self.option_list(pos, options),
            Block::CrossReference { id, content } => self.cross_reference(pos, id, content),
        }
    }

    fn text(&mut self, pos: Position<'_>, text: &str) -> Result<()> {
        if let Some(prev) = pos.prev {
            if prev.is_flow() && text.starts_with(char::is_whitespace) && !is_blank(text) {
                write!(self.out, " ")?;
            }
            // keep the text off the closing directive of a code or indent block
            if prev.is_structural_style() {
                writeln!(self.out)?;
            }
        }

        let lines: Vec<String> = text
            .split('\n')
            .map(|line| escape(line.trim()))
            .filter(|line| !line.is_empty())
            .collect();
        write!(self.out, "{}", lines.join("\n"))?;
        Ok(())
    }

    /// A flow block directly after text that ended in whitespace gets the
    /// space back.
    fn pad_flow(&mut self, pos: Position<'_>) -> Result<()> {
        if let Some(Block::Text(prev)) = pos.prev {
            if prev.ends_with(char::is_whitespace) {
                write!(self.out, " ")?;
            }
        }
        Ok(())
    }

    fn style(&mut self, pos: Position<'_>, style: Style, content: &[Block]) -> Result<()> {
        match style {
            Style::Plain => self.flow(pos, "", "", content),
            Style::Bold => self.flow(pos, BOLD, ROMAN, content),
            Style::Italic => self.flow(pos, ITALIC, ROMAN, content),
            Style::Quoted => self.flow(pos, OPEN_QUOTE, CLOSE_QUOTE, content),
            Style::Code => self.code(pos, content),
            Style::Indent => self.indent(content),
        }
    }

    fn flow(&mut self, pos: Position<'_>, prefix: &str, suffix: &str, content: &[Block]) -> Result<()> {
        self.pad_flow(pos)?;
        write!(self.out, "{}", prefix)?;
        self.blocks(content)?;
        write!(self.out, "{}", suffix)?;
        Ok(())
    }

    fn code(&mut self, pos: Position<'_>, content: &[Block]) -> Result<()> {
        let mut text = String::new();
        for block in content {
            match block {
                Block::Text(t) => text.push_str(&escape(t)),
                other => {
                    return Err(Error::TypeMismatch(format!(
                        "only text is allowed within code, not {}",
                        other.kind()
                    )))
                }
            }
        }

        if !pos.is_first() {
            write!(self.out, "\n.sp\n")?;
        }
        write!(self.out, ".nf\n\\f[CR]{}{}\n.fi", dedent(&text).trim(), ROMAN)?;
        Ok(())
    }

    fn indent(&mut self, content: &[Block]) -> Result<()> {
        write!(self.out, "\n.sp\n.RS 4\n")?;
        self.blocks(content)?;
        write!(self.out, "\n.RE")?;
        Ok(())
    }

    fn paragraph(&mut self, pos: Position<'_>, content: &[Block]) -> Result<()> {
        if !pos.is_first() {
            writeln!(self.out)?;
            // lists already end with a paragraph break
            if !matches!(
                pos.prev,
                Some(Block::DefinitionList(_) | Block::BulletList(_))
            ) {
                writeln!(self.out, ".sp")?;
            }
        }
        self.blocks(content)
    }

    fn bullet_list(&mut self, points: &[BulletPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        for point in points {
            write!(self.out, "\n.IP \\[bu] 2\n")?;
            self.blocks(&point.content)?;
        }
        write!(self.out, "\n.P")?;
        Ok(())
    }

    fn definition_list(&mut self, definitions: &[Definition]) -> Result<()> {
        if definitions.is_empty() {
            return Ok(());
        }
        for (index, definition) in definitions.iter().enumerate() {
            if index > 0 {
                write!(self.out, "\n.sp")?;
            }
            write!(self.out, "\n.IP \"")?;
            self.blocks(&definition.header)?;
            writeln!(self.out, "\"")?;
            self.blocks(&definition.body)?;
        }
        write!(self.out, "\n.P")?;
        Ok(())
    }

    /// Unlike the other lists, an option list that is not the first sibling
    /// opens with a newline of its own, so its `.PP` never lands on the end
    /// of a text line.
    fn option_list(&mut self, pos: Position<'_>, options: &[OptionItem]) -> Result<()> {
        if options.is_empty() {
            return Ok(());
        }
        if !pos.is_first() {
            writeln!(self.out)?;
        }
        for (index, option) in options.iter().enumerate() {
            if index > 0 {
                write!(self.out, "\n.RE\n")?;
            }
            write!(
                self.out,
                ".PP\n{}{}{}\n.RS 4\n",
                BOLD,
                escape(&collapse_whitespace(&option.name)),
                ROMAN
            )?;
            self.blocks(&option.content)?;
        }
        write!(self.out, "\n.RE")?;
        Ok(())
    }

    fn cross_reference(&mut self, pos: Position<'_>, id: &str, content: &[Block]) -> Result<()> {
        let doc = self.doc;
        let reference = doc
            .reference(id)
            .ok_or_else(|| Error::MissingKey(id.to_string()))?;

        self.pad_flow(pos)?;
        write!(self.out, "{}", BOLD)?;
        self.blocks(content)?;
        write!(self.out, "{}[{}]", ROMAN, reference.index)?;
        Ok(())
    }
}
