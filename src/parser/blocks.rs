//! Block grammar for section content.

use super::{attribute, is_tag};
use crate::error::{Diagnostics, Warning};
use crate::model::*;
use crate::text::is_blank;
use roxmltree::Node;

/// Parse a run of sibling nodes, dropping whitespace-only text.
pub fn parse_blocks<'a, 'input: 'a>(
    nodes: impl Iterator<Item = Node<'a, 'input>>,
    diagnostics: &mut Diagnostics,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    for node in nodes {
        match parse_block(node, diagnostics) {
            Some(Block::Text(text)) if is_blank(&text) => {}
            Some(block) => blocks.push(block),
            None => {}
        }
    }
    blocks
}

fn parse_block(node: Node, diagnostics: &mut Diagnostics) -> Option<Block> {
    if node.is_text() {
        return node.text().map(|t| Block::Text(t.to_string()));
    }
    if !node.is_element() {
        // comments and processing instructions
        return None;
    }

    let block = match node.tag_name().name() {
        "bold" => styled(Style::Bold, node, diagnostics),
        "italic" => styled(Style::Italic, node, diagnostics),
        "quote" => styled(Style::Quoted, node, diagnostics),
        "indent" => styled(Style::Indent, node, diagnostics),
        "code" => styled(Style::Code, node, diagnostics),
        "bltlist" => Block::BulletList(parse_bullet_points(node, diagnostics)),
        "deflist" => Block::DefinitionList(parse_definitions(node, diagnostics)),
        "options" => Block::OptionList(parse_options(node, diagnostics)),
        "paragraph" => Block::Paragraph(parse_blocks(node.children(), diagnostics)),
        "ref" => Block::CrossReference {
            id: attribute(node, "id"),
            content: parse_blocks(node.children(), diagnostics),
        },
        other => {
            diagnostics.warn(Warning::UnrecognisedTag(other.to_string()));
            return None;
        }
    };
    Some(block)
}

fn styled(style: Style, node: Node, diagnostics: &mut Diagnostics) -> Block {
    Block::Style {
        style,
        content: parse_blocks(node.children(), diagnostics),
    }
}

fn parse_bullet_points(node: Node, diagnostics: &mut Diagnostics) -> Vec<BulletPoint> {
    node.children()
        .filter(|child| is_tag(*child, "bltpoint"))
        .map(|child| BulletPoint {
            content: parse_blocks(child.children(), diagnostics),
        })
        .collect()
}

/// Pair each `<defheader>` with the `<defbody>` that follows it. Further
/// headers seen while one is still waiting for its body are skipped.
fn parse_definitions(node: Node, diagnostics: &mut Diagnostics) -> Vec<Definition> {
    let mut definitions = Vec::new();
    let mut pending: Option<Vec<Block>> = None;

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "defheader" if pending.is_some() => {
                diagnostics.warn(Warning::DefHeaderWithoutBody);
            }
            "defheader" => pending = Some(parse_blocks(child.children(), diagnostics)),
            "defbody" => match pending.take() {
                Some(header) => definitions.push(Definition {
                    header,
                    body: parse_blocks(child.children(), diagnostics),
                }),
                None => diagnostics.warn(Warning::DefBodyWithoutHeader),
            },
            _ => {}
        }
    }

    if pending.is_some() {
        diagnostics.warn(Warning::DefHeaderWithoutBody);
    }
    definitions
}

fn parse_options(node: Node, diagnostics: &mut Diagnostics) -> Vec<OptionItem> {
    node.children()
        .filter(|child| is_tag(*child, "option"))
        .map(|child| OptionItem {
            name: attribute(child, "name"),
            content: parse_blocks(child.children(), diagnostics),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks_of(xml: &str) -> (Vec<Block>, Diagnostics) {
        let doc = roxmltree::Document::parse(xml).unwrap();
        let mut diag = Diagnostics::default();
        let blocks = parse_blocks(doc.root_element().children(), &mut diag);
        (blocks, diag)
    }

    fn text(s: &str) -> Block {
        Block::Text(s.to_string())
    }

    #[test]
    fn whitespace_text_is_dropped() {
        let (blocks, _) = blocks_of("<s>\n   <bold>x</bold>\n  </s>");
        assert_eq!(
            blocks,
            vec![Block::Style {
                style: Style::Bold,
                content: vec![text("x")]
            }]
        );
    }

    #[test]
    fn text_keeps_surrounding_whitespace() {
        let (blocks, _) = blocks_of("<s> a <italic>b</italic> c </s>");
        assert_eq!(blocks[0], text(" a "));
        assert_eq!(blocks[2], text(" c "));
    }

    #[test]
    fn style_tags() {
        let (blocks, _) = blocks_of(
            "<s><bold/><italic/><quote/><indent/><code/></s>",
        );
        let styles: Vec<_> = blocks
            .iter()
            .map(|b| match b {
                Block::Style { style, .. } => *style,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(
            styles,
            [Style::Bold, Style::Italic, Style::Quoted, Style::Indent, Style::Code]
        );
    }

    #[test]
    fn empty_blocks_are_kept() {
        let (blocks, _) = blocks_of("<s><bltlist>\n</bltlist><paragraph/><options/></s>");
        assert_eq!(
            blocks,
            vec![
                Block::BulletList(vec![]),
                Block::Paragraph(vec![]),
                Block::OptionList(vec![])
            ]
        );
    }

    #[test]
    fn bullet_points() {
        let (blocks, _) = blocks_of(
            "<s><bltlist><bltpoint>one</bltpoint> <other/> <bltpoint>two</bltpoint></bltlist></s>",
        );
        assert_eq!(
            blocks,
            vec![Block::BulletList(vec![
                BulletPoint { content: vec![text("one")] },
                BulletPoint { content: vec![text("two")] },
            ])]
        );
    }

    #[test]
    fn definitions_pair_up() {
        let (blocks, diag) = blocks_of(
            "<s><deflist>
               <defheader>a</defheader><defbody>1</defbody>
               <defheader>b</defheader><defbody>2</defbody>
             </deflist></s>",
        );
        assert!(diag.warnings().is_empty());
        assert_eq!(
            blocks,
            vec![Block::DefinitionList(vec![
                Definition { header: vec![text("a")], body: vec![text("1")] },
                Definition { header: vec![text("b")], body: vec![text("2")] },
            ])]
        );
    }

    #[test]
    fn dangling_defheader_is_discarded() {
        let (blocks, diag) = blocks_of(
            "<s><deflist><defheader>a</defheader><defbody>1</defbody><defheader>b</defheader></deflist></s>",
        );
        assert_eq!(
            blocks,
            vec![Block::DefinitionList(vec![Definition {
                header: vec![text("a")],
                body: vec![text("1")]
            }])]
        );
        assert_eq!(diag.warnings(), &[Warning::DefHeaderWithoutBody]);
    }

    #[test]
    fn repeated_defheader_keeps_the_first() {
        let (blocks, diag) = blocks_of(
            "<s><deflist><defheader>a</defheader><defheader>b</defheader><defbody>1</defbody></deflist></s>",
        );
        assert_eq!(
            blocks,
            vec![Block::DefinitionList(vec![Definition {
                header: vec![text("a")],
                body: vec![text("1")]
            }])]
        );
        assert_eq!(diag.warnings(), &[Warning::DefHeaderWithoutBody]);
    }

    #[test]
    fn empty_defheader_still_pairs() {
        let (blocks, diag) = blocks_of(
            "<s><deflist><defheader/><defbody>1</defbody></deflist></s>",
        );
        assert!(diag.warnings().is_empty());
        assert_eq!(
            blocks,
            vec![Block::DefinitionList(vec![Definition {
                header: vec![],
                body: vec![text("1")]
            }])]
        );
    }

    #[test]
    fn orphan_defbody_warns() {
        let (blocks, diag) = blocks_of("<s><deflist><defbody>1</defbody></deflist></s>");
        assert_eq!(blocks, vec![Block::DefinitionList(vec![])]);
        assert_eq!(diag.warnings(), &[Warning::DefBodyWithoutHeader]);
    }

    #[test]
    fn options_and_refs() {
        let (blocks, _) = blocks_of(
            r#"<s><options><option name="-v">verbose</option></options><ref id="rfc">RFC</ref></s>"#,
        );
        assert_eq!(
            blocks,
            vec![
                Block::OptionList(vec![OptionItem {
                    name: "-v".into(),
                    content: vec![text("verbose")]
                }]),
                Block::CrossReference {
                    id: "rfc".into(),
                    content: vec![text("RFC")]
                },
            ]
        );
    }

    #[test]
    fn unknown_tag_skips_subtree() {
        let (blocks, diag) = blocks_of("<s><table><bold>x</bold></table><!-- note --></s>");
        assert!(blocks.is_empty());
        assert_eq!(diag.warnings(), &[Warning::UnrecognisedTag("table".into())]);
    }

    #[test]
    fn nested_paragraph() {
        let (blocks, _) = blocks_of("<s><paragraph>see <quote>this</quote></paragraph></s>");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("see "),
                Block::Style {
                    style: Style::Quoted,
                    content: vec![text("this")]
                }
            ])]
        );
    }
}
