//! Streaming block parser
//!
//! Walks normalized markup once, in document order, and emits typed
//! blocks. Because the walk itself preserves source order there is no
//! per-type extraction pass to merge afterwards; headings, paragraphs,
//! and list items come out exactly as they appear in the source.

use crate::error::{MarkupError, Result};
use doc_model::{Block, InlineSpan};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Maximum heading depth; deeper headings clamp to this level
const MAX_HEADING_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem { ordered: bool, index: Option<u32> },
}

struct ListContext {
    ordered: bool,
    next_index: u32,
}

/// Parser state for a single walk over the markup
struct BlockWalker {
    blocks: Vec<Block>,
    current: Option<(BlockKind, Vec<InlineSpan>)>,
    lists: Vec<ListContext>,
    bold_depth: usize,
    italic_depth: usize,
}

impl BlockWalker {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: None,
            lists: Vec::new(),
            bold_depth: 0,
            italic_depth: 0,
        }
    }

    fn open_element(&mut self, name: &str) {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<u8>().unwrap_or(1).min(MAX_HEADING_LEVEL);
                self.open_block(BlockKind::Heading(level));
            }
            // A paragraph nested in a list item contributes its text to
            // the item instead of opening a block of its own
            "p" if !self.in_list_item() => self.open_block(BlockKind::Paragraph),
            "ul" => self.lists.push(ListContext {
                ordered: false,
                next_index: 1,
            }),
            "ol" => self.lists.push(ListContext {
                ordered: true,
                next_index: 1,
            }),
            "li" => {
                let (ordered, index) = match self.lists.last_mut() {
                    Some(ctx) if ctx.ordered => {
                        let index = ctx.next_index;
                        ctx.next_index += 1;
                        (true, Some(index))
                    }
                    Some(_) => (false, None),
                    // A stray li outside any list renders as a bullet
                    None => (false, None),
                };
                self.open_block(BlockKind::ListItem { ordered, index });
            }
            "strong" | "b" => self.bold_depth += 1,
            "em" | "i" => self.italic_depth += 1,
            // Chrome wrappers and unknown containers are transparent
            _ => {}
        }
    }

    fn close_element(&mut self, name: &str) {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" => self.close_block(),
            "p" if !self.in_list_item() => self.close_block(),
            "ul" | "ol" => {
                self.lists.pop();
            }
            "strong" | "b" => self.bold_depth = self.bold_depth.saturating_sub(1),
            "em" | "i" => self.italic_depth = self.italic_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        let Some((_, spans)) = self.current.as_mut() else {
            // Text outside any block element (inter-tag whitespace) is
            // not part of the document
            return;
        };
        if text.is_empty() {
            return;
        }
        let bold = self.bold_depth > 0;
        let italic = self.italic_depth > 0;
        match spans.last_mut() {
            Some(last) if last.bold == bold && last.italic == italic => {
                last.text.push_str(text);
            }
            _ => spans.push(InlineSpan {
                text: text.to_string(),
                bold,
                italic,
            }),
        }
    }

    fn in_list_item(&self) -> bool {
        matches!(self.current, Some((BlockKind::ListItem { .. }, _)))
    }

    fn open_block(&mut self, kind: BlockKind) {
        // Blocks never nest in the content subset; an unclosed one is
        // flushed before the next opens
        self.close_block();
        self.current = Some((kind, Vec::new()));
    }

    fn close_block(&mut self) {
        let Some((kind, spans)) = self.current.take() else {
            return;
        };
        if spans.iter().all(|s| s.text.trim().is_empty()) {
            return;
        }
        let block = match kind {
            BlockKind::Heading(level) => Block::Heading { level, spans },
            BlockKind::Paragraph => Block::Paragraph { spans },
            BlockKind::ListItem { ordered, index } => Block::ListItem {
                ordered,
                index,
                spans,
            },
        };
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_block();
        self.blocks
    }
}

/// Parse normalized markup into blocks in document order
pub fn parse_blocks(markup: &str) -> Result<Vec<Block>> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut walker = BlockWalker::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                walker.open_element(&name);
            }
            Ok(Event::Empty(_)) => {}
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                walker.close_element(&name);
            }
            Ok(Event::Text(e)) => {
                let text = match e.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(_) => String::from_utf8_lossy(e.as_ref()).into_owned(),
                };
                walker.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(MarkupError::Parse(e.to_string())),
            Ok(_) => {}
        }
    }

    Ok(walker.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_raw;

    #[test]
    fn blocks_come_out_in_document_order() {
        let blocks = parse_blocks(
            "<h1>One</h1><p>alpha</p><h2>Two</h2><p>beta</p><p>gamma</p><h3>Three</h3>",
        )
        .unwrap();
        let kinds: Vec<String> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => format!("h{level}:{}", b.plain_text()),
                Block::Paragraph { .. } => format!("p:{}", b.plain_text()),
                Block::ListItem { .. } => format!("li:{}", b.plain_text()),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["h1:One", "p:alpha", "h2:Two", "p:beta", "p:gamma", "h3:Three"]
        );
    }

    #[test]
    fn interleaved_types_keep_source_order() {
        let blocks =
            parse_blocks("<p>a</p><ul><li>b</li></ul><h2>c</h2><ol><li>d</li></ol><p>e</p>")
                .unwrap();
        let texts: Vec<String> = blocks.iter().map(|b| b.plain_text()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn three_list_items_yield_three_blocks_in_order() {
        let html = normalize_raw("- a\n- b\n- c\n").unwrap();
        let blocks = parse_blocks(&html).unwrap();
        assert_eq!(blocks.len(), 3);
        for (block, expected) in blocks.iter().zip(["a", "b", "c"]) {
            assert!(matches!(
                block,
                Block::ListItem { ordered: false, .. }
            ));
            assert_eq!(block.plain_text(), expected);
        }
    }

    #[test]
    fn ordered_items_carry_one_based_indices() {
        let blocks = parse_blocks("<ol><li>x</li><li>y</li><li>z</li></ol>").unwrap();
        let indices: Vec<Option<u32>> = blocks
            .iter()
            .map(|b| match b {
                Block::ListItem { index, .. } => *index,
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn inline_emphasis_becomes_span_flags() {
        let blocks = parse_blocks("<p>plain <strong>bold</strong> <em>italic</em></p>").unwrap();
        let Block::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 4);
        assert!(!spans[0].bold && !spans[0].italic);
        assert!(spans[1].bold && !spans[1].italic);
        assert!(spans[3].italic && !spans[3].bold);
    }

    #[test]
    fn nested_emphasis_sets_both_flags() {
        let blocks = parse_blocks("<p><strong><em>both</em></strong></p>").unwrap();
        let span = &blocks[0].spans()[0];
        assert!(span.bold && span.italic);
    }

    #[test]
    fn deep_headings_clamp_to_level_three() {
        let blocks = parse_blocks("<h5>deep</h5>").unwrap();
        assert!(matches!(blocks[0], Block::Heading { level: 3, .. }));
    }

    #[test]
    fn chrome_wrappers_are_transparent() {
        let blocks =
            parse_blocks("<div id=\"app\"><section><h1>T</h1><p>b</p></section></div>").unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn paragraph_inside_list_item_merges_into_the_item() {
        let blocks = parse_blocks("<ul><li><p>loose item</p></li></ul>").unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_list_item());
        assert_eq!(blocks[0].plain_text(), "loose item");
    }

    #[test]
    fn whitespace_only_blocks_are_dropped() {
        let blocks = parse_blocks("<p>   </p><p>real</p>").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "real");
    }

    #[test]
    fn markdown_pipeline_end_to_end() {
        let html = normalize_raw("# Title\nBody text.").unwrap();
        let blocks = parse_blocks(&html).unwrap();
        assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
        assert_eq!(blocks[0].plain_text(), "Title");
    }
}
