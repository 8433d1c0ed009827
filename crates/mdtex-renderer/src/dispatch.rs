//! Binding of node kinds to emission rules.

use crate::block;
use crate::inline;
use crate::node::Node;
use crate::state::{RenderFlags, RendererState};
use crate::table;

/// Receiver of nodes from a [`Walker`](crate::Walker).
///
/// The walker calls [`emit`](Self::emit) exactly once per node, after all of
/// the node's children have been emitted into `content`.
pub trait Emitter {
    /// Emit `node` into `out`.
    ///
    /// Returns `false` if the node was not handled; the caller then appends
    /// `content` unchanged.
    fn emit(&mut self, node: &Node<'_>, content: Option<&str>, out: &mut String) -> bool;
}

/// LaTeX emission rules plus the state they share during one render pass.
///
/// # Example
///
/// ```
/// use mdtex_renderer::{Emitter, LatexRenderer, Node, RenderFlags};
///
/// let mut renderer = LatexRenderer::new(RenderFlags::default(), 0);
/// let mut out = String::new();
/// renderer.emit(&Node::Heading { level: 2 }, Some("Usage"), &mut out);
/// assert_eq!(out, "\\subsection{Usage}\n");
/// ```
#[derive(Debug)]
pub struct LatexRenderer {
    state: RendererState,
}

impl LatexRenderer {
    /// Create a renderer with zeroed counters.
    #[must_use]
    pub fn new(flags: RenderFlags, nesting_level: u8) -> Self {
        Self {
            state: RendererState::new(flags, nesting_level),
        }
    }

    /// Current renderer state.
    #[must_use]
    pub fn state(&self) -> &RendererState {
        &self.state
    }
}

impl Emitter for LatexRenderer {
    fn emit(&mut self, node: &Node<'_>, content: Option<&str>, out: &mut String) -> bool {
        match *node {
            Node::Document => block::document(content, out),
            Node::Paragraph => block::paragraph(&self.state, content, out),
            Node::Heading { level } => block::heading(&mut self.state, level, content, out),
            Node::BlockQuote => block::blockquote(content, out),
            Node::CodeBlock { language } => block::code_block(language, content, out),
            Node::List { kind } => block::list(kind, content, out),
            Node::ListItem => block::list_item(content, out),
            Node::HorizontalRule => block::horizontal_rule(out),
            Node::Table { alignments } => table::table(alignments, content, out),
            Node::TableHeader | Node::TableBody => table::section(content, out),
            Node::TableRow => table::row(content, out),
            Node::TableCell { column, .. } => table::cell(column, content, out),
            Node::DefinitionList => block::definition_list(content, out),
            Node::DefinitionTitle => block::definition_title(content, out),
            Node::DefinitionDetails => block::definition_details(content, out),
            // Footnote definitions are not rendered; raw markup cannot be
            // trusted inside LaTeX source.
            Node::FootnoteContainer | Node::RawBlock | Node::RawInlineMarkup => {
                tracing::debug!(?node, "Dropping unsupported node");
            }

            Node::NormalText => return inline::normal_text(content, out),
            Node::CodeSpan => return inline::code_span(content, out),
            Node::Emphasis => return inline::wrap("emph", content, out),
            Node::StrongEmphasis => return inline::wrap("textbf", content, out),
            Node::StrongEmphasisItalic => return inline::strong_emphasis_italic(content, out),
            Node::Underline => return inline::wrap("underline", content, out),
            Node::Strikethrough => return inline::wrap("sout", content, out),
            Node::Highlight => return inline::wrap("hl", content, out),
            Node::Superscript => return inline::wrap("textsuperscript", content, out),
            Node::Subscript => return inline::wrap("textsubscript", content, out),
            Node::Quote => return inline::quote(content, out),
            Node::LineBreak => return inline::line_break(out),
            Node::FootnoteReference { ordinal } => return inline::footnote_reference(ordinal, out),
            Node::Link { target, title } => return inline::link(target, title, content, out),
            Node::Autolink { target, email } => {
                return inline::autolink(target, email, content, out);
            }
            Node::Image { target, title, alt } => return inline::image(target, title, alt, out),
            Node::InlineMath => {
                return inline::math(false, self.state.flags().hard_wrap, content, out);
            }
            Node::DisplayMath => {
                return inline::math(true, self.state.flags().hard_wrap, content, out);
            }
            Node::TaskListMarker { checked } => return inline::task_list_marker(checked, out),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Alignment, ListKind};
    use pretty_assertions::assert_eq;

    fn emit(renderer: &mut LatexRenderer, node: &Node<'_>, content: Option<&str>) -> String {
        let mut out = String::new();
        renderer.emit(node, content, &mut out);
        out
    }

    #[test]
    fn test_new_renderer_state() {
        let renderer = LatexRenderer::new(RenderFlags::default().with_heading_anchors(true), 2);
        assert!(renderer.state().flags().heading_anchors);
        assert_eq!(renderer.state().toc().nesting_level, 2);
        assert_eq!(renderer.state().toc().heading_count, 0);
    }

    #[test]
    fn test_unsupported_nodes_produce_nothing() {
        let mut renderer = LatexRenderer::new(RenderFlags::default(), 0);
        let mut out = String::from("kept");
        assert!(renderer.emit(&Node::RawInlineMarkup, Some("<b>x</b>"), &mut out));
        assert!(renderer.emit(&Node::RawBlock, Some("<div></div>"), &mut out));
        assert!(renderer.emit(&Node::FootnoteContainer, Some("note"), &mut out));
        assert_eq!(out, "kept");
    }

    #[test]
    fn test_emphasis_family_commands() {
        let mut renderer = LatexRenderer::new(RenderFlags::default(), 0);
        let cases = [
            (Node::Emphasis, "\\emph{x}"),
            (Node::StrongEmphasis, "\\textbf{x}"),
            (Node::StrongEmphasisItalic, "\\textbf{\\emph{x}}"),
            (Node::Underline, "\\underline{x}"),
            (Node::Strikethrough, "\\sout{x}"),
            (Node::Highlight, "\\hl{x}"),
            (Node::Superscript, "\\textsuperscript{x}"),
            (Node::Subscript, "\\textsubscript{x}"),
        ];
        for (node, expected) in cases {
            assert_eq!(emit(&mut renderer, &node, Some("x")), expected);
        }
    }

    #[test]
    fn test_empty_span_not_handled() {
        let mut renderer = LatexRenderer::new(RenderFlags::default(), 0);
        let mut out = String::new();
        assert!(!renderer.emit(&Node::StrongEmphasis, Some(""), &mut out));
        assert!(!renderer.emit(&Node::Quote, None, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_blocks_separated_by_one_newline() {
        let mut renderer = LatexRenderer::new(RenderFlags::default(), 0);
        let mut out = String::new();
        renderer.emit(&Node::Heading { level: 1 }, Some("Title"), &mut out);
        renderer.emit(&Node::Paragraph, Some("Body"), &mut out);
        renderer.emit(
            &Node::List {
                kind: ListKind::Unordered,
            },
            Some("\\item a\n"),
            &mut out,
        );
        renderer.emit(&Node::HorizontalRule, None, &mut out);
        assert_eq!(
            out,
            "\\section{Title}\n\nBody\n\n\\begin{itemize}\n\\item a\n\\end{itemize}\n\n\\hrule\\vskip\\baselineskip\n"
        );
        assert_eq!(renderer.state().toc().heading_count, 1);
    }

    #[test]
    fn test_table_cells_dispatch_on_column() {
        let mut renderer = LatexRenderer::new(RenderFlags::default(), 0);
        let first = Node::TableCell {
            column: 0,
            alignment: Alignment::Left,
        };
        let second = Node::TableCell {
            column: 1,
            alignment: Alignment::Left,
        };
        assert_eq!(emit(&mut renderer, &first, Some("a")), "a");
        assert_eq!(emit(&mut renderer, &second, Some("b")), " & b");
    }
}
