//! Post-order walk over `pulldown-cmark` events.
//!
//! The parser reports containers as start/end pairs. The walker keeps one
//! [`Frame`] per open container and renders its children into the frame's
//! own buffer, so by the time a container ends its content is complete LaTeX
//! and the emission rule only has to compose it.

use std::collections::HashMap;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, LinkType, Tag, TagEnd};

use crate::dispatch::Emitter;
use crate::escape::escape_latex;
use crate::node::{Alignment, ListKind, Node};
use crate::util::{fence_language, heading_level_to_num};

/// Output of a walk.
#[derive(Clone, Debug, Default)]
pub struct WalkOutput {
    /// Rendered LaTeX fragment.
    pub latex: String,
    /// Content that was dropped while walking (raw markup, footnote bodies).
    pub warnings: Vec<String>,
}

/// Open container with its attributes.
enum Container<'a> {
    Document,
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock(Option<String>),
    List(ListKind),
    ListItem,
    Table(Vec<Alignment>),
    TableHeader,
    TableBody,
    TableRow,
    TableCell(usize, Alignment),
    FootnoteContainer,
    DefinitionList,
    DefinitionTitle,
    DefinitionDetails,
    RawBlock,
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
    Link {
        target: CowStr<'a>,
        title: CowStr<'a>,
    },
    Autolink {
        target: CowStr<'a>,
        email: bool,
    },
    Image {
        target: CowStr<'a>,
        title: CowStr<'a>,
        alt: String,
    },
}

impl Container<'_> {
    fn node(&self) -> Node<'_> {
        match self {
            Self::Document => Node::Document,
            Self::Paragraph => Node::Paragraph,
            Self::Heading(level) => Node::Heading { level: *level },
            Self::BlockQuote => Node::BlockQuote,
            Self::CodeBlock(language) => Node::CodeBlock {
                language: language.as_deref(),
            },
            Self::List(kind) => Node::List { kind: *kind },
            Self::ListItem => Node::ListItem,
            Self::Table(alignments) => Node::Table { alignments },
            Self::TableHeader => Node::TableHeader,
            Self::TableBody => Node::TableBody,
            Self::TableRow => Node::TableRow,
            Self::TableCell(column, alignment) => Node::TableCell {
                column: *column,
                alignment: *alignment,
            },
            Self::FootnoteContainer => Node::FootnoteContainer,
            Self::DefinitionList => Node::DefinitionList,
            Self::DefinitionTitle => Node::DefinitionTitle,
            Self::DefinitionDetails => Node::DefinitionDetails,
            Self::RawBlock => Node::RawBlock,
            Self::Emphasis => Node::Emphasis,
            Self::Strong => Node::StrongEmphasis,
            Self::Strikethrough => Node::Strikethrough,
            Self::Superscript => Node::Superscript,
            Self::Subscript => Node::Subscript,
            Self::Link { target, title } => Node::Link {
                target,
                title: non_empty(title),
            },
            Self::Autolink { target, email } => Node::Autolink {
                target,
                email: *email,
            },
            Self::Image { target, title, alt } => Node::Image {
                target,
                title: non_empty(title),
                alt,
            },
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn innermost<'s, 'a>(stack: &'s [Frame<'a>]) -> Option<&'s Container<'a>> {
    stack.last().map(|frame| &frame.container)
}

fn push_alt(stack: &mut [Frame<'_>], text: &str) {
    if let Some(Frame {
        container: Container::Image { alt, .. },
        ..
    }) = stack.last_mut()
    {
        alt.push_str(text);
    }
}

/// Emphasis span whose emission is held back by its parent.
///
/// `***text***` arrives as emphasis nested directly inside strong emphasis
/// (or the reverse). The inner span is held until the parent either closes
/// with nothing else inside, which yields a single triple-emphasis node, or
/// receives more content, which releases the inner span unchanged.
struct Deferred {
    strong: bool,
    content: String,
}

struct Frame<'a> {
    container: Container<'a>,
    buffer: String,
    /// Cells opened so far (rows only).
    cells: usize,
    deferred: Option<Deferred>,
}

impl<'a> Frame<'a> {
    fn new(container: Container<'a>) -> Self {
        Self {
            container,
            buffer: String::new(),
            cells: 0,
            deferred: None,
        }
    }
}

/// Drives an [`Emitter`] from a `pulldown-cmark` event stream.
///
/// Each node is emitted exactly once, in document order, after all of its
/// children.
pub struct Walker<'e, E: Emitter> {
    emitter: &'e mut E,
    footnotes: HashMap<String, usize>,
    warnings: Vec<String>,
    /// Nesting depth of inline containers inside an image description.
    alt_depth: usize,
}

impl<'e, E: Emitter> Walker<'e, E> {
    /// Create a walker feeding `emitter`.
    pub fn new(emitter: &'e mut E) -> Self {
        Self {
            emitter,
            footnotes: HashMap::new(),
            warnings: Vec::new(),
            alt_depth: 0,
        }
    }

    /// Walk all events and return the rendered document.
    pub fn walk<'a, I>(mut self, events: I) -> WalkOutput
    where
        I: Iterator<Item = Event<'a>>,
    {
        let mut stack = vec![Frame::new(Container::Document)];

        for event in events {
            if let Some(Container::Image { .. }) = innermost(&stack) {
                self.image_event(&mut stack, event);
            } else {
                self.event(&mut stack, event);
            }
        }

        // Close anything left open by a truncated stream.
        while stack.len() > 1 {
            self.close(&mut stack);
        }

        let mut latex = String::new();
        if let Some(root) = stack.pop() {
            self.emitter
                .emit(&root.container.node(), Some(&root.buffer), &mut latex);
        }

        WalkOutput {
            latex,
            warnings: self.warnings,
        }
    }

    fn event<'a>(&mut self, stack: &mut Vec<Frame<'a>>, event: Event<'a>) {
        match event {
            Event::Start(tag) => self.start(stack, tag),
            Event::End(tag) => self.end(stack, tag),
            Event::Text(text) => {
                if let Some(Container::CodeBlock(_)) = innermost(stack) {
                    if let Some(frame) = stack.last_mut() {
                        frame.buffer.push_str(&text);
                    }
                } else {
                    self.leaf(stack, &Node::NormalText, Some(&*text));
                }
            }
            Event::Code(code) => self.leaf(stack, &Node::CodeSpan, Some(&*code)),
            Event::InlineMath(math) => self.leaf(stack, &Node::InlineMath, Some(&*math)),
            Event::DisplayMath(math) => self.leaf(stack, &Node::DisplayMath, Some(&*math)),
            Event::Html(html) | Event::InlineHtml(html) => {
                tracing::warn!(markup = %html.trim(), "Dropping raw markup");
                self.warnings
                    .push(format!("raw markup dropped: {}", html.trim()));
                self.leaf(stack, &Node::RawInlineMarkup, Some(&*html));
            }
            Event::FootnoteReference(label) => {
                let next = self.footnotes.len() + 1;
                let ordinal = *self.footnotes.entry(label.into_string()).or_insert(next);
                self.leaf(stack, &Node::FootnoteReference { ordinal }, None);
            }
            Event::SoftBreak => self.leaf(stack, &Node::NormalText, Some("\n")),
            Event::HardBreak => self.leaf(stack, &Node::LineBreak, None),
            Event::Rule => self.leaf(stack, &Node::HorizontalRule, None),
            Event::TaskListMarker(checked) => {
                self.leaf(stack, &Node::TaskListMarker { checked }, None);
            }
        }
    }

    /// Events inside an image only contribute to its alt text.
    fn image_event<'a>(&mut self, stack: &mut Vec<Frame<'a>>, event: Event<'a>) {
        match event {
            Event::Start(_) => self.alt_depth += 1,
            Event::End(_) if self.alt_depth > 0 => self.alt_depth -= 1,
            Event::End(_) => self.close(stack),
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                push_alt(stack, &text);
            }
            Event::SoftBreak | Event::HardBreak => push_alt(stack, " "),
            _ => {}
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start<'a>(&mut self, stack: &mut Vec<Frame<'a>>, tag: Tag<'a>) {
        if let Some(parent) = stack.last_mut() {
            self.flush_deferred(parent);
        }

        let container = match tag {
            Tag::Paragraph => Container::Paragraph,
            Tag::Heading { level, .. } => Container::Heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => Container::BlockQuote,
            Tag::CodeBlock(kind) => Container::CodeBlock(match kind {
                CodeBlockKind::Fenced(info) => fence_language(&info).map(str::to_owned),
                CodeBlockKind::Indented => None,
            }),
            Tag::HtmlBlock | Tag::MetadataBlock(_) => Container::RawBlock,
            Tag::List(start) => Container::List(if start.is_some() {
                ListKind::Ordered
            } else {
                ListKind::Unordered
            }),
            Tag::Item => Container::ListItem,
            Tag::FootnoteDefinition(label) => {
                tracing::debug!(%label, "Footnote definition not rendered");
                self.warnings
                    .push(format!("footnote definition `{label}` not rendered"));
                Container::FootnoteContainer
            }
            Tag::DefinitionList => Container::DefinitionList,
            Tag::DefinitionListTitle => Container::DefinitionTitle,
            Tag::DefinitionListDefinition => Container::DefinitionDetails,
            Tag::Table(alignments) => {
                Container::Table(alignments.into_iter().map(Alignment::from).collect())
            }
            Tag::TableHead => {
                // The header cells sit directly in the head; give them a row.
                stack.push(Frame::new(Container::TableHeader));
                Container::TableRow
            }
            Tag::TableRow => {
                if let Some(Container::Table(_)) = innermost(stack) {
                    stack.push(Frame::new(Container::TableBody));
                }
                Container::TableRow
            }
            Tag::TableCell => {
                let column = stack.last_mut().map_or(0, |row| {
                    row.cells += 1;
                    row.cells - 1
                });
                let alignment = stack
                    .iter()
                    .rev()
                    .find_map(|f| match &f.container {
                        Container::Table(alignments) => alignments.get(column).copied(),
                        _ => None,
                    })
                    .unwrap_or_default();
                Container::TableCell(column, alignment)
            }
            Tag::Emphasis => Container::Emphasis,
            Tag::Strong => Container::Strong,
            Tag::Strikethrough => Container::Strikethrough,
            Tag::Superscript => Container::Superscript,
            Tag::Subscript => Container::Subscript,
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => match link_type {
                LinkType::Autolink => Container::Autolink {
                    target: dest_url,
                    email: false,
                },
                LinkType::Email => Container::Autolink {
                    target: dest_url,
                    email: true,
                },
                _ => Container::Link {
                    target: dest_url,
                    title,
                },
            },
            Tag::Image {
                dest_url, title, ..
            } => Container::Image {
                target: dest_url,
                title,
                alt: String::new(),
            },
        };
        stack.push(Frame::new(container));
    }

    fn end<'a>(&mut self, stack: &mut Vec<Frame<'a>>, tag: TagEnd) {
        match tag {
            // Synthetic row and body frames close with their parent.
            TagEnd::TableHead => {
                self.close(stack);
                self.close(stack);
            }
            TagEnd::Table => {
                if let Some(Container::TableBody) = innermost(stack) {
                    self.close(stack);
                }
                self.close(stack);
            }
            _ => self.close(stack),
        }
    }

    /// Emit a node without children into the innermost open container.
    fn leaf(&mut self, stack: &mut [Frame<'_>], node: &Node<'_>, content: Option<&str>) {
        let Some(parent) = stack.last_mut() else {
            return;
        };
        self.flush_deferred(parent);

        if !self.emitter.emit(node, content, &mut parent.buffer) {
            tracing::trace!(?node, "Unhandled node, falling back to text");
            if let Some(content) = content {
                parent.buffer.push_str(&escape_latex(content));
            }
        }
    }

    /// Pop the innermost container and emit it into its parent.
    fn close(&mut self, stack: &mut Vec<Frame<'_>>) {
        if stack.len() <= 1 {
            return;
        }
        let Some(mut frame) = stack.pop() else {
            return;
        };
        let Some(parent) = stack.last_mut() else {
            return;
        };

        if let Some(deferred) = frame.deferred.take() {
            if frame.buffer.is_empty() {
                self.emit_into(
                    parent,
                    &Node::StrongEmphasisItalic,
                    &deferred.content,
                );
                return;
            }
            frame.deferred = Some(deferred);
            self.flush_deferred(&mut frame);
        }

        let inner_strong = match (&frame.container, &parent.container) {
            (Container::Emphasis, Container::Strong) => Some(false),
            (Container::Strong, Container::Emphasis) => Some(true),
            _ => None,
        };
        if let Some(strong) = inner_strong
            && parent.buffer.is_empty()
            && parent.deferred.is_none()
        {
            parent.deferred = Some(Deferred {
                strong,
                content: frame.buffer,
            });
            return;
        }

        let node = frame.container.node();
        self.emit_into(parent, &node, &frame.buffer);
    }

    fn emit_into(&mut self, parent: &mut Frame<'_>, node: &Node<'_>, content: &str) {
        if !self.emitter.emit(node, Some(content), &mut parent.buffer) {
            tracing::trace!(?node, "Unhandled node, keeping rendered content");
            parent.buffer.push_str(content);
        }
    }

    /// Release a held-back emphasis span as an ordinary span.
    fn flush_deferred(&mut self, frame: &mut Frame<'_>) {
        if let Some(deferred) = frame.deferred.take() {
            let node = if deferred.strong {
                Node::StrongEmphasis
            } else {
                Node::Emphasis
            };
            self.emit_into(frame, &node, &deferred.content);
        }
    }
}
