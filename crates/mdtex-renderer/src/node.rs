//! Node kinds handed to the emission rules.
//!
//! A [`Node`] carries only the node's declared attributes. Its children are
//! rendered first and arrive separately as already-escaped LaTeX content.

/// Whether a list is numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Numbered list (`enumerate`).
    Ordered,
    /// Bulleted list (`itemize`).
    Unordered,
}

/// Column alignment of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// No alignment declared.
    #[default]
    None,
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

impl Alignment {
    /// Column specifier used in a `tabular` preamble.
    ///
    /// Columns without a declared alignment are right aligned.
    #[must_use]
    pub fn column_spec(self) -> char {
        match self {
            Self::Left => 'l',
            Self::Center => 'c',
            Self::Right | Self::None => 'r',
        }
    }
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

/// One element of the parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    // Block kinds
    /// Document root.
    Document,
    /// Paragraph of inline content.
    Paragraph,
    /// Heading with level 1 and up.
    Heading { level: u8 },
    /// Block quote.
    BlockQuote,
    /// Code block with optional language tag. Its content is the raw code.
    CodeBlock { language: Option<&'a str> },
    /// Ordered or unordered list.
    List { kind: ListKind },
    /// Item of a list.
    ListItem,
    /// Thematic break.
    HorizontalRule,
    /// Table with one alignment per declared column.
    Table { alignments: &'a [Alignment] },
    /// Header section of a table.
    TableHeader,
    /// Body section of a table.
    TableBody,
    /// Row of a table.
    TableRow,
    /// Cell of a table row.
    TableCell { column: usize, alignment: Alignment },
    /// Container for footnote definitions.
    FootnoteContainer,
    /// Definition list.
    DefinitionList,
    /// Term of a definition list.
    DefinitionTitle,
    /// Definition of a term.
    DefinitionDetails,
    /// Raw markup block (HTML, front matter).
    RawBlock,

    // Inline kinds
    /// Plain text. Its content is the unescaped source text.
    NormalText,
    /// Code span. Its content is the unescaped code.
    CodeSpan,
    /// `*emphasis*`.
    Emphasis,
    /// `**strong**`.
    StrongEmphasis,
    /// `***strong emphasis***`.
    StrongEmphasisItalic,
    /// Underlined text.
    Underline,
    /// `~~strikethrough~~`.
    Strikethrough,
    /// Highlighted text.
    Highlight,
    /// Quoted text.
    Quote,
    /// Hard line break.
    LineBreak,
    /// Hyperlink.
    Link {
        target: &'a str,
        title: Option<&'a str>,
    },
    /// Bare URL or email address.
    Autolink { target: &'a str, email: bool },
    /// Image. `alt` is plain text collected from the image description.
    Image {
        target: &'a str,
        title: Option<&'a str>,
        alt: &'a str,
    },
    /// `^superscript^`.
    Superscript,
    /// `~subscript~`.
    Subscript,
    /// Reference to the footnote with the given ordinal (1-based).
    FootnoteReference { ordinal: usize },
    /// Task list checkbox.
    TaskListMarker { checked: bool },
    /// `$inline math$`. Its content is the raw math source.
    InlineMath,
    /// `$$display math$$`. Its content is the raw math source.
    DisplayMath,
    /// Raw inline markup.
    RawInlineMarkup,
}

impl Node<'_> {
    /// Check if this is a block-level node.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Document
                | Self::Paragraph
                | Self::Heading { .. }
                | Self::BlockQuote
                | Self::CodeBlock { .. }
                | Self::List { .. }
                | Self::ListItem
                | Self::HorizontalRule
                | Self::Table { .. }
                | Self::TableHeader
                | Self::TableBody
                | Self::TableRow
                | Self::TableCell { .. }
                | Self::FootnoteContainer
                | Self::DefinitionList
                | Self::DefinitionTitle
                | Self::DefinitionDetails
                | Self::RawBlock
        )
    }
}
