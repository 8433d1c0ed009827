//! High-level markdown to LaTeX conversion.

use pulldown_cmark::{Event, Options, Parser};

use crate::dispatch::LatexRenderer;
use crate::state::RenderFlags;
use crate::walk::Walker;

/// Result of converting markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered LaTeX fragment.
    pub latex: String,
    /// Number of headings rendered.
    pub heading_count: usize,
    /// Warnings about content that could not be rendered (raw markup,
    /// footnote definitions).
    pub warnings: Vec<String>,
}

/// Markdown to LaTeX converter.
///
/// Holds the parser options and render flags. Every call to
/// [`render`](Self::render) starts from fresh renderer state, so one
/// converter can be reused across documents.
///
/// # Example
///
/// ```
/// use mdtex_renderer::MarkdownConverter;
///
/// let result = MarkdownConverter::new()
///     .with_heading_anchors(true)
///     .render_markdown("# Intro\n\nSome *text*.");
/// assert_eq!(
///     result.latex,
///     "\\section{Intro}\\label{Intro}\n\nSome \\emph{text}.\n"
/// );
/// assert_eq!(result.heading_count, 1);
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    flags: RenderFlags,
    nesting_level: u8,
    gfm: bool,
    footnotes: bool,
    math: bool,
}

impl MarkdownConverter {
    /// Create a converter with GFM, footnotes and math enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: RenderFlags::default(),
            nesting_level: 0,
            gfm: true,
            footnotes: true,
            math: true,
        }
    }

    /// Break lines inside paragraphs wherever the source has a newline.
    #[must_use]
    pub fn with_hard_wrap(mut self, enabled: bool) -> Self {
        self.flags = self.flags.with_hard_wrap(enabled);
        self
    }

    /// Emit a `\label` after every heading.
    #[must_use]
    pub fn with_heading_anchors(mut self, enabled: bool) -> Self {
        self.flags = self.flags.with_heading_anchors(enabled);
        self
    }

    /// Set the heading nesting level recorded in the renderer state.
    #[must_use]
    pub fn with_nesting_level(mut self, level: u8) -> Self {
        self.nesting_level = level;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Superscript (`^text^`) and subscript (`~text~`)
    /// - Definition lists
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable footnotes (`[^label]`).
    #[must_use]
    pub fn with_footnotes(mut self, enabled: bool) -> Self {
        self.footnotes = enabled;
        self
    }

    /// Enable or disable `$inline$` and `$$display$$` math.
    #[must_use]
    pub fn with_math(mut self, enabled: bool) -> Self {
        self.math = enabled;
        self
    }

    /// Render flags passed to each render pass.
    #[must_use]
    pub fn flags(&self) -> RenderFlags {
        self.flags
    }

    /// Get parser options based on configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
                | Options::ENABLE_SUPERSCRIPT
                | Options::ENABLE_SUBSCRIPT
                | Options::ENABLE_DEFINITION_LIST;
        }
        if self.footnotes {
            options |= Options::ENABLE_FOOTNOTES;
        }
        if self.math {
            options |= Options::ENABLE_MATH;
        }
        options
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        let mut renderer = LatexRenderer::new(self.flags, self.nesting_level);
        let output = Walker::new(&mut renderer).walk(events);
        let heading_count = renderer.state().toc().heading_count;

        tracing::debug!(
            bytes = output.latex.len(),
            headings = heading_count,
            warnings = output.warnings.len(),
            "Rendered LaTeX fragment"
        );

        RenderResult {
            latex: output.latex,
            heading_count,
            warnings: output.warnings,
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}
