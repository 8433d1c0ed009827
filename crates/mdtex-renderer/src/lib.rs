//! Markdown to LaTeX fragment renderer.
//!
//! This crate turns a `pulldown-cmark` event stream into a LaTeX fragment
//! suitable for `\input` into a larger document. It produces no preamble and
//! no `\begin{document}`.
//!
//! # Architecture
//!
//! Rendering is split into three layers:
//! - [`Walker`]: drives the parser events post-order, rendering every
//!   container's children into a fresh buffer before the container itself
//! - [`Emitter`]: the seam between walker and output format
//! - [`LatexRenderer`]: binds each [`Node`] kind to its LaTeX emission rule
//!   and carries the [`RendererState`] of one render pass
//!
//! [`MarkdownConverter`] wires parser options, walker and renderer together.
//!
//! # Example
//!
//! ```
//! use mdtex_renderer::MarkdownConverter;
//!
//! let result = MarkdownConverter::new().render_markdown("**Bold** & more");
//! assert_eq!(result.latex, "\\textbf{Bold} \\& more\n");
//! ```

mod block;
mod dispatch;
mod escape;
mod inline;
mod node;
mod renderer;
mod state;
mod table;
mod util;
mod walk;

pub use dispatch::{Emitter, LatexRenderer};
pub use escape::{escape_href, escape_latex};
pub use node::{Alignment, ListKind, Node};
pub use renderer::{MarkdownConverter, RenderResult};
pub use state::{RenderFlags, RendererState, TocData};
pub use walk::{WalkOutput, Walker};
