//! Emission rules for block-level nodes.
//!
//! Every block that stands on its own starts with [`separate`]: one newline
//! when the buffer already holds output, nothing otherwise. Environments are
//! always closed, even around empty content.

use crate::escape::escape_latex;
use crate::node::ListKind;
use crate::state::RendererState;

/// LaTeX line break command followed by a newline.
pub(crate) const LINE_BREAK: &str = "\\\\\n";

/// Sectioning commands for heading levels 1-5.
const SECTION_COMMANDS: [&str; 5] = [
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Append the block separator if the buffer is non-empty.
pub(crate) fn separate(out: &mut String) {
    if !out.is_empty() {
        out.push('\n');
    }
}

fn begin(env: &str, out: &mut String) {
    out.push_str("\\begin{");
    out.push_str(env);
    out.push('}');
}

fn end(env: &str, out: &mut String) {
    out.push_str("\\end{");
    out.push_str(env);
    out.push_str("}\n");
}

/// Wrap content in `\begin{env}` / `\end{env}` on their own lines.
fn environment(env: &str, content: Option<&str>, out: &mut String) {
    separate(out);
    begin(env, out);
    out.push('\n');
    if let Some(content) = content {
        out.push_str(content);
    }
    end(env, out);
}

/// Blank characters trimmed from the start of a paragraph, vertical tab included.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub(crate) fn document(content: Option<&str>, out: &mut String) {
    if let Some(content) = content {
        out.push_str(content);
    }
}

pub(crate) fn paragraph(state: &RendererState, content: Option<&str>, out: &mut String) {
    let Some(content) = content
        .map(|c| c.trim_start_matches(is_blank))
        .filter(|c| !c.is_empty())
    else {
        return;
    };

    separate(out);
    if state.flags().hard_wrap {
        let mut rest = content;
        while let Some(pos) = rest.find('\n') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];
            // No break for a newline that ends the paragraph
            if rest.is_empty() {
                break;
            }
            out.push_str(LINE_BREAK);
        }
        out.push_str(rest);
    } else {
        out.push_str(content);
    }
    out.push('\n');
}

pub(crate) fn heading(
    state: &mut RendererState,
    level: u8,
    content: Option<&str>,
    out: &mut String,
) {
    let content = content.unwrap_or_default();

    separate(out);
    let command = usize::from(level)
        .checked_sub(1)
        .and_then(|index| SECTION_COMMANDS.get(index));
    if let Some(command) = command {
        out.push('\\');
        out.push_str(command);
    }
    out.push('{');
    out.push_str(content);
    out.push('}');

    // The rendered heading text doubles as the label key.
    if state.flags().heading_anchors {
        out.push_str("\\label{");
        out.push_str(content);
        out.push('}');
    }
    out.push('\n');

    state.record_heading(level);
}

pub(crate) fn blockquote(content: Option<&str>, out: &mut String) {
    environment("quotation", content, out);
}

pub(crate) fn code_block(language: Option<&str>, content: Option<&str>, out: &mut String) {
    let env = if language.is_some() {
        "minted"
    } else {
        "verbatim"
    };

    separate(out);
    begin(env, out);
    if let Some(language) = language {
        out.push('{');
        out.push_str(&escape_latex(language));
        out.push('}');
    }
    out.push('\n');

    if let Some(content) = content.filter(|c| !c.is_empty()) {
        out.push_str(content);
        // `\end{verbatim}` is only recognized at the start of a line
        if !content.ends_with('\n') {
            out.push('\n');
        }
    }
    end(env, out);
}

pub(crate) fn list(kind: ListKind, content: Option<&str>, out: &mut String) {
    let env = match kind {
        ListKind::Ordered => "enumerate",
        ListKind::Unordered => "itemize",
    };
    environment(env, content, out);
}

pub(crate) fn list_item(content: Option<&str>, out: &mut String) {
    out.push_str("\\item ");
    if let Some(content) = content {
        out.push_str(content.trim_end_matches('\n'));
    }
    out.push('\n');
}

pub(crate) fn horizontal_rule(out: &mut String) {
    separate(out);
    out.push_str("\\hrule\\vskip\\baselineskip\n");
}

pub(crate) fn definition_list(content: Option<&str>, out: &mut String) {
    environment("description", content, out);
}

pub(crate) fn definition_title(content: Option<&str>, out: &mut String) {
    out.push_str("\\item[");
    if let Some(content) = content {
        out.push_str(content.trim());
    }
    out.push_str("]\n");
}

pub(crate) fn definition_details(content: Option<&str>, out: &mut String) {
    if let Some(content) = content {
        out.push_str(content.trim_end_matches('\n'));
    }
    out.push('\n');
}
