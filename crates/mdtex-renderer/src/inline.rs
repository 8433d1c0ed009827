//! Emission rules for inline nodes.
//!
//! Span rules return `false` when they produced nothing, so the caller can
//! fall back to the already-rendered content.

use std::fmt::Write;

use crate::block::LINE_BREAK;
use crate::escape::{escape_href, escape_latex};

fn non_empty(content: Option<&str>) -> Option<&str> {
    content.filter(|c| !c.is_empty())
}

pub(crate) fn normal_text(content: Option<&str>, out: &mut String) -> bool {
    if let Some(content) = content {
        out.push_str(&escape_latex(content));
    }
    true
}

pub(crate) fn code_span(content: Option<&str>, out: &mut String) -> bool {
    out.push_str("\\texttt{");
    if let Some(content) = content {
        out.push_str(&escape_latex(content));
    }
    out.push('}');
    true
}

pub(crate) fn line_break(out: &mut String) -> bool {
    out.push_str(LINE_BREAK);
    true
}

/// Wrap non-empty content in a single `\command{...}`.
pub(crate) fn wrap(command: &str, content: Option<&str>, out: &mut String) -> bool {
    let Some(content) = non_empty(content) else {
        return false;
    };
    out.push('\\');
    out.push_str(command);
    out.push('{');
    out.push_str(content);
    out.push('}');
    true
}

pub(crate) fn strong_emphasis_italic(content: Option<&str>, out: &mut String) -> bool {
    let Some(content) = non_empty(content) else {
        return false;
    };
    out.push_str("\\textbf{\\emph{");
    out.push_str(content);
    out.push_str("}}");
    true
}

pub(crate) fn quote(content: Option<&str>, out: &mut String) -> bool {
    let Some(content) = non_empty(content) else {
        return false;
    };
    out.push_str("``");
    out.push_str(content);
    out.push_str("''");
    true
}

pub(crate) fn footnote_reference(ordinal: usize, out: &mut String) -> bool {
    write!(out, "\\textsuperscript{{{ordinal}}}").unwrap();
    true
}

pub(crate) fn link(
    target: &str,
    title: Option<&str>,
    content: Option<&str>,
    out: &mut String,
) -> bool {
    if target.is_empty() {
        return false;
    }

    if let Some(key) = target.strip_prefix('#') {
        out.push_str("\\hyperref[");
        out.push_str(key);
        out.push_str("]{");
    } else {
        out.push_str("\\hyperref{");
        out.push_str(&escape_href(target));
        out.push_str("}{}{");
        if let Some(title) = title {
            out.push_str(&escape_latex(title));
        }
        out.push_str("}{");
    }

    if let Some(content) = content {
        out.push_str(content);
    }
    out.push('}');
    true
}

pub(crate) fn autolink(target: &str, email: bool, content: Option<&str>, out: &mut String) -> bool {
    if target.is_empty() {
        return false;
    }

    out.push_str("\\href{");
    if email && !target.starts_with("mailto:") {
        out.push_str("mailto:");
    }
    out.push_str(&escape_href(target));
    out.push_str("}{");
    match non_empty(content) {
        Some(content) => out.push_str(content),
        None => out.push_str(&escape_latex(target)),
    }
    out.push('}');
    true
}

pub(crate) fn image(target: &str, title: Option<&str>, alt: &str, out: &mut String) -> bool {
    if target.is_empty() {
        return false;
    }

    out.push_str("\\begin{figure*}\n\\includegraphics*[width=\\textwidth]{");
    out.push_str(&escape_href(target));
    out.push_str("}\n");

    if !alt.is_empty() {
        out.push_str("\\caption{");
        out.push_str(&escape_latex(alt));
        out.push_str("}\n");
    }

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push_str(&escape_latex(title));
        out.push('\n');
    }

    out.push_str("\\end{figure*}");
    true
}

/// Math is copied verbatim. With `fold_lines` its newlines become spaces,
/// so a hard-wrapping paragraph finds no line to break inside the formula.
pub(crate) fn math(display: bool, fold_lines: bool, content: Option<&str>, out: &mut String) -> bool {
    let Some(content) = non_empty(content) else {
        return false;
    };
    let (open, close) = if display {
        ("\\[", "\\]")
    } else {
        ("\\(", "\\)")
    };
    out.push_str(open);
    if fold_lines {
        out.extend(content.chars().map(|c| if c == '\n' { ' ' } else { c }));
    } else {
        out.push_str(content);
    }
    out.push_str(close);
    true
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) -> bool {
    out.push_str(if checked {
        "$\\boxtimes$ "
    } else {
        "$\\square$ "
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut String) -> bool) -> (bool, String) {
        let mut out = String::new();
        let handled = f(&mut out);
        (handled, out)
    }

    #[test]
    fn test_normal_text_escaped() {
        let (_, out) = render(|out| normal_text(Some("50% & more"), out));
        assert_eq!(out, "50\\% \\& more");
    }

    #[test]
    fn test_code_span_escaped() {
        let (handled, out) = render(|out| code_span(Some("a_b{}"), out));
        assert!(handled);
        assert_eq!(out, "\\texttt{a\\_b\\{\\}}");
    }

    #[test]
    fn test_wrap_passes_content_through() {
        let (handled, out) = render(|out| wrap("emph", Some("\\textbf{x}"), out));
        assert!(handled);
        assert_eq!(out, "\\emph{\\textbf{x}}");
    }

    #[test]
    fn test_wrap_empty_is_unhandled() {
        let (handled, out) = render(|out| wrap("textbf", Some(""), out));
        assert!(!handled);
        assert!(out.is_empty());
        let (handled, _) = render(|out| wrap("textbf", None, out));
        assert!(!handled);
    }

    #[test]
    fn test_strong_emphasis_italic() {
        let (_, out) = render(|out| strong_emphasis_italic(Some("both"), out));
        assert_eq!(out, "\\textbf{\\emph{both}}");
    }

    #[test]
    fn test_quote() {
        let (_, out) = render(|out| quote(Some("cited"), out));
        assert_eq!(out, "``cited''");
    }

    #[test]
    fn test_footnote_reference() {
        let (_, out) = render(|out| footnote_reference(3, out));
        assert_eq!(out, "\\textsuperscript{3}");
    }

    #[test]
    fn test_internal_link() {
        let (handled, out) = render(|out| link("#sec1", Some("ignored"), Some("Section"), out));
        assert!(handled);
        assert_eq!(out, "\\hyperref[sec1]{Section}");
    }

    #[test]
    fn test_internal_link_key_inserted_raw() {
        let (_, out) = render(|out| link("#a}b", None, Some("x"), out));
        assert_eq!(out, "\\hyperref[a}b]{x}");
    }

    #[test]
    fn test_external_link() {
        let (_, out) = render(|out| link("https://x", Some("A_title"), Some("text"), out));
        assert_eq!(out, "\\hyperref{https://x}{}{A\\_title}{text}");
    }

    #[test]
    fn test_external_link_href_escaped() {
        let (_, out) = render(|out| link("https://x/a b#c", None, Some("t"), out));
        assert_eq!(out, "\\hyperref{https://x/a\\%20b\\#c}{}{}{t}");
    }

    #[test]
    fn test_link_without_target_unhandled() {
        let (handled, out) = render(|out| link("", None, Some("t"), out));
        assert!(!handled);
        assert!(out.is_empty());
    }

    #[test]
    fn test_autolink() {
        let (_, out) = render(|out| autolink("https://example.com", false, Some("https://example.com"), out));
        assert_eq!(out, "\\href{https://example.com}{https://example.com}");

        let (_, out) = render(|out| autolink("me@example.com", true, None, out));
        assert_eq!(out, "\\href{mailto:me@example.com}{me@example.com}");
    }

    #[test]
    fn test_image_full() {
        let (handled, out) = render(|out| image("img/a b.png", Some("Fig_1"), "An & alt", out));
        assert!(handled);
        assert_eq!(
            out,
            "\\begin{figure*}\n\\includegraphics*[width=\\textwidth]{img/a\\%20b.png}\n\\caption{An \\& alt}\nFig\\_1\n\\end{figure*}"
        );
    }

    #[test]
    fn test_image_without_target_unhandled() {
        let (handled, out) = render(|out| image("", None, "alt", out));
        assert!(!handled);
        assert!(out.is_empty());
    }

    #[test]
    fn test_math() {
        let (_, out) = render(|out| math(false, false, Some("x^2"), out));
        assert_eq!(out, "\\(x^2\\)");
        let (_, out) = render(|out| math(true, false, Some("e = mc^2"), out));
        assert_eq!(out, "\\[e = mc^2\\]");
    }

    #[test]
    fn test_math_keeps_newlines_unless_folded() {
        let (_, out) = render(|out| math(true, false, Some("\na\nb\n"), out));
        assert_eq!(out, "\\[\na\nb\n\\]");
        let (_, out) = render(|out| math(true, true, Some("\na\nb\n"), out));
        assert_eq!(out, "\\[ a b \\]");
    }

    #[test]
    fn test_task_list_marker() {
        let (_, out) = render(|out| task_list_marker(true, out));
        assert_eq!(out, "$\\boxtimes$ ");
    }
}
