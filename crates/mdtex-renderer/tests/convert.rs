//! End-to-end markdown to LaTeX conversions.

use mdtex_renderer::{MarkdownConverter, RenderResult};
use pretty_assertions::assert_eq;

fn convert(markdown: &str) -> String {
    MarkdownConverter::new().render_markdown(markdown).latex
}

fn convert_full(markdown: &str) -> RenderResult {
    MarkdownConverter::new().render_markdown(markdown)
}

#[test]
fn test_blocks_separated_by_blank_line() {
    let latex = convert("# A\n\n> quoted\n\n---\n\ntext");
    assert_eq!(
        latex,
        "\\section{A}\n\
         \n\
         \\begin{quotation}\nquoted\n\\end{quotation}\n\
         \n\
         \\hrule\\vskip\\baselineskip\n\
         \n\
         text\n"
    );
}

#[test]
fn test_first_block_has_no_leading_separator() {
    let latex = convert("Only paragraph");
    assert_eq!(latex, "Only paragraph\n");
}

#[test]
fn test_tight_and_loose_lists_render_alike() {
    let tight = convert("- one\n- two\n");
    let loose = convert("- one\n\n- two\n");
    let expected = "\\begin{itemize}\n\\item one\n\\item two\n\\end{itemize}\n";
    assert_eq!(tight, expected);
    assert_eq!(loose, expected);
}

#[test]
fn test_ordered_list() {
    let latex = convert("1. first\n2. second\n");
    assert_eq!(
        latex,
        "\\begin{enumerate}\n\\item first\n\\item second\n\\end{enumerate}\n"
    );
}

#[test]
fn test_nested_list() {
    let latex = convert("- outer\n  - inner\n");
    assert!(latex.starts_with("\\begin{itemize}\n\\item outer"));
    assert!(latex.contains("\\begin{itemize}\n\\item inner\n\\end{itemize}"));
    assert_eq!(latex.matches("\\end{itemize}").count(), 2);
}

#[test]
fn test_task_list() {
    let latex = convert("- [x] done\n- [ ] todo\n");
    assert_eq!(
        latex,
        "\\begin{itemize}\n\\item $\\boxtimes$ done\n\\item $\\square$ todo\n\\end{itemize}\n"
    );
}

#[test]
fn test_table_with_alignment() {
    let latex = convert("| A | B | C |\n|:--|:-:|---|\n| 1 | 2 | 3 |\n");
    assert_eq!(
        latex,
        "\\begin{tabular}{|l|c|r|}\n\
         \\hline\n\
         A & B & C \\\\\n\
         \\hline\n\
         1 & 2 & 3 \\\\\n\
         \\hline\n\
         \\end{tabular}\n"
    );
}

#[test]
fn test_table_column_separators_match_column_count() {
    let latex = convert("| a | b | c | d |\n|---|---|---|---|\n| 1 | 2 | 3 | 4 |\n| 5 | 6 | 7 | 8 |\n");
    for line in latex.lines().filter(|l| l.ends_with("\\\\")) {
        assert_eq!(line.matches(" & ").count(), 3, "row: {line}");
    }
}

#[test]
fn test_internal_and_external_links() {
    let latex = convert("[Sec](#intro) and [Site](https://example.com \"Home\")");
    assert_eq!(
        latex,
        "\\hyperref[intro]{Sec} and \\hyperref{https://example.com}{}{Home}{Site}\n"
    );
}

#[test]
fn test_link_target_escaped() {
    let latex = convert("[q](https://example.com/a%20b?x=1#frag)");
    assert_eq!(
        latex,
        "\\hyperref{https://example.com/a\\%20b?x=1\\#frag}{}{}{q}\n"
    );
}

#[test]
fn test_autolink() {
    let latex = convert("<https://example.com>");
    assert_eq!(latex, "\\href{https://example.com}{https://example.com}\n");
}

#[test]
fn test_email_autolink() {
    let latex = convert("<me@example.com>");
    assert_eq!(latex, "\\href{mailto:me@example.com}{me@example.com}\n");
}

#[test]
fn test_image_figure() {
    let latex = convert("![Alt text](pic.png \"Caption\")");
    assert_eq!(
        latex,
        "\\begin{figure*}\n\
         \\includegraphics*[width=\\textwidth]{pic.png}\n\
         \\caption{Alt text}\n\
         Caption\n\
         \\end{figure*}\n"
    );
}

#[test]
fn test_fenced_code_block_kept_verbatim() {
    let latex = convert("```rust\nlet s = \"50% {x}\";\n```\n");
    assert_eq!(
        latex,
        "\\begin{minted}{rust}\nlet s = \"50% {x}\";\n\\end{minted}\n"
    );
}

#[test]
fn test_indented_code_block() {
    let latex = convert("    raw_text\n");
    assert_eq!(latex, "\\begin{verbatim}\nraw_text\n\\end{verbatim}\n");
}

#[test]
fn test_text_escaping() {
    let latex = convert("A & B 10% off_now #1 {x} ~ ^");
    assert_eq!(
        latex,
        "A \\& B 10\\% off\\_now \\#1 \\{x\\} \\textasciitilde{} \\textasciicircum{}\n"
    );
}

#[test]
fn test_code_span_escaped() {
    let latex = convert("Use `a_b` here");
    assert_eq!(latex, "Use \\texttt{a\\_b} here\n");
}

#[test]
fn test_emphasis_family() {
    assert_eq!(convert("*a*"), "\\emph{a}\n");
    assert_eq!(convert("**a**"), "\\textbf{a}\n");
    assert_eq!(convert("***a***"), "\\textbf{\\emph{a}}\n");
    assert_eq!(convert("~~a~~"), "\\sout{a}\n");
    assert_eq!(convert("H~2~O"), "H\\textsubscript{2}O\n");
    assert_eq!(convert("x^2^"), "x\\textsuperscript{2}\n");
}

#[test]
fn test_hard_break() {
    assert_eq!(convert("a  \nb"), "a\\\\\nb\n");
}

#[test]
fn test_hard_wrap_breaks_soft_lines() {
    let latex = MarkdownConverter::new()
        .with_hard_wrap(true)
        .render_markdown("one\ntwo\nthree")
        .latex;
    assert_eq!(latex, "one\\\\\ntwo\\\\\nthree\n");
}

#[test]
fn test_hard_wrap_leaves_math_unbroken() {
    let converter = MarkdownConverter::new().with_hard_wrap(true);
    assert_eq!(
        converter.render_markdown("$$\na\nb\n$$").latex,
        "\\[ a b \\]\n"
    );
    assert_eq!(converter.render_markdown("$a\nb$").latex, "\\(a b\\)\n");
    assert_eq!(
        converter.render_markdown("x $a\nb$\ny").latex,
        "x \\(a b\\)\\\\\ny\n"
    );
}

#[test]
fn test_heading_levels_and_anchors() {
    let result = MarkdownConverter::new()
        .with_heading_anchors(true)
        .render_markdown("## Setup\n\n###### Deep");
    assert_eq!(
        result.latex,
        "\\subsection{Setup}\\label{Setup}\n\n{Deep}\\label{Deep}\n"
    );
    assert_eq!(result.heading_count, 2);
}

#[test]
fn test_footnotes() {
    let result = convert_full("Text[^n].\n\n[^n]: Note.\n");
    assert_eq!(result.latex, "Text\\textsuperscript{1}.\n");
    assert_eq!(result.warnings, vec!["footnote definition `n` not rendered"]);
}

#[test]
fn test_math() {
    let latex = convert("Inline $a_1$ and display $$\\sum x$$");
    assert_eq!(latex, "Inline \\(a_1\\) and display \\[\\sum x\\]\n");
}

#[test]
fn test_definition_list() {
    let latex = convert("Term\n: Meaning\n");
    assert!(latex.starts_with("\\begin{description}\n\\item[Term]\nMeaning"));
    assert!(latex.ends_with("\\end{description}\n"));
}

#[test]
fn test_raw_html_dropped() {
    let result = convert_full("before\n\n<div>\nhidden\n</div>\n\nafter");
    assert_eq!(result.latex, "before\n\nafter\n");
    assert!(
        result
            .warnings
            .iter()
            .all(|w| w.starts_with("raw markup dropped"))
    );
    assert!(!result.warnings.is_empty());
}
