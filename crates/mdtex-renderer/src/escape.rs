//! Escaping for text embedded in LaTeX source.
//!
//! Two safety classes exist and are kept as separate functions so every
//! call site states which one applies:
//!
//! - [`escape_latex`]: general text placed inside a command argument or in
//!   running text.
//! - [`escape_href`]: a URL placed inside a hyperlink target argument
//!   (`\href`, `\hyperref`, `\url`, `\includegraphics`).

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that cannot appear literally in a hyperlink target.
///
/// Non-ASCII bytes are always encoded by `utf8_percent_encode`.
const HREF_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Replacement for a reserved LaTeX character, or `None` if the character is safe.
fn latex_replacement(c: char) -> Option<&'static str> {
    match c {
        '\\' => Some(r"\textbackslash{}"),
        '{' => Some(r"\{"),
        '}' => Some(r"\}"),
        '$' => Some(r"\$"),
        '&' => Some(r"\&"),
        '#' => Some(r"\#"),
        '_' => Some(r"\_"),
        '%' => Some(r"\%"),
        '^' => Some(r"\textasciicircum{}"),
        '~' => Some(r"\textasciitilde{}"),
        _ => None,
    }
}

/// Escape LaTeX special characters.
///
/// Escapes the command introducer, braces and the active characters
/// `$ & # _ % ^ ~`. Every other character, including multi-byte text,
/// is passed through unchanged, so safe input is returned borrowed.
///
/// # Examples
///
/// ```
/// use mdtex_renderer::escape_latex;
///
/// assert_eq!(escape_latex("50% of $x_1$"), r"50\% of \$x\_1\$");
/// assert_eq!(escape_latex("plain text"), "plain text");
/// ```
#[must_use]
pub fn escape_latex(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c: char| latex_replacement(c).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut result = String::with_capacity(text.len() + 16);
    result.push_str(&text[..first]);
    for c in text[first..].chars() {
        match latex_replacement(c) {
            Some(replacement) => result.push_str(replacement),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape a URL for use as a hyperlink target argument.
///
/// Characters that are not valid inside a URL are percent-encoded first.
/// The resulting `%` and any `#` are then backslash-escaped so the target
/// stays intact even when the link sits inside another command argument.
///
/// # Examples
///
/// ```
/// use mdtex_renderer::escape_href;
///
/// assert_eq!(escape_href("https://example.com/a b"), r"https://example.com/a\%20b");
/// assert_eq!(escape_href("https://example.com/page"), "https://example.com/page");
/// ```
#[must_use]
pub fn escape_href(url: &str) -> Cow<'_, str> {
    let encoded: Cow<'_, str> = utf8_percent_encode(url, HREF_ENCODE_SET).into();
    if !encoded.contains(['%', '#']) {
        return encoded;
    }

    let mut result = String::with_capacity(encoded.len() + 8);
    for c in encoded.chars() {
        if matches!(c, '%' | '#') {
            result.push('\\');
        }
        result.push(c);
    }
    Cow::Owned(result)
}
