//! Emission rules for tables.
//!
//! The table rule writes the `tabular` preamble; rows and cells have already
//! been rendered by the time it runs, so the body is copied verbatim.

use crate::block::separate;
use crate::node::Alignment;

pub(crate) fn table(alignments: &[Alignment], content: Option<&str>, out: &mut String) {
    separate(out);
    out.push_str("\\begin{tabular}{|");
    for alignment in alignments {
        out.push(alignment.column_spec());
        out.push('|');
    }
    out.push_str("}\n\\hline\n");
    if let Some(content) = content {
        out.push_str(content);
    }
    out.push_str("\\end{tabular}\n");
}

/// Header and body sections add no syntax of their own.
pub(crate) fn section(content: Option<&str>, out: &mut String) {
    if let Some(content) = content {
        out.push_str(content);
    }
}

pub(crate) fn row(content: Option<&str>, out: &mut String) {
    if let Some(content) = content {
        out.push_str(content);
    }
    out.push_str(" \\\\\n\\hline\n");
}

pub(crate) fn cell(column: usize, content: Option<&str>, out: &mut String) {
    if column > 0 {
        out.push_str(" & ");
    }
    if let Some(content) = content {
        out.push_str(content);
    }
}
