//! Plain-text rendering of a [`RenderedTable`].

use stampcard_lib::search::SuggestionEntry;
use stampcard_lib::table::{Alignment, HeaderCell, RenderedTable, TableBody};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pixels per terminal column when mapping table widths to text.
const PX_PER_CHAR: u32 = 8;

const SEPARATOR: &str = " │ ";

/// Text width for a column of `px` pixels.
fn chars_for(px: u32) -> usize {
    (px / PX_PER_CHAR).max(1) as usize
}

/// Cut `text` to `width` display columns, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad or cut `text` to exactly `width` display columns.
fn fit(text: &str, width: usize, align: Alignment) -> String {
    let text = truncate(text, width);
    let pad = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Alignment::Left => format!("{}{}", text, pad),
        Alignment::Right => format!("{}{}", pad, text),
    }
}

fn header_label(cell: &HeaderCell) -> String {
    match cell.sorted {
        Some(direction) => format!("{} {}", cell.label, direction.arrow()),
        None => cell.label.clone(),
    }
}

/// Format the table as aligned lines.
pub(crate) fn table_lines(table: &RenderedTable) -> Vec<String> {
    let widths: Vec<usize> = table.header.iter().map(|h| chars_for(h.width)).collect();
    let mut lines = Vec::new();

    let header: Vec<String> = table
        .header
        .iter()
        .zip(&widths)
        .map(|(cell, &w)| fit(&header_label(cell), w, cell.align))
        .collect();
    lines.push(header.join(SEPARATOR).trim_end().to_string());

    let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
    lines.push(rule.join("─┼─"));

    match &table.body {
        TableBody::Rows(rows) => {
            for row in rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .zip(&table.header)
                    .zip(&widths)
                    .map(|((text, cell), &w)| fit(text, w, cell.align))
                    .collect();
                lines.push(cells.join(SEPARATOR).trim_end().to_string());
            }
        }
        TableBody::Empty { message, colspan } => {
            let span = widths.iter().take(*colspan).sum::<usize>()
                + SEPARATOR.width() * colspan.saturating_sub(1);
            let pad = span.saturating_sub(message.width()) / 2;
            lines.push(format!("{}{}", " ".repeat(pad), message));
        }
    }
    lines
}

/// Format the suggestion list, numbered from 1.
pub(crate) fn suggestion_lines(suggestions: &[SuggestionEntry]) -> Vec<String> {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:>2}. {} ({})", i + 1, s.label, s.accessor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate("Alexandria", 5), "Alex…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("Bob", 5), "Bob");
    }

    #[test]
    fn right_alignment_pads_left() {
        assert_eq!(fit("7", 3, Alignment::Right), "  7");
        assert_eq!(fit("7", 3, Alignment::Left), "7  ");
    }

    #[test]
    fn widths_map_to_columns() {
        assert_eq!(chars_for(150), 18);
        assert_eq!(chars_for(110), 13);
        assert_eq!(chars_for(0), 1);
    }
}
