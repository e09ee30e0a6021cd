use careledger::api::{CmdMessage, MessageLevel};
use careledger::model::Record;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_records<R: Record>(records: &[R]) {
    if records.is_empty() {
        return;
    }
    let rows: Vec<Vec<String>> = records.iter().map(R::display_row).collect();
    let lines = render_table(R::COLUMNS, &rows);

    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("{}", line.bold());
        } else if i == 1 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

/// Lays out a header, a rule and one line per row, columns padded to the
/// widest cell. Trailing whitespace is trimmed from every line.
pub(super) fn render_table(columns: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate_to_width(cell, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.width()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = vec![join_padded(&header, &widths), join_padded(&rule, &widths)];
    lines.extend(cells.iter().map(|row| join_padded(row, &widths)));
    lines
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    line.trim_end().to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
