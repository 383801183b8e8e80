//! Plain-text table rendering for terminal output.
//!
//! Column widths account for double-width CJK glyphs so Japanese display
//! names and reward titles stay aligned.

use crate::Column;
use redeem_core::{config::Labels, RedemptionRecord};

const GAP: &str = "  ";

/// Render `records` as an aligned table with a header and a rule line.
pub fn render_table(records: &[RedemptionRecord], columns: &[Column], labels: &Labels) -> String {
    let header: Vec<String> = columns.iter().map(|c| c.label(labels).to_string()).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| columns.iter().map(|c| c.value(r).into_owned()).collect())
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| display_width(&row[i]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        let pad = width.saturating_sub(display_width(cell));
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Terminal column width of `s`. Newlines inside a cell count as nothing.
pub fn display_width(s: &str) -> usize {
    s.chars().filter(|c| *c != '\n').map(char_width).sum()
}

fn char_width(c: char) -> usize {
    let cp = c as u32;
    let wide = matches!(cp,
        0x1100..=0x115F          // Hangul Jamo
        | 0x2E80..=0x303E        // CJK radicals, punctuation
        | 0x3041..=0x33FF        // Hiragana, Katakana, CJK compat
        | 0x3400..=0x4DBF        // CJK ext A
        | 0x4E00..=0x9FFF        // CJK unified
        | 0xA000..=0xA4CF        // Yi
        | 0xAC00..=0xD7A3        // Hangul syllables
        | 0xF900..=0xFAFF        // CJK compat ideographs
        | 0xFE30..=0xFE4F        // CJK compat forms
        | 0xFF00..=0xFF60        // Fullwidth forms
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1F64F      // Emoji
        | 0x1F900..=0x1F9FF
        | 0x20000..=0x3FFFD);
    if wide {
        2
    } else if c.is_control() {
        0
    } else {
        1
    }
}
