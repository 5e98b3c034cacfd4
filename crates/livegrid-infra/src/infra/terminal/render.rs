//! Encodes a screen buffer as crossterm escape sequences.

use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use tracing::debug;

use super::CellStyle;
use super::Color;
use super::ScreenBuffer;

/// Serializes `buffer` into a byte string that repaints the screen from the
/// top-left corner. Runs of equally styled cells share one style change.
pub fn render_screen(buffer: &ScreenBuffer) -> String {
    if buffer.cells.is_empty() {
        return String::new();
    }

    let mut out = Vec::new();
    let mut current_style: Option<&CellStyle> = None;

    for (row_idx, row) in buffer.cells.iter().enumerate() {
        let Ok(row_u16) = u16::try_from(row_idx) else {
            break;
        };
        if let Err(err) = queue!(out, cursor::MoveTo(0, row_u16)) {
            debug!(error = %err, "Failed to move terminal cursor");
        }

        let mut col = 0;
        while col < row.len() {
            let style = &row[col].style;
            let mut run_end = col + 1;
            while run_end < row.len() && row[run_end].style == *style {
                run_end += 1;
            }

            if current_style != Some(style) {
                if let Err(err) = apply_style(&mut out, style) {
                    debug!(error = %err, "Failed to apply terminal style");
                }
                current_style = Some(style);
            }

            let text: String = row[col..run_end].iter().map(|cell| cell.char).collect();
            if let Err(err) = queue!(out, style::Print(text)) {
                debug!(error = %err, "Failed to write terminal text");
            }
            col = run_end;
        }
    }

    if let Err(err) = queue!(out, style::SetAttribute(style::Attribute::Reset)) {
        debug!(error = %err, "Failed to reset terminal style");
    }

    String::from_utf8(out).unwrap_or_else(|err| {
        debug!(error = %err, "Failed to decode terminal output as UTF-8");
        String::new()
    })
}

fn apply_style(out: &mut impl Write, style: &CellStyle) -> std::io::Result<()> {
    queue!(out, style::SetAttribute(style::Attribute::Reset))?;

    if style.bold {
        queue!(out, style::SetAttribute(style::Attribute::Bold))?;
    }
    if style.underline {
        queue!(out, style::SetAttribute(style::Attribute::Underlined))?;
    }
    if style.inverse {
        queue!(out, style::SetAttribute(style::Attribute::Reverse))?;
    }

    let fg = style.fg_color.unwrap_or(Color::Default);
    let bg = style.bg_color.unwrap_or(Color::Default);

    queue!(out, style::SetForegroundColor(to_crossterm_color(fg)))?;
    queue!(out, style::SetBackgroundColor(to_crossterm_color(bg)))?;

    Ok(())
}

fn to_crossterm_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Indexed(idx) => style::Color::AnsiValue(idx),
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_renders_nothing() {
        assert_eq!(render_screen(&ScreenBuffer::new(0, 0)), "");
    }

    #[test]
    fn test_render_contains_text_and_styles() {
        let mut buffer = ScreenBuffer::new(6, 2);
        buffer.put_str(0, 0, "ab", CellStyle::default());
        buffer.put_str(1, 0, "42", CellStyle::flash());

        let out = render_screen(&buffer);

        assert!(out.contains("ab"));
        assert!(out.contains("42"));
        // bold from the flash style
        assert!(out.contains("\u{1b}[1m"));
        // second row is addressed absolutely
        assert!(out.contains("\u{1b}[2;1H"));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(to_crossterm_color(Color::Default), style::Color::Reset);
        assert_eq!(to_crossterm_color(Color::Indexed(11)), style::Color::AnsiValue(11));
        assert_eq!(
            to_crossterm_color(Color::Rgb(1, 2, 3)),
            style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
