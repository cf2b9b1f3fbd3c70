use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::time::Duration;

use crate::config::HEADER_LINES;
use crate::core::{Palette, Rgb};

pub type Term = Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;

// ── Padding ───────────────────────────────────────────────────────────────────
// Horizontal padding applied to every screen so text never touches the edges.
const H_PAD: u16 = 3;

/// Shrink a rect by H_PAD columns on each side.
pub fn pad_horizontal(area: Rect) -> Rect {
    let pad = H_PAD.min(area.width / 2);
    Rect {
        x: area.x + pad,
        y: area.y,
        width: area.width.saturating_sub(pad * 2),
        height: area.height,
    }
}

// ── Color helpers ─────────────────────────────────────────────────────────────

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn base_style(p: &Palette)   -> Style { Style::default().fg(color(p.foreground)).bg(color(p.background)) }
pub fn normal_style(p: &Palette) -> Style { Style::default().fg(color(p.foreground)) }
pub fn sel_style(p: &Palette)    -> Style { Style::default().fg(color(p.panel)).bg(color(p.accent)).add_modifier(Modifier::BOLD) }
pub fn title_style(p: &Palette)  -> Style { Style::default().fg(color(p.accent)).add_modifier(Modifier::BOLD) }
pub fn dim_style(p: &Palette)    -> Style { Style::default().fg(color(p.muted)) }
pub fn panel_style(p: &Palette)  -> Style { Style::default().fg(color(p.foreground)).bg(color(p.panel)) }
pub fn cart_style(p: &Palette)   -> Style { Style::default().fg(color(p.foreground)).bg(color(p.cart_area)) }

// ── Header ────────────────────────────────────────────────────────────────────

pub fn render_header(f: &mut Frame, area: Rect, p: &Palette) {
    let inner = pad_horizontal(area);
    let lines: Vec<Line> = HEADER_LINES
        .iter()
        .map(|l| Line::from(Span::styled(*l, title_style(p))))
        .collect();
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(para, inner);
}

pub fn render_separator(f: &mut Frame, area: Rect, p: &Palette) {
    let inner = pad_horizontal(area);
    let sep = "=".repeat(inner.width as usize);
    let para = Paragraph::new(sep).alignment(Alignment::Center).style(dim_style(p));
    f.render_widget(para, inner);
}

fn paint_background(f: &mut Frame, p: &Palette) {
    let area = f.area();
    f.render_widget(Block::default().style(base_style(p)), area);
}

// ── Confirmation dialog ───────────────────────────────────────────────────────

pub fn confirm(terminal: &mut Term, p: &Palette, message: &str) -> Result<bool> {
    loop {
        terminal.draw(|f| {
            paint_background(f, p);
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(size);
            render_header(f, chunks[0], p);

            let content_area = pad_horizontal(chunks[1]);
            let msg = format!("{message}\n\n  [y] Yes    [n] No");
            let para = Paragraph::new(msg).style(normal_style(p));
            f.render_widget(para, content_area);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press { continue; }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

// ── Box overlay message ───────────────────────────────────────────────────────

/// Centered box drawn over the last frame for `ms` milliseconds.
pub fn box_message(terminal: &mut Term, p: &Palette, message: &str, ms: u64) -> Result<()> {
    terminal.draw(|f| render_box(f, p, message))?;
    std::thread::sleep(Duration::from_millis(ms));
    Ok(())
}

pub fn render_box(f: &mut Frame, p: &Palette, message: &str) {
    let size = f.area();
    let w = (message.chars().count() + 6).min(size.width as usize) as u16;
    let h = 5u16;
    let x = size.width.saturating_sub(w) / 2;
    let y = size.height.saturating_sub(h) / 2;
    let area = Rect::new(x, y, w, h);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(sel_style(p))
        .style(sel_style(p));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let para = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(sel_style(p));
    f.render_widget(para, inner);
}

// ── Message flash ─────────────────────────────────────────────────────────────

pub fn flash_message(terminal: &mut Term, p: &Palette, message: &str, ms: u64) -> Result<()> {
    terminal.draw(|f| {
        paint_background(f, p);
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(size);
        render_header(f, chunks[0], p);
        let content_area = pad_horizontal(chunks[1]);
        let para = Paragraph::new(format!("\n  {message}")).style(normal_style(p));
        f.render_widget(para, content_area);
    })?;
    std::thread::sleep(Duration::from_millis(ms));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_horizontal_shrinks_both_sides() {
        let r = pad_horizontal(Rect::new(0, 0, 20, 4));
        assert_eq!((r.x, r.width), (3, 14));
        let tiny = pad_horizontal(Rect::new(0, 0, 4, 1));
        assert_eq!((tiny.x, tiny.width), (2, 0));
    }

    #[test]
    fn palette_colors_map_to_rgb() {
        assert_eq!(color(Rgb(0x25, 0x36, 0x55)), Color::Rgb(0x25, 0x36, 0x55));
    }
}
