use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use chrono::Local;

use crate::core::{CartSnapshot, Palette, ThemeName};
use crate::ui::sel_style;

// ── Status bar ────────────────────────────────────────────────────────────────

pub fn status_right(theme: ThemeName, snapshot: &CartSnapshot) -> String {
    let n = snapshot.item_count();
    let noun = if n == 1 { "item" } else { "items" };
    format!("{theme} | {n} {noun} ")
}

pub fn render_status_bar(f: &mut Frame, area: Rect, p: &Palette, theme: ThemeName, snapshot: &CartSnapshot) {
    if area.height == 0 { return; }

    let now = Local::now().format("%A, %d. %B - %I:%M%p").to_string();
    let right_text = status_right(theme, snapshot);

    let left  = Span::styled(format!(" {now}"), sel_style(p));
    let right = Span::styled(right_text.clone(), sel_style(p));

    // Pad center
    let used = now.chars().count() + 1 + right_text.chars().count();
    let pad  = " ".repeat((area.width as usize).saturating_sub(used));

    let line = Line::from(vec![left, Span::styled(pad, sel_style(p)), right]);
    f.render_widget(Paragraph::new(line), area);
}
