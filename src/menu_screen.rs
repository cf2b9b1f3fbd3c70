use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::core::{Advisory, CartController, CartSnapshot, ClearRequest, Outcome, Palette, ThemeName};
use crate::status::render_status_bar;
use crate::ui::{
    base_style, box_message, cart_style, confirm, dim_style, pad_horizontal,
    panel_style, render_header, render_separator, sel_style, title_style, Term,
};

const MENU_COLS: usize = 2;
const ADVISORY_MS: u64 = 1200;
const CLOCK_REFRESH: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Menu,
    Cart,
}

/// Cursor state for the order screen. Cart selection is an index into the
/// current snapshot and is resolved to a label before reaching the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnackScreen {
    pub focus: Pane,
    pub menu_idx: usize,
    pub cart_idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Continue,
    Quit,
    Advisory(Advisory),
    ConfirmClear(&'static str),
}

impl SnackScreen {
    pub fn selected_label(&self, snapshot: &CartSnapshot) -> Option<String> {
        snapshot.lines.get(self.cart_idx).map(|l| l.label.clone())
    }

    fn clamp(&mut self, menu_len: usize, cart_len: usize) {
        self.menu_idx = self.menu_idx.min(menu_len.saturating_sub(1));
        self.cart_idx = self.cart_idx.min(cart_len.saturating_sub(1));
    }
}

fn outcome_action(outcome: Outcome) -> ScreenAction {
    match outcome.advisory() {
        Some(a) => ScreenAction::Advisory(a),
        None => ScreenAction::Continue,
    }
}

pub fn handle_key(screen: &mut SnackScreen, code: KeyCode, controller: &mut CartController) -> ScreenAction {
    let menu_len = controller.catalog().len();
    let snapshot = controller.snapshot();
    let selection = screen.selected_label(&snapshot);

    let action = match code {
        KeyCode::Tab | KeyCode::BackTab => {
            screen.focus = match screen.focus {
                Pane::Menu => Pane::Cart,
                Pane::Cart => Pane::Menu,
            };
            ScreenAction::Continue
        }
        KeyCode::Up | KeyCode::Char('k') => {
            match screen.focus {
                Pane::Menu => screen.menu_idx = screen.menu_idx.saturating_sub(MENU_COLS),
                Pane::Cart => screen.cart_idx = screen.cart_idx.saturating_sub(1),
            }
            ScreenAction::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            match screen.focus {
                Pane::Menu => {
                    if screen.menu_idx + MENU_COLS < menu_len {
                        screen.menu_idx += MENU_COLS;
                    }
                }
                Pane::Cart => screen.cart_idx += 1,
            }
            ScreenAction::Continue
        }
        KeyCode::Left | KeyCode::Char('h') if screen.focus == Pane::Menu => {
            screen.menu_idx = screen.menu_idx.saturating_sub(1);
            ScreenAction::Continue
        }
        KeyCode::Right | KeyCode::Char('l') if screen.focus == Pane::Menu => {
            screen.menu_idx += 1;
            ScreenAction::Continue
        }
        KeyCode::Enter | KeyCode::Char(' ') => match screen.focus {
            Pane::Menu => {
                let label = controller
                    .catalog()
                    .entries()
                    .get(screen.menu_idx)
                    .map(|e| e.label.clone());
                match label {
                    Some(label) => outcome_action(controller.add(&label)),
                    None => ScreenAction::Continue,
                }
            }
            Pane::Cart => outcome_action(controller.increment(selection.as_deref())),
        },
        KeyCode::Char('+') | KeyCode::Char('=') => outcome_action(controller.increment(selection.as_deref())),
        KeyCode::Char('-') => outcome_action(controller.decrement(selection.as_deref())),
        KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
            outcome_action(controller.remove_selection(selection.as_deref()))
        }
        KeyCode::Char('c') => match controller.request_clear() {
            ClearRequest::NothingToClear => ScreenAction::Continue,
            ClearRequest::NeedsConfirmation(prompt) => ScreenAction::ConfirmClear(prompt),
            ClearRequest::Immediate => outcome_action(controller.clear()),
        },
        KeyCode::Char('L') => outcome_action(controller.apply_theme(ThemeName::Light.as_str())),
        KeyCode::Char('D') => outcome_action(controller.apply_theme(ThemeName::Dark.as_str())),
        KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
        _ => ScreenAction::Continue,
    };

    screen.clamp(menu_len, controller.cart().len());
    action
}

// ── Drawing ───────────────────────────────────────────────────────────────────

fn panel_block<'a>(title: &'a str, focused: bool, p: &Palette) -> Block<'a> {
    let border = if focused { title_style(p) } else { dim_style(p) };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {title} "), title_style(p)))
}

fn draw_menu(f: &mut Frame, area: Rect, screen: &SnackScreen, controller: &CartController) {
    let p = controller.palette();
    let block = panel_block("Menu", screen.focus == Pane::Menu, p).style(panel_style(p));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let entries = controller.catalog().entries();
    let rows = entries.len().div_ceil(MENU_COLS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); rows])
        .split(inner);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pad_horizontal(*row_area));
        for (col, cell) in cells.iter().enumerate() {
            let idx = row * MENU_COLS + col;
            let Some(entry) = entries.get(idx) else { continue };
            let style = if screen.focus == Pane::Menu && idx == screen.menu_idx {
                sel_style(p)
            } else {
                panel_style(p)
            };
            f.render_widget(Paragraph::new(format!(" {} ", entry.menu_text())).style(style), *cell);
        }
    }
}

fn draw_cart(f: &mut Frame, area: Rect, screen: &SnackScreen, controller: &CartController, snapshot: &CartSnapshot) {
    let p = controller.palette();
    let block = panel_block("Your Order", screen.focus == Pane::Cart, p).style(cart_style(p));

    if snapshot.lines.is_empty() {
        let empty = Paragraph::new("Your cart is empty.")
            .alignment(Alignment::Center)
            .style(dim_style(p))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = snapshot
        .lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            // Rows are restyled on every draw so they follow the active theme.
            let style = if screen.focus == Pane::Cart && idx == screen.cart_idx {
                sel_style(p)
            } else {
                cart_style(p)
            };
            Row::new(vec![line.display_label(), line.subtotal.with_currency()]).style(style)
        })
        .collect();
    let header = Row::new(vec!["Item", "Price"]).style(title_style(p));
    let table = Table::new(rows, [Constraint::Percentage(70), Constraint::Percentage(30)])
        .header(header)
        .block(block);
    f.render_widget(table, area);
}

pub fn draw(f: &mut Frame, screen: &SnackScreen, controller: &CartController) {
    let p = controller.palette();
    let snapshot = controller.snapshot();
    let size = f.area();
    f.render_widget(Block::default().style(base_style(p)), size);

    let menu_rows = controller.catalog().len().div_ceil(MENU_COLS) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(menu_rows + 2),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, chunks[0], p);
    render_separator(f, chunks[1], p);
    let title = Paragraph::new("Snack Menu").alignment(Alignment::Center).style(title_style(p));
    f.render_widget(title, pad_horizontal(chunks[2]));
    render_separator(f, chunks[3], p);

    draw_menu(f, pad_horizontal(chunks[4]), screen, controller);
    draw_cart(f, pad_horizontal(chunks[5]), screen, controller, &snapshot);

    let total = Paragraph::new(Line::from(Span::styled(snapshot.total_label(), title_style(p))))
        .alignment(Alignment::Center);
    f.render_widget(total, pad_horizontal(chunks[6]));

    let hints = "Tab pane | Enter add | +/- qty | x remove | c clear | L/D theme | q quit";
    f.render_widget(Paragraph::new(hints).style(dim_style(p)), pad_horizontal(chunks[7]));

    render_status_bar(f, chunks[8], p, controller.theme(), &snapshot);
}

// ── Event loop ────────────────────────────────────────────────────────────────

pub fn run_snack_menu(terminal: &mut Term, controller: &mut CartController) -> Result<()> {
    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    controller.subscribe(move |_| flag.set(true));

    let mut screen = SnackScreen::default();
    let mut last_draw = Instant::now();

    loop {
        if dirty.replace(false) || last_draw.elapsed() >= CLOCK_REFRESH {
            terminal.draw(|f| draw(f, &screen, controller))?;
            last_draw = Instant::now();
        }

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            dirty.set(true);
            continue;
        };
        if key.kind != KeyEventKind::Press { continue; }

        match handle_key(&mut screen, key.code, controller) {
            ScreenAction::Continue => {}
            ScreenAction::Quit => {
                info!("order screen closed");
                return Ok(());
            }
            ScreenAction::Advisory(advisory) => {
                debug!(%advisory, "advisory shown");
                box_message(terminal, controller.palette(), &advisory.to_string(), ADVISORY_MS)?;
            }
            ScreenAction::ConfirmClear(prompt) => {
                if confirm(terminal, controller.palette(), prompt)? {
                    controller.clear();
                }
                let len = controller.cart().len();
                screen.clamp(controller.catalog().len(), len);
            }
        }
        // Cursor moves and dialogs change the frame without a state change.
        dirty.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(screen: &mut SnackScreen, c: &mut CartController, codes: &[KeyCode]) -> ScreenAction {
        let mut last = ScreenAction::Continue;
        for code in codes {
            last = handle_key(screen, *code, c);
        }
        last
    }

    #[test]
    fn enter_on_menu_adds_highlighted_item() {
        let mut c = CartController::default();
        let mut s = SnackScreen::default();
        press(&mut s, &mut c, &[KeyCode::Right, KeyCode::Enter, KeyCode::Enter]);
        assert_eq!(c.quantity("🥨 Nachos"), Some(2));
    }

    #[test]
    fn down_moves_a_full_row_and_stops_at_the_last_row() {
        let mut c = CartController::default();
        let mut s = SnackScreen::default();
        press(&mut s, &mut c, &[KeyCode::Down; 10]);
        assert_eq!(s.menu_idx, 8);
        press(&mut s, &mut c, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(s.menu_idx, 8);
    }

    #[test]
    fn qty_keys_on_empty_cart_raise_advisory() {
        let mut c = CartController::default();
        let mut s = SnackScreen { focus: Pane::Cart, ..Default::default() };
        for code in [KeyCode::Char('+'), KeyCode::Char('-'), KeyCode::Char('x')] {
            assert_eq!(
                handle_key(&mut s, code, &mut c),
                ScreenAction::Advisory(Advisory::NoSelection)
            );
        }
        assert!(c.is_empty());
    }

    #[test]
    fn cart_keys_act_on_the_selected_line() {
        let mut c = CartController::default();
        c.add("🍕 Pizza");
        c.add("🥤 Soda");
        let mut s = SnackScreen::default();
        press(&mut s, &mut c, &[KeyCode::Tab, KeyCode::Down, KeyCode::Char('+')]);
        assert_eq!(c.quantity("🥤 Soda"), Some(2));
        press(&mut s, &mut c, &[KeyCode::Char('-'), KeyCode::Char('-')]);
        assert_eq!(c.quantity("🥤 Soda"), None);
        assert_eq!(s.cart_idx, 0);
        press(&mut s, &mut c, &[KeyCode::Char('x')]);
        assert!(c.is_empty());
    }

    #[test]
    fn clear_asks_for_confirmation_only_when_needed() {
        let mut c = CartController::default();
        let mut s = SnackScreen::default();
        assert_eq!(handle_key(&mut s, KeyCode::Char('c'), &mut c), ScreenAction::Continue);
        c.add("🍟 Fries");
        assert!(matches!(
            handle_key(&mut s, KeyCode::Char('c'), &mut c),
            ScreenAction::ConfirmClear(_)
        ));
        assert!(!c.is_empty());

        let mut quick = CartController::default().with_confirm_clear(false);
        quick.add("🍟 Fries");
        assert_eq!(handle_key(&mut s, KeyCode::Char('c'), &mut quick), ScreenAction::Continue);
        assert!(quick.is_empty());
    }

    #[test]
    fn theme_keys_switch_palette() {
        let mut c = CartController::default();
        let mut s = SnackScreen::default();
        press(&mut s, &mut c, &[KeyCode::Char('L')]);
        assert_eq!(c.theme(), ThemeName::Light);
        press(&mut s, &mut c, &[KeyCode::Char('D')]);
        assert_eq!(c.theme(), ThemeName::Dark);
        assert_eq!(handle_key(&mut s, KeyCode::Char('q'), &mut c), ScreenAction::Quit);
    }
}
