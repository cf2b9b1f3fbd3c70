use super::visuals::{color32, configure_visuals};
use crate::core::{Advisory, CartController, ClearRequest, Outcome, ThemeName, StateChange};
use eframe::egui::{self, Align2, Context, Id, RichText, Vec2};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

const MENU_BUTTON_SIZE: [f32; 2] = [420.0, 42.0];
const CART_ITEM_WIDTH: f32 = 460.0;

/// Everything a click can ask for. Collected while drawing, applied after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Add(String),
    Select(String),
    Increment,
    Decrement,
    RemoveSelected,
    RequestClear,
    ConfirmClear(bool),
    DismissAdvisory,
    Theme(ThemeName),
}

pub struct SnackNativeApp {
    controller: CartController,
    selected: Option<String>,
    restyle: Rc<Cell<bool>>,
    pending_clear: Option<&'static str>,
    advisory: Option<Advisory>,
}

impl SnackNativeApp {
    pub fn new(mut controller: CartController) -> Self {
        let restyle = Rc::new(Cell::new(true));
        let flag = Rc::clone(&restyle);
        controller.subscribe(move |change| {
            if change == StateChange::Theme {
                flag.set(true);
            }
        });
        Self {
            controller,
            selected: None,
            restyle,
            pending_clear: None,
            advisory: None,
        }
    }

    /// Repaints the window whenever the controller reports a change.
    pub fn attach_context(&mut self, ctx: &Context) {
        let ctx = ctx.clone();
        self.controller.subscribe(move |_| ctx.request_repaint());
    }

    pub fn controller(&self) -> &CartController {
        &self.controller
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn pending_clear(&self) -> Option<&'static str> {
        self.pending_clear
    }

    pub fn advisory(&self) -> Option<Advisory> {
        self.advisory
    }

    fn note(&mut self, outcome: Outcome) {
        if let Some(advisory) = outcome.advisory() {
            debug!(%advisory, "advisory shown");
            self.advisory = Some(advisory);
        }
    }

    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Add(label) => {
                let outcome = self.controller.add(&label);
                self.note(outcome);
            }
            UiAction::Select(label) => self.selected = Some(label),
            UiAction::Increment => {
                let outcome = self.controller.increment(self.selected.as_deref());
                self.note(outcome);
            }
            UiAction::Decrement => {
                let outcome = self.controller.decrement(self.selected.as_deref());
                self.note(outcome);
            }
            UiAction::RemoveSelected => {
                let outcome = self.controller.remove_selection(self.selected.as_deref());
                self.note(outcome);
            }
            UiAction::RequestClear => match self.controller.request_clear() {
                ClearRequest::NothingToClear => {}
                ClearRequest::NeedsConfirmation(prompt) => self.pending_clear = Some(prompt),
                ClearRequest::Immediate => {
                    self.controller.clear();
                }
            },
            UiAction::ConfirmClear(yes) => {
                self.pending_clear = None;
                if yes {
                    self.controller.clear();
                }
            }
            UiAction::DismissAdvisory => self.advisory = None,
            UiAction::Theme(theme) => {
                self.controller.apply_theme(theme.as_str());
            }
        }
        if let Some(label) = &self.selected {
            if !self.controller.cart().contains(label) {
                self.selected = None;
            }
        }
    }

    fn draw_menu(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let p = self.controller.palette();
        egui::Frame::group(ui.style())
            .fill(color32(p.panel))
            .stroke(egui::Stroke::new(2.0, color32(p.accent)))
            .inner_margin(18.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Menu").size(22.0).strong());
                ui.add_space(6.0);
                egui::Grid::new("snack_menu_grid")
                    .num_columns(2)
                    .spacing([20.0, 14.0])
                    .show(ui, |ui| {
                        for (idx, entry) in self.controller.catalog().entries().iter().enumerate() {
                            let text = RichText::new(entry.menu_text()).size(16.0).strong();
                            if ui.add_sized(MENU_BUTTON_SIZE, egui::Button::new(text)).clicked() {
                                actions.push(UiAction::Add(entry.label.clone()));
                            }
                            if idx % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
            });
    }

    fn draw_cart(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let p = self.controller.palette();
        let snapshot = self.controller.snapshot();
        egui::Frame::group(ui.style())
            .fill(color32(p.panel))
            .stroke(egui::Stroke::new(2.0, color32(p.accent)))
            .inner_margin(18.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Your Order").size(22.0).strong());
                ui.add_space(6.0);

                egui::Frame::none()
                    .fill(color32(p.cart_area))
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.set_min_height(170.0);
                        egui::ScrollArea::vertical().max_height(170.0).show(ui, |ui| {
                            egui::Grid::new("snack_cart_grid")
                                .num_columns(2)
                                .striped(true)
                                .show(ui, |ui| {
                                    ui.strong("Item");
                                    ui.strong("Price");
                                    ui.end_row();
                                    for line in &snapshot.lines {
                                        let selected = self.selected.as_deref() == Some(line.label.as_str());
                                        let row = ui.add_sized(
                                            [CART_ITEM_WIDTH, 24.0],
                                            egui::SelectableLabel::new(selected, line.display_label()),
                                        );
                                        if row.clicked() {
                                            actions.push(UiAction::Select(line.label.clone()));
                                        }
                                        ui.label(line.subtotal.with_currency());
                                        ui.end_row();
                                    }
                                });
                        });
                    });

                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(snapshot.total_label()).size(18.0).strong());
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        if ui.button(RichText::new(" + ").strong()).clicked() {
                            actions.push(UiAction::Increment);
                        }
                        if ui.button(RichText::new(" − ").strong()).clicked() {
                            actions.push(UiAction::Decrement);
                        }
                        if ui.button("Remove Selected").clicked() {
                            actions.push(UiAction::RemoveSelected);
                        }
                        if ui.button("Clear Cart").clicked() {
                            actions.push(UiAction::RequestClear);
                        }
                    });
                });
            });
    }

    fn draw_dialogs(&self, ctx: &Context, actions: &mut Vec<UiAction>) {
        if let Some(prompt) = self.pending_clear {
            egui::Window::new("Clear Cart")
                .id(Id::new("snack_confirm_clear"))
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(prompt);
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            actions.push(UiAction::ConfirmClear(true));
                        }
                        if ui.button("No").clicked() {
                            actions.push(UiAction::ConfirmClear(false));
                        }
                    });
                });
        }
        if let Some(advisory) = self.advisory {
            egui::Window::new("No Selection")
                .id(Id::new("snack_advisory"))
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(advisory.to_string());
                    if ui.button("OK").clicked() {
                        actions.push(UiAction::DismissAdvisory);
                    }
                });
        }
    }
}

impl eframe::App for SnackNativeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.restyle.replace(false) {
            configure_visuals(ctx, self.controller.theme(), self.controller.palette());
        }

        let mut actions = Vec::new();
        let modal = self.pending_clear.is_some() || self.advisory.is_some();

        egui::TopBottomPanel::bottom("snack_theme_bar").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add_space(60.0);
                if ui.button("🌤 Light Theme").clicked() {
                    actions.push(UiAction::Theme(ThemeName::Light));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(60.0);
                    if ui.button("🌙 Dark Theme").clicked() {
                        actions.push(UiAction::Theme(ThemeName::Dark));
                    }
                });
            });
            ui.add_space(12.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| {
                ui.add_space(12.0);
                self.draw_menu(ui, &mut actions);
                ui.add_space(12.0);
                self.draw_cart(ui, &mut actions);
            });
        });

        self.draw_dialogs(ctx, &mut actions);

        for action in actions {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIZZA: &str = "🍕 Pizza";

    fn app() -> SnackNativeApp {
        SnackNativeApp::new(CartController::default())
    }

    #[test]
    fn buttons_without_selection_raise_advisory() {
        let mut app = app();
        app.apply(UiAction::Add(PIZZA.into()));
        app.apply(UiAction::Increment);
        assert_eq!(app.advisory(), Some(Advisory::NoSelection));
        assert_eq!(app.controller().quantity(PIZZA), Some(1));
        app.apply(UiAction::DismissAdvisory);
        assert_eq!(app.advisory(), None);
    }

    #[test]
    fn selection_drops_when_its_line_disappears() {
        let mut app = app();
        app.apply(UiAction::Add(PIZZA.into()));
        app.apply(UiAction::Select(PIZZA.into()));
        app.apply(UiAction::Increment);
        assert_eq!(app.controller().quantity(PIZZA), Some(2));
        app.apply(UiAction::Decrement);
        app.apply(UiAction::Decrement);
        assert_eq!(app.controller().quantity(PIZZA), None);
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn clear_waits_for_confirmation() {
        let mut app = app();
        app.apply(UiAction::RequestClear);
        assert_eq!(app.pending_clear(), None);

        app.apply(UiAction::Add(PIZZA.into()));
        app.apply(UiAction::RequestClear);
        assert!(app.pending_clear().is_some());
        app.apply(UiAction::ConfirmClear(false));
        assert!(!app.controller().is_empty());

        app.apply(UiAction::RequestClear);
        app.apply(UiAction::ConfirmClear(true));
        assert!(app.controller().is_empty());
        assert_eq!(app.pending_clear(), None);
    }

    #[test]
    fn theme_change_marks_visuals_for_restyle() {
        let mut app = app();
        app.restyle.set(false);
        app.apply(UiAction::Add(PIZZA.into()));
        assert!(!app.restyle.get());
        app.apply(UiAction::Theme(ThemeName::Light));
        assert!(app.restyle.get());
        assert_eq!(app.controller().theme(), ThemeName::Light);
        assert_eq!(app.controller().quantity(PIZZA), Some(1));
    }
}
