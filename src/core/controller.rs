use std::fmt;

use tracing::debug;

use super::cart::{Cart, CartLine};
use super::catalog::{Catalog, Price};
use super::theme::{Palette, ThemeName, ThemeStore};

/// What a mutation touched. Listeners pull the new state themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Cart,
    Theme,
}

/// Non-fatal notice for an action that could not run. State is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    NoSelection,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NoSelection => f.write_str("Please select an item in the cart first."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
    Advisory(Advisory),
}

impl Outcome {
    pub fn advisory(self) -> Option<Advisory> {
        match self {
            Outcome::Advisory(a) => Some(a),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearRequest {
    NothingToClear,
    NeedsConfirmation(&'static str),
    Immediate,
}

pub const CLEAR_PROMPT: &str = "Clear all items from your order?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl CartSnapshot {
    pub fn total_label(&self) -> String {
        format!("Total: {}", self.total.with_currency())
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

type Listener = Box<dyn FnMut(StateChange)>;

/// Owns the cart and theme state for one session.
pub struct CartController {
    catalog: Catalog,
    cart: Cart,
    themes: ThemeStore,
    confirm_clear: bool,
    listeners: Vec<Listener>,
}

impl fmt::Debug for CartController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartController")
            .field("cart", &self.cart)
            .field("theme", &self.themes.current())
            .field("confirm_clear", &self.confirm_clear)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartController {
    pub fn new(catalog: Catalog, theme: ThemeName) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            themes: ThemeStore::new(theme),
            confirm_clear: true,
            listeners: Vec::new(),
        }
    }

    pub fn with_confirm_clear(mut self, confirm_clear: bool) -> Self {
        self.confirm_clear = confirm_clear;
        self
    }

    /// Called once at the end of every mutation that changed state.
    pub fn subscribe(&mut self, listener: impl FnMut(StateChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn quantity(&self, label: &str) -> Option<u32> {
        self.cart.quantity(label)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn theme(&self) -> ThemeName {
        self.themes.current()
    }

    pub fn palette(&self) -> &'static Palette {
        self.themes.palette()
    }

    pub fn total(&self) -> Price {
        self.cart.total(&self.catalog)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart.lines(&self.catalog),
            total: self.total(),
        }
    }

    pub fn add(&mut self, label: &str) -> Outcome {
        if !self.catalog.contains(label) {
            debug!(label, "add ignored: not on the menu");
            return Outcome::Ignored;
        }
        self.cart.add(label);
        debug!(label, qty = self.cart.quantity(label), "added");
        self.changed(StateChange::Cart)
    }

    pub fn increment(&mut self, selection: Option<&str>) -> Outcome {
        let Some(label) = selection else {
            return Outcome::Advisory(Advisory::NoSelection);
        };
        if !self.cart.increment(label) {
            return Outcome::Ignored;
        }
        debug!(label, qty = self.cart.quantity(label), "incremented");
        self.changed(StateChange::Cart)
    }

    pub fn decrement(&mut self, selection: Option<&str>) -> Outcome {
        let Some(label) = selection else {
            return Outcome::Advisory(Advisory::NoSelection);
        };
        if !self.cart.decrement(label) {
            return Outcome::Ignored;
        }
        debug!(label, qty = self.cart.quantity(label).unwrap_or(0), "decremented");
        self.changed(StateChange::Cart)
    }

    pub fn remove_selected(&mut self, label: &str) -> Outcome {
        if !self.cart.remove(label) {
            return Outcome::Ignored;
        }
        debug!(label, "removed line");
        self.changed(StateChange::Cart)
    }

    /// Same as [`remove_selected`](Self::remove_selected), with the
    /// advisory for a missing selection.
    pub fn remove_selection(&mut self, selection: Option<&str>) -> Outcome {
        match selection {
            Some(label) => self.remove_selected(label),
            None => Outcome::Advisory(Advisory::NoSelection),
        }
    }

    pub fn request_clear(&self) -> ClearRequest {
        if self.cart.is_empty() {
            ClearRequest::NothingToClear
        } else if self.confirm_clear {
            ClearRequest::NeedsConfirmation(CLEAR_PROMPT)
        } else {
            ClearRequest::Immediate
        }
    }

    /// Empties the cart. Callers gate this behind [`request_clear`](Self::request_clear).
    pub fn clear(&mut self) -> Outcome {
        if self.cart.is_empty() {
            return Outcome::Ignored;
        }
        self.cart.clear();
        debug!("cart cleared");
        self.changed(StateChange::Cart)
    }

    pub fn apply_theme(&mut self, name: &str) -> Outcome {
        if !self.themes.apply(name) {
            debug!(name, "unknown theme ignored");
            return Outcome::Ignored;
        }
        debug!(theme = %self.themes.current(), "theme applied");
        self.changed(StateChange::Theme)
    }

    fn changed(&mut self, change: StateChange) -> Outcome {
        for listener in &mut self.listeners {
            listener(change);
        }
        Outcome::Applied
    }
}

impl Default for CartController {
    fn default() -> Self {
        Self::new(Catalog::default(), ThemeName::default())
    }
}
