use super::catalog::{Catalog, Price};

/// One rendered cart row, built from the cart and catalog on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub label: String,
    pub quantity: u32,
    pub subtotal: Price,
}

impl CartLine {
    /// `🍕 Pizza x3`. Display only; identity is always `label`.
    pub fn display_label(&self) -> String {
        format!("{} x{}", self.label, self.quantity)
    }
}

/// Quantities by label in first-added order. A stored quantity is always >= 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<(String, u32)>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity(&self, label: &str) -> Option<u32> {
        self.position(label).map(|idx| self.lines[idx].1)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn add(&mut self, label: &str) {
        match self.position(label) {
            Some(idx) => self.lines[idx].1 += 1,
            None => self.lines.push((label.to_string(), 1)),
        }
    }

    /// Returns false when the label has no line.
    pub fn increment(&mut self, label: &str) -> bool {
        match self.position(label) {
            Some(idx) => {
                self.lines[idx].1 += 1;
                true
            }
            None => false,
        }
    }

    /// Drops the line instead of storing a zero quantity.
    pub fn decrement(&mut self, label: &str) -> bool {
        let Some(idx) = self.position(label) else {
            return false;
        };
        if self.lines[idx].1 > 1 {
            self.lines[idx].1 -= 1;
        } else {
            self.lines.remove(idx);
        }
        true
    }

    pub fn remove(&mut self, label: &str) -> bool {
        match self.position(label) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self, catalog: &Catalog) -> Vec<CartLine> {
        self.lines
            .iter()
            .map(|(label, quantity)| CartLine {
                label: label.clone(),
                quantity: *quantity,
                subtotal: catalog.unit_price(label).unwrap_or_default() * *quantity,
            })
            .collect()
    }

    pub fn total(&self, catalog: &Catalog) -> Price {
        self.lines
            .iter()
            .map(|(label, quantity)| catalog.unit_price(label).unwrap_or_default() * *quantity)
            .sum()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.lines.iter().position(|(l, _)| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIZZA: &str = "🍕 Pizza";
    const WATER: &str = "💧 Water";

    #[test]
    fn add_inserts_then_increments() {
        let mut cart = Cart::new();
        cart.add(PIZZA);
        assert_eq!(cart.quantity(PIZZA), Some(1));
        cart.add(PIZZA);
        assert_eq!(cart.quantity(PIZZA), Some(2));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn decrement_at_one_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(WATER);
        assert!(cart.decrement(WATER));
        assert!(!cart.contains(WATER));
        assert!(cart.is_empty());
        assert!(!cart.decrement(WATER));
    }

    #[test]
    fn lines_keep_first_added_order_with_subtotals() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(WATER);
        cart.add(PIZZA);
        cart.add(WATER);
        let lines = cart.lines(&catalog);
        assert_eq!(lines[0].label, WATER);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].subtotal, Price::from_cents(598));
        assert_eq!(lines[1].display_label(), "🍕 Pizza x1");
        assert_eq!(cart.total(&catalog), Price::from_cents(898));
    }

    #[test]
    fn labels_containing_the_quantity_marker_stay_distinct() {
        let mut cart = Cart::new();
        cart.add("Box x2 Deal");
        cart.add("Box");
        assert!(cart.remove("Box x2 Deal"));
        assert_eq!(cart.quantity("Box"), Some(1));
    }
}
