use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Mul};

use thiserror::Error;

pub const CURRENCY_SUFFIX: &str = "€";

/// Amount of money in whole cents. Sums stay exact at two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// `3.00€` style label used by every front end.
    pub fn with_currency(self) -> String {
        format!("{self}{CURRENCY_SUFFIX}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Price {
    type Output = Price;
    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Price;
    fn mul(self, qty: u32) -> Price {
        Price(self.0 * u64::from(qty))
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: String,
    pub unit_price: Price,
}

impl CatalogEntry {
    pub fn new(label: impl Into<String>, unit_price: Price) -> Self {
        Self {
            label: label.into(),
            unit_price,
        }
    }

    /// Label without a leading emoji/symbol prefix ("🍕 Pizza" -> "Pizza").
    pub fn name(&self) -> &str {
        match self.label.split_once(' ') {
            Some((prefix, rest)) if !prefix.chars().any(char::is_alphanumeric) => rest.trim(),
            _ => self.label.as_str(),
        }
    }

    /// Button text: `🍕 Pizza - 3.00€`.
    pub fn menu_text(&self) -> String {
        format!("{} - {}", self.label, self.unit_price.with_currency())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate catalog label: {0}")]
    DuplicateLabel(String),
    #[error("catalog label must not be empty")]
    EmptyLabel,
}

/// Fixed, ordered list of purchasable items. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const SNACKS: &[(&str, u64)] = &[
    ("🍕 Pizza", 300),
    ("🥨 Nachos", 450),
    ("🍿 Popcorn", 500),
    ("🍟 Fries", 250),
    ("🥔 Chips", 100),
    ("🥨 Pretzel", 350),
    ("🥤 Soda", 300),
    ("🍋 Lemonade", 425),
    ("💧 Water", 299),
];

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(CatalogError::DuplicateLabel(entry.label.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn unit_price(&self, label: &str) -> Option<Price> {
        self.get(label).map(|e| e.unit_price)
    }

    /// Loose lookup for typed input: full label or bare name, ignoring case.
    pub fn find_loose(&self, input: &str) -> Option<&CatalogEntry> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.label.to_lowercase() == needle || e.name().to_lowercase() == needle)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: SNACKS
                .iter()
                .map(|(label, cents)| CatalogEntry::new(*label, Price::from_cents(*cents)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_keeps_menu_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.entries()[0].label, "🍕 Pizza");
        assert_eq!(catalog.entries()[8].label, "💧 Water");
        assert_eq!(catalog.unit_price("🍋 Lemonade"), Some(Price::from_cents(425)));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = Catalog::new(vec![
            CatalogEntry::new("Pizza", Price::from_cents(300)),
            CatalogEntry::new("Pizza", Price::from_cents(350)),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLabel("Pizza".into()));
    }

    #[test]
    fn price_formats_with_two_decimals() {
        assert_eq!(Price::from_cents(299).to_string(), "2.99");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(1200).with_currency(), "12.00€");
    }

    #[test]
    fn loose_lookup_matches_bare_name_case_insensitively() {
        let catalog = Catalog::default();
        assert_eq!(catalog.find_loose("PIZZA").map(|e| e.label.as_str()), Some("🍕 Pizza"));
        assert_eq!(catalog.find_loose("🥤 soda").map(|e| e.label.as_str()), Some("🥤 Soda"));
        assert!(catalog.find_loose("burger").is_none());
        assert!(catalog.find_loose("   ").is_none());
    }

    #[test]
    fn name_keeps_plain_labels_intact() {
        assert_eq!(CatalogEntry::new("Hot Dog", Price::ZERO).name(), "Hot Dog");
        assert_eq!(CatalogEntry::new("🍿 Popcorn", Price::ZERO).name(), "Popcorn");
    }
}
