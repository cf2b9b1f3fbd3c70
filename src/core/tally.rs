use super::catalog::{Catalog, Price};

/// Append-only order used by the plain prompt: picking an item three times
/// yields three entries, not one line at quantity 3.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTally {
    entries: Vec<String>,
}

impl OrderTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.entries.push(label.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self, catalog: &Catalog) -> Price {
        self.entries
            .iter()
            .filter_map(|label| catalog.unit_price(label))
            .sum()
    }

    /// Counts per label in first-picked order.
    pub fn summary(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = Vec::new();
        for label in &self.entries {
            match out.iter_mut().find(|(l, _)| *l == label.as_str()) {
                Some((_, n)) => *n += 1,
                None => out.push((label.as_str(), 1)),
            }
        }
        out
    }
}
