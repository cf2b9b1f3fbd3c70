pub mod cart;
pub mod catalog;
pub mod controller;
pub mod tally;
pub mod theme;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogEntry, CatalogError, Price, CURRENCY_SUFFIX};
pub use controller::{Advisory, CartController, CartSnapshot, ClearRequest, Outcome, StateChange};
pub use tally::OrderTally;
pub use theme::{Palette, Rgb, ThemeName, ThemeParseError, ThemeStore};
