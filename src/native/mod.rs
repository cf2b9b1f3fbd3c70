pub mod app;
mod visuals;

pub use app::{SnackNativeApp, UiAction};
