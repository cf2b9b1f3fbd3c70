use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{Overrides, Settings};
use crate::core::{Catalog, CartController, ThemeName};
use crate::logging;

/// Flags shared by the terminal and native binaries.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Starting theme (Light or Dark)
    #[arg(long)]
    pub theme: Option<ThemeName>,
    /// Clear the cart without asking first
    #[arg(long)]
    pub no_confirm_clear: bool,
    /// Read settings from a JSON file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Where to write the log (defaults to the temp directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Log filter, e.g. `info` or `snack_menu=debug`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl CommonArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            theme: self.theme,
            no_confirm_clear: self.no_confirm_clear,
            log_file: self.log_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

/// Resolves settings, starts logging and builds the session controller.
pub fn bootstrap(args: &CommonArgs) -> (Settings, CartController) {
    let (mut settings, load_err) = Settings::load_or_default(args.config.as_deref());
    args.overrides().apply(&mut settings);

    let log_path = settings.log_path();
    if let Err(err) = logging::init(&log_path, &settings.log_level) {
        eprintln!("logging disabled: {err:#}");
    }
    if let Some(err) = load_err {
        warn!("using default settings: {err:#}");
    }
    info!(theme = %settings.theme, confirm_clear = settings.confirm_clear, log = %log_path.display(), "starting");

    let controller = CartController::new(Catalog::default(), settings.theme)
        .with_confirm_clear(settings.confirm_clear);
    (settings, controller)
}
