use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use std::io::stdout;
use tracing::{error, info};

use snack_menu::cli::{bootstrap, CommonArgs};
use snack_menu::core::CartController;
use snack_menu::menu_screen::run_snack_menu;
use snack_menu::plain;
use snack_menu::ui::{flash_message, Term};

/// Snack menu ordering in the terminal.
#[derive(Debug, Parser)]
#[command(name = "snack-menu", version)]
struct Cli {
    /// Line-based prompt instead of the full-screen interface
    #[arg(long)]
    plain: bool,
    #[command(flatten)]
    common: CommonArgs,
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(ratatui::Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Main application loop ─────────────────────────────────────────────────────

fn run(terminal: &mut Term, controller: &mut CartController) -> Result<()> {
    run_snack_menu(terminal, controller)?;
    let total = controller.snapshot().total_label();
    flash_message(terminal, controller.palette(), &format!("Thanks for ordering! {total}"), 800)?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, mut controller) = bootstrap(&cli.common);

    if cli.plain {
        let stdin = std::io::stdin();
        plain::run(controller.catalog(), stdin.lock(), stdout().lock())?;
        return Ok(());
    }

    let mut terminal = init_terminal().context("initialising terminal")?;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        run(&mut terminal, &mut controller)
    }));

    // Always restore terminal
    restore_terminal(&mut terminal).ok();

    match result {
        Ok(Ok(())) => {
            info!("exiting");
            Ok(())
        }
        Ok(Err(e)) => {
            error!("{e:#}");
            Err(e)
        }
        Err(_) => {
            error!("order screen panicked");
            eprintln!("Snack Menu crashed. Check {}", settings.log_path().display());
            Ok(())
        }
    }
}
