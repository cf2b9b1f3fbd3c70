use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::core::{Catalog, OrderTally};

pub const PROMPT: &str = "Select an option: (q to quit)";

fn print_menu(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Menu:")?;
    for entry in catalog.entries() {
        writeln!(out, "  {}", entry.menu_text())?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_order(catalog: &Catalog, tally: &OrderTally, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Your order:")?;
    for label in tally.entries() {
        writeln!(out, "  {label}")?;
    }
    writeln!(out, "Total: {}", tally.total(catalog).with_currency())?;
    Ok(())
}

/// Line-based ordering loop. Each recognised item is appended to the tally;
/// `q` or end of input prints the order and returns it.
pub fn run(catalog: &Catalog, mut input: impl BufRead, mut out: impl Write) -> Result<OrderTally> {
    let mut tally = OrderTally::new();
    print_menu(catalog, &mut out)?;

    let mut line = String::new();
    loop {
        writeln!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed");
            break;
        }
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            break;
        }
        match catalog.find_loose(choice) {
            Some(entry) => {
                debug!(label = %entry.label, "picked");
                tally.push(entry.label.clone());
            }
            None => debug!(choice, "unrecognised input ignored"),
        }
    }

    print_order(catalog, &tally, &mut out)?;
    info!(entries = tally.len(), total = %tally.total(catalog), "plain order finished");
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(input: &str) -> (OrderTally, String) {
        let mut out = Vec::new();
        let tally = run(&Catalog::default(), input.as_bytes(), &mut out).unwrap();
        (tally, String::from_utf8(out).unwrap())
    }

    #[test]
    fn picks_accumulate_until_quit() {
        let (tally, out) = run_with("pizza\nPIZZA\nwater\nq\nsoda\n");
        assert_eq!(tally.entries(), ["🍕 Pizza", "🍕 Pizza", "💧 Water"]);
        assert!(out.contains("Your order:\n  🍕 Pizza\n  🍕 Pizza\n  💧 Water\n"));
        assert!(out.trim_end().ends_with("Total: 8.99€"));
    }

    #[test]
    fn unknown_input_is_ignored_and_prompt_repeats() {
        let (tally, out) = run_with("burger\n\nchips\nQ\n");
        assert_eq!(tally.entries(), ["🥔 Chips"]);
        assert_eq!(out.matches(PROMPT).count(), 4);
    }

    #[test]
    fn end_of_input_behaves_like_quit() {
        let (tally, out) = run_with("🍿 popcorn\n");
        assert_eq!(tally.len(), 1);
        assert!(out.contains("Total: 5.00€"));
    }

    #[test]
    fn menu_is_listed_before_the_first_prompt() {
        let (_, out) = run_with("q\n");
        let menu_pos = out.find("🍋 Lemonade - 4.25€").unwrap();
        assert!(menu_pos < out.find(PROMPT).unwrap());
        assert!(out.contains("Total: 0.00€"));
    }
}
