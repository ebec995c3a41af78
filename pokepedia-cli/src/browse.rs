//! Interactive browse loop
//!
//! Each input line replaces the search term and the matching entries are
//! printed. `:clear` resets the search, `:quit` (or end of input) exits.

use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use pokepedia_core::Session;

use crate::output;

/// What the loop should do after a line of input
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Show,
    Quit,
}

fn handle_line(session: &mut Session, line: &str) -> Action {
    match line.trim_end_matches(['\r', '\n']) {
        ":quit" | ":q" => Action::Quit,
        ":clear" => {
            session.clear_search();
            Action::Show
        }
        term => {
            session.set_search_term(term);
            Action::Show
        }
    }
}

fn prompt() -> Result<()> {
    print!("search> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

pub async fn run(session: &mut Session, json_output: bool) -> Result<()> {
    println!(
        "{} entries loaded. Type to search, :clear to reset, :quit to exit.",
        session.items().len()
    );
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if handle_line(session, &line) == Action::Quit {
            break;
        }

        output::print_entries(session.visible(), json_output)?;
        prompt()?;
    }

    Ok(())
}
