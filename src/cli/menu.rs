use super::convert::{convert_pair, parse_amount, render_error, render_outcome};
use super::ui;
use crate::core::currency::currency_name;
use crate::core::{ConversionService, CurrencyPair};
use anyhow::Result;
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Convert(usize),
}

/// Maps a menu line to a choice; `None` for anything outside `0..=pair_count`.
pub fn parse_choice(input: &str, pair_count: usize) -> Option<MenuChoice> {
    match input.trim().parse::<usize>().ok()? {
        0 => Some(MenuChoice::Exit),
        n if n <= pair_count => Some(MenuChoice::Convert(n - 1)),
        _ => None,
    }
}

pub fn render_menu(pairs: &[CurrencyPair]) -> String {
    let mut menu = format!(
        "\n{}\n\n",
        ui::style_text("Choose a conversion:", ui::StyleType::Title)
    );
    for (i, pair) in pairs.iter().enumerate() {
        menu.push_str(&format!("{}) {}\n", i + 1, pair));
    }
    menu.push_str("0) Exit\n\nEnter your option: ");
    menu
}

fn banner() -> String {
    format!(
        "{}\n{}\n{}",
        ui::separator(),
        ui::style_text("Currency Converter - real-time exchange rates", ui::StyleType::Title),
        ui::separator()
    )
}

// An interrupt at a prompt behaves like end of input.
async fn next_line<R>(
    lines: &mut Lines<R>,
    interrupt: impl Future<Output = ()>,
) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    tokio::select! {
        line = lines.next_line() => Ok(line?),
        _ = interrupt => {
            debug!("Interrupted at prompt");
            Ok(None)
        }
    }
}

/// Runs the interactive menu until the user exits, input ends, or an
/// interrupt arrives at a prompt.
///
/// `interrupt` is called once per wait. An interrupt during a conversion
/// cancels it; failures are reported on `out` and the menu is shown again.
pub async fn run<R, W, I, F>(
    service: &ConversionService,
    pairs: &[CurrencyPair],
    input: R,
    out: &mut W,
    interrupt: I,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Fn() -> F,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    writeln!(out, "{}", banner())?;

    loop {
        write!(out, "{}", render_menu(pairs))?;
        out.flush()?;

        let Some(line) = next_line(&mut lines, interrupt()).await? else {
            break;
        };

        let pair = match parse_choice(&line, pairs.len()) {
            Some(MenuChoice::Exit) => {
                writeln!(
                    out,
                    "\n{}",
                    ui::style_text(
                        "Thank you for using the currency converter!",
                        ui::StyleType::Value
                    )
                )?;
                return Ok(());
            }
            Some(MenuChoice::Convert(index)) => &pairs[index],
            None => {
                writeln!(
                    out,
                    "\n{}",
                    ui::style_text(
                        &format!("Invalid option {:?}. Please choose one from the menu.", line.trim()),
                        ui::StyleType::Error
                    )
                )?;
                continue;
            }
        };

        write!(
            out,
            "\nEnter the amount in {} ({}): ",
            currency_name(&pair.from),
            pair.from
        )?;
        out.flush()?;

        let Some(line) = next_line(&mut lines, interrupt()).await? else {
            break;
        };

        let amount = match parse_amount(&line) {
            Ok(amount) => amount,
            Err(e) => {
                writeln!(out, "\n{}", render_error(&e))?;
                continue;
            }
        };

        match convert_pair(service, pair, amount, interrupt()).await {
            Ok(outcome) => writeln!(out, "\n{}", render_outcome(&outcome))?,
            Err(e) => {
                debug!(error = %e, "Conversion failed");
                writeln!(out, "\n{}", render_error(&e))?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}
