use super::ui;
use crate::core::currency::currency_name;
use crate::core::{ConversionService, ConvertError, ConvertResult, CurrencyPair};
use anyhow::Result;
use std::future::Future;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub pair: CurrencyPair,
    pub amount: f64,
    pub converted: f64,
    pub rate: f64,
}

/// Validates a user supplied amount: finite and non-negative (`-0` included).
pub fn parse_amount(input: &str) -> ConvertResult<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && !amount.is_sign_negative() => Ok(amount),
        _ => Err(ConvertError::InvalidAmount(trimmed.to_string())),
    }
}

/// Converts `amount` and fetches the displayed rate, one request each.
///
/// Resolution of `cancel` before both requests finish yields [`ConvertError::Cancelled`].
pub async fn convert_pair(
    service: &ConversionService,
    pair: &CurrencyPair,
    amount: f64,
    cancel: impl Future<Output = ()>,
) -> ConvertResult<ConversionOutcome> {
    let pb = ui::new_spinner("Fetching exchange rates...");

    let work = async {
        let converted = service.convert(&pair.from, &pair.to, amount).await?;
        let rate = service.rate_of(&pair.from, &pair.to).await?;
        Ok::<_, ConvertError>(ConversionOutcome {
            pair: pair.clone(),
            amount,
            converted,
            rate,
        })
    };

    let result = tokio::select! {
        res = work => res,
        _ = cancel => {
            debug!("Conversion interrupted");
            Err(ConvertError::Cancelled)
        }
    };

    pb.finish_and_clear();
    result
}

pub fn render_outcome(outcome: &ConversionOutcome) -> String {
    let from = &outcome.pair.from;
    let to = &outcome.pair.to;

    let mut table = ui::new_styled_table();
    table.add_row(vec![
        ui::label_cell("From"),
        ui::amount_cell(format!("{:.2} {from}", outcome.amount), false),
        ui::amount_cell(currency_name(from).to_string(), false),
    ]);
    table.add_row(vec![
        ui::label_cell("To"),
        ui::amount_cell(format!("{:.2} {to}", outcome.converted), true),
        ui::amount_cell(currency_name(to).to_string(), false),
    ]);
    table.add_row(vec![
        ui::label_cell("Rate"),
        ui::amount_cell(format!("1 {from} = {:.4} {to}", outcome.rate), false),
        ui::amount_cell(String::new(), false),
    ]);

    format!(
        "{}\n\n{}",
        ui::style_text("Conversion result", ui::StyleType::Title),
        table
    )
}

pub fn render_error(err: &ConvertError) -> String {
    let message = ui::style_text(&format!("Error: {err}"), ui::StyleType::Error);
    if err.is_transport() {
        format!(
            "{message}\n{}",
            ui::style_text("Hint: check your internet connection.", ui::StyleType::Hint)
        )
    } else {
        message
    }
}

/// One-shot conversion for the `convert` subcommand.
pub async fn run(service: &ConversionService, from: &str, to: &str, amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let pair = CurrencyPair::new(&from.to_uppercase(), &to.to_uppercase());

    let outcome = convert_pair(service, &pair, amount, super::ctrl_c()).await?;
    println!("{}", render_outcome(&outcome));
    Ok(())
}
