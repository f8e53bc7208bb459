//! Output rendering for the CLI
//!
//! Text output rounds amounts to whole units. JSON output carries the raw
//! values so downstream tools round exactly once.

use anyhow::Result;
use serde::Serialize;

use crate::OutputFormat;
use tour_pricing_core::core::money::round_for_display;
use tour_pricing_core::{
    CancellationQuote, ChangeQuote, DaysUntilStart, NextStep, PolicyTable,
};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe_days(days: DaysUntilStart) -> String {
    match days {
        DaysUntilStart::Known(n) if n < 0 => format!("departed {} day(s) ago", n.unsigned_abs()),
        DaysUntilStart::Known(n) => format!("{} day(s) until departure", n),
        DaysUntilStart::Unknown => "departure date unknown".to_string(),
    }
}

pub fn print_refund(quote: &CancellationQuote, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(quote);
    }

    println!("{}", describe_days(quote.days_until_start));
    println!(
        "Policy:  {} ({}) - {}% penalty",
        quote.tier.title,
        quote.tier.time_range_label,
        quote.tier.rate_percent()
    );
    if let Some(note) = &quote.note {
        println!("Note:    {}", note);
    }
    println!("Total:   {}", round_for_display(quote.total_price));
    println!("Penalty: {}", round_for_display(quote.refund.penalty_amount));
    println!("Refund:  {}", round_for_display(quote.refund.refund_amount));
    Ok(())
}

pub fn print_change(quote: &ChangeQuote, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(quote);
    }

    println!("{}", describe_days(quote.days_until_start));
    println!("Policy:      {} ({}% penalty)", quote.tier.title, quote.tier.rate_percent());
    println!("New total:   {}", round_for_display(quote.new_subtotal));
    println!("Discount:    {}", round_for_display(quote.discount));
    println!(
        "Difference:  {}",
        round_for_display(quote.price_difference.value())
    );
    match quote.next_step {
        NextStep::CollectPayment { amount } => {
            println!("Next step:   collect payment of {}", round_for_display(amount))
        }
        NextStep::SubmitRequest => println!("Next step:   submit change request"),
    }
    Ok(())
}

pub fn print_policies(table: &PolicyTable, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(table);
    }

    for tier in table.tiers() {
        println!(
            "{:<6} {:>5}%  {:<36} {}",
            tier.id.to_string(),
            tier.rate_percent(),
            tier.time_range_label,
            tier.description
        );
    }
    println!("Unknown date: {}", table.unknown_date_tier().id);
    Ok(())
}
