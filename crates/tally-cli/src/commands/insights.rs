//! Summary and forecast command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::{ForecastStatus, SummaryWindow};
use tally_core::{ForecastEngine, SummaryEngine};

pub fn cmd_summary(db: &Database, month_to_date: bool) -> Result<()> {
    let window = if month_to_date {
        SummaryWindow::MonthToDate
    } else {
        SummaryWindow::FromMonthStart
    };

    let summary = SummaryEngine::new(db)
        .with_window(window)
        .summarize_current_month()?;

    println!();
    println!("📊 This Month");
    println!("   ─────────────────────────────────────");
    println!("   Income:     \x1b[32m${:>10.2}\x1b[0m", summary.total_credit);
    println!("   Spending:   \x1b[31m${:>10.2}\x1b[0m", summary.total_debit);
    println!("   Remaining:  ${:>10.2}", summary.remaining);
    println!("   Limit:      ${:>10.2}", summary.limit);
    println!();

    if summary.exceeded {
        println!(
            "   ⚠️  Over budget by ${:.2}",
            summary.over_budget_amount
        );
    } else {
        println!(
            "   ✅ Within budget (${:.2} left to spend)",
            summary.limit - summary.total_debit
        );
    }

    Ok(())
}

pub fn cmd_forecast(db: &Database, days: u32) -> Result<()> {
    let forecast = ForecastEngine::with_horizon(db, days).forecast()?;

    println!();
    match forecast.status {
        ForecastStatus::InsufficientData => {
            println!("🔮 Not enough spending history to forecast yet.");
            println!("   Record spending on at least 3 different days.");
        }
        ForecastStatus::Success => {
            println!("🔮 Projected spending, next {} days", days);
            println!("   ─────────────────────────────────────");
            println!("   Total:  ${:.2}", forecast.prediction);
            if let Some(trend) = forecast.trend {
                println!("   Trend:  {}", trend.as_str());
            }
        }
    }

    Ok(())
}
