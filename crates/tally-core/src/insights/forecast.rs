//! Spending forecast
//!
//! Fits a straight line through daily debit totals (date ordinal against
//! amount) and sums the line over the days following the last spending day.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::regression::LinearFit;
use crate::error::Result;
use crate::models::{FlowDirection, Forecast, Transaction, Trend};
use crate::store::LedgerStore;

/// Number of days projected past the last spending day
pub const FORECAST_DAYS: u32 = 30;

/// Distinct spending days needed before a line is fitted
pub const MIN_SPENDING_DAYS: usize = 3;

/// Projects upcoming spending from a ledger store
pub struct ForecastEngine<'a, S: ?Sized> {
    store: &'a S,
    horizon_days: u32,
}

impl<'a, S: LedgerStore + ?Sized> ForecastEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            horizon_days: FORECAST_DAYS,
        }
    }

    pub fn with_horizon(store: &'a S, days: u32) -> Self {
        Self {
            store,
            horizon_days: days,
        }
    }

    pub fn forecast(&self) -> Result<Forecast> {
        let daily = self.store.daily_debit_totals()?;
        Ok(forecast_daily_totals(&daily, self.horizon_days))
    }
}

/// Sum debit amounts per date, oldest date first
pub fn group_daily_debits(transactions: &[Transaction]) -> Vec<(NaiveDate, f64)> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.flow == FlowDirection::Debit)
    {
        *by_date.entry(tx.date).or_insert(0.0) += tx.amount;
    }
    by_date.into_iter().collect()
}

/// Regression input for a date: days since 0001-01-01, which is day 1
pub fn date_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

/// Forecast from `(date, total)` pairs with one entry per distinct date
pub fn forecast_daily_totals(daily: &[(NaiveDate, f64)], horizon_days: u32) -> Forecast {
    if daily.len() < MIN_SPENDING_DAYS {
        debug!(
            spending_days = daily.len(),
            "Not enough spending history to forecast"
        );
        return Forecast::insufficient_data();
    }

    let points: Vec<(f64, f64)> = daily
        .iter()
        .map(|(date, total)| (date_ordinal(*date) as f64, *total))
        .collect();

    // Distinct dates guarantee spread in x, so this only fails on bad input
    let Some(fit) = LinearFit::fit(&points) else {
        return Forecast::insufficient_data();
    };

    let last_day = daily
        .iter()
        .map(|(date, _)| date_ordinal(*date))
        .max()
        .unwrap_or_default();

    let projected: f64 = (1..=i64::from(horizon_days))
        .map(|offset| fit.predict((last_day + offset) as f64))
        .sum();

    let prediction = round_cents(projected.max(0.0));
    let trend = Trend::from_slope(fit.slope);

    debug!(
        spending_days = daily.len(),
        slope = fit.slope,
        intercept = fit.intercept,
        horizon_days,
        prediction,
        trend = trend.as_str(),
        "Fitted spending trend"
    );

    Forecast::success(prediction, trend)
}

/// Round to cents, with exact half-cents going to the even cent
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
