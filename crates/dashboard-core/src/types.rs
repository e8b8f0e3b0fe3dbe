use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One trading day of adjusted price data, as injected by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub adj_close: f64,
    #[serde(default)]
    pub adj_close_20ma: Option<f64>,
    #[serde(default)]
    pub adj_close_50ma: Option<f64>,
    #[serde(default)]
    pub adj_close_200ma: Option<f64>,
    #[serde(default)]
    pub volume: Option<i64>,
}

/// One reporting period of financial data. Every numeric field is optional:
/// the backend emits nulls for metrics a filing did not report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub end_date: NaiveDate,

    // Income / earnings
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub earnings: Option<f64>,
    #[serde(default)]
    pub earnings_perc: Option<f64>,
    #[serde(default)]
    pub accumulated_earnings: Option<f64>,
    #[serde(default)]
    pub gross_profit: Option<f64>,
    #[serde(default)]
    pub operating_income: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,

    // Balance summary
    #[serde(default)]
    pub debt: Option<f64>,
    #[serde(default)]
    pub equity: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub assets: Option<f64>,

    // Market mechanics
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
    #[serde(default, rename = "float")]
    pub float_shares: Option<f64>,
    #[serde(default)]
    pub value_of_shares_bought_back: Option<f64>,

    // Asset breakdown
    #[serde(default)]
    pub cash: Option<f64>,
    #[serde(default)]
    pub marketable_securities_current: Option<f64>,
    #[serde(default)]
    pub accounts_receivable_current: Option<f64>,
    #[serde(default)]
    pub nontrade_receivable_current: Option<f64>,
    #[serde(default)]
    pub nontrade_receivable_non_current: Option<f64>,
    #[serde(default)]
    pub inventory_net: Option<f64>,
    #[serde(default)]
    pub property_plant_and_equipment_net: Option<f64>,
    #[serde(default)]
    pub other_assets_current: Option<f64>,
    #[serde(default)]
    pub other_assets_non_current: Option<f64>,

    // Liability breakdown
    #[serde(default)]
    pub accounts_payable_current: Option<f64>,
    #[serde(default)]
    pub contracts_with_customer_current: Option<f64>,
    #[serde(default)]
    pub contracts_with_customer_non_current: Option<f64>,
    #[serde(default)]
    pub commercial_paper: Option<f64>,
    #[serde(default)]
    pub long_term_debt_current: Option<f64>,
    #[serde(default)]
    pub long_term_debt_non_current: Option<f64>,
    #[serde(default)]
    pub other_liabilities_current: Option<f64>,
    #[serde(default)]
    pub other_liabilities_non_current: Option<f64>,
}

/// A listed security, used by the search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub title: String,
    #[serde(default)]
    pub industry: String,
}

pub fn parse_prices(json: &str) -> Result<Vec<PriceRecord>, DataError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_financials(json: &str) -> Result<Vec<FinancialRecord>, DataError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_symbols(json: &str) -> Result<Vec<StockRecord>, DataError> {
    Ok(serde_json::from_str(json)?)
}
