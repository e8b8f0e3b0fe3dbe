use crate::interpolate::interpolate;
use crate::types::FinancialRecord;

/// Unit divisor for values reported in dollars, displayed in billions.
pub const BILLIONS: f64 = 1e9;
/// Unit divisor for values displayed in millions.
pub const MILLIONS: f64 = 1e6;
/// Divisor that turns a fraction into a percentage.
pub const PERCENT: f64 = 1e-2;

/// Reads one source field out of a financial record.
pub type FieldAccessor = fn(&FinancialRecord) -> Option<f64>;

/// What an extracted series puts at positions where the source field is
/// missing or zero.
///
/// Breakdown charts zero-fill so stacked sums stay meaningful; trend charts
/// gap-fill so the interpolator can bridge the hole instead of plotting a
/// drop to zero. Note that a reported `0.0` is treated the same as an
/// absent field in both modes; this mirrors the backend's extraction
/// behavior, which cannot distinguish a true zero balance from no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Gap,
    Zero,
}

/// Extract one unit-scaled series from a sorted record slice.
pub fn extract_series(
    records: &[FinancialRecord],
    accessor: FieldAccessor,
    divisor: f64,
    missing: Missing,
) -> Vec<Option<f64>> {
    records
        .iter()
        .map(|rec| match accessor(rec) {
            Some(v) if v != 0.0 => Some(v / divisor),
            _ => match missing {
                Missing::Gap => None,
                Missing::Zero => Some(0.0),
            },
        })
        .collect()
}

/// Sort financial records ascending by period end date. The sort is stable:
/// records sharing a date (quarterly next to annual filings) keep their
/// input order.
pub fn sort_financials(records: &mut [FinancialRecord]) {
    records.sort_by_key(|rec| rec.end_date);
}

/// Shared label sequence for every chart built from `records`. Deriving the
/// labels once and reusing them for all sibling series keeps label and
/// value lengths in lockstep.
pub fn financial_labels(records: &[FinancialRecord]) -> Vec<String> {
    records.iter().map(|rec| rec.end_date.to_string()).collect()
}

/// One stacked-chart component: a display name plus its zero-filled series.
#[derive(Debug, Clone)]
pub struct BreakdownComponent {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
}

/// Asset breakdown components in stacking order (bottom of the stack
/// first).
pub const ASSET_COMPONENTS: [(&str, FieldAccessor); 9] = [
    ("Cash", |rec| rec.cash),
    ("Marketable Securities", |rec| rec.marketable_securities_current),
    ("Accounts Receivable", |rec| rec.accounts_receivable_current),
    ("Nontrade Receivables (Current)", |rec| rec.nontrade_receivable_current),
    ("Nontrade Receivables (Non-Current)", |rec| {
        rec.nontrade_receivable_non_current
    }),
    ("Inventory", |rec| rec.inventory_net),
    ("Property, Plant & Equipment", |rec| {
        rec.property_plant_and_equipment_net
    }),
    ("Other Current Assets", |rec| rec.other_assets_current),
    ("Other Non-Current Assets", |rec| rec.other_assets_non_current),
];

/// Liability breakdown components in stacking order.
pub const LIABILITY_COMPONENTS: [(&str, FieldAccessor); 8] = [
    ("Accounts Payable", |rec| rec.accounts_payable_current),
    ("Customer Contracts (Current)", |rec| {
        rec.contracts_with_customer_current
    }),
    ("Customer Contracts (Non-Current)", |rec| {
        rec.contracts_with_customer_non_current
    }),
    ("Commercial Paper", |rec| rec.commercial_paper),
    ("Long-Term Debt (Current)", |rec| rec.long_term_debt_current),
    ("Long-Term Debt (Non-Current)", |rec| rec.long_term_debt_non_current),
    ("Other Liabilities (Current)", |rec| rec.other_liabilities_current),
    ("Other Liabilities (Non-Current)", |rec| {
        rec.other_liabilities_non_current
    }),
];

fn extract_breakdown(
    records: &[FinancialRecord],
    table: &[(&'static str, FieldAccessor)],
) -> Vec<BreakdownComponent> {
    table
        .iter()
        .map(|(name, accessor)| BreakdownComponent {
            name,
            values: extract_series(records, *accessor, BILLIONS, Missing::Zero),
        })
        .collect()
}

/// Every chart-ready series derived from the financial records: shared
/// labels, interpolated trend series, and zero-filled breakdown components.
#[derive(Debug, Clone, Default)]
pub struct PreparedFinancials {
    pub labels: Vec<String>,

    // Earnings panel
    pub revenue: Vec<Option<f64>>,
    pub earnings: Vec<Option<f64>>,
    pub accumulated_earnings: Vec<Option<f64>>,
    pub gross_profit: Vec<Option<f64>>,
    pub operating_income: Vec<Option<f64>>,
    pub eps: Vec<Option<f64>>,

    // Debt & equity panel
    pub debt: Vec<Option<f64>>,
    pub equity: Vec<Option<f64>>,
    pub assets: Vec<Option<f64>>,

    // Market mechanics panel
    pub market_cap: Vec<Option<f64>>,
    pub shares_outstanding: Vec<Option<f64>>,
    pub float_shares: Vec<Option<f64>>,
    pub buyback_value: Vec<Option<f64>>,

    // Balance sheet panel
    pub asset_components: Vec<BreakdownComponent>,
    pub liability_components: Vec<BreakdownComponent>,
}

impl PreparedFinancials {
    /// Sort the records and derive every series the chart builders consume.
    pub fn prepare(mut records: Vec<FinancialRecord>) -> Self {
        sort_financials(&mut records);

        let trend = |accessor: FieldAccessor, divisor: f64| {
            interpolate(&extract_series(&records, accessor, divisor, Missing::Gap))
        };

        Self {
            labels: financial_labels(&records),
            revenue: trend(|rec| rec.revenue, BILLIONS),
            earnings: trend(|rec| rec.earnings, BILLIONS),
            accumulated_earnings: trend(|rec| rec.accumulated_earnings, BILLIONS),
            gross_profit: trend(|rec| rec.gross_profit, BILLIONS),
            operating_income: trend(|rec| rec.operating_income, BILLIONS),
            eps: trend(|rec| rec.eps, 1.0),
            debt: trend(|rec| rec.debt, BILLIONS),
            equity: trend(|rec| rec.equity, BILLIONS),
            assets: trend(|rec| rec.assets, BILLIONS),
            market_cap: trend(|rec| rec.market_cap, BILLIONS),
            shares_outstanding: trend(|rec| rec.shares_outstanding, MILLIONS),
            float_shares: trend(|rec| rec.float_shares, MILLIONS),
            buyback_value: trend(|rec| rec.value_of_shares_bought_back, MILLIONS),
            asset_components: extract_breakdown(&records, &ASSET_COMPONENTS),
            liability_components: extract_breakdown(&records, &LIABILITY_COMPONENTS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(end_date: &str, revenue: Option<f64>, cash: Option<f64>) -> FinancialRecord {
        FinancialRecord {
            end_date: date(end_date),
            revenue,
            cash,
            ..Default::default()
        }
    }

    #[test]
    fn gap_policy_maps_missing_and_zero_to_none() {
        let records = vec![
            record("2024-03-30", Some(90.0e9), None),
            record("2024-06-29", None, None),
            record("2024-09-28", Some(0.0), None),
        ];
        let out = extract_series(&records, |r| r.revenue, BILLIONS, Missing::Gap);
        assert_eq!(out, vec![Some(90.0), None, None]);
    }

    #[test]
    fn zero_policy_maps_missing_and_zero_to_zero() {
        let records = vec![
            record("2024-03-30", None, Some(30.0e9)),
            record("2024-06-29", None, None),
            record("2024-09-28", None, Some(0.0)),
        ];
        let out = extract_series(&records, |r| r.cash, BILLIONS, Missing::Zero);
        assert_eq!(out, vec![Some(30.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn percent_divisor_scales_fractions_up() {
        let records = vec![FinancialRecord {
            end_date: date("2024-06-29"),
            earnings_perc: Some(0.25),
            ..Default::default()
        }];
        let out = extract_series(&records, |r| r.earnings_perc, PERCENT, Missing::Gap);
        assert_eq!(out, vec![Some(25.0)]);
    }

    #[test]
    fn sort_is_ascending_and_stable() {
        let mut records = vec![
            record("2024-09-28", Some(1.0), None),
            record("2024-03-30", Some(2.0), None),
            record("2024-09-28", Some(3.0), None),
        ];
        sort_financials(&mut records);
        assert_eq!(records[0].revenue, Some(2.0));
        // Duplicate dates keep input order.
        assert_eq!(records[1].revenue, Some(1.0));
        assert_eq!(records[2].revenue, Some(3.0));
    }

    #[test]
    fn prepare_shares_one_label_sequence() {
        let records = vec![
            record("2024-06-29", Some(85.783e9), Some(25.0e9)),
            record("2024-03-30", Some(90.753e9), None),
        ];
        let prepared = PreparedFinancials::prepare(records);
        assert_eq!(prepared.labels, vec!["2024-03-30", "2024-06-29"]);
        assert_eq!(prepared.revenue.len(), prepared.labels.len());
        assert_eq!(prepared.eps.len(), prepared.labels.len());
        for comp in &prepared.asset_components {
            assert_eq!(comp.values.len(), prepared.labels.len());
        }
    }

    #[test]
    fn prepare_interpolates_trend_gaps() {
        let records = vec![
            record("2024-03-30", Some(90.0e9), None),
            record("2024-06-29", None, None),
            record("2024-09-28", Some(100.0e9), None),
        ];
        let prepared = PreparedFinancials::prepare(records);
        assert_eq!(prepared.revenue, vec![Some(90.0), Some(95.0), Some(100.0)]);
    }

    #[test]
    fn prepare_empty_input() {
        let prepared = PreparedFinancials::prepare(Vec::new());
        assert!(prepared.is_empty());
        assert!(prepared.revenue.is_empty());
        assert_eq!(prepared.asset_components.len(), 9);
        assert_eq!(prepared.liability_components.len(), 8);
    }
}
