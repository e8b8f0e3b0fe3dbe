use dashboard_core::PriceSeriesBundle;

use crate::format::{Unit, ValueFormat};
use crate::instance::ChartInstance;
use crate::spec::{Axis, AxisSlot, ChartSpec, Dataset, RatioAnnotation};
use crate::theme::Theme;

/// Volume axis headroom: bars occupy the bottom fifth of the chart.
const VOLUME_HEADROOM: f64 = 5.0;
/// Soft price-axis padding below the minimum and above the maximum.
const PRICE_PAD_LOW: f64 = 0.9;
const PRICE_PAD_HIGH: f64 = 1.1;

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn price_axis(bundle: &PriceSeriesBundle) -> Axis {
    let mut axis = Axis::new("Price");
    if let Some((lo, hi)) = min_max(&bundle.close) {
        axis.suggested_min = Some(lo * PRICE_PAD_LOW);
        axis.suggested_max = Some(hi * PRICE_PAD_HIGH);
    }
    axis
}

fn volume_axis(bundle: &PriceSeriesBundle) -> Axis {
    let mut axis = Axis::new("Volume").begin_at_zero();
    axis.max = min_max(&bundle.volume).map(|(_, hi)| hi * VOLUME_HEADROOM);
    axis
}

fn some(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Price lines (close plus three dashed moving averages) on the left axis,
/// volume bars on the right.
pub fn price_volume_chart(bundle: &PriceSeriesBundle, theme: &Theme) -> ChartSpec {
    let mut spec = ChartSpec::new(
        "Price + Volume with MAs",
        bundle.labels.clone(),
        vec![
            Dataset::line(
                "Adjusted Close Price",
                some(&bundle.close),
                theme.foreground,
                ValueFormat::Raw,
            ),
            Dataset::line("20-Day MA", bundle.ma20.clone(), theme.accent_blue, ValueFormat::Raw)
                .dashed(),
            Dataset::line("50-Day MA", bundle.ma50.clone(), theme.accent_magenta, ValueFormat::Raw)
                .dashed(),
            Dataset::line("200-Day MA", bundle.ma200.clone(), theme.text_muted, ValueFormat::Raw)
                .dashed(),
            Dataset::bar("Volume", some(&bundle.volume), theme.accent_magenta, ValueFormat::Raw)
                .on_axis(AxisSlot::Right),
        ],
        price_axis(bundle),
    );
    spec.right_axis = Some(volume_axis(bundle));
    spec
}

/// Swap a freshly filtered window into an existing price/volume chart and
/// re-derive both axes' bounds from it.
pub fn apply_price_bundle(chart: &mut ChartInstance, bundle: &PriceSeriesBundle) {
    chart.replace_data(
        bundle.labels.clone(),
        vec![
            some(&bundle.close),
            bundle.ma20.clone(),
            bundle.ma50.clone(),
            bundle.ma200.clone(),
            some(&bundle.volume),
        ],
    );
    let scale = chart.spec().left_axis.scale;
    let spec = chart.spec_mut();
    spec.left_axis = price_axis(bundle);
    spec.left_axis.scale = scale;
    spec.right_axis = Some(volume_axis(bundle));
}

pub fn earnings_chart(
    labels: &[String],
    revenue: &[Option<f64>],
    earnings: &[Option<f64>],
    accumulated_earnings: &[Option<f64>],
    theme: &Theme,
) -> ChartSpec {
    let billions = ValueFormat::Currency(Unit::Billions);
    let mut spec = ChartSpec::new(
        "Earnings Metrics",
        labels.to_vec(),
        vec![
            Dataset::line("Revenue (Billions)", revenue.to_vec(), theme.accent_blue, billions),
            Dataset::line("Earnings (Billions)", earnings.to_vec(), theme.accent_magenta, billions)
                .filled(),
            Dataset::line(
                "Accumulated Earnings (Billions)",
                accumulated_earnings.to_vec(),
                theme.text_muted,
                billions,
            ),
        ],
        Axis::new("Billions"),
    );
    spec.zero_line = true;
    spec
}

pub fn operating_profit_chart(
    labels: &[String],
    gross_profit: &[Option<f64>],
    operating_income: &[Option<f64>],
    earnings: &[Option<f64>],
    theme: &Theme,
) -> ChartSpec {
    let billions = ValueFormat::Currency(Unit::Billions);
    let mut spec = ChartSpec::new(
        "Operating Metrics",
        labels.to_vec(),
        vec![
            Dataset::line("Gross Profit (B)", gross_profit.to_vec(), theme.accent_orange, billions),
            Dataset::line(
                "Operating Income (B)",
                operating_income.to_vec(),
                theme.accent_blue,
                billions,
            )
            .filled(),
            Dataset::line(
                "Net Income/Earnings (B)",
                earnings.to_vec(),
                theme.accent_magenta,
                billions,
            )
            .hidden(),
        ],
        Axis::new("Billions").begin_at_zero(),
    );
    spec.zero_line = true;
    spec
}

pub fn eps_chart(labels: &[String], eps: &[Option<f64>], theme: &Theme) -> ChartSpec {
    ChartSpec::new(
        "Earnings Per Share",
        labels.to_vec(),
        vec![
            Dataset::line("EPS ($)", eps.to_vec(), theme.accent_blue, ValueFormat::PerShare)
                .filled(),
        ],
        Axis::new("EPS ($)"),
    )
}

/// Debt and equity filled lines, assets on top; the tooltip annotates the
/// debt and equity rows with their ratio when equity is non-zero.
pub fn debt_equity_chart(
    labels: &[String],
    debt: &[Option<f64>],
    equity: &[Option<f64>],
    assets: &[Option<f64>],
    theme: &Theme,
) -> ChartSpec {
    let billions = ValueFormat::Currency(Unit::Billions);
    let mut spec = ChartSpec::new(
        "Debt & Equity Metrics",
        labels.to_vec(),
        vec![
            Dataset::line("Debt (Billions)", debt.to_vec(), theme.accent_red, billions).filled(),
            Dataset::line("Equity (Billions)", equity.to_vec(), theme.accent_blue, billions)
                .filled(),
            Dataset::line("Assets (Billions)", assets.to_vec(), theme.accent_orange, billions),
        ],
        Axis::new("Billions ($)").begin_at_zero(),
    );
    spec.ratio = Some(RatioAnnotation {
        label: "Debt/Equity",
        numerator: 0,
        denominator: 1,
    });
    spec
}

pub fn market_cap_chart(labels: &[String], market_cap: &[Option<f64>], theme: &Theme) -> ChartSpec {
    ChartSpec::new(
        "Market Cap",
        labels.to_vec(),
        vec![Dataset::line(
            "Market Cap (Billions)",
            market_cap.to_vec(),
            theme.accent_magenta,
            ValueFormat::Currency(Unit::Billions),
        )
        .filled()],
        Axis::new("Billions ($)").begin_at_zero(),
    )
}

pub fn shares_outstanding_chart(
    labels: &[String],
    shares_outstanding: &[Option<f64>],
    theme: &Theme,
) -> ChartSpec {
    ChartSpec::new(
        "Shares Outstanding",
        labels.to_vec(),
        vec![Dataset::line(
            "Shares Outstanding (M)",
            shares_outstanding.to_vec(),
            theme.accent_blue,
            ValueFormat::Count(Unit::Millions),
        )
        .filled()],
        Axis::new("Millions").begin_at_zero(),
    )
}

pub fn float_chart(labels: &[String], float_shares: &[Option<f64>], theme: &Theme) -> ChartSpec {
    ChartSpec::new(
        "Float",
        labels.to_vec(),
        vec![Dataset::line(
            "Float (Millions)",
            float_shares.to_vec(),
            theme.accent_red,
            ValueFormat::Count(Unit::Millions),
        )
        .filled()],
        Axis::new("Millions").begin_at_zero(),
    )
}

pub fn buyback_chart(labels: &[String], buyback_value: &[Option<f64>], theme: &Theme) -> ChartSpec {
    ChartSpec::new(
        "Shares Bought Back",
        labels.to_vec(),
        vec![Dataset::line(
            "Shares Bought Back (M$)",
            buyback_value.to_vec(),
            theme.accent_orange,
            ValueFormat::Currency(Unit::Millions),
        )
        .filled()],
        Axis::new("Millions").begin_at_zero(),
    )
}
