use dashboard_core::BreakdownComponent;

use crate::format::{Unit, ValueFormat};
use crate::spec::{Axis, ChartSpec, Dataset};
use crate::theme::{Rgb, Theme};

fn breakdown_chart(
    title: &str,
    labels: &[String],
    components: &[BreakdownComponent],
    palette: &[Rgb],
) -> ChartSpec {
    let billions = ValueFormat::Currency(Unit::Billions);
    let datasets = components
        .iter()
        .zip(palette.iter().cycle())
        .map(|(comp, color)| Dataset::bar(comp.name, comp.values.clone(), *color, billions))
        .collect();

    let mut spec = ChartSpec::new(
        title,
        labels.to_vec(),
        datasets,
        Axis::new("Billions ($)").begin_at_zero(),
    );
    spec.stacked = true;
    spec
}

/// Stacked decomposition of total assets into its nine components.
pub fn asset_breakdown_chart(
    labels: &[String],
    components: &[BreakdownComponent],
    theme: &Theme,
) -> ChartSpec {
    breakdown_chart("Asset Breakdown", labels, components, &theme.asset_palette)
}

/// Stacked decomposition of total liabilities into its eight components.
pub fn liability_breakdown_chart(
    labels: &[String],
    components: &[BreakdownComponent],
    theme: &Theme,
) -> ChartSpec {
    breakdown_chart("Liability Breakdown", labels, components, &theme.liability_palette)
}
