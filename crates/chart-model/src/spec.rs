use crate::format::ValueFormat;
use crate::theme::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Line,
    Bar,
}

/// Which y-axis a dataset plots against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSlot {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Logarithmic,
}

/// One plotted series with its styling.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub kind: DatasetKind,
    pub color: Rgb,
    pub fill: bool,
    pub dashed: bool,
    /// Hidden datasets are skipped by the renderer and the tooltip but
    /// keep their slot so `replace_data` indices stay stable.
    pub hidden: bool,
    pub axis: AxisSlot,
    pub format: ValueFormat,
}

impl Dataset {
    pub fn line(label: &str, data: Vec<Option<f64>>, color: Rgb, format: ValueFormat) -> Self {
        Self {
            label: label.to_string(),
            data,
            kind: DatasetKind::Line,
            color,
            fill: false,
            dashed: false,
            hidden: false,
            axis: AxisSlot::Left,
            format,
        }
    }

    pub fn bar(label: &str, data: Vec<Option<f64>>, color: Rgb, format: ValueFormat) -> Self {
        Self {
            kind: DatasetKind::Bar,
            ..Self::line(label, data, color, format)
        }
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn on_axis(mut self, axis: AxisSlot) -> Self {
        self.axis = axis;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Axis {
    pub title: String,
    pub scale: AxisScale,
    pub begin_at_zero: bool,
    /// Soft bounds: the renderer may widen them to fit data.
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
    /// Hard upper bound (volume axis headroom rule).
    pub max: Option<f64>,
}

impl Axis {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            scale: AxisScale::Linear,
            begin_at_zero: false,
            suggested_min: None,
            suggested_max: None,
            max: None,
        }
    }

    pub fn begin_at_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }
}

/// Ratio line appended to two datasets' tooltip rows (debt/equity).
#[derive(Debug, Clone)]
pub struct RatioAnnotation {
    pub label: &'static str,
    pub numerator: usize,
    pub denominator: usize,
}

/// Index-mode tooltip content for one hovered label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
    pub footer: Option<String>,
}

/// A fully configured chart: everything the renderer needs, nothing it
/// supplies itself. Reduced to the parts the eleven charts actually vary.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub left_axis: Axis,
    pub right_axis: Option<Axis>,
    /// Stacked bar chart: datasets accumulate and the tooltip sums them.
    pub stacked: bool,
    /// Draw a dashed marker line at y = 0.
    pub zero_line: bool,
    pub ratio: Option<RatioAnnotation>,
}

impl ChartSpec {
    pub fn new(title: &str, labels: Vec<String>, datasets: Vec<Dataset>, left_axis: Axis) -> Self {
        Self {
            title: title.to_string(),
            labels,
            datasets,
            left_axis,
            right_axis: None,
            stacked: false,
            zero_line: false,
            ratio: None,
        }
    }

    /// Tooltip for the hovered label index, or `None` when out of range.
    ///
    /// Hidden datasets are excluded. Stacked charts add a footer with the
    /// total of all visible component values at the index.
    pub fn tooltip_at(&self, index: usize) -> Option<Tooltip> {
        let title = self.labels.get(index)?.clone();
        let ratio = self.ratio_note_at(index);

        let mut lines = Vec::new();
        for (ds_index, ds) in self.datasets.iter().enumerate() {
            if ds.hidden {
                continue;
            }
            let Some(Some(value)) = ds.data.get(index) else {
                continue;
            };
            let mut line = format!("{}: {}", ds.label, ds.format.format(*value));
            if let (Some(note), Some(ratio)) = (self.ratio.as_ref(), ratio) {
                if ds_index == note.numerator || ds_index == note.denominator {
                    line.push_str(&format!(" ({}: {ratio:.2})", note.label));
                }
            }
            lines.push(line);
        }

        let footer = if self.stacked {
            let sum: f64 = self
                .datasets
                .iter()
                .filter(|ds| !ds.hidden)
                .filter_map(|ds| ds.data.get(index).copied().flatten())
                .sum();
            let format = self
                .datasets
                .first()
                .map(|ds| ds.format)
                .unwrap_or(ValueFormat::Raw);
            Some(format!("Total: {}", format.format(sum)))
        } else {
            None
        };

        Some(Tooltip { title, lines, footer })
    }

    fn ratio_note_at(&self, index: usize) -> Option<f64> {
        let note = self.ratio.as_ref()?;
        let num = (*self.datasets.get(note.numerator)?.data.get(index)?)?;
        let den = (*self.datasets.get(note.denominator)?.data.get(index)?)?;
        if den == 0.0 {
            return None;
        }
        Some(num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Unit;
    use crate::theme::Theme;

    fn labels() -> Vec<String> {
        vec!["2024-03-30".to_string(), "2024-06-29".to_string()]
    }

    #[test]
    fn tooltip_skips_hidden_and_missing() {
        let theme = Theme::default();
        let spec = ChartSpec::new(
            "Test",
            labels(),
            vec![
                Dataset::line(
                    "Revenue (Billions)",
                    vec![Some(90.75), None],
                    theme.accent_blue,
                    ValueFormat::Currency(Unit::Billions),
                ),
                Dataset::line(
                    "Ghost",
                    vec![Some(1.0), Some(2.0)],
                    theme.text_muted,
                    ValueFormat::Raw,
                )
                .hidden(),
            ],
            Axis::new("Billions"),
        );

        let tip = spec.tooltip_at(0).unwrap();
        assert_eq!(tip.title, "2024-03-30");
        assert_eq!(tip.lines, vec!["Revenue (Billions): $90.75B"]);
        assert!(tip.footer.is_none());

        // Index 1 has no visible value at all.
        assert!(spec.tooltip_at(1).unwrap().lines.is_empty());
        assert!(spec.tooltip_at(2).is_none());
    }

    #[test]
    fn stacked_footer_sums_visible_components() {
        let theme = Theme::default();
        let mut spec = ChartSpec::new(
            "Asset Breakdown",
            labels(),
            vec![
                Dataset::bar(
                    "Cash",
                    vec![Some(30.0), Some(28.17)],
                    theme.asset_palette[0],
                    ValueFormat::Currency(Unit::Billions),
                ),
                Dataset::bar(
                    "Inventory",
                    vec![Some(6.33), Some(7.29)],
                    theme.asset_palette[5],
                    ValueFormat::Currency(Unit::Billions),
                ),
            ],
            Axis::new("Billions ($)"),
        );
        spec.stacked = true;

        let tip = spec.tooltip_at(1).unwrap();
        assert_eq!(tip.lines.len(), 2);
        assert_eq!(tip.footer.as_deref(), Some("Total: $35.46B"));
    }

    #[test]
    fn ratio_annotation_only_when_denominator_nonzero() {
        let theme = Theme::default();
        let mut spec = ChartSpec::new(
            "Debt & Equity Metrics",
            labels(),
            vec![
                Dataset::line(
                    "Debt (Billions)",
                    vec![Some(104.0), Some(108.0)],
                    theme.accent_red,
                    ValueFormat::Currency(Unit::Billions),
                ),
                Dataset::line(
                    "Equity (Billions)",
                    vec![Some(52.0), Some(0.0)],
                    theme.accent_blue,
                    ValueFormat::Currency(Unit::Billions),
                ),
            ],
            Axis::new("Billions ($)"),
        );
        spec.ratio = Some(RatioAnnotation {
            label: "Debt/Equity",
            numerator: 0,
            denominator: 1,
        });

        let tip = spec.tooltip_at(0).unwrap();
        assert_eq!(tip.lines[0], "Debt (Billions): $104.00B (Debt/Equity: 2.00)");
        assert_eq!(tip.lines[1], "Equity (Billions): $52.00B (Debt/Equity: 2.00)");

        // Zero equity: plain rows, no ratio.
        let tip = spec.tooltip_at(1).unwrap();
        assert_eq!(tip.lines[0], "Debt (Billions): $108.00B");
        assert_eq!(tip.lines[1], "Equity (Billions): $0.00B");
    }
}
