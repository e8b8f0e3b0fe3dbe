use crate::spec::{AxisScale, ChartSpec};

/// A live chart: its spec plus layout state. Instances are created once at
/// startup and live for the session; data is swapped in place, never by
/// rebuilding the chart.
#[derive(Debug, Clone)]
pub struct ChartInstance {
    spec: ChartSpec,
    layout_epoch: u64,
}

impl ChartInstance {
    pub fn new(spec: ChartSpec) -> Self {
        Self {
            spec,
            layout_epoch: 0,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn spec_mut(&mut self) -> &mut ChartSpec {
        &mut self.spec
    }

    /// Invalidate the cached layout so the renderer recomputes it on the
    /// next draw. Safe to call any number of times, including when the
    /// instance is already correctly sized.
    pub fn resize(&mut self) {
        self.layout_epoch += 1;
    }

    /// Renderers compare this against their cached value to decide whether
    /// to re-lay-out.
    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    /// Swap labels and per-dataset data in place. `data` entries pair with
    /// datasets positionally; a count mismatch leaves the chart unchanged.
    pub fn replace_data(&mut self, labels: Vec<String>, data: Vec<Vec<Option<f64>>>) {
        if data.len() != self.spec.datasets.len() {
            tracing::warn!(
                chart = %self.spec.title,
                expected = self.spec.datasets.len(),
                got = data.len(),
                "replace_data dataset count mismatch, ignoring"
            );
            return;
        }
        self.spec.labels = labels;
        for (ds, values) in self.spec.datasets.iter_mut().zip(data) {
            ds.data = values;
        }
    }

    /// Flip the left axis between linear and logarithmic.
    pub fn toggle_log_scale(&mut self) {
        self.spec.left_axis.scale = match self.spec.left_axis.scale {
            AxisScale::Linear => AxisScale::Logarithmic,
            AxisScale::Logarithmic => AxisScale::Linear,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ValueFormat;
    use crate::spec::{Axis, Dataset};
    use crate::theme::Theme;

    fn instance() -> ChartInstance {
        let theme = Theme::default();
        ChartInstance::new(ChartSpec::new(
            "Test",
            vec!["a".to_string()],
            vec![Dataset::line(
                "Series",
                vec![Some(1.0)],
                theme.accent_blue,
                ValueFormat::Raw,
            )],
            Axis::new("y"),
        ))
    }

    #[test]
    fn resize_bumps_epoch() {
        let mut chart = instance();
        assert_eq!(chart.layout_epoch(), 0);
        chart.resize();
        chart.resize();
        assert_eq!(chart.layout_epoch(), 2);
    }

    #[test]
    fn replace_data_swaps_in_place() {
        let mut chart = instance();
        chart.replace_data(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Some(1.0), Some(2.0)]],
        );
        assert_eq!(chart.spec().labels.len(), 2);
        assert_eq!(chart.spec().datasets[0].data, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn replace_data_rejects_count_mismatch() {
        let mut chart = instance();
        chart.replace_data(vec!["b".to_string()], vec![vec![Some(2.0)], vec![Some(3.0)]]);
        assert_eq!(chart.spec().labels, vec!["a"]);
    }

    #[test]
    fn log_scale_toggles_back_and_forth() {
        let mut chart = instance();
        assert_eq!(chart.spec().left_axis.scale, AxisScale::Linear);
        chart.toggle_log_scale();
        assert_eq!(chart.spec().left_axis.scale, AxisScale::Logarithmic);
        chart.toggle_log_scale();
        assert_eq!(chart.spec().left_axis.scale, AxisScale::Linear);
    }
}
