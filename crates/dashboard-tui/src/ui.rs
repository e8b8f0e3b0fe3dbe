use chart_model::{AxisScale, ChartInstance, ChartSpec, DatasetKind, Rgb};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis as ChartAxis, Bar, BarChart, BarGroup, Block, Chart, Clear, Dataset as ChartDataset,
        GraphType, List, ListItem, Paragraph, Sparkline, Tabs,
    },
    Frame,
};
use search_index::{highlight_segments, MatchField, Row, SearchResult};
use dashboard_core::ALL_RANGES;

use crate::app::{App, Focus};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn render(app: &App, frame: &mut Frame) {
    let controls = app.coordinator.controls_bar_visible();
    let mut constraints = vec![Constraint::Length(3)];
    if controls {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(1));
    let areas = Layout::vertical(constraints).split(frame.area());

    render_header(app, frame, areas[0]);
    let mut next = 1;
    if controls {
        render_controls_bar(app, frame, areas[next]);
        next += 1;
    }
    render_active_panel(app, frame, areas[next]);
    render_status_line(app, frame, areas[next + 1]);

    if app.search.visible() || app.focus == Focus::Search {
        render_search_overlay(app, frame);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let [tabs_area, symbol_area] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(12)]).areas(area);

    let titles: Vec<Line> = app
        .coordinator
        .groups()
        .iter()
        .map(|group| Line::from(group.panel.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.coordinator.active())
        .style(Style::default().fg(color(app.theme.text_muted)))
        .highlight_style(
            Style::default()
                .fg(color(app.theme.foreground))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::bordered());
    frame.render_widget(tabs, tabs_area);

    let symbol = Paragraph::new(app.symbol.as_str())
        .style(
            Style::default()
                .fg(color(app.theme.accent_blue))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::bordered());
    frame.render_widget(symbol, symbol_area);
}

fn render_controls_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled("Range: ", Style::default().fg(color(app.theme.text_muted)))];
    for range in ALL_RANGES {
        let style = if range == app.range {
            Style::default()
                .fg(color(app.theme.accent_magenta))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color(app.theme.text_muted))
        };
        spans.push(Span::styled(range.as_str(), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        " [/] cycle  l: log scale",
        Style::default().fg(color(app.theme.text_muted)),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_active_panel(app: &App, frame: &mut Frame, area: Rect) {
    let Some(group) = app.coordinator.active_group() else {
        let empty = Paragraph::new("No data available")
            .style(Style::default().fg(color(app.theme.text_muted)))
            .block(Block::bordered());
        frame.render_widget(empty, area);
        return;
    };

    let slots = split_panel(area, group.charts.len());
    for (chart, slot) in group.charts.iter().zip(slots) {
        render_chart(app, frame, slot, chart);
    }
}

/// Panel layouts by chart count: single full-bleed, side-by-side pair,
/// main-plus-sidebar triple, and a 2x2 grid.
fn split_panel(area: Rect, charts: usize) -> Vec<Rect> {
    match charts {
        0 | 1 => vec![area],
        2 => {
            let [a, b] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(area);
            vec![a, b]
        }
        3 => {
            let [main, side] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(area);
            let [top, bottom] =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(side);
            vec![main, top, bottom]
        }
        _ => {
            let [top, bottom] =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(area);
            let [a, b] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(top);
            let [c, d] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(bottom);
            vec![a, b, c, d]
        }
    }
}

fn render_chart(app: &App, frame: &mut Frame, area: Rect, chart: &ChartInstance) {
    let spec = chart.spec();
    if spec.stacked {
        render_stacked_chart(app, frame, area, spec);
    } else {
        render_line_chart(app, frame, area, spec);
    }
}

fn render_line_chart(app: &App, frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    // Volume-style bar datasets live on their own axis; give them a strip
    // below the lines instead of mixing scales in one plot.
    let has_bars = spec.datasets.iter().any(|ds| ds.kind == DatasetKind::Bar);
    let (line_area, bar_area) = if has_bars && area.height > 8 {
        let [lines, bars] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(4)]).areas(area);
        (lines, Some(bars))
    } else {
        (area, None)
    };

    let log = spec.left_axis.scale == AxisScale::Logarithmic;
    let y = |v: f64| if log { v.max(1e-9).log10() } else { v };

    let point_sets: Vec<Vec<(f64, f64)>> = spec
        .datasets
        .iter()
        .map(|ds| {
            if ds.hidden || ds.kind == DatasetKind::Bar {
                return Vec::new();
            }
            ds.data
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i as f64, y(v))))
                .collect()
        })
        .collect();

    let mut y_min = spec.left_axis.suggested_min.map(y);
    let mut y_max = spec.left_axis.suggested_max.map(y);
    for (_, v) in point_sets.iter().flatten() {
        y_min = Some(y_min.map_or(*v, |m: f64| m.min(*v)));
        y_max = Some(y_max.map_or(*v, |m: f64| m.max(*v)));
    }
    let y_min = y_min.unwrap_or(0.0).min(if spec.left_axis.begin_at_zero { 0.0 } else { f64::MAX });
    let y_max = y_max.unwrap_or(1.0).max(y_min + 1e-9);

    let datasets: Vec<ChartDataset> = spec
        .datasets
        .iter()
        .zip(&point_sets)
        .filter(|(ds, pts)| !ds.hidden && ds.kind == DatasetKind::Line && !pts.is_empty())
        .map(|(ds, pts)| {
            ChartDataset::default()
                .name(ds.label.clone())
                .marker(if ds.dashed { symbols::Marker::Dot } else { symbols::Marker::Braille })
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color(ds.color)))
                .data(pts)
        })
        .collect();

    let x_max = spec.labels.len().saturating_sub(1).max(1) as f64;
    let x_labels: Vec<Line> = [
        spec.labels.first(),
        spec.labels.get(spec.labels.len() / 2),
        spec.labels.last(),
    ]
    .into_iter()
    .flatten()
    .map(|l| Line::from(l.as_str()))
    .collect();

    let y_title = if log {
        format!("{} (log)", spec.left_axis.title)
    } else {
        spec.left_axis.title.clone()
    };

    let widget = Chart::new(datasets)
        .block(
            Block::bordered()
                .title(spec.title.as_str())
                .style(Style::default().fg(color(app.theme.foreground))),
        )
        .x_axis(
            ChartAxis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(color(app.theme.text_muted))),
        )
        .y_axis(
            ChartAxis::default()
                .title(y_title)
                .bounds([y_min, y_max])
                .labels(vec![
                    Line::from(format!("{y_min:.1}")),
                    Line::from(format!("{y_max:.1}")),
                ])
                .style(Style::default().fg(color(app.theme.text_muted))),
        );
    frame.render_widget(widget, line_area);

    if let Some(bar_area) = bar_area {
        if let Some(volume) = spec
            .datasets
            .iter()
            .find(|ds| ds.kind == DatasetKind::Bar && !ds.hidden)
        {
            let values: Vec<u64> = volume
                .data
                .iter()
                .map(|v| v.unwrap_or(0.0).max(0.0) as u64)
                .collect();
            let spark = Sparkline::default()
                .block(Block::bordered().title(volume.label.as_str()))
                .style(Style::default().fg(color(volume.color)))
                .data(&values);
            frame.render_widget(spark, bar_area);
        }
    }
}

/// Stacked breakdowns render as one bar per period holding the component
/// total; the per-component decomposition lives in the tooltip line.
fn render_stacked_chart(app: &App, frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let bars: Vec<Bar> = spec
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let total: f64 = spec
                .datasets
                .iter()
                .filter(|ds| !ds.hidden)
                .filter_map(|ds| ds.data.get(i).copied().flatten())
                .sum();
            let short = label.get(2..7).unwrap_or(label.as_str());
            Bar::default()
                .value((total.max(0.0) * 100.0) as u64)
                .text_value(format!("{total:.0}"))
                .label(Line::from(short.to_string()))
        })
        .collect();

    let widget = BarChart::default()
        .block(
            Block::bordered()
                .title(spec.title.as_str())
                .style(Style::default().fg(color(app.theme.foreground))),
        )
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(color(app.theme.accent_blue)))
        .value_style(
            Style::default()
                .fg(color(app.theme.background))
                .bg(color(app.theme.accent_blue)),
        )
        .label_style(Style::default().fg(color(app.theme.text_muted)))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(widget, area);
}

fn render_status_line(app: &App, frame: &mut Frame, area: Rect) {
    let tooltip = app
        .coordinator
        .active_group()
        .and_then(|group| group.charts.first())
        .and_then(|chart| chart.spec().tooltip_at(app.cursor));

    let text = match tooltip {
        Some(tip) => {
            let mut parts = vec![tip.title];
            parts.extend(tip.lines);
            if let Some(footer) = tip.footer {
                parts.push(footer);
            }
            parts.join(" | ")
        }
        None => "/ search   <- -> tabs   , . cursor   q quit".to_string(),
    };

    let line = Paragraph::new(text).style(
        Style::default()
            .fg(color(app.theme.foreground))
            .bg(color(app.theme.graph_bg)),
    );
    frame.render_widget(line, area);
}

fn render_search_overlay(app: &App, frame: &mut Frame) {
    let area = centered_rect(frame.area(), 60, 60);
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title("Search")
        .style(Style::default().fg(color(app.theme.foreground)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [query_area, results_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);

    let query = Paragraph::new(format!("> {}", app.search.query())).style(
        Style::default()
            .fg(color(app.theme.accent_blue))
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(query, query_area);

    let highlighted = app.search.highlighted_row();
    let items: Vec<ListItem> = app
        .search
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let item = match row {
                Row::Label(label) => ListItem::new(Line::from(Span::styled(
                    label.clone(),
                    Style::default()
                        .fg(color(app.theme.text_muted))
                        .add_modifier(Modifier::ITALIC),
                ))),
                Row::Result(result) => ListItem::new(result_line(app, result)),
            };
            if highlighted == Some(i) {
                item.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();
    frame.render_widget(List::new(items), results_area);
}

/// `[SYMBOL] Title  industry`, with matched character runs accented.
fn result_line<'a>(app: &App, result: &SearchResult) -> Line<'a> {
    let Some(record) = app.search.record(result) else {
        return Line::from("");
    };

    let accent = Style::default()
        .fg(color(app.theme.accent_blue))
        .add_modifier(Modifier::BOLD);
    let ranges = |field: MatchField| {
        result
            .field_match(field)
            .map(|m| m.ranges.clone())
            .unwrap_or_default()
    };
    let styled = |text: &str, field: MatchField, base: Style| -> Vec<Span<'a>> {
        highlight_segments(text, &ranges(field))
            .into_iter()
            .map(|seg| Span::styled(seg.text, if seg.highlighted { accent } else { base }))
            .collect()
    };

    let mut spans = vec![Span::raw("[")];
    spans.extend(styled(
        &record.symbol,
        MatchField::Symbol,
        Style::default()
            .fg(color(app.theme.foreground))
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("] "));
    spans.extend(styled(
        &record.title,
        MatchField::Title,
        Style::default().fg(color(app.theme.foreground)),
    ));
    if !record.industry.is_empty() {
        spans.push(Span::raw("  "));
        spans.extend(styled(
            &record.industry,
            MatchField::Industry,
            Style::default().fg(color(app.theme.text_muted)),
        ));
    }
    Line::from(spans)
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
