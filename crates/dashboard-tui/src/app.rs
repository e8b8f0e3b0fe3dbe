use std::time::Instant;

use chart_model::{
    apply_price_bundle, asset_breakdown_chart, buyback_chart, debt_equity_chart, earnings_chart,
    eps_chart, float_chart, liability_breakdown_chart, market_cap_chart, operating_profit_chart,
    price_volume_chart, shares_outstanding_chart, ChartInstance, Theme,
};
use chrono::NaiveDate;
use dashboard_core::{filter_prices, PreparedFinancials, PriceRange, PriceRecord};
use search_index::{PanelAction, SearchIndex, SearchOptions, SearchPanel};
use tab_coordinator::{ChartGroup, Panel, TabCoordinator};

use crate::data::DataDir;

/// Whether keystrokes edit the search box or drive the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dashboard,
    Search,
}

/// The dashboard context: prepared data, the chart groups inside their
/// coordinator, and the search panel. Owns all mutable UI state; event
/// handlers go through it rather than through globals.
pub struct App {
    pub active: bool,
    pub symbol: String,
    pub theme: Theme,
    pub range: PriceRange,
    pub coordinator: TabCoordinator,
    pub search: SearchPanel,
    pub focus: Focus,
    /// Hovered label index for the tooltip line.
    pub cursor: usize,
    data: DataDir,
    prices: Vec<PriceRecord>,
    reference: NaiveDate,
}

impl App {
    pub fn new(symbol: &str, data: DataDir, now: Instant) -> Self {
        let search = SearchPanel::new(SearchIndex::new(
            data.load_symbols(),
            SearchOptions::default(),
        ));
        let mut app = Self {
            active: true,
            symbol: String::new(),
            theme: Theme::default(),
            range: PriceRange::All,
            coordinator: TabCoordinator::new(Vec::new(), now),
            search,
            focus: Focus::Dashboard,
            cursor: 0,
            data,
            prices: Vec::new(),
            reference: today(),
        };
        app.navigate(symbol, now);
        app
    }

    /// Load a symbol's data and rebuild the dashboard around it.
    pub fn navigate(&mut self, symbol: &str, now: Instant) {
        let symbol = symbol.trim().to_uppercase();
        tracing::info!(%symbol, "loading dashboard");

        self.prices = self.data.load_prices(&symbol);
        let financials = PreparedFinancials::prepare(self.data.load_financials(&symbol));
        self.reference = self
            .prices
            .iter()
            .map(|rec| rec.date)
            .max()
            .unwrap_or_else(today);
        self.range = PriceRange::All;
        self.cursor = 0;
        self.symbol = symbol;
        self.coordinator =
            build_coordinator(&self.prices, &financials, self.range, self.reference, &self.theme, now);
    }

    pub fn quit(&mut self) {
        self.active = false;
    }

    /// Drive both host-polled timers.
    pub fn tick(&mut self, now: Instant) {
        self.coordinator.poll(now);
        let was_visible = self.search.visible();
        self.search.poll(now);
        if was_visible != self.search.visible() {
            // Panel appearing or disappearing changes the layout under
            // the charts.
            self.coordinator.window_resized();
        }
    }

    /// Swap a new trailing window into the price chart, re-deriving its
    /// axis bounds.
    pub fn set_range(&mut self, range: PriceRange) {
        self.range = range;
        let bundle = filter_prices(&self.prices, range, self.reference);
        if let Some(chart) = self.coordinator.chart_mut(Panel::PriceVolume, 0) {
            apply_price_bundle(chart, &bundle);
        }
        self.clamp_cursor();
    }

    pub fn toggle_log_scale(&mut self) {
        if let Some(chart) = self.coordinator.chart_mut(Panel::PriceVolume, 0) {
            chart.toggle_log_scale();
        }
    }

    pub fn move_cursor(&mut self, delta: i64) {
        let len = self.cursor_span();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let pos = self.cursor as i64 + delta;
        self.cursor = pos.clamp(0, len as i64 - 1) as usize;
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.cursor_span();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Label count of the active panel's first chart.
    fn cursor_span(&self) -> usize {
        self.coordinator
            .active_group()
            .and_then(|group| group.charts.first())
            .map(|chart| chart.spec().labels.len())
            .unwrap_or(0)
    }

    /// Forward Enter from the search panel; a navigation rebuilds the
    /// dashboard.
    pub fn search_enter(&mut self, now: Instant) {
        if let PanelAction::Navigate(symbol) = self.search.enter() {
            self.focus = Focus::Dashboard;
            self.navigate(&symbol, now);
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn build_coordinator(
    prices: &[PriceRecord],
    financials: &PreparedFinancials,
    range: PriceRange,
    reference: NaiveDate,
    theme: &Theme,
    now: Instant,
) -> TabCoordinator {
    let mut groups = Vec::new();

    let bundle = filter_prices(prices, range, reference);
    groups.push(ChartGroup::new(
        Panel::PriceVolume,
        vec![ChartInstance::new(price_volume_chart(&bundle, theme))],
    ));

    // Financial panels exist only when there is financial data.
    if !financials.is_empty() {
        let labels = &financials.labels;
        groups.push(ChartGroup::new(
            Panel::Earnings,
            vec![
                ChartInstance::new(earnings_chart(
                    labels,
                    &financials.revenue,
                    &financials.earnings,
                    &financials.accumulated_earnings,
                    theme,
                )),
                ChartInstance::new(operating_profit_chart(
                    labels,
                    &financials.gross_profit,
                    &financials.operating_income,
                    &financials.earnings,
                    theme,
                )),
                ChartInstance::new(eps_chart(labels, &financials.eps, theme)),
            ],
        ));
        groups.push(ChartGroup::new(
            Panel::DebtEquity,
            vec![ChartInstance::new(debt_equity_chart(
                labels,
                &financials.debt,
                &financials.equity,
                &financials.assets,
                theme,
            ))],
        ));
        groups.push(ChartGroup::new(
            Panel::MarketMechanics,
            vec![
                ChartInstance::new(market_cap_chart(labels, &financials.market_cap, theme)),
                ChartInstance::new(shares_outstanding_chart(
                    labels,
                    &financials.shares_outstanding,
                    theme,
                )),
                ChartInstance::new(float_chart(labels, &financials.float_shares, theme)),
                ChartInstance::new(buyback_chart(labels, &financials.buyback_value, theme)),
            ],
        ));
        groups.push(ChartGroup::new(
            Panel::BalanceSheet,
            vec![
                ChartInstance::new(asset_breakdown_chart(
                    labels,
                    &financials.asset_components,
                    theme,
                )),
                ChartInstance::new(liability_breakdown_chart(
                    labels,
                    &financials.liability_components,
                    theme,
                )),
            ],
        ));
    }

    TabCoordinator::new(groups, now)
}
