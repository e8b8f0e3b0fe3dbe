//! Tab switching for the dashboard's chart panels.
//!
//! The coordinator owns the per-tab chart groups and is the only place the
//! active tab index is mutated. Every transition keeps the container
//! visibility states, the tab button states, and the controls-bar rule
//! consistent, and defers the newly active group's resize until layout has
//! settled. Timers are host-polled: the event loop calls [`TabCoordinator::poll`]
//! with the current instant.

use std::time::{Duration, Instant};

use chart_model::ChartInstance;

/// Delay between a tab switch and the resize of its charts. Resizing a
/// chart that is still mid-layout produces wrong sizes.
pub const RESIZE_SETTLE: Duration = Duration::from_millis(50);
/// Delay for the one-time resize pass after startup.
pub const LOAD_SETTLE: Duration = Duration::from_millis(100);

/// The dashboard's chart panels, in tab order. Panels whose data is absent
/// are simply not registered, so tab indices are contiguous over whatever
/// is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    PriceVolume,
    Earnings,
    DebtEquity,
    MarketMechanics,
    BalanceSheet,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::PriceVolume => "Price & Volume",
            Panel::Earnings => "Earnings",
            Panel::DebtEquity => "Debt & Equity",
            Panel::MarketMechanics => "Market Mechanics",
            Panel::BalanceSheet => "Balance Sheet",
        }
    }
}

/// Chart instances that resize together when their tab activates.
pub struct ChartGroup {
    pub panel: Panel,
    pub charts: Vec<ChartInstance>,
}

impl ChartGroup {
    pub fn new(panel: Panel, charts: Vec<ChartInstance>) -> Self {
        Self { panel, charts }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Active,
    Hidden,
}

/// Passed to transition listeners after the coordinator's state is
/// consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

pub type TransitionListener = Box<dyn FnMut(Transition)>;

enum PendingResize {
    Group(usize),
    All,
}

pub struct TabCoordinator {
    groups: Vec<ChartGroup>,
    active: usize,
    pending: Option<(Instant, PendingResize)>,
    listeners: Vec<TransitionListener>,
}

impl TabCoordinator {
    /// Start at tab 0 and schedule the load-settle resize pass over every
    /// group.
    pub fn new(groups: Vec<ChartGroup>, now: Instant) -> Self {
        let pending = if groups.is_empty() {
            None
        } else {
            Some((now + LOAD_SETTLE, PendingResize::All))
        };
        Self {
            groups,
            active: 0,
            pending,
            listeners: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_group(&self) -> Option<&ChartGroup> {
        self.groups.get(self.active)
    }

    pub fn groups(&self) -> &[ChartGroup] {
        &self.groups
    }

    /// Tab position of a panel, if that panel was registered.
    pub fn panel_index(&self, panel: Panel) -> Option<usize> {
        self.groups.iter().position(|g| g.panel == panel)
    }

    /// Mutable access to one chart, for data swaps on range changes.
    pub fn chart_mut(&mut self, panel: Panel, chart: usize) -> Option<&mut ChartInstance> {
        let index = self.panel_index(panel)?;
        self.groups[index].charts.get_mut(chart)
    }

    /// Exactly one container is `Active`; every other is `Hidden`.
    pub fn visibility(&self, index: usize) -> Visibility {
        if index == self.active {
            Visibility::Active
        } else {
            Visibility::Hidden
        }
    }

    /// The range-selector controls bar shows only on the price/volume tab.
    pub fn controls_bar_visible(&self) -> bool {
        self.active_group()
            .map(|g| g.panel == Panel::PriceVolume)
            .unwrap_or(false)
    }

    pub fn on_transition(&mut self, listener: TransitionListener) {
        self.listeners.push(listener);
    }

    /// Switch to `index`. Out-of-range indices are ignored. The new
    /// group's resize is deferred by [`RESIZE_SETTLE`]; a pending deferred
    /// resize is replaced, so rapid switches coalesce into one.
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if index >= self.groups.len() {
            tracing::warn!(index, tabs = self.groups.len(), "tab index out of range, ignoring");
            return;
        }
        let from = self.active;
        self.active = index;
        self.pending = Some((now + RESIZE_SETTLE, PendingResize::Group(index)));

        let transition = Transition { from, to: index };
        for listener in &mut self.listeners {
            listener(transition);
        }
    }

    pub fn next(&mut self, now: Instant) {
        if !self.groups.is_empty() {
            self.go_to((self.active + 1) % self.groups.len(), now);
        }
    }

    pub fn prev(&mut self, now: Instant) {
        if !self.groups.is_empty() {
            let n = self.groups.len();
            self.go_to((self.active + n - 1) % n, now);
        }
    }

    /// Fire the deferred resize if its deadline has passed. A stale fire
    /// (scheduled before an even newer switch replaced it) cannot happen
    /// through this API, and resizing a hidden group would be redundant
    /// but harmless anyway.
    pub fn poll(&mut self, now: Instant) {
        let due = matches!(&self.pending, Some((deadline, _)) if *deadline <= now);
        if !due {
            return;
        }
        let Some((_, pending)) = self.pending.take() else {
            return;
        };
        match pending {
            PendingResize::Group(index) => {
                if let Some(group) = self.groups.get_mut(index) {
                    for chart in &mut group.charts {
                        chart.resize();
                    }
                }
            }
            PendingResize::All => self.resize_all(),
        }
    }

    /// Full-window resize: every registered chart in every group, active
    /// or not. A window resize invalidates every chart's layout, not just
    /// the visible ones.
    pub fn window_resized(&mut self) {
        self.resize_all();
    }

    fn resize_all(&mut self) {
        for group in &mut self.groups {
            for chart in &mut group.charts {
                chart.resize();
            }
        }
    }
}
