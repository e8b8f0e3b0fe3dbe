use std::fmt::Write;

/// Magnitude a series was scaled down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Billions,
    Millions,
}

impl Unit {
    fn suffix(&self) -> &'static str {
        match self {
            Unit::Billions => "B",
            Unit::Millions => "M",
        }
    }
}

/// The shared numeric formatting contract: every chart renders values
/// through one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Dollar magnitude, e.g. `$12.34B`.
    Currency(Unit),
    /// Non-dollar magnitude, e.g. `12.34M` shares.
    Count(Unit),
    /// `12.34%`.
    Percent,
    /// Per-share dollar value, plain `1.58`.
    PerShare,
    /// Unscaled value with thousands separators (prices, volume).
    Raw,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Currency(unit) => format!("${value:.2}{}", unit.suffix()),
            ValueFormat::Count(unit) => format!("{value:.2}{}", unit.suffix()),
            ValueFormat::Percent => format!("{value:.2}%"),
            ValueFormat::PerShare => format!("{value:.2}"),
            ValueFormat::Raw => group_thousands(value),
        }
    }
}

/// `1234567.5` -> `1,234,567.50`; whole numbers drop the fraction.
fn group_thousands(value: f64) -> String {
    // Round to hundredths before splitting, so a fraction of .995 or more
    // carries into the whole part instead of printing as ".100".
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if value < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 0 {
        let _ = write!(out, ".{frac:02}");
    }
    out
}
