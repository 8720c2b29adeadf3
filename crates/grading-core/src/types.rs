use serde::{Deserialize, Serialize};

/// Visual category assigned to a metric cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Green,
    Yellow,
    Orange,
    Red,
    /// Neutral: value not computed or simply unavailable.
    White,
}

impl Category {
    pub fn to_label(&self) -> &'static str {
        match self {
            Category::Green => "good",
            Category::Yellow => "fair",
            Category::Orange => "caution",
            Category::Red => "bad",
            Category::White => "n/a",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Green => "green",
            Category::Yellow => "yellow",
            Category::Orange => "orange",
            Category::Red => "red",
            Category::White => "white",
        }
    }

    pub const ALL: [Category; 5] = [
        Category::Green,
        Category::Yellow,
        Category::Orange,
        Category::Red,
        Category::White,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The "Big Five" growth metrics, each reported over four horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BigFiveMetric {
    Eps,
    Sales,
    Equity,
    Roic,
    Cash,
}

impl BigFiveMetric {
    pub const ALL: [BigFiveMetric; 5] = [
        BigFiveMetric::Eps,
        BigFiveMetric::Sales,
        BigFiveMetric::Equity,
        BigFiveMetric::Roic,
        BigFiveMetric::Cash,
    ];

    /// Payload key for this metric.
    pub fn key(&self) -> &'static str {
        match self {
            BigFiveMetric::Eps => "eps",
            BigFiveMetric::Sales => "sales",
            BigFiveMetric::Equity => "equity",
            BigFiveMetric::Roic => "roic",
            BigFiveMetric::Cash => "cash",
        }
    }

    /// Display slot for one horizon of this metric, e.g. `eps_3_val`.
    pub fn slot(&self, horizon: Horizon) -> String {
        format!("{}{}", self.key(), horizon.suffix())
    }
}

/// Trailing horizon of a Big Five value. Order matches the payload sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    OneYear,
    ThreeYear,
    FiveYear,
    Max,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [
        Horizon::OneYear,
        Horizon::ThreeYear,
        Horizon::FiveYear,
        Horizon::Max,
    ];

    pub fn index(&self) -> usize {
        match self {
            Horizon::OneYear => 0,
            Horizon::ThreeYear => 1,
            Horizon::FiveYear => 2,
            Horizon::Max => 3,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Horizon::OneYear => "_1_val",
            Horizon::ThreeYear => "_3_val",
            Horizon::FiveYear => "_5_val",
            Horizon::Max => "_max_val",
        }
    }
}

/// Slot ids for the scalar metrics.
pub mod slots {
    pub const DEBT_EQUITY_RATIO: &str = "debt_equity_ratio";
    pub const TOTAL_DEBT: &str = "total_debt";
    pub const LONG_TERM_DEBT: &str = "long_term_debt";
    pub const FREE_CASH_FLOW: &str = "free_cash_flow";
    pub const DEBT_PAYOFF_TIME: &str = "debt_payoff_time";
    pub const MARGIN_OF_SAFETY_PRICE: &str = "margin_of_safety_price";
    pub const CURRENT_PRICE: &str = "current_price";
    pub const STICKER_PRICE: &str = "sticker_price";
    pub const PAYBACK_TIME: &str = "payback_time";
    pub const TEN_CAP_PRICE: &str = "ten_cap_price";
    pub const AVERAGE_VOLUME: &str = "average_volume";
    pub const SHARES_TO_HOLD: &str = "shares_to_hold";
    pub const MEANING: &str = "meaning";
}
