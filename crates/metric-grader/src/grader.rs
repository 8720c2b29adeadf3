use grading_core::{slots, BigFiveMetric, Category, DisplaySurface, FundamentalsPayload, GradingError, Horizon};
use serde::Serialize;

use crate::normalizer::{format_grouped, normalize, normalize_big_five, NumberFormat, PLACEHOLDER};
use crate::rules::{self, Cell};
use crate::thresholds::ThresholdTable;

/// Page title prefix; the graded ticker is appended as `"<base> - AAPL"`.
pub const TITLE_BASE: &str = "Is This Stock Good?";

/// One display-slot write. `None` leaves that part of the slot untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotUpdate {
    pub slot: String,
    pub text: Option<String>,
    pub color: Option<Category>,
}

impl SlotUpdate {
    fn text(slot: &str, text: impl Into<String>) -> Self {
        Self {
            slot: slot.to_string(),
            text: Some(text.into()),
            color: None,
        }
    }

    fn cell(slot: &str, cell: Cell) -> Self {
        Self {
            slot: slot.to_string(),
            text: Some(cell.text),
            color: cell.color,
        }
    }

    fn colored(slot: &str, text: impl Into<String>, color: Category) -> Self {
        Self {
            slot: slot.to_string(),
            text: Some(text.into()),
            color: Some(color),
        }
    }
}

/// Everything one payload renders to, in write order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradeSheet {
    pub ticker: Option<String>,
    pub title: Option<String>,
    pub updates: Vec<SlotUpdate>,
}

impl GradeSheet {
    pub fn get(&self, slot: &str) -> Option<&SlotUpdate> {
        self.updates.iter().rev().find(|u| u.slot == slot)
    }

    pub fn color(&self, slot: &str) -> Option<Category> {
        self.get(slot).and_then(|u| u.color)
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.get(slot).and_then(|u| u.text.as_deref())
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Replay the sheet onto a display surface: text first, then color, per slot.
    pub fn apply<S: DisplaySurface + ?Sized>(&self, surface: &mut S) {
        if let Some(title) = &self.title {
            surface.set_title(title);
        }
        for update in &self.updates {
            if let Some(text) = &update.text {
                surface.write_text(&update.slot, text);
            }
            if let Some(color) = update.color {
                surface.write_color(&update.slot, color);
            }
        }
    }

    fn push(&mut self, update: SlotUpdate) {
        tracing::debug!(
            "{} -> {:?} ({})",
            update.slot,
            update.text.as_deref().unwrap_or(""),
            update.color.map(|c| c.as_str()).unwrap_or("unstyled")
        );
        self.updates.push(update);
    }
}

/// Grades fundamentals payloads against a fixed threshold table.
///
/// Grading is a pure function of the payload and the table, so one grader
/// can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct MetricGrader {
    thresholds: ThresholdTable,
}

impl MetricGrader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Grade a payload into slot writes. A payload `error` short-circuits
    /// everything and comes back as `GradingError::Payload`.
    pub fn grade(&self, payload: &FundamentalsPayload) -> Result<GradeSheet, GradingError> {
        if let Some(message) = payload.error() {
            tracing::warn!("Payload reported an error: {}", message);
            return Err(GradingError::Payload(message));
        }

        let mut sheet = GradeSheet {
            ticker: payload.ticker().map(|t| t.to_uppercase()),
            ..GradeSheet::default()
        };
        sheet.title = sheet
            .ticker
            .as_ref()
            .map(|t| format!("{} - {}", TITLE_BASE, t));

        if let Some(description) = payload.description() {
            sheet.push(SlotUpdate::text(slots::MEANING, description));
        }

        self.grade_big_five(payload, &mut sheet);
        self.grade_management(payload, &mut sheet);
        self.grade_valuation(payload, &mut sheet);
        self.grade_liquidity(payload, &mut sheet);

        tracing::info!(
            "Graded {} ({} slot updates)",
            sheet.ticker.as_deref().unwrap_or("<unknown>"),
            sheet.len()
        );
        Ok(sheet)
    }

    /// Grade and write to `surface`. On a payload error the message is
    /// surfaced and no slot is touched.
    pub fn present<S: DisplaySurface + ?Sized>(
        &self,
        payload: &FundamentalsPayload,
        surface: &mut S,
    ) -> Result<GradeSheet, GradingError> {
        match self.grade(payload) {
            Ok(sheet) => {
                sheet.apply(surface);
                Ok(sheet)
            }
            Err(e) => {
                surface.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    fn grade_big_five(&self, payload: &FundamentalsPayload, sheet: &mut GradeSheet) {
        for metric in BigFiveMetric::ALL {
            let cells = normalize_big_five(payload, metric);
            for horizon in Horizon::ALL {
                let cell = cells[horizon.index()];
                let color = rules::big_five_cell(horizon.index(), cell, &self.thresholds);
                sheet.push(SlotUpdate::colored(&metric.slot(horizon), cell.text(), color));
            }
        }
    }

    fn grade_management(&self, payload: &FundamentalsPayload, sheet: &mut GradeSheet) {
        let debt_equity = normalize(payload, slots::DEBT_EQUITY_RATIO, NumberFormat::Grouped);
        sheet.push(SlotUpdate::cell(
            slots::DEBT_EQUITY_RATIO,
            rules::debt_equity(&debt_equity, &self.thresholds),
        ));

        let debt_key = if payload.scalar(slots::TOTAL_DEBT).is_none()
            && payload.scalar(slots::LONG_TERM_DEBT).is_some()
        {
            slots::LONG_TERM_DEBT
        } else {
            slots::TOTAL_DEBT
        };
        let total_debt = normalize(payload, debt_key, NumberFormat::Grouped);
        sheet.push(SlotUpdate::text(slots::TOTAL_DEBT, total_debt.text()));

        let free_cash_flow = normalize(payload, slots::FREE_CASH_FLOW, NumberFormat::Grouped);
        sheet.push(SlotUpdate::text(slots::FREE_CASH_FLOW, free_cash_flow.text()));

        let payoff = normalize(payload, slots::DEBT_PAYOFF_TIME, NumberFormat::Fixed2);
        sheet.push(SlotUpdate::cell(
            slots::DEBT_PAYOFF_TIME,
            rules::debt_payoff(free_cash_flow.raw(), &payoff, &self.thresholds),
        ));
    }

    fn grade_valuation(&self, payload: &FundamentalsPayload, sheet: &mut GradeSheet) {
        let margin = normalize(payload, slots::MARGIN_OF_SAFETY_PRICE, NumberFormat::Fixed2);
        sheet.push(SlotUpdate::text(slots::MARGIN_OF_SAFETY_PRICE, margin.text()));

        let current = normalize(payload, slots::CURRENT_PRICE, NumberFormat::Fixed2);
        let current_color =
            rules::current_price_vs_margin(margin.raw(), current.raw(), &self.thresholds);
        sheet.push(SlotUpdate::colored(slots::CURRENT_PRICE, current.text(), current_color));

        let sticker = normalize(payload, slots::STICKER_PRICE, NumberFormat::Fixed2);
        sheet.push(SlotUpdate::text(slots::STICKER_PRICE, sticker.text()));

        let payback = normalize(payload, slots::PAYBACK_TIME, NumberFormat::Grouped);
        let payback_color = rules::payback_time(payback.raw(), &self.thresholds);
        sheet.push(SlotUpdate::colored(slots::PAYBACK_TIME, payback.text(), payback_color));

        let ten_cap = normalize(payload, slots::TEN_CAP_PRICE, NumberFormat::Grouped);
        let ten_cap_color = rules::ten_cap(ten_cap.raw(), current.raw());
        sheet.push(SlotUpdate::colored(slots::TEN_CAP_PRICE, ten_cap.text(), ten_cap_color));
    }

    fn grade_liquidity(&self, payload: &FundamentalsPayload, sheet: &mut GradeSheet) {
        let volume = normalize(payload, slots::AVERAGE_VOLUME, NumberFormat::Grouped);
        let current_price = payload.scalar(slots::CURRENT_PRICE);
        let color = rules::liquidity(volume.raw(), current_price, &self.thresholds);
        sheet.push(SlotUpdate::colored(slots::AVERAGE_VOLUME, volume.text(), color));

        let shares = rules::shares_to_hold(volume.raw(), &self.thresholds)
            .map(format_grouped)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        sheet.push(SlotUpdate::text(slots::SHARES_TO_HOLD, shares));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_from_ticker() {
        let payload = FundamentalsPayload::new().with("ticker", json!("msft"));
        let sheet = MetricGrader::new().grade(&payload).unwrap();
        assert_eq!(sheet.ticker.as_deref(), Some("MSFT"));
        assert_eq!(sheet.title.as_deref(), Some("Is This Stock Good? - MSFT"));
    }

    #[test]
    fn test_description_written_to_meaning() {
        let payload = FundamentalsPayload::new().with("description", json!("Makes software."));
        let sheet = MetricGrader::new().grade(&payload).unwrap();
        assert_eq!(sheet.text("meaning"), Some("Makes software."));
        assert_eq!(sheet.color("meaning"), None);
    }

    #[test]
    fn test_every_big_five_slot_is_written() {
        let sheet = MetricGrader::new().grade(&FundamentalsPayload::new()).unwrap();
        for metric in BigFiveMetric::ALL {
            for horizon in Horizon::ALL {
                assert!(sheet.get(&metric.slot(horizon)).is_some());
            }
        }
    }

    #[test]
    fn test_long_term_debt_fallback() {
        let payload = FundamentalsPayload::new().with("long_term_debt", json!(2500000));
        let sheet = MetricGrader::new().grade(&payload).unwrap();
        assert_eq!(sheet.text("total_debt"), Some("2,500,000"));
        assert_eq!(sheet.color("total_debt"), None);
    }

    #[test]
    fn test_unstyled_values() {
        let payload = FundamentalsPayload::new()
            .with("total_debt", json!(1000))
            .with("free_cash_flow", json!(2000))
            .with("sticker_price", json!(80))
            .with("margin_of_safety_price", json!(40));
        let sheet = MetricGrader::new().grade(&payload).unwrap();
        assert_eq!(sheet.text("sticker_price"), Some("80.00"));
        assert_eq!(sheet.text("margin_of_safety_price"), Some("40.00"));
        for slot in ["total_debt", "free_cash_flow", "sticker_price", "margin_of_safety_price"] {
            assert_eq!(sheet.color(slot), None, "{} should be unstyled", slot);
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let mut table = ThresholdTable::default();
        table.min_volume = 100_000.0;
        let grader = MetricGrader::with_thresholds(table);

        let payload = FundamentalsPayload::new()
            .with("current_price", json!(20))
            .with("average_volume", json!(150000));
        let sheet = grader.grade(&payload).unwrap();
        assert_eq!(sheet.color("average_volume"), Some(Category::Green));
    }
}
