//! In-memory display surface.

use std::collections::BTreeMap;

use grading_core::{Category, DisplaySurface};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotState {
    pub text: Option<String>,
    pub color: Option<Category>,
}

/// Records every slot write; later writes overwrite earlier ones, and slots
/// that are never written keep whatever they held before.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlotBoard {
    slots: BTreeMap<String, SlotState>,
    title: Option<String>,
    errors: Vec<String>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: &str) -> Option<&SlotState> {
        self.slots.get(slot)
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.text.as_deref())
    }

    pub fn color(&self, slot: &str) -> Option<Category> {
        self.slots.get(slot).and_then(|s| s.color)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Slots in id order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &SlotState)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl DisplaySurface for SlotBoard {
    fn write_text(&mut self, slot: &str, text: &str) {
        self.slots.entry(slot.to_string()).or_default().text = Some(text.to_string());
    }

    fn write_color(&mut self, slot: &str, category: Category) {
        self.slots.entry(slot.to_string()).or_default().color = Some(category);
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_overwrite() {
        let mut board = SlotBoard::new();
        board.write_text("current_price", "45.00");
        board.write_color("current_price", Category::Red);
        board.write_color("current_price", Category::Green);

        assert_eq!(board.text("current_price"), Some("45.00"));
        assert_eq!(board.color("current_price"), Some(Category::Green));
        assert_eq!(board.color("ten_cap_price"), None);
    }

    #[test]
    fn test_text_only_write_keeps_prior_color() {
        let mut board = SlotBoard::new();
        board.write_color("total_debt", Category::Orange);
        board.write_text("total_debt", "1,000");
        assert_eq!(board.color("total_debt"), Some(Category::Orange));
    }

    #[test]
    fn test_errors_and_title() {
        let mut board = SlotBoard::new();
        board.show_error("Ticker not found");
        board.set_title("Is This Stock Good? - AAPL");
        assert_eq!(board.errors(), ["Ticker not found".to_string()]);
        assert_eq!(board.title(), Some("Is This Stock Good? - AAPL"));
        assert!(board.is_empty());
    }
}
