//! Clickable control bar shared by both panels.

use algoviz_core::SortAlgorithm;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Something the user asked for, by key or by click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectPanel(usize),
    Sort(SortAlgorithm),
    StopSort,
    ResetArray,
    NextSize,
    PrevSize,
    ToggleMethod,
    StartTraversal,
    ReuseGraph,
    ResetGraph,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
    pub active: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            active: false,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Label plus one cell of padding on each side
    pub fn width(&self) -> u16 {
        self.label.width() as u16 + 2
    }
}

/// Lay buttons out left to right with a one-cell gap.
///
/// Buttons that do not fit are dropped from the end.
pub fn button_rects(area: Rect, buttons: &[Button]) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(buttons.len());
    let mut x = area.x;
    for button in buttons {
        let width = button.width();
        if x + width > area.right() {
            break;
        }
        rects.push(Rect::new(x, area.y, width, area.height.min(1)));
        x += width + 1;
    }
    rects
}

/// The action under a click at (`column`, `row`)
pub fn hit_test(area: Rect, buttons: &[Button], column: u16, row: u16) -> Option<Action> {
    let position = Position::new(column, row);
    button_rects(area, buttons)
        .into_iter()
        .zip(buttons)
        .find(|(rect, _)| rect.contains(position))
        .map(|(_, button)| button.action)
}

pub struct ControlBar<'a> {
    buttons: &'a [Button],
}

impl<'a> ControlBar<'a> {
    pub fn new(buttons: &'a [Button]) -> Self {
        Self { buttons }
    }
}

impl Widget for ControlBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for (rect, button) in button_rects(area, self.buttons).into_iter().zip(self.buttons) {
            let style = if button.active {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };
            buf.set_style(rect, style);
            buf.set_string(rect.x + 1, rect.y, &button.label, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bar() -> Vec<Button> {
        vec![
            Button::new("Size 10", Action::NextSize),
            Button::new("Bubble", Action::Sort(SortAlgorithm::Bubble)).active(true),
            Button::new("Stop", Action::StopSort),
        ]
    }

    #[test]
    fn rects_are_padded_and_spaced() {
        let rects = button_rects(Rect::new(1, 5, 80, 1), &bar());
        assert_eq!(
            rects,
            vec![
                Rect::new(1, 5, 9, 1),
                Rect::new(11, 5, 8, 1),
                Rect::new(20, 5, 6, 1),
            ]
        );
    }

    #[test]
    fn overflowing_buttons_are_dropped() {
        let rects = button_rects(Rect::new(0, 0, 17, 1), &bar());
        assert_eq!(rects.len(), 1);
    }

    #[test]
    fn clicks_resolve_to_actions() {
        let area = Rect::new(0, 0, 80, 1);
        let buttons = bar();
        assert_eq!(hit_test(area, &buttons, 0, 0), Some(Action::NextSize));
        assert_eq!(hit_test(area, &buttons, 12, 0), Some(Action::Sort(SortAlgorithm::Bubble)));
        // the gap between buttons
        assert_eq!(hit_test(area, &buttons, 9, 0), None);
        assert_eq!(hit_test(area, &buttons, 12, 1), None);
    }

    #[test]
    fn active_button_is_highlighted() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        ControlBar::new(&bar()).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "S");
        assert_eq!(buf[(11, 0)].symbol(), "B");
        assert_eq!(buf[(11, 0)].bg, Color::Yellow);
        assert_eq!(buf[(1, 0)].bg, Color::DarkGray);
    }
}
