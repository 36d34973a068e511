use algoviz_core::{Highlight, MAX_VALUE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as Segment},
        Widget,
    },
};

pub const BAR_COLOR: Color = Color::Rgb(255, 105, 180);
pub const CURRENT_COLOR: Color = Color::Red;
pub const NEXT_COLOR: Color = Color::Blue;

/// Bar chart of the array, highlighted cells in red (current) and blue (next)
pub struct ArrayBars<'a> {
    values: &'a [i32],
    highlight: Highlight,
    max_value: i32,
}

impl<'a> ArrayBars<'a> {
    pub fn new(values: &'a [i32]) -> Self {
        Self {
            values,
            highlight: Highlight::NONE,
            max_value: MAX_VALUE,
        }
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn max_value(mut self, max_value: i32) -> Self {
        self.max_value = max_value.max(1);
        self
    }

    fn color_for(&self, index: usize) -> Color {
        if self.highlight.current == Some(index) {
            CURRENT_COLOR
        } else if self.highlight.next == Some(index) {
            NEXT_COLOR
        } else {
            BAR_COLOR
        }
    }

    fn bar_height(&self, value: i32, area: Rect) -> u16 {
        let scaled = i64::from(value.max(0)) * i64::from(area.height) / i64::from(self.max_value);
        (scaled as u16).clamp(1, area.height)
    }

    /// More bars than columns: one Braille dot column per bar, no labels.
    ///
    /// Two neighbouring bars can share a cell and a cell has one colour, so
    /// the next bar is drawn after the plain ones and the current bar last.
    fn render_dense(&self, area: Rect, buf: &mut Buffer) {
        let count = self.values.len();
        let mut order: Vec<usize> = (0..count)
            .filter(|&i| self.highlight.current != Some(i) && self.highlight.next != Some(i))
            .collect();
        order.extend(self.highlight.next.filter(|&i| i < count));
        order.extend(self.highlight.current.filter(|&i| i < count));

        let top = f64::from(self.max_value);
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, count as f64])
            .y_bounds([0.0, top])
            .paint(|ctx| {
                for &i in &order {
                    let x = i as f64 + 0.5;
                    let value = f64::from(self.values[i]).clamp(0.0, top);
                    ctx.draw(&Segment::new(x, 0.0, x, value, self.color_for(i)));
                }
            })
            .render(area, buf);
    }
}

impl Widget for ArrayBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.values.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }
        if self.values.len() > usize::from(area.width) {
            self.render_dense(area, buf);
            return;
        }

        let slot = (area.width / self.values.len() as u16).max(1);
        // leave a one-cell gap between wide bars
        let bar_width = if slot >= 3 { slot - 1 } else { slot };

        for (i, &value) in self.values.iter().enumerate() {
            let x = area.x + i as u16 * slot;
            if x >= area.right() {
                break;
            }
            let width = bar_width.min(area.right() - x);
            let height = self.bar_height(value, area);
            let top = area.bottom() - height;
            let style = Style::default().fg(self.color_for(i));

            for y in top..area.bottom() {
                for dx in 0..width {
                    let cell = &mut buf[(x + dx, y)];
                    cell.set_char('█');
                    cell.set_style(style);
                }
            }

            let label = value.to_string();
            if width >= 3 && width as usize >= label.len() {
                let label_x = x + (width - label.len() as u16) / 2;
                let (label_y, label_style) = if top > area.y {
                    (top - 1, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                } else {
                    (top, Style::default().fg(Color::Black).bg(self.color_for(i)))
                };
                buf.set_string(label_x, label_y, &label, label_style);
            }
        }
    }
}
