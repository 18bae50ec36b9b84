use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::fmt::money;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Transient accent for a freshly added row; cleared on the next keypress.
pub const FRESH_STYLE: Style = Style::new()
    .fg(Color::Rgb(80, 220, 100))
    .add_modifier(Modifier::BOLD);

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);

/// Format an amount as a colored Span: red for refunds/negative entries,
/// green otherwise. Shows the absolute value — color carries the sign.
pub fn money_span(amount: f64) -> Span<'static> {
    let style = if amount < 0.0 {
        AMOUNT_NEG_STYLE
    } else {
        AMOUNT_POS_STYLE
    };
    Span::styled(money(amount.abs()), style)
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_span_shows_absolute_value() {
        let span = money_span(-42.10);
        assert_eq!(span.content, "$42.10");
        assert_eq!(span.style, AMOUNT_NEG_STYLE);
    }

    #[test]
    fn money_span_positive_is_green() {
        let span = money_span(12.50);
        assert_eq!(span.content, "$12.50");
        assert_eq!(span.style, AMOUNT_POS_STYLE);
    }

    #[test]
    fn wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("a long description that needs wrapping", 10);
        assert!(lines > 1);
        assert!(wrapped.lines().all(|l| l.len() <= 10));
    }

    #[test]
    fn wrap_text_zero_width_passthrough() {
        let (wrapped, lines) = wrap_text("hello", 0);
        assert_eq!(wrapped, "hello");
        assert_eq!(lines, 1);
    }
}
