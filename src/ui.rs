use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthChar;

use crate::app::{App, InputMode};
use crate::theme::{Theme, PRIMARY_PRESETS, SECONDARY_PRESETS};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let theme = app.theme.clone();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background()).fg(theme.foreground())),
        area,
    );

    let [header_area, body_area, input_area, keybar_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [chat_area, side_area] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(36)]).areas(body_area);

    let [theme_area, card_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(5)]).areas(side_area);

    render_header(&theme, frame, header_area);
    render_chat(app, &theme, frame, chat_area);
    render_input(app, &theme, frame, input_area);
    render_keybar(app, &theme, frame, keybar_area);
    render_theme_panel(&theme, frame, theme_area);
    render_product_card(app, &theme, frame, card_area);
}

fn render_header(theme: &Theme, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::raw("🍕 PIZZA HUT "),
        Span::styled("CHATBOT", Style::default().fg(theme.primary).bold()),
        Span::styled(
            "  ·  Order your favorites instantly!",
            Style::default().fg(theme.muted()),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.primary)));
    frame.render_widget(header, area);
}

fn render_chat(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chat ")
        .border_style(Style::default().fg(theme.muted()));
    let inner = block.inner(area);

    // Record viewport size for scroll-to-bottom calculations.
    app.chat_width = inner.width;
    app.chat_height = inner.height;

    let mut lines: Vec<Line> = Vec::new();
    for msg in &app.messages {
        if msg.from_bot {
            lines.push(Line::from(Span::styled(
                "🤖 Waiter",
                Style::default().fg(theme.secondary).bold(),
            )));
            for text_line in msg.text.lines() {
                lines.push(Line::from(Span::styled(
                    text_line.to_string(),
                    Style::default().fg(theme.foreground()).bg(theme.bot_bubble()),
                )));
            }
        } else {
            lines.push(
                Line::from(Span::styled("You", Style::default().fg(theme.primary).bold()))
                    .right_aligned(),
            );
            for text_line in msg.text.lines() {
                lines.push(
                    Line::from(Span::styled(
                        text_line.to_string(),
                        Style::default().fg(theme.primary),
                    ))
                    .right_aligned(),
                );
            }
        }
        lines.push(Line::default());
    }

    if app.is_loading() {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        lines.push(Line::from(Span::styled(
            "🤖 Waiter",
            Style::default().fg(theme.secondary).bold(),
        )));
        lines.push(Line::from(Span::styled(
            format!("Typing{dots}"),
            Style::default().fg(theme.muted()).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0))
        .block(block);
    frame.render_widget(chat, area);
}

fn render_input(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;

    let border_color = if editing { theme.primary } else { theme.muted() };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Ask for a pizza... ")
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(theme.foreground()))
        .block(block);
    frame.render_widget(input, area);

    if editing {
        let col = cursor_display_col(&app.input, app.cursor);
        let x = inner.x + col.min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

/// Terminal column of the cursor: sum of the cell widths of the chars
/// before it. Wide glyphs (emoji, CJK) take two cells, so a char index
/// alone would land the cursor left of the edit point.
fn cursor_display_col(input: &str, cursor: usize) -> u16 {
    input
        .chars()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0) as u16)
        .sum()
}

fn render_keybar(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Normal => "i/Enter type · j/k scroll · p primary · a accent · d dark mode · q quit",
        InputMode::Editing => "Enter send · Esc done",
    };
    let bar = Paragraph::new(hints).style(Style::default().fg(theme.muted()));
    frame.render_widget(bar, area);
}

fn swatch_row<'a>(label: &'a str, presets: &[ratatui::style::Color], selected: Option<usize>) -> Line<'a> {
    let mut spans = vec![Span::raw(format!("{label:<9}"))];
    for (i, color) in presets.iter().enumerate() {
        let marker = if selected == Some(i) { "▣ " } else { "■ " };
        spans.push(Span::styled(marker, Style::default().fg(*color)));
    }
    Line::from(spans)
}

fn render_theme_panel(theme: &Theme, frame: &mut Frame, area: Rect) {
    let mode = if theme.dark_mode { "dark 🌙" } else { "light ☀" };
    let lines = vec![
        swatch_row("Primary", PRIMARY_PRESETS, theme.primary_preset()),
        swatch_row("Accent", SECONDARY_PRESETS, theme.secondary_preset()),
        Line::from(vec![
            Span::raw(format!("{:<9}", "Mode")),
            Span::styled(mode, Style::default().fg(theme.secondary)),
        ]),
    ];

    let panel = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Theme ")
            .border_style(Style::default().fg(theme.muted())),
    );
    frame.render_widget(panel, area);
}

fn render_product_card(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let lines = match app.current_item {
        Some(item) => vec![
            Line::default(),
            Line::from(item.art).centered(),
            Line::default(),
            Line::from(Span::styled(
                item.name,
                Style::default().fg(theme.foreground()).bold(),
            ))
            .centered(),
            Line::from(Span::styled(
                format!("{} PKR", item.price),
                Style::default().fg(theme.secondary).bold(),
            ))
            .centered(),
        ],
        None => vec![
            Line::default(),
            Line::from("🍕").centered(),
            Line::default(),
            Line::from(Span::styled(
                "Your food will appear here!",
                Style::default().fg(theme.muted()),
            ))
            .centered(),
        ],
    };

    let border_color = if app.current_item.is_some() {
        theme.secondary
    } else {
        theme.muted()
    };
    let card = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Order Preview ")
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_column_counts_cells_not_chars() {
        // "🍕" is one char but two terminal cells.
        let input = "🍕 pizza";
        assert_eq!(cursor_display_col(input, 0), 0);
        assert_eq!(cursor_display_col(input, 1), 2); // after the emoji
        assert_eq!(cursor_display_col(input, 2), 3); // after the space
        assert_eq!(cursor_display_col(input, 99), 8); // clamped to end
    }

    #[test]
    fn ascii_cursor_column_matches_char_index() {
        assert_eq!(cursor_display_col("a pizza", 4), 4);
        assert_eq!(cursor_display_col("", 0), 0);
    }
}
