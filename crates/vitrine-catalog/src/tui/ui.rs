//! UI rendering

use super::app::{App, Focus, HitMap, LoadState};
use crate::render::CardFragment;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Rows taken by one card in the list
const CARD_HEIGHT: u16 = 3;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    app.hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Cards
            Constraint::Length(1), // Load more
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Toast line
        ])
        .split(frame.area());

    render_search_bar(frame, app, chunks[0]);
    render_cards(frame, app, chunks[1]);
    render_load_more(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
    render_toast_line(frame, app, chunks[4]);

    if app.browser.detail().is_open() {
        render_modal(frame, app);
    }
}

fn text_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s) as u16
}

/// Search input with the search and clear buttons on the right
fn render_search_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let labels = app.browser.labels();
    let focused = app.focus == Focus::Search;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let search_text = format!("[{}]", labels.search);
    let clear_text = format!("[{}]", labels.clear);
    let clear_visible = app.browser.clear_visible();
    let buttons_width =
        text_width(&search_text) + if clear_visible { text_width(&clear_text) + 1 } else { 0 };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(buttons_width + 1)])
        .split(inner);

    // Input with cursor, or placeholder when empty
    let input = &app.input;
    let text_style = Style::default().fg(Color::White);
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::Yellow))];
    if input.text.is_empty() {
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::White)));
        }
        spans.push(Span::styled(
            labels.search_placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let (before, after) = input.text.split_at(input.cursor);
        let cursor_char = after.chars().next();
        let after_cursor = cursor_char.map(|c| &after[c.len_utf8()..]).unwrap_or("");
        spans.push(Span::styled(before, text_style));
        match cursor_char {
            Some(c) if focused => spans.push(Span::styled(c.to_string(), cursor_style)),
            Some(c) => spans.push(Span::styled(c.to_string(), text_style)),
            None if focused => spans.push(Span::styled("█", text_style)),
            None => {}
        }
        spans.push(Span::styled(after_cursor, text_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), cols[0]);

    let button_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let search_rect = Rect::new(cols[1].x + 1, cols[1].y, text_width(&search_text), 1);
    frame.render_widget(
        Paragraph::new(Span::styled(search_text, button_style)),
        search_rect,
    );
    app.hits.search_button = Some(search_rect);

    if clear_visible {
        let clear_rect = Rect::new(
            search_rect.right() + 1,
            cols[1].y,
            text_width(&clear_text),
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                clear_text,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            clear_rect,
        );
        app.hits.clear = Some(clear_rect);
    }

    app.hits.search = Some(cols[0]);
}

fn card_item<'a>(card: &'a CardFragment) -> ListItem<'a> {
    ListItem::new(vec![
        Line::from(Span::styled(
            card.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.image.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled("[", Style::default().fg(Color::DarkGray)),
            Span::styled(card.action_label.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled("]", Style::default().fg(Color::DarkGray)),
        ]),
    ])
}

fn skeleton_item(width: u16) -> ListItem<'static> {
    let style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
    let bar = |pct: u16| "░".repeat((width * pct / 100).max(1) as usize);
    ListItem::new(vec![
        Line::styled(bar(60), style),
        Line::styled(bar(40), style),
        Line::styled(bar(15), style),
    ])
}

/// Render the card list, skeleton or no-results placeholder
fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    let list = app.browser.list();
    let focused = app.focus == Focus::Cards;
    let title = if list.is_loading() {
        " Catalog ".to_string()
    } else {
        format!(
            " Catalog [{}/{}] ",
            list.cards().len(),
            app.browser.filtered_len()
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.is_loading() {
        let items: Vec<ListItem> = (0..list.skeleton_count())
            .map(|_| skeleton_item(inner.width))
            .collect();
        frame.render_widget(List::new(items), inner);
        return;
    }

    if let Some(message) = list.placeholder() {
        let placeholder = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        frame.render_widget(placeholder, row.intersection(inner));
        return;
    }

    let cards = list.cards();
    let items: Vec<ListItem> = cards.iter().map(card_item).collect();
    let widget = List::new(items)
        .highlight_symbol("▌ ")
        .highlight_style(Style::default().fg(Color::Yellow));
    frame.render_stateful_widget(widget, inner, &mut app.list_state);

    let offset = app.list_state.offset();
    let rows = (inner.height / CARD_HEIGHT) as usize;
    app.hits.cards = (offset..cards.len().min(offset + rows))
        .map(|i| {
            let y = inner.y + (i - offset) as u16 * CARD_HEIGHT;
            (Rect::new(inner.x, y, inner.width, CARD_HEIGHT), i)
        })
        .collect();
}

fn render_load_more(frame: &mut Frame, app: &mut App, area: Rect) {
    if !app.browser.load_more_visible() {
        return;
    }
    let text = format!("[{}]", app.browser.labels().load_more);
    let width = text_width(&text).min(area.width);
    let rect = Rect::new(area.x + (area.width - width) / 2, area.y, width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        rect,
    );
    app.hits.load_more = Some(rect);
}

/// Render the status bar (load state + keyboard shortcuts)
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let bracket = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::raw("  ")];
    match &app.load_state {
        LoadState::Loading { started_at } => spans.push(Span::styled(
            format!("{} Loading {}", spinner_frame(*started_at), app.source_label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::DIM),
        )),
        LoadState::Failed(msg) => spans.push(Span::styled(
            format!("✗ {}", msg),
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        )),
        LoadState::Ready => spans.push(Span::styled(
            format!(
                "{} matches │ page {}",
                app.browser.filtered_len(),
                app.browser.current_page()
            ),
            dim,
        )),
    }

    let hints: &[&str] = if app.browser.detail().is_open() {
        &["d download", "x close"]
    } else {
        &["Tab focus", "↑↓ select", "Enter open", "m more", "^l clear", "Esc quit"]
    };
    for hint in hints {
        spans.push(Span::styled(" [", bracket));
        spans.push(Span::styled(*hint, dim));
        spans.push(Span::styled("]", bracket));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One-line notice under the status bar; errors in red, the rest in green.
fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let (icon, color) = if toast.is_error {
        ("✗", Color::Red)
    } else {
        ("✓", Color::Green)
    };
    let line = Line::from(vec![
        Span::raw("  "),
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(toast.message.as_str(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Loading indicator, advancing every 100ms since `started_at`.
fn spinner_frame(started_at: Instant) -> char {
    const SPINNER: &[char] = &['◐', '◓', '◑', '◒'];
    let step = started_at.elapsed().as_millis() / 100;
    SPINNER[step as usize % SPINNER.len()]
}

/// Render the detail modal over the card list
fn render_modal(frame: &mut Frame, app: &mut App) {
    let Some(view) = app.browser.detail().view() else {
        return;
    };
    let labels = app.browser.labels();
    let action = app.browser.detail().action();
    let area = frame.area();

    let width = (area.width * 60 / 100)
        .max(40)
        .min(area.width.saturating_sub(4));
    let height = (area.height * 70 / 100)
        .max(12)
        .min(area.height.saturating_sub(2));
    let modal = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", view.title));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Close control
            Constraint::Length(3), // Fields
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Description
            Constraint::Length(1), // Action
        ])
        .split(inner);

    let close_text = format!("[{}]", labels.close);
    let close_width = text_width(&close_text).min(inner.width);
    let close_rect = Rect::new(inner.right() - close_width, chunks[0].y, close_width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(close_text, Style::default().fg(Color::Red))),
        close_rect,
    );

    let key = Style::default().fg(Color::DarkGray);
    let field = |name: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name}: "), key),
            Span::styled(value.to_string(), Style::default().fg(Color::White)),
        ])
    };
    let fields = vec![
        field(&labels.size, &view.size),
        field(&labels.version, &view.version),
        field(&labels.compatibility, &view.compatibility),
    ];
    frame.render_widget(Paragraph::new(fields), chunks[1]);

    let description: Vec<Line> = view
        .description_lines
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(description).wrap(Wrap { trim: false }),
        chunks[3],
    );

    let action_text = format!("[ {} ]", action.label);
    let action_style = if action.enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let action_width = text_width(&action_text).min(inner.width);
    let action_rect = Rect::new(
        inner.x + (inner.width - action_width) / 2,
        chunks[4].y,
        action_width,
        1,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(action_text, action_style)),
        action_rect,
    );

    app.hits.modal = Some(modal);
    app.hits.modal_close = Some(close_rect);
    app.hits.modal_action = Some(action_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::Browser;
    use crate::catalog::Catalog;
    use crate::config::VitrineConfig;
    use crate::detail::{PanelState, RecordingNavigator};
    use crate::tui::app::Toast;
    use std::time::Duration;
    use crate::model::product;
    use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::mpsc;

    fn screen(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(browser: Browser) -> App {
        let (_tx, rx) = mpsc::channel();
        App::new(
            browser,
            Box::new(RecordingNavigator::new()),
            rx,
            "content.json".to_string(),
        )
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        screen(terminal.backend().buffer())
    }

    fn loaded(n: i64) -> App {
        let catalog = Catalog::from_products(
            (1..=n).map(|i| product(i, &format!("Item {i}"), Some("line one\nline two"))),
        );
        app_with(Browser::with_catalog(&VitrineConfig::default(), catalog).unwrap())
    }

    #[test]
    fn test_loading_shows_skeleton_and_placeholder_text() {
        let mut app = app_with(Browser::new(&VitrineConfig::default()).unwrap());
        let text = draw(&mut app);
        assert!(text.contains("Pesquisar por nome ou descrição..."));
        assert!(text.contains("░░░"));
        assert!(text.contains("Loading content.json"));
        assert!(app.hits.cards.is_empty());
    }

    #[test]
    fn test_cards_and_load_more() {
        let mut app = loaded(8);
        let text = draw(&mut app);
        assert!(text.contains("Item 1"));
        assert!(text.contains("Ver Mais"));
        assert!(text.contains("[Carregar Mais]"));
        assert!(!text.contains("Item 7"));
        assert!(!text.contains("[Limpar]"));
        assert!(app.hits.load_more.is_some());
        assert!(!app.hits.cards.is_empty());
    }

    #[test]
    fn test_no_results_placeholder() {
        let mut app = loaded(3);
        app.browser.search_for("zzz");
        let text = draw(&mut app);
        assert!(text.contains("Nenhum produto encontrado."));
        assert!(text.contains("[Limpar]"));
        assert!(!text.contains("[Carregar Mais]"));
    }

    #[test]
    fn test_modal_shows_details() {
        let mut app = loaded(2);
        app.browser.view_more(2).unwrap();
        let text = draw(&mut app);
        assert!(text.contains("Item 2 title"));
        assert!(text.contains("Tamanho: 10 MB"));
        assert!(text.contains("line one"));
        assert!(text.contains("line two"));
        assert!(text.contains("[ Download ]"));
        assert!(app.hits.modal_action.is_some());
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
        draw(app);
    }

    fn click_rect(app: &mut App, rect: Option<Rect>) {
        let rect = rect.expect("control was not rendered");
        click(app, rect.x, rect.y);
    }

    fn click_card(app: &mut App, index: usize) {
        let rect = app
            .hits
            .cards
            .iter()
            .find(|(_, i)| *i == index)
            .map(|(r, _)| *r);
        click_rect(app, rect);
    }

    #[test]
    fn test_modal_mouse_controls() {
        let mut app = loaded(3);
        draw(&mut app);

        click_card(&mut app, 1);
        assert_eq!(app.browser.detail().state(), PanelState::Open { product_id: 2 });

        // Left border belongs to the modal but is not a control
        let modal = app.hits.modal.unwrap();
        click(&mut app, modal.x, modal.y + 1);
        assert!(app.browser.detail().is_open());

        click(&mut app, 0, 0);
        assert!(!app.browser.detail().is_open());

        click_card(&mut app, 0);
        let target = app.hits.modal_close;
        click_rect(&mut app, target);
        assert!(!app.browser.detail().is_open());

        click_card(&mut app, 2);
        let target = app.hits.modal_action;
        click_rect(&mut app, target);
        assert_eq!(
            app.browser.detail().state(),
            PanelState::DownloadPending { product_id: 3 }
        );
        assert!(!app.browser.detail().action().enabled);
        assert!(app.toast.as_ref().is_some_and(|t| !t.is_error));
    }

    #[test]
    fn test_list_mouse_controls() {
        let mut app = loaded(8);
        draw(&mut app);

        let target = app.hits.load_more;
        click_rect(&mut app, target);
        assert_eq!(app.browser.list().cards().len(), 8);
        assert!(app.hits.load_more.is_none());

        app.browser.search_for("Item 7");
        draw(&mut app);
        assert_eq!(app.browser.filtered_len(), 1);

        let target = app.hits.clear;
        click_rect(&mut app, target);
        assert_eq!(app.browser.applied_query(), "");
        assert_eq!(app.browser.filtered_len(), 8);
        assert!(app.hits.clear.is_none());
    }

    #[test]
    fn test_clicks_ignored_outside_controls() {
        let mut app = loaded(2);
        draw(&mut app);
        let status_row = 28;
        click(&mut app, 5, status_row);
        assert!(!app.browser.detail().is_open());
        assert_eq!(app.browser.list().cards().len(), 2);
    }

    #[test]
    fn test_toast_line_marks_errors() {
        let mut app = loaded(1);
        app.toast = Some(Toast::error(
            "Failed to open link".to_string(),
            Duration::from_secs(5),
        ));
        assert!(draw(&mut app).contains("✗ Failed to open link"));

        app.toast = Some(Toast::new("Baixando...".to_string(), Duration::from_secs(5)));
        assert!(draw(&mut app).contains("✓ Baixando..."));
    }
}
