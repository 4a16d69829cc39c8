//! Wizard Rendering
//!
//! Draws the current [`View`] centered on screen, plus the zoom modal when
//! it is open.

use super::app::{App, SummaryButton};
use super::modal::ModalControl;
use crate::wizard::content::UiStrings;
use crate::wizard::{InputKind, View};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

const BRAND_BLUE: Color = Color::Rgb(70, 130, 180);
const BRAND_GOLD: Color = Color::Rgb(218, 165, 32);
const ACCENT_GOLD: Color = Color::Rgb(184, 134, 11);

const PANEL_WIDTH: u16 = 72;
const PANEL_HEIGHT: u16 = 30;
const BUTTON_GAP: u16 = 1;
const CONTROL_GAP: u16 = 2;

fn button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(BRAND_GOLD)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BRAND_GOLD)
    }
}

/// ` label ` spans separated by `gap` blanks, matching [`button_rects`]
fn button_row(labels: &[(&str, bool)], gap: u16) -> Vec<Span<'static>> {
    let mut row = Vec::new();
    for (i, (label, focused)) in labels.iter().enumerate() {
        if i > 0 {
            row.push(Span::raw(" ".repeat(gap as usize)));
        }
        row.push(Span::styled(format!(" {} ", label), button_style(*focused)));
    }
    row
}

/// Render the whole screen
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let panel = centered(area, PANEL_WIDTH, PANEL_HEIGHT);

    match app.view() {
        View::Start { intro, start_label } => render_start(f, panel, intro, start_label),
        view @ View::Question { .. } => render_question(f, panel, app, view),
        view @ View::Summary { .. } => render_summary(f, area, app, view),
    }
}

/// Body rectangle of the zoom modal for a given screen area
pub fn modal_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(8).max(20).min(area.width);
    let height = area.height.saturating_sub(4).max(8).min(area.height);
    centered(area, width, height)
}

/// Inner rows of the summary panel: document, buttons (two lines), status, footer
fn summary_layout(area: Rect) -> Rc<[Rect]> {
    let panel = centered(area, PANEL_WIDTH, PANEL_HEIGHT);
    let inner = panel_block("").inner(panel);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner)
}

/// Modal body split into the document and the control row
fn modal_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(modal_area(area))
}

/// Lay out ` label ` buttons left to right, wrapping to the next line of
/// `rows` when a button would overflow, clipped to `rows`
fn button_rects(rows: Rect, labels: &[&str], gap: u16) -> Vec<Rect> {
    let (mut x, mut y) = (rows.x, rows.y);
    labels
        .iter()
        .map(|label| {
            let width = label.width() as u16 + 2;
            if x > rows.x && x.saturating_add(width) > rows.right() {
                x = rows.x;
                y = y.saturating_add(1);
            }
            let rect = Rect::new(x, y, width, 1).intersection(rows);
            x = x.saturating_add(width + gap);
            rect
        })
        .collect()
}

fn summary_labels(strings: &UiStrings) -> [(SummaryButton, &'static str); 4] {
    [
        (SummaryButton::Download, strings.download),
        (SummaryButton::Restart, strings.restart),
        (SummaryButton::RequestAnalysis, strings.request_analysis),
        (SummaryButton::Preview, strings.zoom),
    ]
}

fn control_label(strings: &UiStrings, control: ModalControl) -> &'static str {
    match control {
        ModalControl::Close => strings.close,
        ModalControl::Download => strings.download,
    }
}

/// Screen cells of the summary buttons for a given screen area
pub fn summary_button_rects(area: Rect, strings: &UiStrings) -> Vec<(SummaryButton, Rect)> {
    let labels = summary_labels(strings);
    let texts: Vec<&str> = labels.iter().map(|(_, label)| *label).collect();
    let row = summary_layout(area)[1];
    labels
        .iter()
        .map(|(button, _)| *button)
        .zip(button_rects(row, &texts, BUTTON_GAP))
        .filter(|(_, rect)| !rect.is_empty())
        .collect()
}

/// Screen cells of the modal's controls for a given screen area
pub fn modal_control_rects(
    area: Rect,
    strings: &UiStrings,
    controls: &[ModalControl],
) -> Vec<(ModalControl, Rect)> {
    let texts: Vec<&str> = controls
        .iter()
        .map(|c| control_label(strings, *c))
        .collect();
    let row = modal_layout(area)[1];
    controls
        .iter()
        .copied()
        .zip(button_rects(row, &texts, CONTROL_GAP))
        .filter(|(_, rect)| !rect.is_empty())
        .collect()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(v_chunks[1]);

    h_chunks[1]
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BRAND_BLUE))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
        ))
}

fn key_hint(key: &str, label: &str, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("[{}] ", key),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{}  ", label), Style::default().fg(Color::White)),
    ]
}

fn render_start(f: &mut Frame, area: Rect, intro: &str, start_label: &str) {
    let mut lines: Vec<Line<'static>> = vec![Line::from("")];
    for line in intro.lines() {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}  ", start_label),
        Style::default()
            .fg(Color::Black)
            .bg(BRAND_GOLD)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let mut footer = key_hint("Enter", start_label, ACCENT_GOLD);
    footer.extend(key_hint("q", "Quit", Color::Red));
    lines.push(Line::from(footer));

    let paragraph = Paragraph::new(lines)
        .block(panel_block("Protocol Risk Check"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_question(f: &mut Frame, area: Rect, app: &App, view: View) {
    let View::Question {
        index,
        total,
        progress_label,
        progress,
        prompt,
        kind,
        placeholder,
        options,
        show_prev,
        prev_label,
        next_label,
        notice,
        ..
    } = view
    else {
        return;
    };

    let block = panel_block(&format!("Protocol Risk Check ({}/{})", index + 1, total));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(BRAND_BLUE).bg(Color::Black))
        .ratio(progress.clamp(0.0, 1.0))
        .label(progress_label);
    f.render_widget(gauge, chunks[0]);

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(""),
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if kind == InputKind::Select && options.iter().all(|o| !o.checked) {
        lines.push(Line::from(Span::styled(
            format!("  {}", placeholder),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let cursor = app.form.as_ref().map(|form| form.cursor);
    let draft = app.form.as_ref().map(|form| &form.selection);
    let label_width = options
        .iter()
        .map(|o| o.label.width())
        .max()
        .unwrap_or(0);

    for (i, option) in options.iter().enumerate() {
        let focused = cursor == Some(i);
        let checked = draft.map_or(option.checked, |s| s.is_selected(option.value));
        let marker = match (kind, checked) {
            (InputKind::Select, true) => "(•)",
            (InputKind::Select, false) => "( )",
            (InputKind::Checkbox, true) => "[x]",
            (InputKind::Checkbox, false) => "[ ]",
        };
        let padding = " ".repeat(label_width.saturating_sub(option.label.width()));
        let label_style = if focused {
            Style::default().fg(Color::Black).bg(ACCENT_GOLD)
        } else if checked {
            Style::default().fg(BRAND_GOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(
                if focused { " > " } else { "   " },
                Style::default().fg(ACCENT_GOLD),
            ),
            Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} ", marker), Style::default().fg(BRAND_BLUE)),
            Span::styled(format!("{}{}", option.label, padding), label_style),
        ]));
    }

    if let Some(notice) = notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  ! {}", notice),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    let mut footer = Vec::new();
    if show_prev {
        footer.extend(key_hint("Esc", prev_label, Color::Red));
    }
    footer.extend(key_hint(
        "Space",
        if kind == InputKind::Checkbox {
            "Toggle"
        } else {
            "Select"
        },
        BRAND_BLUE,
    ));
    footer.extend(key_hint("Enter", next_label, ACCENT_GOLD));
    lines.push(Line::from(footer));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, chunks[1]);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App, view: View) {
    let View::Summary {
        title,
        subtitle,
        risks_heading,
        risks,
        recommendations_heading,
        recommendations,
        download_label,
        restart_label,
        markdown,
        ..
    } = view
    else {
        return;
    };
    let strings = app.session.content().strings;

    let panel = centered(area, PANEL_WIDTH, PANEL_HEIGHT);
    f.render_widget(panel_block(title), panel);
    let rows = summary_layout(area);

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (heading, items) in [(risks_heading, &risks), (recommendations_heading, &recommendations)]
    {
        lines.push(Line::from(Span::styled(
            heading.to_string(),
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        )));
        for item in items {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(BRAND_BLUE)),
                Span::raw(item.clone()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let document = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(document, rows[0]);

    let labels = summary_labels(strings);
    for (button, rect) in summary_button_rects(area, strings) {
        let Some((_, label)) = labels.iter().find(|(b, _)| *b == button) else {
            continue;
        };
        let focused = app.summary_focus == button && !app.modal.is_open();
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", label), button_style(focused))),
            rect,
        );
    }

    if let Some(status) = &app.status {
        f.render_widget(
            Paragraph::new(Span::styled(
                status.clone(),
                Style::default().fg(Color::Green),
            )),
            rows[2],
        );
    }

    let mut footer = key_hint("Tab", "Focus", BRAND_BLUE);
    footer.extend(key_hint("Enter", "Activate", ACCENT_GOLD));
    footer.extend(key_hint("d", download_label, ACCENT_GOLD));
    footer.extend(key_hint("r", restart_label, Color::Red));
    f.render_widget(Paragraph::new(Line::from(footer)), rows[3]);

    if app.modal.is_open() {
        render_modal(f, app, area, &markdown);
    }
}

fn render_modal(f: &mut Frame, app: &App, area: Rect, markdown: &str) {
    let strings = app.session.content().strings;
    let chunks = modal_layout(area);

    f.render_widget(Clear, modal_area(area));

    let document: Vec<Line<'static>> = markdown
        .lines()
        .map(|line| {
            if line.starts_with('#') {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(line.to_string())
            }
        })
        .collect();

    let paragraph = Paragraph::new(document)
        .block(panel_block(strings.zoom))
        .wrap(Wrap { trim: false })
        .scroll((app.modal.scroll(), 0));
    f.render_widget(paragraph, chunks[0]);

    let labels: Vec<(&str, bool)> = app
        .modal
        .controls()
        .iter()
        .map(|c| (control_label(strings, *c), app.modal.focused() == Some(*c)))
        .collect();
    let mut controls = button_row(&labels, CONTROL_GAP);
    controls.push(Span::raw("  "));
    controls.extend(key_hint("Esc", strings.close, Color::Red));
    f.render_widget(Paragraph::new(Line::from(controls)), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{DirectorySaveTarget, Locale, WizardSession};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(locale: Locale) -> App {
        App::new(
            WizardSession::new(locale),
            DirectorySaveTarget::new(std::env::temp_dir()),
        )
    }

    #[test]
    fn test_start_screen() {
        let screen = draw(&app(Locale::En));
        assert!(screen.contains("Start Assessment"));
    }

    #[test]
    fn test_question_screen_shows_prompt_and_progress() {
        let mut app = app(Locale::En);
        app.handle_key(key(KeyCode::Enter));
        let screen = draw(&app);
        assert!(screen.contains("What type of protocol are you building?"));
        assert!(screen.contains("Step 1 of 5"));
        assert!(screen.contains("AMM / DEX"));
    }

    #[test]
    fn test_notice_is_drawn() {
        let mut app = app(Locale::En);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert!(draw(&app).contains("Please select an answer"));
    }

    fn finish(app: &mut App) {
        app.handle_event(crate::tui::TuiEvent::Resize(100, 40));
        app.handle_key(key(KeyCode::Enter));
        for digit in ['1', '4', '3', '1', '1'] {
            app.handle_key(key(KeyCode::Char(digit)));
            app.handle_key(key(KeyCode::Enter));
        }
    }

    fn text_at(app: &App, rect: Rect) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (rect.x..rect.x + rect.width)
            .map(|x| buffer[(x, rect.y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_summary_buttons_drawn_where_clickable() {
        let mut app = app(Locale::En);
        finish(&mut app);
        let strings = app.session.content().strings;
        let rects = summary_button_rects(Rect::new(0, 0, 100, 40), strings);
        assert_eq!(rects.len(), 4);

        let labels = [strings.download, strings.restart, strings.request_analysis, strings.zoom];
        for ((_, rect), label) in rects.iter().zip(labels) {
            assert_eq!(text_at(&app, *rect), format!(" {} ", label));
        }
    }

    #[test]
    fn test_modal_controls_drawn_where_clickable() {
        let mut app = app(Locale::En);
        finish(&mut app);
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.modal.is_open());

        let strings = app.session.content().strings;
        let rects = modal_control_rects(Rect::new(0, 0, 100, 40), strings, app.modal.controls());
        assert_eq!(text_at(&app, rects[0].1), " Close ");
        assert_eq!(text_at(&app, rects[1].1), " Download Summary ");

        let screen = draw(&app);
        assert!(screen.contains("# Protocol Risk Summary"));
    }

    #[test]
    fn test_modal_area_fits_inside_screen() {
        let area = Rect::new(0, 0, 100, 40);
        let body = modal_area(area);
        assert!(body.width <= area.width && body.height <= area.height);
        assert!(body.x > 0 && body.y > 0);

        let tiny = Rect::new(0, 0, 10, 5);
        let body = modal_area(tiny);
        assert!(body.width <= 10 && body.height <= 5);
    }
}
