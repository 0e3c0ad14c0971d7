use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, Wrap,
    },
    Frame,
};

use super::app::App;
use super::models::{ReviewItem, ReviewStatus};

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    render_main_screen(f, size, app);

    if app.show_help {
        render_help_popup(f);
    }
}

fn render_main_screen(f: &mut Frame, area: Rect, app: &App) {
    let chunks = if app.show_details {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
        .split(chunks[0]);

    render_header(f, left_chunks[0], app);
    render_file_list(f, left_chunks[1], app);
    render_status_bar(f, left_chunks[2], app);

    if app.show_details && chunks.len() > 1 {
        render_details_panel(f, chunks[1], app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(format!("Anime Relocator - {}", app.strategy.id()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn status_label(status: ReviewStatus) -> (&'static str, Color) {
    match status {
        ReviewStatus::Ready => ("[READY]", Color::Yellow),
        ReviewStatus::Deferred => ("[DEFERRED]", Color::Gray),
        ReviewStatus::Failed => ("[FAILED]", Color::Red),
        ReviewStatus::Applied => ("[APPLIED]", Color::Green),
        ReviewStatus::ApplyFailed => ("[APPLY FAILED]", Color::Red),
    }
}

fn render_file_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .items
        .iter()
        .map(|item| {
            let (label, color) = status_label(item.status);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", label), Style::default().fg(color)),
                Span::styled(item.original_name.clone(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Files")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.list_state.clone());

    if app.items.len() > usize::from(area.height.saturating_sub(2)) {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut app.scroll_state.clone(),
        );
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let stats = app.stats();
    let label = app.status_message.clone().unwrap_or_else(|| {
        format!(
            "{} ready, {} applied, {} deferred, {} failed",
            stats.ready, stats.applied, stats.deferred, stats.failed
        )
    });
    let style = if app.status_message.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    };

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(style)
        .ratio(app.progress().clamp(0.0, 1.0))
        .label(label);
    f.render_widget(progress, chunks[0]);

    let controls = Paragraph::new("a apply, A all, h help, q quit")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, chunks[1]);
}

fn detail_lines(item: &ReviewItem) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Manifest:"),
        Line::from(item.source.display().to_string()),
        Line::from(""),
    ];

    if let Some(relocation) = &item.relocation {
        let name_style = match item.status {
            ReviewStatus::Applied => Style::default().fg(Color::Green),
            ReviewStatus::ApplyFailed => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::Yellow),
        };
        if relocation.is_deferred() {
            lines.push(Line::from("No change requested"));
        }
        if let Some(name) = &relocation.file_name {
            lines.push(Line::from("New name:"));
            lines.push(Line::from(Span::styled(name.clone(), name_style)));
        }
        if let Some(folder) = &relocation.destination {
            lines.push(Line::from(format!("Folder: {} ({})", folder.location, folder.name)));
        }
        if let Some(subfolder) = &relocation.subfolder {
            lines.push(Line::from(format!("Subfolder: {}", subfolder)));
        }
        if let Some(copy) = &relocation.backup_copy {
            lines.push(Line::from(format!("Backup copy: {}", copy.display())));
        }
        if let Some(target) = &item.target {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Target: {}", target.display())));
        }
    }

    if let Some(message) = &item.message {
        let color = if item.status == ReviewStatus::Applied {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(color))));
    }
    lines
}

fn render_details_panel(f: &mut Frame, area: Rect, app: &App) {
    let Some(item) = app.selected_item() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(area);

    let before = Paragraph::new(Text::from(vec![
        Line::from("Original:"),
        Line::from(Span::styled(item.original_name.clone(), Style::default().fg(Color::Red))),
    ]))
    .block(
        Block::default()
            .title("Before")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(before, chunks[0]);

    let after = Paragraph::new(Text::from(detail_lines(item)))
        .block(
            Block::default()
                .title("After")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(after, chunks[1]);
}

fn render_help_popup(f: &mut Frame) {
    let popup_area = centered_rect(60, 50, f.area());

    let help_text = vec![
        Line::from(Span::styled("Anime Relocator - Help", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  Up/k    - Move up"),
        Line::from("  Down/j  - Move down"),
        Line::from(""),
        Line::from("Actions:"),
        Line::from("  a/Enter - Apply the selected decision"),
        Line::from("  A       - Apply every ready decision"),
        Line::from("  p       - Toggle details panel"),
        Line::from("  h/F1    - Toggle this help"),
        Line::from("  q/Esc   - Quit"),
        Line::from(""),
        Line::from(Span::styled("Press Esc or h to close", Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
