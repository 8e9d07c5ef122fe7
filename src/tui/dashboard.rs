use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph},
};

use crate::app_state::App;
use crate::models::TimeRange;
use crate::tui::layout::centered_rect;

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let tab_style = |active: bool| {
        if active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut spans = vec![
        Span::styled(
            " Recipe Chatbot Admin ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    for (key, range) in ["1", "2", "3"].iter().zip(TimeRange::ALL) {
        let style = tab_style(app.range == range);
        spans.push(Span::styled(format!("[{key}] "), style));
        spans.push(Span::styled(range.label(), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        if app.view().loading { "● FETCHING" } else { "" },
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

pub fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let view = app.view();
    let scalar = |value: Option<u64>| match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    };

    let total = Paragraph::new(vec![
        Line::from(Span::styled(
            scalar(view.total_queries),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Total Queries", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" 📊 "));
    frame.render_widget(total, chunks[0]);

    let users = Paragraph::new(vec![
        Line::from(Span::styled(
            scalar(view.unique_users),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Unique Users", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" 👥 "));
    frame.render_widget(users, chunks[1]);

    let updated = Paragraph::new(vec![
        Line::from(Span::styled(
            view.updated_at.clone().unwrap_or_else(|| "-".to_string()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Last Updated", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" ⏱ "));
    frame.render_widget(updated, chunks[2]);
}

pub fn render_daily_chart(frame: &mut Frame, app: &App, area: Rect) {
    let chart = match app.chart() {
        Some(chart) if !chart.is_empty() => chart,
        Some(_) => {
            let empty = Paragraph::new("No queries in this window")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" 📈 Queries per Day "));
            frame.render_widget(empty, area);
            return;
        }
        None => {
            let empty = Paragraph::new("No data yet")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" 📈 Queries per Day "));
            frame.render_widget(empty, area);
            return;
        }
    };

    // ISO date labels are 10 columns wide.
    let bar_width: usize = 10;
    let bar_gap: usize = 2;
    let available_width = area.width.saturating_sub(2) as usize;
    let view_capacity = (available_width / (bar_width + bar_gap)).max(1);

    let full_data = chart.bars();
    let total_len = full_data.len();
    let end_index = total_len.saturating_sub(app.chart_scroll);
    let start_index = end_index.saturating_sub(view_capacity);
    let visible_data = &full_data[start_index..end_index];

    let bars: Vec<Bar> = visible_data
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(label.clone()).centered())
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let title = if app.chart_scroll == 0 {
        format!(
            " 📈 Queries per Day ({} window, {}/{}) ←/→ ",
            app.range.label(),
            visible_data.len(),
            total_len
        )
    } else {
        format!(
            " 📈 Queries per Day (-{} days, {}/{}) ←/→ ",
            app.chart_scroll,
            visible_data.len(),
            total_len
        )
    };

    let widget = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(BarGroup::default().bars(&bars))
        .max(chart.y_max())
        .bar_width(bar_width as u16)
        .bar_gap(bar_gap as u16)
        .value_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(widget, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " 1/2/3 window  r refresh  ←/→ scroll  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hints, area);
}

pub fn render_alert_popup(frame: &mut Frame, app: &App) {
    let Some(alert) = app.view().alert.as_deref() else {
        return;
    };
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            alert,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[Esc] dismiss", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" ⚠ Error "),
    );
    frame.render_widget(popup, area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(""),
        Line::from("  1 / 2 / 3   show last 7 / 30 / 90 days"),
        Line::from("  r           re-fetch the current window"),
        Line::from("  ← / →       scroll through chart history"),
        Line::from("  Esc         dismiss error popup"),
        Line::from("  q           quit"),
    ];
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(popup, area);
}
