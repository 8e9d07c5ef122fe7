use ratatui::prelude::*;

pub struct UiLayout {
    pub header: Rect,
    pub cards: Rect,
    pub chart: Rect,
    pub footer: Rect,
}

pub fn create_layout(area: Rect) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header: title + range tabs
            Constraint::Length(5), // stat cards
            Constraint::Min(10),   // bar chart
            Constraint::Length(1), // key hints
        ])
        .split(area);

    UiLayout {
        header: chunks[0],
        cards: chunks[1],
        chart: chunks[2],
        footer: chunks[3],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
