use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;

use crate::app_state::App;
use crate::models::TimeRange;

use super::dashboard::{
    render_alert_popup, render_cards, render_daily_chart, render_footer, render_header,
    render_help_popup,
};
use super::layout::create_layout;

fn ui(frame: &mut Frame, app: &App) {
    let layout = create_layout(frame.area());
    render_header(frame, app, layout.header);
    render_cards(frame, app, layout.cards);
    render_daily_chart(frame, app, layout.chart);
    render_footer(frame, layout.footer);
    render_alert_popup(frame, app);
    if app.show_help {
        render_help_popup(frame);
    }
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // The very first fetch happens before any key is pressed.
    app.request_fetch();

    loop {
        app.drain_replies();

        if app.refresh_due() {
            app.request_fetch();
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // The error alert is modal: only Esc (or quit) gets through.
                if app.view().alert.is_some() {
                    match key.code {
                        KeyCode::Esc => app.dismiss_alert(),
                        KeyCode::Char('q') => return Ok(()),
                        _ => {}
                    }
                    continue;
                }

                if app.show_help {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => app.show_help = false,
                        KeyCode::Char('q') => return Ok(()),
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('?') => app.show_help = true,
                    KeyCode::Char('1') => app.select_range(TimeRange::Week),
                    KeyCode::Char('2') => app.select_range(TimeRange::Month),
                    KeyCode::Char('3') => app.select_range(TimeRange::Quarter),
                    KeyCode::Char('r') => app.request_fetch(),
                    KeyCode::Left => app.scroll_chart_back(),
                    KeyCode::Right => app.scroll_chart_forward(),
                    _ => {}
                }
            }
        }
    }
}
