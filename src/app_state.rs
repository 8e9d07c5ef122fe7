use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::chart::{ChartInstance, ChartSlot};
use crate::controller::StatsController;
use crate::models::{FetchReply, FetchRequest, TimeRange};
use crate::view::StatsView;

/// Concrete [`StatsView`] backing the terminal dashboard.
///
/// Holds exactly what is on screen: the two scalar totals, the chart slot,
/// and the current alert. A failed fetch only ever touches the alert.
#[derive(Default)]
pub struct DashboardView {
    pub total_queries: Option<u64>,
    pub unique_users: Option<u64>,
    pub chart: ChartSlot,
    pub alert: Option<String>,
    pub loading: bool,
    pub updated_at: Option<String>,
}

impl StatsView for DashboardView {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_totals(&mut self, total_queries: u64, unique_users: u64) {
        self.total_queries = Some(total_queries);
        self.unique_users = Some(unique_users);
        self.updated_at = Some(Local::now().format("%H:%M:%S").to_string());
    }

    fn set_chart(&mut self, labels: Vec<String>, values: Vec<u64>) {
        self.chart.replace(labels, values);
        self.alert = None;
    }

    fn show_error(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

/// All state the event loop mutates between frames.
pub struct App {
    pub controller: StatsController<DashboardView>,
    pub range: TimeRange,
    pub chart_scroll: usize,
    pub show_help: bool,
    pub refresh_every: Option<Duration>,
    pub last_fetch: Instant,
    req_tx: mpsc::Sender<FetchRequest>,
    pub resp_rx: mpsc::Receiver<FetchReply>,
}

impl App {
    pub fn new(
        range: TimeRange,
        refresh_secs: u64,
        req_tx: mpsc::Sender<FetchRequest>,
        resp_rx: mpsc::Receiver<FetchReply>,
    ) -> Self {
        Self {
            controller: StatsController::new(DashboardView::default()),
            range,
            chart_scroll: 0,
            show_help: false,
            refresh_every: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            last_fetch: Instant::now(),
            req_tx,
            resp_rx,
        }
    }

    pub fn view(&self) -> &DashboardView {
        self.controller.view()
    }

    /// Hand one fetch for the current range to the background worker.
    ///
    /// Fire-and-forget: if the worker's queue is full (or the worker is
    /// gone), the request is dropped rather than parking the event loop.
    pub fn request_fetch(&mut self) {
        let request = self.controller.begin_fetch(self.range);
        self.last_fetch = Instant::now();
        if let Err(err) = self.req_tx.try_send(request) {
            match err {
                TrySendError::Full(_) => {
                    warn!(seq = request.seq, "fetch worker saturated; stats request dropped");
                }
                TrySendError::Closed(_) => {
                    warn!("fetch worker is gone; stats request dropped");
                }
            }
            self.controller.abandon(request.seq);
        }
    }

    /// Switch the trailing window and immediately re-fetch.
    pub fn select_range(&mut self, range: TimeRange) {
        self.range = range;
        self.chart_scroll = 0;
        self.request_fetch();
    }

    /// Drain every worker reply that arrived since the last frame.
    ///
    /// A fresh snapshot may hold fewer bars than the scroll offset points
    /// at, so the offset is clamped back into range afterwards.
    pub fn drain_replies(&mut self) {
        let mut applied = false;
        while let Ok(reply) = self.resp_rx.try_recv() {
            self.controller.apply(reply);
            applied = true;
        }
        if applied {
            let len = self.chart().map(ChartInstance::len).unwrap_or(0);
            self.chart_scroll = self.chart_scroll.min(len.saturating_sub(1));
        }
    }

    pub fn refresh_due(&self) -> bool {
        match self.refresh_every {
            Some(every) => !self.controller.is_loading() && self.last_fetch.elapsed() >= every,
            None => false,
        }
    }

    pub fn chart(&self) -> Option<&ChartInstance> {
        self.view().chart.current()
    }

    pub fn scroll_chart_back(&mut self) {
        let len = self.chart().map(ChartInstance::len).unwrap_or(0);
        if self.chart_scroll + 1 < len {
            self.chart_scroll += 1;
        }
    }

    pub fn scroll_chart_forward(&mut self) {
        self.chart_scroll = self.chart_scroll.saturating_sub(1);
    }

    pub fn dismiss_alert(&mut self) {
        self.controller.view_mut().alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{DailyCount, StatsSnapshot};

    fn make_app() -> (App, mpsc::Receiver<FetchRequest>, mpsc::Sender<FetchReply>) {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, resp_rx) = mpsc::channel(8);
        (App::new(TimeRange::default(), 0, req_tx, resp_rx), req_rx, resp_tx)
    }

    fn snapshot_of(days: &[(&str, u64)]) -> StatsSnapshot {
        StatsSnapshot {
            total_queries: days.iter().map(|(_, count)| count).sum(),
            unique_users: 1,
            daily_counts: days
                .iter()
                .map(|(day, count)| DailyCount {
                    day: day.to_string(),
                    count: *count,
                })
                .collect(),
        }
    }

    #[test]
    fn test_initial_fetch_uses_default_window() {
        let (mut app, mut req_rx, _resp_tx) = make_app();
        app.request_fetch();
        let request = req_rx.try_recv().unwrap();
        assert_eq!(request.days, 7);
        assert!(req_rx.try_recv().is_err());
    }

    #[test]
    fn test_range_selection_fires_one_request() {
        let (mut app, mut req_rx, _resp_tx) = make_app();
        app.select_range(TimeRange::Month);
        let request = req_rx.try_recv().unwrap();
        assert_eq!(request.days, 30);
        assert!(req_rx.try_recv().is_err());
        assert_eq!(app.range, TimeRange::Month);
    }

    #[test]
    fn test_error_keeps_previous_display() {
        let mut view = DashboardView::default();
        view.set_totals(42, 7);
        view.set_chart(vec!["2024-01-01".to_string()], vec![5]);
        view.show_error("Error loading statistics. Please try again.");

        assert_eq!(view.total_queries, Some(42));
        assert_eq!(view.unique_users, Some(7));
        assert_eq!(view.chart.live_count(), 1);
        assert!(view.alert.is_some());
    }

    #[test]
    fn test_successful_chart_update_clears_alert() {
        let mut view = DashboardView::default();
        view.show_error("boom");
        view.set_chart(vec!["2024-01-01".to_string()], vec![5]);
        assert!(view.alert.is_none());
    }

    #[test]
    fn test_chart_scroll_stays_in_bounds() {
        let (mut app, _req_rx, _resp_tx) = make_app();
        app.scroll_chart_back();
        assert_eq!(app.chart_scroll, 0);

        app.controller.view_mut().set_chart(
            vec!["a".into(), "b".into(), "c".into()],
            vec![1, 2, 3],
        );
        app.scroll_chart_back();
        app.scroll_chart_back();
        app.scroll_chart_back();
        assert_eq!(app.chart_scroll, 2);
        app.scroll_chart_forward();
        assert_eq!(app.chart_scroll, 1);
    }

    #[test]
    fn test_refresh_disabled_by_default() {
        let (app, _req_rx, _resp_tx) = make_app();
        assert!(!app.refresh_due());
    }

    #[test]
    fn test_full_request_channel_drops_instead_of_blocking() {
        // Nothing drains the capacity-8 queue here; the extra requests must
        // return immediately instead of parking the event-loop thread.
        let (mut app, mut req_rx, _resp_tx) = make_app();
        for _ in 0..10 {
            app.request_fetch();
        }

        let mut queued = 0;
        while req_rx.try_recv().is_ok() {
            queued += 1;
        }
        assert_eq!(queued, 8);
        assert!(!app.controller.is_loading());
        assert!(!app.view().loading);
    }

    #[test]
    fn test_dropped_request_recovers_on_next_fetch() {
        let (mut app, mut req_rx, resp_tx) = make_app();
        for _ in 0..9 {
            app.request_fetch();
        }
        while req_rx.try_recv().is_ok() {}

        app.request_fetch();
        let request = req_rx.try_recv().unwrap();
        resp_tx
            .try_send(FetchReply {
                seq: request.seq,
                result: Ok(snapshot_of(&[("2024-01-01", 5)])),
            })
            .unwrap();
        app.drain_replies();
        assert_eq!(app.view().total_queries, Some(5));
    }

    #[test]
    fn test_refresh_clamps_scroll_to_new_snapshot() {
        let (mut app, mut req_rx, resp_tx) = make_app();

        app.request_fetch();
        let request = req_rx.try_recv().unwrap();
        resp_tx
            .try_send(FetchReply {
                seq: request.seq,
                result: Ok(snapshot_of(&[
                    ("2024-01-01", 1),
                    ("2024-01-02", 2),
                    ("2024-01-03", 3),
                ])),
            })
            .unwrap();
        app.drain_replies();
        app.scroll_chart_back();
        app.scroll_chart_back();
        assert_eq!(app.chart_scroll, 2);

        // A refresh comes back with a shorter history.
        app.request_fetch();
        let request = req_rx.try_recv().unwrap();
        resp_tx
            .try_send(FetchReply {
                seq: request.seq,
                result: Ok(snapshot_of(&[("2024-01-03", 3)])),
            })
            .unwrap();
        app.drain_replies();
        assert_eq!(app.chart_scroll, 0);
    }
}
