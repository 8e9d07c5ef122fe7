use tracing::{debug, error};

use crate::models::{FetchReply, FetchRequest, StatsSnapshot, TimeRange};
use crate::view::StatsView;

/// Shown for every failure class; the specific cause only goes to the log.
pub const FETCH_ERROR_ALERT: &str = "Error loading statistics. Please try again.";

/// Drives a [`StatsView`] from stats fetch outcomes.
///
/// Each fetch gets a monotonically increasing sequence number. Only the reply
/// matching the most recently issued request is applied; anything older was
/// superseded by a later range change and is dropped, so a slow stale
/// response can never overwrite fresher data. Requests are never debounced or
/// cancelled.
pub struct StatsController<V: StatsView> {
    view: V,
    next_seq: u64,
    issued: Option<u64>,
}

impl<V: StatsView> StatsController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            next_seq: 0,
            issued: None,
        }
    }

    /// Start one fetch for `range`; the returned request goes to the worker.
    pub fn begin_fetch(&mut self, range: TimeRange) -> FetchRequest {
        self.next_seq += 1;
        self.issued = Some(self.next_seq);
        self.view.set_loading(true);
        FetchRequest {
            seq: self.next_seq,
            days: range.days(),
        }
    }

    /// Forget a request that never reached the worker. No reply will come,
    /// so the loading indicator is cleared and earlier in-flight replies
    /// stay superseded.
    pub fn abandon(&mut self, seq: u64) {
        if self.issued == Some(seq) {
            self.issued = None;
            self.view.set_loading(false);
        }
    }

    /// Apply one worker reply to the view.
    pub fn apply(&mut self, reply: FetchReply) {
        if self.issued != Some(reply.seq) {
            debug!(seq = reply.seq, "Dropping reply to superseded stats request");
            return;
        }
        self.issued = None;
        self.view.set_loading(false);

        match reply.result {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(cause) => {
                error!(%cause, "Failed to fetch admin stats");
                self.view.show_error(FETCH_ERROR_ALERT);
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: StatsSnapshot) {
        self.view
            .set_totals(snapshot.total_queries, snapshot.unique_users);

        let mut labels = Vec::with_capacity(snapshot.daily_counts.len());
        let mut values = Vec::with_capacity(snapshot.daily_counts.len());
        for day in snapshot.daily_counts {
            labels.push(day.day);
            values.push(day.count);
        }
        self.view.set_chart(labels, values);
    }

    pub fn is_loading(&self) -> bool {
        self.issued.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
