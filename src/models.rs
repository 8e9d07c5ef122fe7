use serde::Deserialize;

/// One aggregated usage snapshot as returned by `GET /admin/stats`.
///
/// The two totals and `daily_counts` come from the same backend snapshot but
/// are not cross-validated here; the backend owns that contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsSnapshot {
    pub total_queries: u64,
    pub unique_users: u64,
    pub daily_counts: Vec<DailyCount>,
}

/// One day of query volume. The backend keys days by the Mongo group id,
/// an ISO date string, and returns them in chronological display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyCount {
    #[serde(rename = "_id")]
    pub day: String,
    pub count: u64,
}

/// Trailing window the stats query is bounded to. The backend only accepts
/// these three values, so the UI never offers anything else.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Quarter,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Week, TimeRange::Month, TimeRange::Quarter];

    pub fn days(self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(TimeRange::Week),
            30 => Some(TimeRange::Month),
            90 => Some(TimeRange::Quarter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Week => "7 days",
            TimeRange::Month => "30 days",
            TimeRange::Quarter => "90 days",
        }
    }
}

/// Sent to the background fetch worker. `seq` is a monotonic tag used to
/// recognize replies to superseded requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub days: u32,
}

/// Reply from the fetch worker. Errors cross the channel as strings; the
/// typed error never travels past the fetch call site.
#[derive(Debug, Clone)]
pub struct FetchReply {
    pub seq: u64,
    pub result: Result<StatsSnapshot, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_days_roundtrip() {
        for range in TimeRange::ALL {
            assert_eq!(TimeRange::from_days(range.days()), Some(range));
        }
        assert_eq!(TimeRange::from_days(14), None);
        assert_eq!(TimeRange::from_days(0), None);
    }

    #[test]
    fn test_default_range_is_one_week() {
        assert_eq!(TimeRange::default().days(), 7);
    }

    #[test]
    fn test_snapshot_decodes_backend_payload() {
        let body = r#"{
            "total_queries": 42,
            "unique_users": 7,
            "daily_counts": [
                {"_id": "2024-01-01", "count": 5},
                {"_id": "2024-01-02", "count": 3}
            ]
        }"#;
        let snapshot: StatsSnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.total_queries, 42);
        assert_eq!(snapshot.unique_users, 7);
        assert_eq!(snapshot.daily_counts.len(), 2);
        assert_eq!(snapshot.daily_counts[0].day, "2024-01-01");
        assert_eq!(snapshot.daily_counts[1].count, 3);
    }

    #[test]
    fn test_snapshot_rejects_missing_fields() {
        let body = r#"{"total_queries": 1, "daily_counts": []}"#;
        assert!(serde_json::from_str::<StatsSnapshot>(body).is_err());
    }
}
