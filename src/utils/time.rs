use chrono::NaiveDateTime;

/// Milliseconds elapsed since `started_at`, clamped at zero. History rows
/// record this next to the driver outcome.
pub fn elapsed_ms(started_at: NaiveDateTime) -> i64 {
    let now = chrono::Utc::now().naive_utc();
    (now - started_at).num_milliseconds().max(0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn test_elapsed_ms_is_positive_for_past_timestamps() {
        let started = Utc::now().naive_utc() - Duration::milliseconds(250);
        let elapsed = elapsed_ms(started);
        assert!(elapsed >= 250);
        assert!(elapsed < 10_000);
    }

    #[test]
    fn test_elapsed_ms_clamps_future_timestamps() {
        let started = Utc::now().naive_utc() + Duration::seconds(60);
        assert_eq!(elapsed_ms(started), 0);
    }
}
