/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Human-readable batch number: `BATCH-YYYYMMDD-NNNN`.
///
/// The suffix is random; uniqueness is enforced by the database index and
/// callers retry on collision.
pub fn batch_number(now_millis: i64) -> String {
    use rand::Rng;
    let date = chrono::DateTime::from_timestamp_millis(now_millis)
        .unwrap_or_default()
        .format("%Y%m%d");
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("BATCH-{date}-{suffix:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_number_format() {
        // 2025-03-14 00:00:00 UTC
        let n = batch_number(1_741_910_400_000);
        assert!(n.starts_with("BATCH-20250314-"));
        assert_eq!(n.len(), "BATCH-20250314-0000".len());
    }
}
