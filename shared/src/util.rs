//! Time and id helpers

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a table session id
///
/// Table key + join timestamp is sufficient entropy for this domain;
/// the random suffix only disambiguates two sessions opened on the
/// same table within the same millisecond (reopen after close).
pub fn session_id(table_key: &str) -> String {
    use rand::Rng;
    let suffix: u32 = rand::thread_rng().gen_range(0..0x1000);
    format!("{}-{}-{:03x}", table_key, now_millis(), suffix)
}
