//! Time and randomness sources for identifier candidates.

/// Wall-clock source, in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The system UTC clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Source of the random 128-bit token embedded in each candidate.
pub trait TokenSource: Send + Sync {
    fn next_token(&self) -> String;
}

/// Random (v4) UUIDs in hyphenated form.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> String {
        uuid::Uuid::new_v4().hyphenated().to_string()
    }
}
