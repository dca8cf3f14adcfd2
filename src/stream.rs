//! Accumulation and throttling for an in-flight response.

use std::time::{Duration, Instant};

/// Decides when an interim snapshot of the buffer is worth drawing.
///
/// A snapshot is due whenever the running character count crosses a multiple
/// of `stride`, and on every token while the buffer is shorter than `warmup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitPolicy {
    pub stride: usize,
    pub warmup: usize,
}

impl Default for EmitPolicy {
    fn default() -> Self {
        Self {
            stride: 60,
            warmup: 80,
        }
    }
}

impl EmitPolicy {
    /// `total_chars` includes the `delta_chars` just appended.
    pub fn should_emit(&self, total_chars: usize, delta_chars: usize) -> bool {
        if total_chars < self.warmup {
            return true;
        }
        self.stride > 0 && total_chars % self.stride < delta_chars
    }
}

/// Lifecycle of one chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Streaming,
    Finalized,
    /// The token source failed after the user turn was recorded; the partial
    /// text plus an error annotation was still stored.
    FailedPartial,
}

impl RequestState {
    /// The token stream opened.
    pub fn begin(self) -> Self {
        match self {
            Self::Idle => Self::Streaming,
            other => other,
        }
    }

    /// The request ended; `failed` when the source errored at open or
    /// mid-stream. Ended states stay as they are.
    pub fn end(self, failed: bool) -> Self {
        match self {
            Self::Idle | Self::Streaming if failed => Self::FailedPartial,
            Self::Idle | Self::Streaming => Self::Finalized,
            done => done,
        }
    }

    /// Interim snapshots are drawn only mid-stream.
    pub fn accepts_snapshots(self) -> bool {
        self == Self::Streaming
    }
}

/// Tokens received so far for one response.
#[derive(Debug)]
pub struct StreamBuffer {
    text: String,
    chars: usize,
    started: Instant,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            started,
        }
    }

    /// Append a token and return its length in characters.
    pub fn push(&mut self, token: &str) -> usize {
        let delta = token.chars().count();
        self.text.push_str(token);
        self.chars += delta;
        delta
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.chars
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds rounded to two decimals.
pub fn round_secs(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

/// Seconds as displayed, always with at least one decimal (`2.0`, `1.25`).
pub fn format_secs(secs: f64) -> String {
    let text = secs.to_string();
    if secs.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}
