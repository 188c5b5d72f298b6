//! Debug logging with a pluggable sink.
//!
//! The toolkit has no opinion about where diagnostics go: the host installs
//! a sink function once (serial port, semihosting, stderr in tests) and the
//! `log!` macro formats into a fixed stack buffer before handing the line
//! over. Without a sink every log call is a cheap no-op.

use spin::Mutex;

type Sink = fn(&str);

static SINK: Mutex<Option<Sink>> = Mutex::new(None);

/// Install the process-wide log sink. Replaces any previous sink.
pub fn set_sink(sink: Sink) {
    *SINK.lock() = Some(sink);
}

/// Remove the installed sink, silencing all logging.
pub fn clear_sink() {
    *SINK.lock() = None;
}

/// Deliver one formatted line to the sink, if any. Used by `log!`.
pub fn emit(line: &str) {
    if let Some(sink) = *SINK.lock() {
        sink(line);
    }
}

/// Fixed-capacity byte buffer for in-place log formatting. Overlong
/// messages are truncated rather than allocated.
pub struct LogBuf {
    pub buf: [u8; 256],
    pub len: usize,
}

impl LogBuf {
    pub const fn new() -> Self {
        Self { buf: [0; 256], len: 0 }
    }

    pub fn as_str(&self) -> &str {
        // Only write_str appends, and it copies whole str bytes.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl Default for LogBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Write for LogBuf {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let room = self.buf.len() - self.len;
        let take = s.len().min(room);
        // Truncate on a char boundary so as_str stays valid UTF-8.
        let take = (0..=take).rev().find(|&n| s.is_char_boundary(n)).unwrap_or(0);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Format and emit one log line through the installed sink.
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf = $crate::log::LogBuf::new();
        let _ = core::write!(&mut buf, $($arg)*);
        $crate::log::emit(buf.as_str());
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn logbuf_truncates_without_panicking() {
        let mut b = LogBuf::new();
        for _ in 0..40 {
            let _ = write!(&mut b, "0123456789");
        }
        assert_eq!(b.len, 256);
        assert_eq!(b.as_str().len(), 256);
    }

    #[test]
    fn emit_without_sink_is_a_noop() {
        clear_sink();
        emit("nobody listening");
    }
}
