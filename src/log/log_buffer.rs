//! Per-thread accumulation buffer behind [`LogStream`](crate::LogStream).
//!
//! Each thread lazily gets its own `String`, reused across statements and
//! dropped at thread exit. Every accessor degrades to a no-op when the buffer
//! is unavailable (already borrowed by a re-entrant `Display` impl, or torn
//! down during thread exit) instead of panicking.

use std::{
    cell::RefCell,
    fmt::{self, Write},
};

thread_local! {
    static BUFFER: RefCell<String> = const { RefCell::new(String::new()) };
}

fn with_buffer<R>(f: impl FnOnce(&mut String) -> R) -> Option<R> {
    BUFFER
        .try_with(|cell| cell.try_borrow_mut().ok().map(|mut buf| f(&mut buf)))
        .ok()
        .flatten()
}

/// Empties this thread's buffer, keeping its capacity.
pub(crate) fn clear() {
    with_buffer(String::clear);
}

/// Appends the textual form of `value`. A failing `Display` impl leaves
/// whatever it managed to write.
pub(crate) fn append(value: &dyn fmt::Display) {
    with_buffer(|buf| {
        let _ = write!(buf, "{value}");
    });
}

pub(crate) fn push_str(s: &str) {
    with_buffer(|buf| buf.push_str(s));
}

/// Private copy of the current contents; the buffer itself is left untouched.
pub(crate) fn snapshot() -> Option<String> {
    with_buffer(|buf| buf.as_str().to_owned())
}

pub(crate) fn len() -> usize {
    with_buffer(|buf| buf.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::thread;

    #[test]
    fn append_then_snapshot_then_clear() {
        clear();
        append(&"test");
        append(&2);
        push_str("!");
        assert_eq!(snapshot().as_deref(), Some("test2!"));
        assert_eq!(len(), 6);
        clear();
        assert_eq!(snapshot().as_deref(), Some(""));
    }

    #[test]
    fn buffers_are_per_thread() {
        clear();
        append(&"main");
        thread::spawn(|| {
            assert_eq!(snapshot().as_deref(), Some(""));
            append(&"worker");
        })
        .join()
        .unwrap();
        assert_eq!(snapshot().as_deref(), Some("main"));
        clear();
    }

    #[test]
    fn reentrant_display_is_ignored() {
        struct Nested;
        impl fmt::Display for Nested {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Buffer is mutably borrowed here; the inner append must not panic.
                append(&"inner");
                f.write_str("outer")
            }
        }

        clear();
        append(&Nested);
        assert_eq!(snapshot().as_deref(), Some("outer"));
        clear();
    }
}
