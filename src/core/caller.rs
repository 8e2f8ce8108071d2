//! Best-effort caller location for debug entries

use std::backtrace::Backtrace;
use std::panic::Location;

/// Where a debug entry was emitted from.
///
/// Every field is best effort: anything that cannot be resolved is left empty
/// (or zero) rather than reported as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerInfo {
    pub file: String,
    pub line: u32,
    pub function: String,
    pub stack_trace: String,
}

impl CallerInfo {
    /// Capture the stack and resolve the function that contains `location`.
    pub fn capture(location: &Location<'_>) -> Self {
        let stack_trace = Backtrace::force_capture().to_string();
        let function = function_at(&stack_trace, location.file(), location.line())
            .unwrap_or_default();

        Self {
            file: location.file().to_string(),
            line: location.line(),
            function,
            stack_trace,
        }
    }
}

/// `"rust/<crate>-<version>"`, reported as the runtime of debug entries.
pub fn runtime_version() -> String {
    format!(
        "rust/{}-{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

/// Find the symbol whose source position is `file:line` in a rendered backtrace.
///
/// Frames are rendered as a symbol line followed by an `at path:line:col` line.
fn function_at(trace: &str, file: &str, line: u32) -> Option<String> {
    let mut symbol: Option<&str> = None;

    for raw in trace.lines() {
        let text = raw.trim();
        if let Some(position) = text.strip_prefix("at ") {
            let sym = match symbol {
                Some(sym) => sym,
                None => continue,
            };
            if position_matches(position, file, line) {
                return Some(short_name(sym));
            }
        } else if !text.is_empty() {
            symbol = Some(strip_frame_index(text));
        }
    }
    None
}

fn strip_frame_index(text: &str) -> &str {
    match text.split_once(": ") {
        Some((index, rest)) if index.chars().all(|c| c.is_ascii_digit()) => rest,
        _ => text,
    }
}

fn position_matches(position: &str, file: &str, line: u32) -> bool {
    // path:line:col, where the path itself may contain ':'
    let mut parts = position.rsplitn(3, ':');
    let _col = parts.next();
    let frame_line = parts.next().and_then(|l| l.parse::<u32>().ok());
    let path = parts.next().unwrap_or_default();

    frame_line == Some(line)
        && !file.is_empty()
        && path.replace('\\', "/").ends_with(&file.replace('\\', "/"))
}

/// Reduce `crate::module::function::h0123abcd` to `function`.
fn short_name(symbol: &str) -> String {
    let mut segments: Vec<&str> = symbol.split("::").collect();

    if let Some(last) = segments.last() {
        let is_hash = last.len() == 17
            && last.starts_with('h')
            && last[1..].chars().all(|c| c.is_ascii_hexdigit());
        if is_hash {
            segments.pop();
        }
    }
    while segments.last().is_some_and(|s| s.starts_with("{{")) {
        segments.pop();
    }

    segments.last().map(|s| s.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:9
   1: logharbour::core::caller::CallerInfo::capture
             at ./src/core/caller.rs:21:27
   2: my_app::handlers::login::{{closure}}
             at ./src/handlers.rs:88:13
   3: my_app::main::h0123456789abcdef
             at ./src/main.rs:10:5
   4: core::ops::function::FnOnce::call_once";

    #[test]
    fn test_function_resolved_from_position() {
        assert_eq!(function_at(TRACE, "src/main.rs", 10).as_deref(), Some("main"));
        assert_eq!(
            function_at(TRACE, "src/handlers.rs", 88).as_deref(),
            Some("login")
        );
    }

    #[test]
    fn test_unmatched_position_is_none() {
        assert_eq!(function_at(TRACE, "src/main.rs", 11), None);
        assert_eq!(function_at(TRACE, "src/other.rs", 10), None);
        assert_eq!(function_at("", "src/main.rs", 10), None);
    }

    #[test]
    fn test_capture_uses_location() {
        let location = Location::caller();
        let info = CallerInfo::capture(location);

        assert_eq!(info.file, location.file());
        assert_eq!(info.line, location.line());
        assert!(!info.stack_trace.is_empty());
    }

    #[test]
    fn test_runtime_version() {
        assert!(runtime_version().starts_with("rust/logharbour-"));
    }
}
