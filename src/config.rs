//! Per-call parser configuration.
//!
//! Every knob lives on [`ParseConfig`] and is passed explicitly into each
//! parse call — there is no process-wide parser state, so concurrent parses
//! of independent documents cannot observe each other.

/// Default maximum element nesting depth.
///
/// SEC-003: Prevents stack/memory exhaustion from maliciously deep documents.
/// Real feeds nest a handful of levels; 50 leaves generous headroom.
const MAX_DOCUMENT_DEPTH: usize = 50;

/// Configuration for a single parse call.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Maximum allowed element nesting depth. Documents nested deeper are
    /// rejected as malformed.
    pub max_depth: usize,

    /// Strip terminal control characters and ANSI escape sequences from
    /// extracted text fields. Feed text ends up in terminals and logs, so
    /// this defaults to on; turn it off to get field content byte-for-byte.
    pub strip_control_chars: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DOCUMENT_DEPTH,
            strip_control_chars: true,
        }
    }
}
