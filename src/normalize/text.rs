//! Text field sanitization.
//!
//! Markup in body fields is preserved as-is (entity decoding already
//! happened, once, while the document tree was built). What gets removed
//! here are terminal control characters and ANSI escape sequences: feed
//! text routinely ends up in terminals and log files, and feeds from the
//! open web do carry hostile or accidental control bytes.

use std::borrow::Cow;

use crate::config::ParseConfig;

/// Trims a raw field value and applies control-character stripping when the
/// config asks for it. All extracted text fields pass through here.
pub(crate) fn clean_text(raw: &str, config: &ParseConfig) -> String {
    let trimmed = raw.trim();
    if config.strip_control_chars {
        strip_control_chars(trimmed).into_owned()
    } else {
        trimmed.to_string()
    }
}

/// Characters removed outright: DEL and C0 controls except tab/LF/CR.
/// ESC is included, so a bare escape never survives.
fn banned(c: char) -> bool {
    c == '\u{7f}' || (c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
}

/// Removes control characters plus whole ANSI CSI (`ESC [` … final byte) and
/// OSC (`ESC ]` … BEL or `ESC \`) sequences. Tab, newline and carriage
/// return are kept. Clean input (the common case) is returned borrowed.
pub(crate) fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(banned) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            match chars.peek() {
                Some('[') => {
                    // CSI: parameter/intermediate chars until a final byte
                    // in 0x40..=0x7e.
                    chars.next();
                    for n in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&n) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    // OSC: consume until BEL or ST (ESC \).
                    chars.next();
                    while let Some(n) = chars.next() {
                        if n == '\u{07}' {
                            break;
                        }
                        if n == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                // Bare ESC: drop it, keep what follows.
                _ => {}
            }
        } else if !banned(c) {
            out.push(c);
        }
    }

    Cow::Owned(out)
}
