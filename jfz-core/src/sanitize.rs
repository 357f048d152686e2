//! Filesystem-safe name sanitization

/// Characters forbidden in file names on common filesystems
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum length of a sanitized path segment, in characters
const MAX_SEGMENT_LEN: usize = 255;

/// Map a raw path segment to a filesystem-safe segment
///
/// Total and idempotent: `sanitize(sanitize(x)) == sanitize(x)` for any input.
/// Rules, applied in order:
///
/// 1. Forbidden characters (`< > : " / \ | ? *`) and control characters
///    become `_`.
/// 2. Runs of whitespace become a single `_`.
/// 3. Runs of `_` collapse into one.
/// 4. A leading or trailing `_` is trimmed.
/// 5. The result is truncated to 255 characters.
///
/// Sanitization performs no de-duplication: two distinct raw segments may map
/// to the same safe segment.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_SEGMENT_LEN));
    let mut last_was_underscore = false;

    for ch in raw.chars() {
        let replaced = FORBIDDEN.contains(&ch)
            || ch.is_control()
            || ch.is_whitespace()
            || ch == '_';
        if replaced {
            // Runs of forbidden characters, whitespace, and underscores all
            // collapse into a single underscore.
            if !last_was_underscore {
                out.push('_');
                last_was_underscore = true;
            }
        } else {
            out.push(ch);
            last_was_underscore = false;
        }
    }

    let trimmed = out.strip_prefix('_').unwrap_or(&out);
    let trimmed = trimmed.strip_suffix('_').unwrap_or(trimmed);

    if trimmed.chars().count() <= MAX_SEGMENT_LEN {
        return trimmed.to_string();
    }

    let mut truncated: String = trimmed.chars().take(MAX_SEGMENT_LEN).collect();
    // Truncation can re-expose a trailing underscore; trim it so the result
    // stays a fixed point of this function.
    if truncated.ends_with('_') {
        truncated.pop();
    }
    truncated
}
