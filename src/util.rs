use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, the timestamp unit used by every
/// persisted record.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Identifier for records: `id-<timestamp base36>-<random hex>`.
pub fn uid() -> String {
    format!("id-{}-{:08x}", to_base36(now_ms()), rand::random::<u32>())
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Lowercases and keeps only latin letters, digits and cyrillic а-я/ё; any run
/// of other characters collapses to a single hyphen. Never returns an empty
/// string.
pub fn slugify(value: &str) -> String {
    let mut out = String::new();
    let mut pending_hyphen = false;
    for ch in value.trim().to_lowercase().chars() {
        let keep = ch.is_ascii_lowercase()
            || ch.is_ascii_digit()
            || ('а'..='я').contains(&ch)
            || ch == 'ё';
        if keep {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    if out.is_empty() { "section".to_string() } else { out }
}

/// Human-readable duration, floored at one second.
pub fn format_duration(ms: u64) -> String {
    let seconds = ((ms as f64 / 1000.0).round() as u64).max(1);
    let m = seconds / 60;
    let s = seconds % 60;
    if m > 0 {
        format!("{m} мин {s} с")
    } else {
        format!("{s} с")
    }
}
