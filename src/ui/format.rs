//! Display strings derived from raw peer fields

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SECS_PER_DAY: i64 = 86_400;

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Format a byte count with 1024-based units: "0 B", "812 B", "1.5 KB", "3.2 MB"
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Time since `connected_since` (unix seconds) as of `now`.
///
/// Up to one day: `HH:MM:SS`. Beyond that: fractional days, e.g. `2.5 days`.
/// Clock skew that puts the connection in the future shows as zero.
pub fn format_connection_duration(connected_since: i64, now: i64) -> String {
    let secs = now.saturating_sub(connected_since).max(0);
    if secs <= SECS_PER_DAY {
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{:.1} days", secs as f64 / SECS_PER_DAY as f64)
    }
}

/// Round trip in seconds with millisecond precision, or `N/A`
pub fn format_ping(ping: Option<f64>) -> String {
    match ping {
        Some(secs) if secs.is_finite() && secs >= 0.0 => format!("{:.3}", secs),
        _ => "N/A".to_string(),
    }
}

/// Keep at most `max` display columns of `s`, appending "..." when cut
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = take_width(s, max);
    out.push_str("...");
    out
}

/// Cut an address to `max` display columns with "..." in the middle, so the
/// `:port` suffix stays visible on long onion, I2P and IPv6 addresses
pub fn truncate_address(addr: &str, max: usize) -> String {
    if addr.width() <= max {
        return addr.to_string();
    }
    let port = match addr.rfind(':') {
        Some(i) if is_port(&addr[i + 1..]) => &addr[i..],
        _ => "",
    };
    let head = max.saturating_sub(port.len() + 3);
    if head == 0 {
        return take_width(addr, max);
    }
    format!("{}...{}", take_width(addr, head), port)
}

fn is_port(s: &str) -> bool {
    !s.is_empty() && s.len() <= 5 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Block or header height, `-` while the node does not know it yet
pub fn format_height(height: i64) -> String {
    if height < 0 {
        "-".to_string()
    } else {
        height.to_string()
    }
}

/// Pad (or cut) `s` to exactly `width` display columns
pub fn fit(s: &str, width: usize, align: Align) -> String {
    let cut = if s.width() > width { take_width(s, width) } else { s.to_string() };
    let pad = " ".repeat(width.saturating_sub(cut.width()));
    match align {
        Align::Left => format!("{}{}", cut, pad),
        Align::Right => format!("{}{}", pad, cut),
    }
}

fn take_width(s: &str, max: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_bytes(2 << 40), "2.0 TB");
        assert_eq!(format_bytes(2048 << 40), "2048.0 TB");
    }

    fn displayed_magnitude(s: &str) -> f64 {
        let (number, unit) = s.split_once(' ').unwrap();
        let scale = match unit {
            "B" => 1.0,
            "KB" => 1024.0,
            "MB" => 1024.0 * 1024.0,
            "GB" => 1024.0 * 1024.0 * 1024.0,
            "TB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
            other => panic!("unexpected unit {other}"),
        };
        number.parse::<f64>().unwrap() * scale
    }

    #[test]
    fn bytes_magnitude_never_decreases() {
        let mut samples: Vec<u64> = (0..4096).collect();
        for shift in 10..42 {
            let base = 1u64 << shift;
            samples.extend([base - 1, base, base + 1, base + base / 2, base * 1000 / 1024]);
        }
        samples.sort_unstable();

        let mut last = -1.0;
        for bytes in samples {
            let shown = displayed_magnitude(&format_bytes(bytes));
            assert!(shown >= last, "{bytes} shown as {}", format_bytes(bytes));
            last = shown;
        }
    }

    #[test]
    fn connection_duration() {
        let now = 1_700_000_000;
        assert_eq!(format_connection_duration(now, now), "00:00:00");
        assert_eq!(format_connection_duration(now - 59, now), "00:00:59");
        assert_eq!(format_connection_duration(now - 3_725, now), "01:02:05");
        assert_eq!(format_connection_duration(now - 86_400, now), "24:00:00");
        assert_eq!(format_connection_duration(now - 86_401, now), "1.0 days");
        assert_eq!(format_connection_duration(now - 216_000, now), "2.5 days");
        assert_eq!(format_connection_duration(now + 30, now), "00:00:00");
    }

    #[test]
    fn ping() {
        assert_eq!(format_ping(Some(0.02514)), "0.025");
        assert_eq!(format_ping(Some(1.0)), "1.000");
        assert_eq!(format_ping(None), "N/A");
        assert_eq!(format_ping(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn long_addresses_keep_their_port() {
        let onion = "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopnpyyd.onion:8333";
        let cut = truncate_address(onion, 24);
        assert_eq!(cut, "vww6ybal4bd7szmg...:8333");
        assert_eq!(cut.width(), 24);

        let ipv6 = "[2001:db8:85a3:0:0:8a2e:370:7334]:8333";
        assert_eq!(truncate_address(ipv6, 24), "[2001:db8:85a3:0...:8333");

        assert_eq!(truncate_address("203.0.113.9:8333", 24), "203.0.113.9:8333");
        // No numeric port: plain cut with the marker at the end
        assert_eq!(
            truncate_address("abcdefghijklmnopqrstuvwxyz0123.i2p", 24),
            "abcdefghijklmnopqrstu..."
        );
    }

    #[test]
    fn heights() {
        assert_eq!(format_height(845_120), "845120");
        assert_eq!(format_height(0), "0");
        assert_eq!(format_height(-1), "-");
    }

    #[test]
    fn truncation_and_padding() {
        assert_eq!(truncate_with_ellipsis("/Satoshi:27.0.0/", 20), "/Satoshi:27.0.0/");
        assert_eq!(
            truncate_with_ellipsis("/Satoshi:27.0.0(some-long-comment)/", 20),
            "/Satoshi:27.0.0(some...",
        );
        assert_eq!(fit("abc", 5, Align::Left), "abc  ");
        assert_eq!(fit("abc", 5, Align::Right), "  abc");
        assert_eq!(fit("abcdef", 4, Align::Left), "abcd");
        // Wide characters count as two columns
        assert_eq!(fit("節点", 5, Align::Left), "節点 ");
        assert_eq!(fit("節点", 3, Align::Left), "節 ");
    }
}
