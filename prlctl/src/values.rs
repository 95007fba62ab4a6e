//! Scalar value parsers shared by the option handlers.
//!
//! Every parser returns `None` on malformed input; the caller turns that
//! into an "incorrect value" diagnostic naming its own option.

use std::ops::Range;

pub const MIB: u64 = 1024 * 1024;

/// Value stored for "unlimited" and the cap for every two-value limit.
pub const LIMIT_MAX: u64 = i64::MAX as u64;

// ============================================================================
// Numbers
// ============================================================================

/// `on`/`yes` and `off`/`no`.
pub fn on_off(s: &str) -> Option<bool> {
    match s {
        "on" | "yes" => Some(true),
        "off" | "no" => Some(false),
        _ => None,
    }
}

/// Strict `on`/`off`, for options that never accepted yes/no.
pub fn strict_on_off(s: &str) -> Option<bool> {
    match s {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Unsigned decimal, whole string.
pub fn parse_uint(s: &str) -> Option<u32> {
    let (digits, tail) = split_digits(s);
    if digits.is_empty() || !tail.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Signed decimal used for positions and pass-through indices.
pub fn parse_int(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

/// Byte multiplier for a size suffix.
pub fn multiplier(c: char) -> Option<u64> {
    match c.to_ascii_lowercase() {
        'b' => Some(1),
        'k' => Some(1 << 10),
        'm' => Some(1 << 20),
        'g' => Some(1 << 30),
        't' => Some(1 << 40),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    /// Result in MiB; a bare number is already MiB.
    Mb,
    /// Result in bytes; a bare number means MiB.
    Bytes,
}

/// `N` or `N<b|k|m|g|t>` with a single trailing suffix.
pub fn parse_size(s: &str, unit: SizeUnit) -> Option<u64> {
    let (digits, tail) = split_digits(s);
    if digits.is_empty() {
        return None;
    }
    let n: u64 = digits.parse().ok()?;
    let mut chars = tail.chars();
    match (chars.next(), chars.next()) {
        (None, _) => match unit {
            SizeUnit::Mb => Some(n),
            SizeUnit::Bytes => n.checked_mul(MIB),
        },
        (Some(c), None) => {
            let bytes = n.checked_mul(multiplier(c)?)?;
            match unit {
                SizeUnit::Mb => Some(bytes / MIB),
                SizeUnit::Bytes => Some(bytes),
            }
        }
        _ => None,
    }
}

fn parse_limit_part(s: &str, div: u64, def_div: u64) -> Option<u64> {
    if s == "unlimited" {
        return Some(LIMIT_MAX);
    }
    let (digits, tail) = split_digits(s);
    if digits.is_empty() {
        return None;
    }
    let n: u64 = digits.parse().ok()?;
    let mut chars = tail.chars();
    let value = match (chars.next(), chars.next()) {
        (None, _) => n / def_div,
        (Some(c), None) => n.saturating_mul(multiplier(c)?) / div,
        _ => return None,
    };
    Some(value.min(LIMIT_MAX))
}

/// `barrier[:limit]`, each side a number with optional size suffix or
/// `unlimited`. Suffixed values are divided by `div`, bare ones by
/// `def_div`. A missing limit equals the barrier.
pub fn parse_two_longs(s: &str, div: u64, def_div: u64) -> Option<(u64, u64)> {
    let (first, second) = match s.split_once(':') {
        Some((a, b)) => (a, Some(b)),
        None => (s, None),
    };
    let barrier = parse_limit_part(first, div, def_div)?;
    let limit = match second {
        Some(b) => parse_limit_part(b, div, def_div)?,
        None => barrier,
    };
    Some((barrier, limit))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuLimit {
    Percent(u32),
    Mhz(u32),
}

/// `N`, `N%`, `Nm` or `Nmhz`.
pub fn parse_cpulimit(s: &str) -> Option<CpuLimit> {
    let (digits, tail) = split_digits(s);
    if digits.is_empty() {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    match tail {
        "" | "%" => Some(CpuLimit::Percent(n)),
        "m" | "mhz" => Some(CpuLimit::Mhz(n)),
        _ => None,
    }
}

// ============================================================================
// Identifiers and addresses
// ============================================================================

/// `auto`, or six hex octets with optional `:` separators. Returned
/// without separators, case preserved.
pub fn parse_mac(s: &str) -> Option<String> {
    if s == "auto" {
        return Some("auto".to_string());
    }
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(12);
    let mut i = 0;
    while i < bytes.len() {
        let pair = bytes.get(i..i + 2)?;
        if !pair.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        out.extend(pair.iter().map(|&b| b as char));
        i += 2;
        if i < bytes.len() && bytes[i] == b':' {
            i += 1;
        }
    }
    if out.len() != 12 {
        return None;
    }
    Some(out)
}

pub fn is_uuid(s: &str) -> bool {
    let inner = match s.len() {
        36 => s,
        38 if s.starts_with('{') && s.ends_with('}') => &s[1..37],
        _ => return false,
    };
    inner.char_indices().all(|(i, c)| match i {
        8 | 13 | 18 | 23 => c == '-',
        _ => c.is_ascii_hexdigit(),
    })
}

/// Braced form of a UUID given with or without braces.
pub fn normalize_uuid(s: &str) -> Option<String> {
    if !is_uuid(s) {
        return None;
    }
    if s.starts_with('{') {
        Some(s.to_string())
    } else {
        Some(format!("{{{}}}", s))
    }
}

/// IPv4 passes through; IPv6 is upper-cased and `::` is expanded to the
/// zero groups it stands for. Malformed IPv6 is returned upper-cased.
pub fn normalize_ip(s: &str) -> String {
    if !s.contains(':') {
        return s.to_string();
    }
    let upper = s.to_ascii_uppercase();
    let (head, tail) = match upper.split_once("::") {
        Some(parts) => parts,
        None => return upper,
    };
    if tail.contains("::") {
        return upper;
    }
    let groups = |part: &str| -> Vec<String> {
        if part.is_empty() {
            Vec::new()
        } else {
            part.split(':').map(|g| g.to_string()).collect()
        }
    };
    let head = groups(head);
    let tail = groups(tail);
    if head.len() + tail.len() >= 8 {
        return upper;
    }
    let zeros = 8 - head.len() - tail.len();
    let mut all = head;
    all.extend(std::iter::repeat("0".to_string()).take(zeros));
    all.extend(tail);
    all.join(":")
}

/// `host:port` or `[v6addr]:port`.
pub fn check_address(s: &str) -> bool {
    let (host, port) = if let Some(inner) = s.strip_prefix('[') {
        match inner.split_once("]:") {
            Some(parts) => parts,
            None => return false,
        }
    } else {
        match s.rsplit_once(':') {
            Some(parts) => parts,
            None => return false,
        }
    };
    !host.is_empty() && port.parse::<u16>().is_ok()
}

/// Split on any of `delims`, dropping empty tokens. With `once`, the
/// second token is the rest of the string.
pub fn split(s: &str, delims: &str, once: bool) -> Vec<String> {
    let is_delim = |c: char| delims.contains(c);
    let mut out = Vec::new();
    let mut rest = s.trim_start_matches(is_delim);
    while !rest.is_empty() {
        if once && !out.is_empty() {
            out.push(rest.to_string());
            break;
        }
        match rest.find(is_delim) {
            Some(pos) => {
                out.push(rest[..pos].to_string());
                rest = rest[pos..].trim_start_matches(is_delim);
            }
            None => {
                out.push(rest.to_string());
                break;
            }
        }
    }
    out
}

// ============================================================================
// Login strings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub user: String,
    pub password: Option<String>,
    pub server: String,
    pub port: Option<u16>,
    /// Where the password sits inside the parsed text.
    pub password_range: Option<Range<usize>>,
}

/// `[user[:password]@]server[:port]`, with `[v6addr]:port` or a bare
/// IPv6 address for the server. The user defaults to `root`.
pub fn parse_auth(text: &str) -> Option<Auth> {
    let (user_part, host) = match text.rfind('@') {
        Some(pos) => (Some(&text[..pos]), &text[pos + 1..]),
        None => (None, text),
    };

    let (server, port) = if let Some(inner) = host.strip_prefix('[') {
        let close = inner.rfind(']')?;
        let after = &inner[close + 1..];
        let port = match after.strip_prefix(':') {
            Some(p) => Some(p),
            None if after.is_empty() => None,
            None => return None,
        };
        (&inner[..close], port)
    } else if host.matches(':').count() > 1 {
        (host, None)
    } else {
        match host.split_once(':') {
            Some((server, port)) => (server, Some(port)),
            None => (host, None),
        }
    };
    let port = match port {
        Some(p) => Some(p.parse::<u16>().ok()?),
        None => None,
    };
    if server.len() <= 1 {
        return None;
    }

    let (user, password, password_range) = match user_part {
        Some(u) => match u.rfind(':') {
            Some(pos) => (&u[..pos], Some(&u[pos + 1..]), Some(pos + 1..u.len())),
            None => (u, None, None),
        },
        None => ("root", None, None),
    };
    if user.is_empty() {
        return None;
    }

    Some(Auth {
        user: user.to_string(),
        password: password.map(|p| p.to_string()),
        server: server.to_string(),
        port,
        password_range,
    })
}
