/// Reduce a website-like string to a bare lower-case domain.
///
/// Scheme, `www.` prefixes, userinfo, port, path, query and fragment are
/// removed, so `"https://www.Acme.com/path?x=1"` and `"acme.com"` both give
/// `"acme.com"`. The host text is kept as written: umlaut domains stay
/// readable and numeric hosts are not expanded to IP addresses. Blank input
/// gives the empty string. The result is a fixed point: feeding it back in
/// returns it unchanged.
pub fn canonicalize_website(url_like: Option<&str>) -> String {
    let Some(raw) = url_like.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };

    let lowered = raw.to_lowercase();
    let without_scheme = lowered
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(&lowered);
    let host = strip_www(strip_userinfo(authority_text(without_scheme)));
    strip_port(host).trim_end().to_string()
}

/// Trim and drop every leading `www.` label.
fn strip_www(host: &str) -> &str {
    let mut host = host.trim();
    while let Some(rest) = host.strip_prefix("www.") {
        host = rest.trim();
    }
    host
}

/// Text before the first path, query or fragment delimiter.
fn authority_text(rest: &str) -> &str {
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

fn strip_userinfo(authority: &str) -> &str {
    authority.rsplit_once('@').map_or(authority, |(_, host)| host)
}

/// Drop a trailing `:port`. Bracketed IPv6 hosts keep their brackets; other
/// text with more than one `:` is left alone.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Identity key of a normalized record: its canonical website domain.
///
/// Records sharing a non-empty key are the same organization. Records without
/// a usable website all share the empty key.
pub fn canonical_key(website: Option<&str>) -> String {
    canonicalize_website(website)
}
