const FALLBACK_ORIGIN: &str = "http://localhost:3000";

/// Get the base HTTP URL (e.g., "http://localhost:3000" or "https://myapp.com")
pub fn get_base_url() -> String {
    let Some(window) = web_sys::window() else {
        return FALLBACK_ORIGIN.to_string();
    };
    let location = window.location();

    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:3000".to_string());

    format!("{}//{}", protocol, host)
}

/// Current wall-clock time as unix seconds
pub fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Format a count with thousands separators (e.g., 12847 -> "12,847")
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect::<Vec<_>>()
        .join(",")
}
