use axum::http::{header::COOKIE, HeaderMap};

/// Returns the value of the named cookie from the request's `Cookie` headers.
pub fn read<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

pub fn build(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut parts = vec![
        format!("{}={}", name, value),
        "Path=/".to_string(),
        "HttpOnly".to_string(),
        "SameSite=Lax".to_string(),
        format!("Max-Age={}", max_age_secs),
    ];
    if secure {
        parts.push("Secure".to_string());
    }
    parts.join("; ")
}

pub fn expire(name: &str, secure: bool) -> String {
    build(name, "", 0, secure)
}
