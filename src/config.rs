/// Origin of the greeting server, fixed at build time through `WISHES_ORIGIN`
pub const API_ORIGIN: &str = match option_env!("WISHES_ORIGIN") {
    Some(origin) => origin,
    None => "http://localhost:5000",
};

/// Absolute URL for a server path such as `/api/greetings` or `/uploads/x.png`
pub fn server_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return path.to_string();
    }
    format!("{}{}", origin.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url() {
        assert_eq!(
            server_url("http://localhost:5000/", "/uploads/a.png"),
            "http://localhost:5000/uploads/a.png"
        );
        assert_eq!(
            server_url("http://localhost:5000", "https://cdn.example/a.png"),
            "https://cdn.example/a.png"
        );
    }
}
