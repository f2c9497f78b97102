//! Share links of the form `<origin>/wish/<id>`.

const WISH_PREFIX: &str = "/wish/";

/// Builds the public link for a greeting id
pub fn share_link(origin: &str, id: &str) -> String {
    format!("{}{}{}", origin.trim_end_matches('/'), WISH_PREFIX, id)
}

/// Extracts the greeting id from a `/wish/<id>` path
pub fn wish_id_from_path(path: &str) -> Option<&str> {
    let id = path.strip_prefix(WISH_PREFIX)?.trim_end_matches('/');
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}
