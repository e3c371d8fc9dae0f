//! Utility functions

/// Strips query string and fragment from a navigation target.
///
/// Returns `None` when the result is not an absolute path.
pub fn route_path(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..end].trim();
    if !path.starts_with('/') {
        return None;
    }
    Some(trim_trailing_slash(path))
}

/// Drops trailing `/` from a path, keeping a bare `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let visible: String = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 }).collect();
        format!("{}***{}", visible, domain)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path_strips_query_and_fragment() {
        assert_eq!(route_path("/configuration/users?page=2"), Some("/configuration/users"));
        assert_eq!(route_path("/reports#top"), Some("/reports"));
        assert_eq!(route_path("/configuration/users/"), Some("/configuration/users"));
        assert_eq!(route_path("/"), Some("/"));
        assert_eq!(route_path("///"), Some("/"));
    }

    #[test]
    fn test_route_path_rejects_relative() {
        assert_eq!(route_path("dashboard"), None);
        assert_eq!(route_path(""), None);
    }

    #[test]
    fn test_trim_trailing_slash() {
        assert_eq!(trim_trailing_slash("/reports/"), "/reports");
        assert_eq!(trim_trailing_slash("/reports"), "/reports");
        assert_eq!(trim_trailing_slash("/"), "/");
        assert_eq!(trim_trailing_slash("//"), "/");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("admin@example.com"), "ad***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("invalid"), "***");
    }
}
