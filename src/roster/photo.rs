// src/roster/photo.rs
//
// Photo cells hold either nothing, a file-host share link, or a direct URL.
// Share links are rewritten into a URL an <img>/texture loader can fetch.
// No network access happens here.

/// Direct-view template for file-host ids.
pub const DIRECT_VIEW_TEMPLATE: &str = "https://drive.google.com/uc?export=view&id={id}";

/// `None` means "no photo"; choosing a placeholder is the renderer's job.
pub fn resolve_photo(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }

    match share_link_id(value) {
        Some(id) => Some(DIRECT_VIEW_TEMPLATE.replace("{id}", id)),
        // plain URL, or a share link we could not read an id from
        None => Some(value.to_string()),
    }
}

/// Hosts whose share links need rewriting. Everything else is left alone.
const SHARE_HOSTS: &[&str] = &["drive.google.com", "docs.google.com"];

/// Lowercased host of `scheme://[user@]host[:port]/...`.
fn host_of(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let authority = &rest[..rest.find(['/', '?', '#']).unwrap_or(rest.len())];
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host.split(':').next().unwrap_or(host);
    Some(host.to_ascii_lowercase())
}

/// File id from `.../d/<id>/...` or a `?id=<id>` / `&id=<id>` query parameter
/// of a known share host. An empty segment counts as no id.
fn share_link_id(url: &str) -> Option<&str> {
    let host = host_of(url)?;
    if !SHARE_HOSTS.contains(&host.as_str()) {
        return None;
    }
    if let Some(pos) = url.find("/d/") {
        if let Some(id) = segment(&url[pos + 3..]) {
            return Some(id);
        }
    }
    for marker in ["?id=", "&id="] {
        if let Some(pos) = url.find(marker) {
            if let Some(id) = segment(&url[pos + marker.len()..]) {
                return Some(id);
            }
        }
    }
    None
}

fn segment(rest: &str) -> Option<&str> {
    let end = rest.find(['/', '&', '?', '#']).unwrap_or(rest.len());
    let id = rest[..end].trim();
    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(id: &str) -> Option<String> {
        Some(DIRECT_VIEW_TEMPLATE.replace("{id}", id))
    }

    #[test]
    fn absent_values_mean_no_photo() {
        assert_eq!(resolve_photo(None), None);
        assert_eq!(resolve_photo(Some("")), None);
        assert_eq!(resolve_photo(Some("   ")), None);
    }

    #[test]
    fn file_path_share_link() {
        let url = "https://drive.google.com/file/d/ABC123/view?usp=sharing";
        assert_eq!(resolve_photo(Some(url)), direct("ABC123"));
        assert_eq!(resolve_photo(Some("https://drive.google.com/file/d/ABC123")), direct("ABC123"));
    }

    #[test]
    fn query_parameter_share_link() {
        assert_eq!(resolve_photo(Some("https://drive.google.com/open?id=XYZ_9-a")), direct("XYZ_9-a"));
        assert_eq!(resolve_photo(Some("https://drive.google.com/uc?export=view&id=Q1&x=2")), direct("Q1"));
    }

    #[test]
    fn rewriting_is_stable_on_its_own_output() {
        let once = resolve_photo(Some("https://drive.google.com/file/d/ABC123/view"));
        assert_eq!(resolve_photo(once.as_deref()), once);
    }

    #[test]
    fn plain_urls_pass_through() {
        let url = "https://example.com/x.jpg";
        assert_eq!(resolve_photo(Some(url)), Some(url.to_string()));
        assert_eq!(resolve_photo(Some("  https://example.com/x.jpg ")), Some(url.to_string()));
    }

    #[test]
    fn markers_on_other_hosts_are_not_share_links() {
        for url in [
            "https://cdn.example.com/d/avatar.jpg",
            "https://example.com/img.php?id=42",
            "https://example.com/img.php?size=2&id=42",
            "https://drive.google.com.evil.net/file/d/ABC/view",
        ] {
            assert_eq!(resolve_photo(Some(url)), Some(url.to_string()));
        }
    }

    #[test]
    fn share_host_match_ignores_case_port_and_userinfo() {
        assert_eq!(resolve_photo(Some("https://Drive.Google.com/file/d/K1/view")), direct("K1"));
        assert_eq!(resolve_photo(Some("https://u@docs.google.com:443/open?id=K2")), direct("K2"));
        assert_eq!(resolve_photo(Some("drive.google.com/file/d/K3")), Some(s!("drive.google.com/file/d/K3")));
    }

    #[test]
    fn marker_without_id_degrades_to_original() {
        let url = "https://drive.google.com/file/d//view";
        assert_eq!(resolve_photo(Some(url)), Some(url.to_string()));
        let url = "https://drive.google.com/open?id=&usp=x";
        assert_eq!(resolve_photo(Some(url)), Some(url.to_string()));
    }
}
