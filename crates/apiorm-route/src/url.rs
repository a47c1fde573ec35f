//! Slash-safe URL assembly
//!
//! Every fragment is trimmed of slashes before joining, so configured
//! fragments may carry leading or trailing slashes freely. The domain only
//! loses its trailing slashes: a scheme (`http://`) or a scheme-relative
//! prefix (`//host`) is kept verbatim.

/// Strip leading and trailing slashes
#[inline]
#[must_use]
pub fn trim_slashes(fragment: &str) -> &str {
    fragment.trim_matches('/')
}

/// Join a base with path fragments using single `/` separators
///
/// Empty fragments (after trimming) are dropped.
///
/// ```
/// use apiorm_route::url::join;
///
/// assert_eq!(join("http://example.com/", ["/api/", "v1"]), "http://example.com/api/v1");
/// assert_eq!(join("//example.com", ["", "v1/"]), "//example.com/v1");
/// assert_eq!(join("", ["api"]), "/api");
/// ```
#[must_use]
pub fn join<'a, I>(base: &str, fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = base.trim_end_matches('/').to_string();
    for fragment in compact(fragments) {
        out.push('/');
        out.push_str(fragment);
    }
    out
}

/// Build an absolute path from segments: `["users", "first"]` -> `/users/first`
#[must_use]
pub fn path<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = join("", segments);
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Append a route template to a root URL
///
/// The root loses its trailing slashes; the template keeps a single leading one.
#[must_use]
pub fn append_template(root: &str, template: &str) -> String {
    let root = root.trim_end_matches('/');
    let template = template.trim_start_matches('/');
    format!("{root}/{template}")
}

/// Drop empty fragments and trim the rest
fn compact<'a, I>(fragments: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .map(trim_slashes)
        .filter(|fragment| !fragment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_both_ends() {
        assert_eq!(trim_slashes("/api/"), "api");
        assert_eq!(trim_slashes("//"), "");
        assert_eq!(trim_slashes("a/b"), "a/b");
    }

    #[test]
    fn join_without_base() {
        assert_eq!(join("", ["api", "v1"]), "/api/v1");
        assert_eq!(join("", std::iter::empty()), "");
    }

    #[test]
    fn join_keeps_scheme() {
        assert_eq!(join("http://example.com", ["api"]), "http://example.com/api");
        assert_eq!(join("//example.com/", ["api/"]), "//example.com/api");
    }

    #[test]
    fn path_from_segments() {
        assert_eq!(path(["users", "", "first"]), "/users/first");
        assert_eq!(path(["/user/", ":id", "delete/"]), "/user/:id/delete");
        assert_eq!(path(std::iter::empty()), "/");
    }

    #[test]
    fn append_template_single_separator() {
        assert_eq!(append_template("", "/users"), "/users");
        assert_eq!(append_template("http://example.com/", "/users"), "http://example.com/users");
        assert_eq!(append_template("/api", "users/first"), "/api/users/first");
    }
}
