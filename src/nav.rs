//! Navigation link helpers

/// Whether activating a link with this `href` leaves the page.
///
/// Empty hrefs, a bare `#` and `javascript:` placeholders are used for
/// in-page widgets and do not navigate.
pub fn is_navigable_href(href: Option<&str>) -> bool {
    let Some(href) = href.map(str::trim) else {
        return false;
    };
    if href.is_empty() || href == "#" {
        return false;
    }
    !href
        .get(..11)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

/// A sidebar link is active when it points exactly at the current path
pub fn is_active_link(href: Option<&str>, pathname: &str) -> bool {
    href.is_some_and(|href| href == pathname)
}
