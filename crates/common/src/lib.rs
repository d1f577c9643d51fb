//! Shared path utilities for the Redfish VFS crates.
//!
//! Every layer of the VFS addresses resources and properties with
//! `/`-separated canonical paths under the Redfish service root. The helpers
//! here are pure string manipulation: no network, no cache, no JSON.

/// Root path of the Redfish service. All canonical paths live under it.
pub const REDFISH_ROOT: &str = "/redfish/v1";

/// Normalize a path into canonical form: leading slash, no trailing slash,
/// no doubled slashes. An empty path maps to the service root; the bare
/// filesystem root `/` is preserved.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return REDFISH_ROOT.to_string();
    }

    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        // Input was nothing but slashes.
        return "/".to_string();
    }
    out
}

/// Join a target onto a base path and normalize the result.
///
/// An absolute target replaces the base. `.` and `..` segments are resolved
/// lexically (`..` never climbs above the filesystem root). The resolver
/// itself never interprets dot segments; frontends call this before handing
/// paths to it.
pub fn join(base: &str, target: &str) -> String {
    let combined: String = if target.starts_with('/') {
        target.to_string()
    } else if target.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        target.to_string()
    } else {
        format!("{}/{}", base, target)
    };

    let mut stack: Vec<&str> = Vec::new();
    for segment in combined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }

    if stack.is_empty() {
        return "/".to_string();
    }
    normalize(&stack.join("/"))
}

/// Return the parent of a path. The service root and the filesystem root
/// are their own parents.
pub fn parent(path: &str) -> String {
    let p: String = normalize(path);
    if p == REDFISH_ROOT || p == "/" {
        return p;
    }
    match p.rfind('/') {
        Some(0) => "/".to_string(),
        Some(i) => p[..i].to_string(),
        None => p,
    }
}

/// Return the last segment of a path (the member name of a collection URL,
/// the property name of a property path).
pub fn base_name(path: &str) -> &str {
    let trimmed: &str = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Split a partial path for tab completion at the rightmost separator.
///
/// Returns `(base, separator, prefix)` where `base` is resolvable with the
/// resolver, the separator is `/` (children and properties) or `[` (array
/// indices), and `prefix` is the fragment still being typed. With no
/// separator present the whole input is the prefix.
///
/// ```
/// use redfish_vfs_common::split_for_completion;
///
/// assert_eq!(split_for_completion("Systems/1"), ("Systems", Some('/'), "1"));
/// assert_eq!(split_for_completion("BootOrder["), ("BootOrder", Some('['), ""));
/// assert_eq!(split_for_completion("Status"), ("", None, "Status"));
/// ```
pub fn split_for_completion(partial: &str) -> (&str, Option<char>, &str) {
    match partial.rfind(['/', '[']) {
        Some(i) => (
            &partial[..i],
            partial[i..].chars().next(),
            &partial[i + 1..],
        ),
        None => ("", None, partial),
    }
}
