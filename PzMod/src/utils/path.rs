//! Path utilities

use std::path::Path;

/// Normalize path separators to forward slashes (for archive entry names)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

/// Whether the final path component starts with a dot
pub fn is_hidden<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Convert a string to a safe file name token
///
/// - Spaces become underscores
/// - Anything that is not an ASCII letter, digit or underscore is stripped
/// - Multiple underscores are collapsed, leading/trailing ones trimmed
#[must_use]
pub fn to_safe_name(s: &str) -> String {
    let result: String = s
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c)
            } else if c == ' ' || c == '_' {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(result.len());
    let mut prev_underscore = true;
    for c in result.chars() {
        if c == '_' {
            if !prev_underscore {
                collapsed.push('_');
            }
            prev_underscore = true;
        } else {
            collapsed.push(c);
            prev_underscore = false;
        }
    }
    if collapsed.ends_with('_') {
        collapsed.pop();
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/mods/a/media/lua/x.lua"), Path::new("/mods/a")),
            Some("media/lua/x.lua".to_string())
        );
        assert_eq!(relative_path(Path::new("/other"), Path::new("/mods/a")), None);
    }

    #[test]
    fn test_to_safe_name() {
        assert_eq!(to_safe_name("Bad Id!"), "Bad_Id");
        assert_eq!(to_safe_name("  My  Cool__Mod  "), "My_Cool_Mod");
        assert_eq!(to_safe_name("../../etc"), "etc");
        assert_eq!(to_safe_name("!!!"), "");
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(".DS_Store"));
        assert!(is_hidden("media/.git"));
        assert!(!is_hidden("media/lua"));
    }
}
