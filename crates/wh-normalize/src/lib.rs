pub use package_name::PackageName;

mod package_name;

/// The character every separator (`-`, `_`, `.`) folds to.
pub const SEPARATOR: char = '_';

/// Returns `true` for the characters that separate the words of a package name.
pub fn is_separator(char: char) -> bool {
    matches!(char, '-' | '_' | '.')
}

/// Normalize a package name, or a package name pattern.
///
/// ASCII letters are lower-cased and every run of `-`, `_` and `.` is folded into a single `_`,
/// matching the escaping that wheel filenames use for their distribution name. Any other
/// character (including the `*` wildcard of a pattern) is kept as-is.
pub(crate) fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut last_was_separator = false;
    for char in name.chars() {
        if is_separator(char) {
            if !last_was_separator {
                normalized.push(SEPARATOR);
            }
            last_was_separator = true;
        } else {
            normalized.push(char.to_ascii_lowercase());
            last_was_separator = false;
        }
    }
    normalized
}

/// Returns `true` if the name is already normalized.
fn is_normalized(name: &str) -> bool {
    let mut last = None;
    for char in name.chars() {
        match char {
            'A'..='Z' | '-' | '.' => return false,
            '_' if last == Some('_') => return false,
            _ => {}
        }
        last = Some(char);
    }
    true
}
