use std::path::PathBuf;

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Find the wheel files below each search path.
///
/// Yields `(arch, filename)` pairs, where `arch` is the final component of the search path the
/// file was found under. Unreadable directories are skipped.
pub fn discover(search_paths: &[PathBuf]) -> Vec<(String, String)> {
    let mut files = Vec::new();
    for search_path in search_paths {
        let arch = search_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let before = files.len();
        for entry in WalkDir::new(search_path)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable path: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str() else {
                continue;
            };
            if filename.ends_with(".whl") {
                files.push((arch.clone(), filename.to_string()));
            }
        }
        debug!(
            "Found {} wheel(s) in `{}`",
            files.len() - before,
            search_path.display()
        );
    }
    files
}
