use std::path::Path;

/// Format a path for display, relative to `root` when it lives underneath.
///
/// Separators are always forward slashes. A path equal to `root` shows as `"."`.
#[must_use]
pub fn display_path(path: &Path, root: Option<&Path>) -> String {
    let shown = root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);

    let result = shown.to_string_lossy().replace('\\', "/");
    if result.is_empty() {
        ".".to_string()
    } else {
        result
    }
}
