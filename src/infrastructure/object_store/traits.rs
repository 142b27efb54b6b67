//! Object store trait and path layout

use async_trait::async_trait;

use crate::domain::{DomainResult, ImageKind};

/// Storage for uploaded image blobs
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `path` and return the public URL for it
    async fn put(&self, path: &str, bytes: &[u8]) -> DomainResult<String>;
    /// Delete the object at `path`. Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> DomainResult<()>;
    async fn exists(&self, path: &str) -> DomainResult<bool>;
}

/// Build the object path `<category>/<before|after>/<timestamp>-<filename>`
pub fn build_object_path(
    category: &str,
    kind: ImageKind,
    filename: &str,
    timestamp: i64,
) -> String {
    format!(
        "{}/{}/{}-{}",
        sanitize_component(category),
        kind,
        timestamp,
        sanitize_component(filename)
    )
}

/// Reduce one path component to `[A-Za-z0-9._-]`. Separator characters are
/// replaced and dot-only components are rejected, so user input cannot climb
/// out of the store root.
fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_layout_is_category_kind_timestamp_filename() {
        let path = build_object_path("sedans", ImageKind::Before, "front.jpg", 1_700_000_000);
        assert_eq!(path, "sedans/before/1700000000-front.jpg");
        let path = build_object_path("sedans", ImageKind::After, "front.jpg", 1_700_000_000);
        assert_eq!(path, "sedans/after/1700000000-front.jpg");
    }

    #[test]
    fn spaces_and_odd_characters_become_dashes() {
        let path = build_object_path("suv & trucks", ImageKind::Before, "my photo (1).jpg", 7);
        assert_eq!(path, "suv---trucks/before/7-my-photo--1-.jpg");
    }

    #[test]
    fn traversal_attempts_are_neutralized() {
        let path = build_object_path("..", ImageKind::Before, "../../etc/passwd", 7);
        assert_eq!(path, "file/before/7--..-etc-passwd");
        assert!(!path.contains("../"));
    }

    #[test]
    fn empty_components_get_a_placeholder() {
        let path = build_object_path("", ImageKind::After, "", 7);
        assert_eq!(path, "file/after/7-file");
    }

    #[test]
    fn unicode_filenames_survive_as_dashes() {
        let path = build_object_path("sedans", ImageKind::Before, "фото.jpg", 7);
        assert_eq!(path, "sedans/before/7-----.jpg");
    }
}
