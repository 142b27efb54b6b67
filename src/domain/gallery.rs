//! Before/after gallery entries

use chrono::{DateTime, Utc};

/// Which side of a before/after pair an upload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Before,
    After,
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// A published before/after gallery entry
#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Category slug used for filtering and for object paths
    pub category: String,
    /// Public URL of the "before" image
    pub before_url: String,
    /// Public URL of the "after" image
    pub after_url: String,
    /// Object store path backing `before_url`
    pub before_path: String,
    /// Object store path backing `after_url`
    pub after_path: String,
    pub is_featured: bool,
    pub display_order: i32,
    /// Hidden entries stay in storage but are not served publicly
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One uploaded file from the admin gallery form
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Input for publishing a new gallery entry
#[derive(Debug, Clone)]
pub struct NewGalleryImage {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub is_featured: bool,
    pub display_order: i32,
    pub before: UploadFile,
    pub after: UploadFile,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_kind_display() {
        assert_eq!(ImageKind::Before.to_string(), "before");
        assert_eq!(ImageKind::After.to_string(), "after");
    }
}
