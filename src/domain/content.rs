//! Editable home page content

use chrono::{DateTime, Utc};

/// One editable section of the home page, keyed by section slug
#[derive(Debug, Clone)]
pub struct HomeContent {
    /// Section slug, e.g. `hero` or `about`
    pub section: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub updated_at: DateTime<Utc>,
}

/// Starter copy for the marketing pages, seeded on first start
pub fn default_home_content() -> Vec<HomeContent> {
    let section = |slug: &str, title: &str, subtitle: Option<&str>, sort_order: i32| HomeContent {
        section: slug.to_string(),
        title: title.to_string(),
        subtitle: subtitle.map(|s| s.to_string()),
        body: None,
        image_url: None,
        sort_order,
        updated_at: Utc::now(),
    };

    vec![
        section(
            "hero",
            "Showroom shine, wherever you park",
            Some("Mobile detailing that comes to you"),
            1,
        ),
        section(
            "about",
            "About AquaShine",
            Some("Family-run detailing since 2015"),
            2,
        ),
        section("cta", "Book your detail today", None, 3),
    ]
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sections_have_unique_slugs_in_order() {
        let sections = default_home_content();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].section, "hero");
        for pair in sections.windows(2) {
            assert!(pair[0].sort_order < pair[1].sort_order);
            assert_ne!(pair[0].section, pair[1].section);
        }
    }
}
