//! Server-side rendered pages

use askama::Template;

use crate::palette::palette_names;

/// Main page: category form and word cloud canvas
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub version: String,
    /// Palette names, default first
    pub palettes: Vec<&'static str>,
}

impl IndexTemplate {
    pub fn new() -> Self {
        Self {
            title: "Wikipedia Category Word Cloud".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            palettes: palette_names(),
        }
    }
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_renders_palettes() {
        let html = IndexTemplate::new().render().unwrap();
        assert!(html.contains("Wikipedia Category Word Cloud"));
        assert!(html.contains(r#"<option value="ocean""#));
        assert!(html.contains(r#"action="/analyze""#));
    }
}
