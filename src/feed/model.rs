//! Excerpt value type shared by the fetch layer, the UI and exports

use serde::{Deserialize, Serialize};

/// A single unit of text content with a stable numeric id
///
/// Wire shape is `{"id": <integer>, "text": <string>}` in both the backend
/// responses and the favorites export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excerpt {
    pub id: i64,
    pub text: String,
}

impl Excerpt {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Heading used by cards, the likes list and share titles
    pub fn title(&self) -> String {
        format!("Excerpt #{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_page() {
        let body = r#"[{"id": 1, "text": "first"}, {"id": 2, "text": "second"}]"#;
        let page: Vec<Excerpt> = serde_json::from_str(body).unwrap();
        assert_eq!(page, vec![Excerpt::new(1, "first"), Excerpt::new(2, "second")]);
    }

    #[test]
    fn test_title() {
        assert_eq!(Excerpt::new(42, "x").title(), "Excerpt #42");
    }
}
