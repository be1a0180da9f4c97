//! Input records as delivered by the programme backend.
//!
//! Field names mirror the upstream JSON shape verbatim (`_id`, camelCase,
//! the presenter's `pj` title field), so a fetched collection deserializes
//! without an adaptation layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presenter {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Professional title shown on the cover page; upstream calls this `pj`.
    #[serde(rename = "pj", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Presenter {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Rich-HTML description; may be empty or missing upstream.
    #[serde(default)]
    pub description: String,
    pub presenter: Presenter,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_upstream_shape() {
        let json = r#"{
            "_id": "64f1",
            "title": "Opening Keynote",
            "description": "<p>Welcome</p>",
            "presenter": {
                "_id": "a1",
                "firstName": "Amina",
                "lastName": "Diallo",
                "pj": "Chief Justice"
            }
        }"#;
        let p: Presentation = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "64f1");
        assert_eq!(p.presenter.full_name(), "Amina Diallo");
        assert_eq!(p.presenter.title.as_deref(), Some("Chief Justice"));
    }

    #[test]
    fn test_missing_description_and_title_default() {
        let json = r#"{
            "_id": "64f2",
            "title": "Panel",
            "presenter": { "_id": "a2", "firstName": "Kwame", "lastName": "Mensah" }
        }"#;
        let p: Presentation = serde_json::from_str(json).unwrap();
        assert_eq!(p.description, "");
        assert_eq!(p.presenter.title, None);
    }
}
