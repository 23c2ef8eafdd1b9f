use crate::document::DocNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-authored page. Stored in camelCase so records written by the web
/// client load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub content: DocNode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    // Stored only; nothing filters on it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl Page {
    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Title prefixed with the icon, as shown in lists.
    pub fn display_title(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.title),
            None => self.title.clone(),
        }
    }

    fn apply(&mut self, update: PageUpdate) {
        let PageUpdate {
            title,
            icon,
            cover,
            parent_id,
            content,
            tags,
            is_favorite,
            archived,
        } = update;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(cover) = cover {
            self.cover = cover;
        }
        if let Some(parent_id) = parent_id {
            self.parent_id = parent_id;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(is_favorite) = is_favorite {
            self.is_favorite = Some(is_favorite);
        }
        if let Some(archived) = archived {
            self.archived = Some(archived);
        }
    }

    /// Merges `update` and stamps `updated_at`.
    pub fn merge(&mut self, update: PageUpdate) {
        self.apply(update);
        self.updated_at = Utc::now();
    }
}

/// Everything a caller supplies to create a page. Timestamps are stamped on
/// creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPage {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub cover: Option<String>,
    pub parent_id: Option<String>,
    pub content: DocNode,
    pub tags: Option<Vec<String>>,
}

impl NewPage {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: DocNode::empty_doc(),
            ..Self::default()
        }
    }

    /// A page with a freshly generated id.
    pub fn with_generated_id(title: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), title)
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn content(mut self, content: DocNode) -> Self {
        self.content = content;
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn into_page(self, now: DateTime<Utc>) -> Page {
        Page {
            id: self.id,
            title: self.title,
            icon: self.icon,
            cover: self.cover,
            parent_id: self.parent_id,
            content: self.content,
            created_at: now,
            updated_at: now,
            tags: self.tags,
            is_favorite: None,
            archived: None,
        }
    }
}

/// Partial page update. `None` leaves a field untouched; for clearable
/// fields `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub icon: Option<Option<String>>,
    pub cover: Option<Option<String>>,
    pub parent_id: Option<Option<String>>,
    pub content: Option<DocNode>,
    pub tags: Option<Option<Vec<String>>>,
    pub is_favorite: Option<bool>,
    pub archived: Option<bool>,
}

impl PageUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn icon(icon: Option<String>) -> Self {
        Self {
            icon: Some(icon),
            ..Self::default()
        }
    }

    pub fn parent(parent_id: Option<String>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::default()
        }
    }

    pub fn content(content: DocNode) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn tags(tags: Option<Vec<String>>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }

    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentVisit {
    pub page_id: String,
    pub visited_at: DateTime<Utc>,
}

/// Latest editor state as kept in the local fallback slots.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub content: DocNode,
    pub html: String,
    pub markdown: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_serializes_in_camel_case() {
        let page = NewPage::new("1", "Getting Started")
            .icon("🚀")
            .parent("0")
            .into_page(Utc::now());
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["parentId"], json!("0"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("isFavorite").is_none());
    }

    #[test]
    fn merge_clears_optional_fields() {
        let mut page = NewPage::new("1", "A").icon("x").into_page(Utc::now());
        page.merge(PageUpdate::icon(None));
        assert_eq!(page.icon, None);
        assert_eq!(page.title, "A");
    }

    #[test]
    fn empty_update_keeps_content() {
        let content = crate::document::DocNode::doc(vec![DocNode::paragraph("body")]);
        let mut page = NewPage::new("1", "A")
            .content(content.clone())
            .into_page(Utc::now());
        let before = page.updated_at;
        page.merge(PageUpdate::default());
        assert_eq!(page.content, content);
        assert!(page.updated_at >= before);
    }

    #[test]
    fn records_without_content_load() {
        let page: Page = serde_json::from_value(json!({
            "id": "7",
            "title": "Work",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(page.content.is_empty());
        assert!(!page.is_favorite());
    }
}
