//! Built-in content: the default editor document, the page template catalog,
//! and the example pages a fresh store is seeded with.

use crate::document::DocNode;
use crate::model::{NewPage, Page};
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct PageTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: Option<&'static str>,
    pub content: DocNode,
}

static DEFAULT_DOCUMENT: Lazy<DocNode> = Lazy::new(|| {
    DocNode::doc(vec![
        DocNode::heading(1, "Welcome"),
        DocNode::paragraph("Start writing. Type / for commands, or select text to format it."),
        bullet_list(&[
            "Pages can be nested under other pages",
            "Edits are saved automatically",
            "Star a page to keep it in Favorites",
        ]),
    ])
});

static TEMPLATES: Lazy<Vec<PageTemplate>> = Lazy::new(|| {
    vec![
        PageTemplate {
            id: "blank",
            name: "Blank",
            description: "Start with a blank page",
            icon: "📄",
            category: None,
            content: DocNode::empty_doc(),
        },
        PageTemplate {
            id: "meeting-notes",
            name: "Meeting Notes",
            description: "Template for taking meeting notes",
            icon: "📝",
            category: Some("Work"),
            content: DocNode::doc(vec![
                DocNode::heading(1, "Meeting Notes"),
                DocNode::node(
                    "paragraph",
                    vec![
                        DocNode::text("Date: "),
                        DocNode::text(Utc::now().format("%Y-%m-%d").to_string()),
                    ],
                ),
                DocNode::heading(2, "Attendees"),
                bullet_list(&["Team member 1"]),
                DocNode::heading(2, "Agenda"),
                task_list(&["Topic 1"]),
                DocNode::heading(2, "Action Items"),
                task_list(&["Action item 1"]),
            ]),
        },
        PageTemplate {
            id: "project-plan",
            name: "Project Plan",
            description: "Template for project planning",
            icon: "📋",
            category: Some("Work"),
            content: DocNode::doc(vec![
                DocNode::heading(1, "Project Plan"),
                DocNode::paragraph("Project description goes here..."),
                DocNode::heading(2, "Goals"),
                bullet_list(&["Goal 1"]),
                DocNode::heading(2, "Timeline"),
                task_list(&["Phase 1: Planning"]),
            ]),
        },
        PageTemplate {
            id: "reading-list",
            name: "Reading List",
            description: "Template for tracking books and articles",
            icon: "📚",
            category: Some("Personal"),
            content: DocNode::doc(vec![
                DocNode::heading(1, "Reading List"),
                task_list(&["Book/Article 1"]),
            ]),
        },
    ]
});

fn bullet_list(items: &[&str]) -> DocNode {
    DocNode::node(
        "bulletList",
        items
            .iter()
            .map(|item| DocNode::node("listItem", vec![DocNode::paragraph(*item)]))
            .collect(),
    )
}

fn task_list(items: &[&str]) -> DocNode {
    DocNode::node(
        "taskList",
        items
            .iter()
            .map(|item| {
                DocNode::node("taskItem", vec![DocNode::paragraph(*item)])
                    .with_attr("checked", json!(false))
            })
            .collect(),
    )
}

/// Content the editor falls back to when neither the page nor the local
/// snapshot has anything to show.
pub fn default_document() -> DocNode {
    DEFAULT_DOCUMENT.clone()
}

pub fn templates() -> &'static [PageTemplate] {
    &TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static PageTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Example pages written to an empty store on first open.
pub fn seed_pages() -> Vec<Page> {
    let now = Utc::now();
    let yesterday = now - Duration::days(1);
    let last_week = now - Duration::days(7);

    let seed = |id: &str, title: &str, icon: &str, created, updated, tags: &[&str]| {
        let mut page = NewPage::new(id, title)
            .icon(icon)
            .content(default_document())
            .into_page(created);
        page.updated_at = updated;
        if !tags.is_empty() {
            page.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        }
        page
    };

    vec![
        seed("1", "Getting Started", "🚀", last_week, yesterday, &[]),
        seed("2", "Project Ideas", "💡", yesterday, yesterday, &[]),
        seed("3", "Meeting Notes", "📝", yesterday, now, &["meetings", "work"]),
        seed("4", "Personal", "👤", last_week, last_week, &[]),
        seed("5", "Goals", "🎯", last_week, yesterday, &[]),
        seed("6", "Reading List", "📚", yesterday, now, &[]),
        seed("7", "Work", "💼", last_week, last_week, &[]),
        seed("8", "Team Projects", "👥", yesterday, now, &["work", "team"]),
    ]
}
