use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Read-only projection of a task record.
///
/// Only the six fields the resume tooling reads are carried. Empty strings and
/// a zero `seq` stand for "not set", mirroring how the task store hands out
/// missing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_id: String,
    #[serde(default)]
    pub seq: i64,
}

impl TaskView {
    /// Project an arbitrary task record (as exported by the task store) onto a view.
    ///
    /// Never fails: a missing or mistyped string field reads as `""`, a missing
    /// or unparsable `seq` reads as `0`.
    pub fn from_record(record: &serde_json::Value) -> Self {
        Self {
            id: record_string(record, "id"),
            title: record_string(record, "title"),
            priority: record_string(record, "priority"),
            description: record_string(record, "description"),
            display_id: record_string(record, "display_id"),
            seq: record_int(record, "seq"),
        }
    }
}

fn record_string(record: &serde_json::Value, field: &str) -> String {
    match record.get(field) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn record_int(record: &serde_json::Value, field: &str) -> i64 {
    match record.get(field) {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// One entry of a task's conversation.
///
/// Callers supply comments already scoped to one task and sorted ascending by
/// `created`; nothing downstream re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
    #[serde(default, alias = "authorType")]
    pub author_type: String,
    #[serde(default, alias = "authorId")]
    pub author_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

impl Comment {
    pub fn new(
        content: impl Into<String>,
        author_type: impl Into<String>,
        author_id: impl Into<String>,
        created: OffsetDateTime,
    ) -> Self {
        Self {
            content: content.into(),
            author_type: author_type.into(),
            author_id: author_id.into(),
            created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_record_reads_all_fields() {
        let record = json!({
            "id": "abcdef1234567890",
            "title": "Implement user authentication",
            "priority": "high",
            "description": "OAuth + sessions",
            "display_id": "AUTH-7",
            "seq": 7,
            "column": "need_input",
        });
        let view = TaskView::from_record(&record);
        assert_eq!(view.id, "abcdef1234567890");
        assert_eq!(view.title, "Implement user authentication");
        assert_eq!(view.priority, "high");
        assert_eq!(view.description, "OAuth + sessions");
        assert_eq!(view.display_id, "AUTH-7");
        assert_eq!(view.seq, 7);
    }

    #[test]
    fn from_record_defaults_missing_fields() {
        let view = TaskView::from_record(&json!({"id": "x1"}));
        assert_eq!(view.id, "x1");
        assert_eq!(view.title, "");
        assert_eq!(view.description, "");
        assert_eq!(view.display_id, "");
        assert_eq!(view.seq, 0);
    }

    #[test]
    fn from_record_tolerates_mistyped_fields() {
        let view = TaskView::from_record(&json!({
            "id": "x1",
            "title": null,
            "seq": "12",
            "display_id": ["nope"],
        }));
        assert_eq!(view.title, "");
        assert_eq!(view.seq, 12);
        assert_eq!(view.display_id, "");

        let view = TaskView::from_record(&json!({"seq": 3.0}));
        assert_eq!(view.seq, 3);
        let view = TaskView::from_record(&json!({"seq": "n/a"}));
        assert_eq!(view.seq, 0);
    }

    #[test]
    fn from_record_on_non_object_is_empty() {
        assert_eq!(TaskView::from_record(&json!("task")), TaskView::default());
    }

    #[test]
    fn comment_parses_rfc3339_and_camel_case() {
        let c: Comment = serde_json::from_value(json!({
            "content": "use postgres",
            "authorType": "human",
            "authorId": "alice",
            "created": "2026-02-13T09:05:00Z",
        }))
        .unwrap();
        assert_eq!(c.author_type, "human");
        assert_eq!(c.author_id, "alice");
        assert_eq!(c.created.hour(), 9);
        assert_eq!(c.created.minute(), 5);
    }

    #[test]
    fn comment_author_fields_default_to_empty() {
        let c: Comment = serde_json::from_value(json!({
            "content": "hi",
            "created": "2026-02-13T09:05:00+02:00",
        }))
        .unwrap();
        assert_eq!(c.author_type, "");
        assert_eq!(c.author_id, "");
    }

    #[test]
    fn comment_rejects_bad_timestamp() {
        let res: Result<Comment, _> = serde_json::from_value(json!({
            "content": "hi",
            "created": "yesterday",
        }));
        assert!(res.is_err());
    }
}
