use crate::types::TaskView;

/// Number of leading `id` characters used when nothing better is available.
pub const ID_PREFIX_LEN: usize = 8;

/// Label shown for a comment author: the author id when present, else the author type.
pub fn resolve_label<'a>(author_type: &'a str, author_id: &'a str) -> &'a str {
    if author_id.is_empty() {
        author_type
    } else {
        author_id
    }
}

/// Human-facing task identifier.
///
/// Precedence: explicit `display_id`, then `<board_prefix>-<seq>` when `seq > 0`,
/// then the first 8 characters of `id`. The board prefix belongs to the task's
/// board and must be resolved by the caller.
pub fn resolve_display_id(task: &TaskView, board_prefix: &str) -> String {
    if !task.display_id.is_empty() {
        tracing::debug!(display_id = %task.display_id, "display id from record");
        return task.display_id.clone();
    }
    if task.seq > 0 {
        tracing::debug!(seq = task.seq, board_prefix, "display id from sequence");
        if board_prefix.is_empty() {
            return task.seq.to_string();
        }
        return format!("{board_prefix}-{}", task.seq);
    }
    tracing::debug!("display id from record id prefix");
    task.id.chars().take(ID_PREFIX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(display_id: &str, seq: i64, id: &str) -> TaskView {
        TaskView {
            id: id.into(),
            title: "t".into(),
            priority: "low".into(),
            display_id: display_id.into(),
            seq,
            ..Default::default()
        }
    }

    #[test]
    fn label_prefers_author_id() {
        assert_eq!(resolve_label("agent", "claude"), "claude");
        assert_eq!(resolve_label("", "bob"), "bob");
    }

    #[test]
    fn label_falls_back_to_type() {
        assert_eq!(resolve_label("human", ""), "human");
        assert_eq!(resolve_label("", ""), "");
    }

    #[test]
    fn display_id_field_wins() {
        assert_eq!(resolve_display_id(&task("OPS-3", 42, "abcdefghij"), "WRK"), "OPS-3");
    }

    #[test]
    fn seq_uses_supplied_prefix() {
        assert_eq!(resolve_display_id(&task("", 42, "abcdefghij"), "WRK"), "WRK-42");
        assert_eq!(resolve_display_id(&task("", 42, "abcdefghij"), "API"), "API-42");
    }

    #[test]
    fn seq_without_prefix_is_bare_number() {
        assert_eq!(resolve_display_id(&task("", 9, "abcdefghij"), ""), "9");
    }

    #[test]
    fn non_positive_seq_falls_back_to_id_prefix() {
        assert_eq!(resolve_display_id(&task("", 0, "abcdefghij"), "WRK"), "abcdefgh");
        assert_eq!(resolve_display_id(&task("", -1, "abcdefghij"), "WRK"), "abcdefgh");
    }

    #[test]
    fn short_id_returned_whole() {
        assert_eq!(resolve_display_id(&task("", 0, "abc"), "WRK"), "abc");
    }

    #[test]
    fn id_prefix_counts_characters_not_bytes() {
        assert_eq!(resolve_display_id(&task("", 0, "ééééééééé"), "WRK"), "éééééééé");
    }

    #[test]
    fn nothing_to_resolve_gives_empty_id() {
        assert_eq!(resolve_display_id(&task("", 0, ""), "WRK"), "");
    }
}
