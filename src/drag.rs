//! Drag-and-drop token resolution
//!
//! The drag layer hands us two `{kind}-{id}` tokens (begin and end of the
//! gesture). This module is a pure translation into a structural operation;
//! it never touches the tree itself.

/// Structural operation a completed drag gesture maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOp {
    /// Both tokens are bouquets: reorder within the bouquet list.
    ReorderBouquets { active: i64, over: i64 },
    /// Both tokens are channels: reorder within the currently active bouquet.
    ReorderChannels { active: i64, over: i64 },
    /// Channel dropped onto a bouquet: cross-bouquet move.
    MoveToBouquet { channel: i64, bouquet: i64 },
    /// Identical tokens, unknown kinds, or an unsupported combination.
    None,
}

fn parse_token(token: &str) -> Option<(&str, i64)> {
    let (kind, id) = token.split_once('-')?;
    let id = id.parse().ok()?;
    match kind {
        "group" | "channel" => Some((kind, id)),
        _ => None,
    }
}

pub fn resolve(active_token: &str, target_token: &str) -> DragOp {
    if active_token == target_token {
        return DragOp::None;
    }
    let (Some((active_kind, active_id)), Some((target_kind, target_id))) =
        (parse_token(active_token), parse_token(target_token))
    else {
        return DragOp::None;
    };
    match (active_kind, target_kind) {
        ("group", "group") => DragOp::ReorderBouquets { active: active_id, over: target_id },
        ("channel", "channel") => DragOp::ReorderChannels { active: active_id, over: target_id },
        ("channel", "group") => DragOp::MoveToBouquet { channel: active_id, bouquet: target_id },
        // Dragging a bouquet onto a channel has no defined meaning.
        _ => DragOp::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_tokens_noop() {
        assert_eq!(resolve("group-1", "group-1"), DragOp::None);
        assert_eq!(resolve("channel-5", "channel-5"), DragOp::None);
    }

    #[test]
    fn test_group_onto_group() {
        assert_eq!(
            resolve("group-1", "group-3"),
            DragOp::ReorderBouquets { active: 1, over: 3 }
        );
    }

    #[test]
    fn test_channel_onto_channel() {
        assert_eq!(
            resolve("channel-10", "channel-20"),
            DragOp::ReorderChannels { active: 10, over: 20 }
        );
    }

    #[test]
    fn test_channel_onto_group_moves() {
        assert_eq!(
            resolve("channel-10", "group-2"),
            DragOp::MoveToBouquet { channel: 10, bouquet: 2 }
        );
    }

    #[test]
    fn test_group_onto_channel_undefined() {
        assert_eq!(resolve("group-1", "channel-10"), DragOp::None);
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(resolve("group-", "group-2"), DragOp::None);
        assert_eq!(resolve("bouquet-1", "group-2"), DragOp::None);
        assert_eq!(resolve("channel-x", "group-2"), DragOp::None);
        assert_eq!(resolve("", "group-2"), DragOp::None);
    }
}
