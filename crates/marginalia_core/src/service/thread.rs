//! Thread builder: flat comment list to indented display order.
//!
//! # Responsibility
//! - Reorder one note's flat comment set into a pre-order traversal with
//!   chronological siblings, the order an indented thread renders in.
//!
//! # Invariants
//! - Pure and deterministic: identical input yields identical output, and
//!   re-running on an unchanged set is a no-op permutation-wise.
//! - Output is always a permutation of the input; a comment whose parent is
//!   absent from the set is treated as top-level, never dropped.
//! - Sibling order is `created_at ASC, uuid ASC`.

use crate::model::comment::{Comment, CommentId};
use std::collections::{HashMap, HashSet};

/// Orders one note's comments for linear indented display.
///
/// Groups the set once by parent key with sorted siblings, then emits an
/// iterative pre-order traversal: every comment is followed by its replies
/// (chronologically) before the next sibling. Single grouping pass instead
/// of re-scanning the flat list at every nesting level.
pub fn build_thread(comments: &[Comment]) -> Vec<Comment> {
    let known_ids: HashSet<CommentId> = comments.iter().map(|comment| comment.uuid).collect();

    let mut children: HashMap<Option<CommentId>, Vec<&Comment>> = HashMap::new();
    for comment in comments {
        // An orphaned parent reference signals an integrity violation
        // elsewhere; file the comment as top-level rather than lose it.
        let parent_key = comment.parent_uuid.filter(|parent| known_ids.contains(parent));
        children.entry(parent_key).or_default().push(comment);
    }

    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.uuid.cmp(&b.uuid))
        });
    }

    let mut ordered = Vec::with_capacity(comments.len());
    let mut pending: Vec<&Comment> = children.remove(&None).unwrap_or_default();
    pending.reverse();

    while let Some(comment) = pending.pop() {
        ordered.push(comment.clone());
        if let Some(mut replies) = children.remove(&Some(comment.uuid)) {
            replies.reverse();
            pending.append(&mut replies);
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::build_thread;
    use crate::model::comment::Comment;
    use uuid::Uuid;

    fn comment(uuid: Uuid, parent: Option<Uuid>, created_at: i64, depth: u8) -> Comment {
        Comment {
            uuid,
            note_slug: "atomic-habits".to_string(),
            parent_uuid: parent,
            body: format!("body-{created_at}"),
            created_at,
            depth,
        }
    }

    #[test]
    fn empty_input_yields_empty_thread() {
        assert!(build_thread(&[]).is_empty());
    }

    #[test]
    fn reply_follows_parent_before_later_top_level() {
        let a = comment(Uuid::new_v4(), None, 10, 1);
        let b = comment(Uuid::new_v4(), Some(a.uuid), 20, 2);
        let c = comment(Uuid::new_v4(), None, 15, 1);

        let ordered = build_thread(&[c.clone(), b.clone(), a.clone()]);
        assert_eq!(
            ordered.iter().map(|x| x.uuid).collect::<Vec<_>>(),
            vec![a.uuid, b.uuid, c.uuid]
        );
        assert_eq!(
            ordered.iter().map(|x| x.depth).collect::<Vec<_>>(),
            vec![1, 2, 1]
        );
    }

    #[test]
    fn siblings_emit_chronologically_with_uuid_tie_break() {
        let mut first = comment(Uuid::new_v4(), None, 100, 1);
        let mut second = comment(Uuid::new_v4(), None, 100, 1);
        if second.uuid < first.uuid {
            std::mem::swap(&mut first, &mut second);
        }

        let ordered = build_thread(&[second.clone(), first.clone()]);
        assert_eq!(ordered[0].uuid, first.uuid);
        assert_eq!(ordered[1].uuid, second.uuid);
    }

    #[test]
    fn output_is_permutation_and_parents_precede_children() {
        let root_a = comment(Uuid::new_v4(), None, 1, 1);
        let root_b = comment(Uuid::new_v4(), None, 2, 1);
        let reply_a1 = comment(Uuid::new_v4(), Some(root_a.uuid), 3, 2);
        let reply_a2 = comment(Uuid::new_v4(), Some(root_a.uuid), 5, 2);
        let reply_a1x = comment(Uuid::new_v4(), Some(reply_a1.uuid), 4, 3);

        let input = vec![
            reply_a2.clone(),
            root_b.clone(),
            reply_a1x.clone(),
            root_a.clone(),
            reply_a1.clone(),
        ];
        let ordered = build_thread(&input);

        assert_eq!(ordered.len(), input.len());
        let positions: std::collections::HashMap<_, _> = ordered
            .iter()
            .enumerate()
            .map(|(index, c)| (c.uuid, index))
            .collect();
        assert_eq!(positions.len(), input.len());
        for c in &input {
            if let Some(parent) = c.parent_uuid {
                assert!(positions[&parent] < positions[&c.uuid]);
            }
        }

        // Replies nest directly under their parent's subtree.
        assert_eq!(
            ordered.iter().map(|x| x.uuid).collect::<Vec<_>>(),
            vec![
                root_a.uuid,
                reply_a1.uuid,
                reply_a1x.uuid,
                reply_a2.uuid,
                root_b.uuid
            ]
        );
    }

    #[test]
    fn orphaned_parent_reference_degrades_to_top_level() {
        let missing_parent = Uuid::new_v4();
        let orphan = comment(Uuid::new_v4(), Some(missing_parent), 50, 2);
        let root = comment(Uuid::new_v4(), None, 60, 1);

        let ordered = build_thread(&[root.clone(), orphan.clone()]);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].uuid, orphan.uuid);
        assert_eq!(ordered[1].uuid, root.uuid);
    }

    #[test]
    fn rebuild_on_unchanged_set_is_identical() {
        let a = comment(Uuid::new_v4(), None, 10, 1);
        let b = comment(Uuid::new_v4(), Some(a.uuid), 20, 2);
        let c = comment(Uuid::new_v4(), None, 15, 1);
        let input = vec![b, c, a];

        assert_eq!(build_thread(&input), build_thread(&input));
    }
}
