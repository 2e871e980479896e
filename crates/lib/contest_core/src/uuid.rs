// Identifier helpers for session entities.
//
// Message and evidence ids embed a UUIDv7 so that ids created within the same
// millisecond never collide and still sort by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Identifier for a newly appended log message.
pub fn message_id() -> String {
    format!("msg-{}", uuidv7())
}

/// Identifier for a newly uploaded evidence item.
pub fn evidence_id() -> String {
    format!("evidence-{}", uuidv7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuidv7_is_valid() {
        let id = uuidv7();
        assert_eq!(id.get_version(), Some(uuid::Version::SortRand));
    }

    #[test]
    fn message_ids_are_prefixed_and_unique() {
        let a = message_id();
        let b = message_id();
        assert!(a.starts_with("msg-"));
        assert_ne!(a, b);
    }

    #[test]
    fn evidence_ids_sort_by_creation() {
        let a = evidence_id();
        let b = evidence_id();
        assert!(a.starts_with("evidence-"));
        assert!(b >= a);
    }
}
