//! Route paths served by [`crate::router`].

/// Chat relay. Kept at the path hosted clients already call.
pub const POST_CHAT: &str = "/functions/v1/chat";
pub const GET_HEALTH: &str = "/health";
pub const GET_REASONS: &str = "/reasons";
pub const GET_REASON: &str = "/reasons/{id}";
