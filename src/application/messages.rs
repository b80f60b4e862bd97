//! User-facing texts. Raw error details never appear here; they go to the log.

pub const FETCH_FAILED: &str = "Failed to fetch blog details.";
pub const UPDATE_DENIED: &str = "Access denied: You do not have permission to update this blog.";
pub const DELETE_DENIED: &str = "Access denied: You do not have permission to delete this blog.";
pub const PUBLISH_MISSING_FIELDS: &str = "Title and content are required to publish the post.";
pub const PUBLISH_FAILED: &str = "Failed to publish the post. Please try again.";
