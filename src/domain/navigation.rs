//! Navigation targets handed to the router after an operation completes.

use std::fmt;

use super::posts::PostId;

pub const POST_DETAIL_PREFIX: &str = "/blog";
pub const POST_LISTING_PATH: &str = "/blogs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    PostDetail(PostId),
    PostListing,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::PostDetail(id) => format!("{POST_DETAIL_PREFIX}/{id}"),
            Route::PostListing => POST_LISTING_PATH.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_path_embeds_id() {
        let id = PostId::new("42").expect("id");
        assert_eq!(Route::PostDetail(id).path(), "/blog/42");
        assert_eq!(Route::PostListing.path(), "/blogs");
    }
}
