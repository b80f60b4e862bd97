//! Outbound HTTP to the blog backend.

mod client;

pub use client::HttpBlogApi;
