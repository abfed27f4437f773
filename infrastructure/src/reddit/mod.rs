//! Reddit comment sources
//!
//! - [`RedditCommentSource`] reads the public `.json` listing of a thread
//! - [`DemoCommentSource`] serves a fixed set of comments for offline runs

mod demo;
mod listing;

pub use demo::DemoCommentSource;
pub use listing::{RedditCommentSource, comments_from_listing};
