pub mod blog_post;

pub use blog_post::{Author, BlogPost, BlogPostUpdate};
