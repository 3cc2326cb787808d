pub mod blog_posts;

pub use blog_posts::{
    BlogPostListResponse, BlogPostResponse, CreateBlogPostRequest, UpdateBlogPostRequest,
};
