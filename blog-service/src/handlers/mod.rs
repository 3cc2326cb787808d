pub mod blog_posts;
pub mod health;

pub use blog_posts::{
    create_blog_post, delete_blog_post, get_blog_post, list_blog_posts, not_found,
    update_blog_post,
};
pub use health::{health_check, metrics_endpoint, readiness_check};
