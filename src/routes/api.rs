//! Resource routes under /api. Admin paths rely on the `AdminToken` extractor in each handler.

use crate::handlers::{auth, blog, contact, events, gallery, team};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/gallery/categories", get(gallery::list_categories))
        .route("/gallery/images", get(gallery::list_images))
        .route("/admin/gallery", get(gallery::admin_list).post(gallery::create))
        .route("/admin/gallery/:id", put(gallery::update).delete(gallery::delete))
        .route("/events", get(events::list))
        .route("/events/:id", get(events::read))
        .route("/admin/events", get(events::admin_list).post(events::create))
        .route("/admin/events/:id", put(events::update).delete(events::delete))
        .route("/blog", get(blog::list))
        .route("/blog/:id", get(blog::read))
        .route("/admin/blog", get(blog::admin_list).post(blog::create))
        .route("/admin/blog/:id", put(blog::update).delete(blog::delete))
        .route("/team", get(team::list))
        .route("/admin/team", get(team::admin_list).post(team::create))
        .route("/admin/team/:id", put(team::update).delete(team::delete))
        .route("/contact", post(contact::submit).get(contact::admin_list))
        .route("/contact/:id", axum::routing::delete(contact::delete))
        .route("/admin/login", post(auth::login))
}
