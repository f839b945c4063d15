pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::profile::models::{Certification, Education, Experience, Language, Project};
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:sid", delete(session::handle_delete_session))
        .route("/api/v1/sessions/:sid/status", get(session::handle_get_status))
        // Profile wizard
        .route(
            "/api/v1/sessions/:sid/profile",
            get(profile::handle_get_profile).put(profile::handle_replace_profile),
        )
        .route(
            "/api/v1/sessions/:sid/profile/identity",
            patch(profile::handle_update_identity),
        )
        .route(
            "/api/v1/sessions/:sid/profile/summary",
            put(profile::handle_set_summary),
        )
        .route(
            "/api/v1/sessions/:sid/profile/skills",
            put(profile::handle_set_skills),
        )
        .route(
            "/api/v1/sessions/:sid/profile/sample",
            post(profile::handle_load_sample),
        )
        .route(
            "/api/v1/sessions/:sid/profile/experience",
            post(profile::handle_add_entry::<Experience>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/experience/:id",
            put(profile::handle_update_entry::<Experience>)
                .delete(profile::handle_delete_entry::<Experience>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/education",
            post(profile::handle_add_entry::<Education>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/education/:id",
            put(profile::handle_update_entry::<Education>)
                .delete(profile::handle_delete_entry::<Education>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/projects",
            post(profile::handle_add_entry::<Project>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/projects/:id",
            put(profile::handle_update_entry::<Project>)
                .delete(profile::handle_delete_entry::<Project>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/certifications",
            post(profile::handle_add_entry::<Certification>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/certifications/:id",
            put(profile::handle_update_entry::<Certification>)
                .delete(profile::handle_delete_entry::<Certification>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/languages",
            post(profile::handle_add_entry::<Language>),
        )
        .route(
            "/api/v1/sessions/:sid/profile/languages/:id",
            put(profile::handle_update_entry::<Language>)
                .delete(profile::handle_delete_entry::<Language>),
        )
        .route(
            "/api/v1/sessions/:sid/completeness",
            get(profile::handle_get_completeness),
        )
        // Generation
        .route(
            "/api/v1/sessions/:sid/generated",
            get(generation::handle_get_generated),
        )
        .route(
            "/api/v1/sessions/:sid/generate/summary",
            post(generation::handle_generate_summary),
        )
        .route(
            "/api/v1/sessions/:sid/generate/experience/:id/bullets",
            post(generation::handle_generate_bullets),
        )
        .route(
            "/api/v1/sessions/:sid/generate/skills",
            post(generation::handle_generate_skills),
        )
        .route(
            "/api/v1/sessions/:sid/generate/resume",
            post(generation::handle_generate_resume),
        )
        .route(
            "/api/v1/sessions/:sid/generate/match",
            post(generation::handle_generate_match),
        )
        .route(
            "/api/v1/sessions/:sid/generate/cover-letter",
            post(generation::handle_generate_cover_letter),
        )
        .with_state(state)
}
