//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                     - Form, error banner, user cards
//! POST   /draft                - Apply field/avatar changes (HTMX, returns form fragment)
//! POST   /submit               - Apply fields, then create or update
//! POST   /reset                - Leave edit mode, clear the draft
//! POST   /users/{id}/edit      - Load a record into the draft
//! GET    /users/{id}/delete    - Confirmation page
//! POST   /users/{id}/delete    - Delete if `confirm=yes`
//! GET    /images/*             - Avatar images
//! ```

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use std::path::Path as FsPath;

use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use profile_directory_core::{Avatar, UserId};

use crate::controller::{Confirmation, Field};
use crate::state::{AppState, Controller};
use crate::views::{ConfirmDeleteTemplate, FormPartial, FormView, IndexTemplate, UserCard};

/// Posted form fields. Absent fields leave the draft untouched.
#[derive(Debug, Default, Deserialize)]
pub struct DraftForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
    pub avatar: Option<String>,
}

impl DraftForm {
    fn apply(&self, controller: &mut Controller) {
        let fields = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Number, &self.number),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                controller.change_field(field, value);
            }
        }

        if let Some(raw) = &self.avatar {
            match raw.parse::<Avatar>() {
                Ok(avatar) => controller.select_avatar(avatar),
                Err(e) => tracing::warn!(error = %e, "Ignoring avatar choice"),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub confirm: String,
}

impl DeleteForm {
    fn confirmation(&self) -> Confirmation {
        if self.confirm == "yes" {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// Build the console router with request tracing. Avatar images are served
/// from `images_dir`.
pub fn app(state: AppState, images_dir: &FsPath) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/draft", post(draft))
        .route("/submit", post(submit))
        .route("/reset", post(reset))
        .route("/users/{id}/edit", post(edit))
        .route("/users/{id}/delete", get(confirm_delete).post(delete))
        .nest_service("/images", ServeDir::new(images_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "User not found").into_response()
}

async fn index(State(state): State<AppState>) -> IndexTemplate {
    let controller = state.controller().await;
    IndexTemplate::from_controller(&*controller)
}

#[instrument(skip(state))]
async fn draft(State(state): State<AppState>, Form(form): Form<DraftForm>) -> FormPartial {
    let mut controller = state.controller().await;
    form.apply(&mut controller);
    FormPartial {
        form: FormView::from_controller(&*controller),
    }
}

#[instrument(skip(state))]
async fn submit(State(state): State<AppState>, Form(form): Form<DraftForm>) -> Redirect {
    let mut controller = state.controller().await;
    form.apply(&mut controller);
    // Failures are already recorded as the controller's error message.
    let _ = controller.submit().await;
    Redirect::to("/")
}

async fn reset(State(state): State<AppState>) -> Redirect {
    state.controller().await.reset();
    Redirect::to("/")
}

#[instrument(skip(state))]
async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<UserId>() else {
        return not_found();
    };

    let mut controller = state.controller().await;
    let Some(profile) = controller.find_user(id).cloned() else {
        return not_found();
    };
    controller.begin_edit(&profile);
    Redirect::to("/").into_response()
}

async fn confirm_delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<UserId>() else {
        return not_found();
    };

    let controller = state.controller().await;
    controller.find_user(id).map_or_else(not_found, |profile| {
        ConfirmDeleteTemplate {
            user: UserCard::from(profile),
        }
        .into_response()
    })
}

#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let Ok(id) = id.parse::<UserId>() else {
        return not_found();
    };

    let mut controller = state.controller().await;
    let _ = controller.remove_record(id, form.confirmation()).await;
    Redirect::to("/").into_response()
}
