//! Askama templates and the view models they render.

use askama::Template;
use askama_web::WebTemplate;

use profile_directory_core::{Avatar, UserProfile};

use crate::api::UsersApi;
use crate::controller::FormController;

/// One avatar radio button.
#[derive(Debug, Clone)]
pub struct AvatarOption {
    pub path: &'static str,
    pub number: u8,
    pub selected: bool,
}

/// Form state as rendered: draft values, mode, error banner.
#[derive(Debug, Clone)]
pub struct FormView {
    pub name: String,
    pub email: String,
    pub number: String,
    pub avatars: Vec<AvatarOption>,
    pub editing: bool,
    pub error: Option<String>,
}

impl FormView {
    pub fn from_controller<A: UsersApi>(controller: &FormController<A>) -> Self {
        let draft = controller.draft();
        Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            number: draft.number.clone(),
            avatars: Avatar::ALL
                .into_iter()
                .map(|avatar| AvatarOption {
                    path: avatar.path(),
                    number: avatar.number(),
                    selected: avatar == draft.avatar,
                })
                .collect(),
            editing: controller.is_editing(),
            error: controller.error().map(str::to_string),
        }
    }

    /// Label of the submit button.
    pub const fn submit_label(&self) -> &'static str {
        if self.editing { "Update" } else { "Add" }
    }
}

/// A record in the user list.
#[derive(Debug, Clone)]
pub struct UserCard {
    pub id: String,
    pub name: String,
    pub email: String,
    pub number: String,
    pub avatar: &'static str,
}

impl From<&UserProfile> for UserCard {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.to_string(),
            email: profile.email.to_string(),
            number: profile.number.to_string(),
            avatar: profile.avatar.path(),
        }
    }
}

/// Full console page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub form: FormView,
    pub users: Vec<UserCard>,
}

impl IndexTemplate {
    pub fn from_controller<A: UsersApi>(controller: &FormController<A>) -> Self {
        Self {
            form: FormView::from_controller(controller),
            users: controller.users().iter().map(UserCard::from).collect(),
        }
    }
}

/// Form fragment swapped in by HTMX after a field change.
#[derive(Template, WebTemplate)]
#[template(path = "partials/form.html")]
pub struct FormPartial {
    pub form: FormView,
}

/// "Are you sure you want to delete this user?" page.
#[derive(Template, WebTemplate)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub user: UserCard,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::controller::Field;
    use crate::testing::FakeApi;

    #[tokio::test]
    async fn test_index_renders_cards_and_form() {
        let api = FakeApi::default();
        let ann = api.seed("Ann Lee");
        let mut controller = FormController::new(api);
        controller.load_list().await.unwrap();
        controller.change_field(Field::Email, "draft@x.com");

        let html = IndexTemplate::from_controller(&controller).render().unwrap();
        assert!(html.contains("Ann Lee"));
        assert!(html.contains(&format!("/users/{}/edit", ann.id)));
        assert!(html.contains("draft@x.com"));
        assert!(html.contains(">Add<"));
    }

    #[tokio::test]
    async fn test_form_reflects_edit_mode_and_error() {
        let api = FakeApi::default();
        let ann = api.seed("Ann Lee");
        let mut controller = FormController::new(api);
        controller.submit().await.unwrap_err();

        let form = FormView::from_controller(&controller);
        assert_eq!(
            form.error.as_deref(),
            Some("Name is required and must only contain letters.")
        );

        controller.begin_edit(&ann);
        let form = FormView::from_controller(&controller);
        assert!(form.editing);
        assert_eq!(form.submit_label(), "Update");
        assert!(form.error.is_none());

        let selected: Vec<u8> = form
            .avatars
            .iter()
            .filter(|a| a.selected)
            .map(|a| a.number)
            .collect();
        assert_eq!(selected, vec![1]);

        let html = FormPartial { form }.render().unwrap();
        assert!(html.contains(">Update<"));
        assert!(html.contains("value=\"Ann Lee\""));
    }

    #[test]
    fn test_form_partial_replaces_stale_draft_requests() {
        let controller = FormController::new(FakeApi::default());
        let html = FormPartial {
            form: FormView::from_controller(&controller),
        }
        .render()
        .unwrap();
        assert!(html.contains("hx-post=\"/draft\""));
        assert!(html.contains("hx-sync=\"this:replace\""));
    }

    #[test]
    fn test_confirm_delete_renders() {
        let api = FakeApi::default();
        let ann = api.seed("Ann Lee");
        let html = ConfirmDeleteTemplate {
            user: UserCard::from(&ann),
        }
        .render()
        .unwrap();
        assert!(html.contains("Are you sure you want to delete this user?"));
        assert!(html.contains(&format!("/users/{}/delete", ann.id)));
    }
}
