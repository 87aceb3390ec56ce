use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use super::views::render_page;
use super::AppState;
use crate::controller::AlwaysConfirm;

#[derive(Debug, Deserialize)]
pub(crate) struct WriteForm {
    pub(crate) activity: String,
    pub(crate) email: String,
}

pub(crate) async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    state.controller.load_activities().await;
    let catalog = state.controller.catalog();
    let status = state.controller.status();
    Html(render_page(catalog.as_ref(), &status))
}

pub(crate) async fn signup_handler(
    State(state): State<AppState>,
    Form(form): Form<WriteForm>,
) -> Redirect {
    // Outcome lands in the status message; the redirect re-renders it and
    // gives the user a fresh (reset) form.
    state.controller.submit_signup(&form.activity, &form.email).await;
    Redirect::to("/")
}

pub(crate) async fn unregister_handler(
    State(state): State<AppState>,
    Form(form): Form<WriteForm>,
) -> Redirect {
    // The delete affordance already confirmed in the browser before posting.
    state
        .controller
        .unregister(&form.activity, &form.email, &AlwaysConfirm)
        .await;
    Redirect::to("/")
}
