mod menu_sync;

pub(crate) use menu_sync::MenuSyncController;

use crate::api::ApiClient;
use crate::menu::MenuBoard;
use crate::models::Session;
use crate::storage::{load_session, save_session};
use crate::theme::{load_theme, save_theme, Theme};
use leptos::prelude::*;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const REGISTER_PATH: &str = "/register";
pub(crate) const DASHBOARD_PATH: &str = "/";

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub session: RwSignal<Option<Session>>,

    /// Cached menu + filter for the dashboard.
    pub menu: RwSignal<MenuBoard>,
    pub menu_loading: RwSignal<bool>,

    pub theme: RwSignal<Theme>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_client = ApiClient::load_from_storage();
        let stored_session = load_session();

        Self {
            api_client: RwSignal::new(stored_client),
            session: RwSignal::new(stored_session),
            menu: RwSignal::new(MenuBoard::default()),
            menu_loading: RwSignal::new(false),
            theme: RwSignal::new(load_theme()),
        }
    }

    /// Stores a fresh session, replacing any previous one.
    pub fn sign_in(&self, session: Session) {
        save_session(&session);
        self.api_client.update(|c| c.set_token(session.token.clone()));
        self.session.set(Some(session));
    }

    pub fn sign_out(&self) {
        self.api_client.update(|c| c.logout());
        self.session.set(None);
        self.menu.set(MenuBoard::default());
    }

    /// The backend rejected the token: drop the session and go to the login view.
    pub fn expire_session(&self) {
        self.sign_out();
        let _ = window().location().set_href(LOGIN_PATH);
    }

    pub fn username(&self) -> String {
        self.session
            .with(|s| s.as_ref().map(|s| s.username.clone()))
            .unwrap_or_default()
    }

    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().toggled();
        save_theme(next);
        self.theme.set(next);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::storage::clear_session;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_sign_in_authorizes_requests() {
        clear_session();
        let state = AppState::new();
        assert!(!state.api_client.get_untracked().is_authenticated());

        state.sign_in(Session {
            token: "t1".to_string(),
            username: "a".to_string(),
        });

        assert_eq!(load_session().map(|s| s.token).as_deref(), Some("t1"));
        assert_eq!(state.username(), "a");
        let req = state
            .api_client
            .get_untracked()
            .menu_request("")
            .build()
            .expect("request should build");
        assert_eq!(
            req.headers().get("Authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer t1")
        );

        clear_session();
    }

    #[wasm_bindgen_test]
    fn test_sign_out_clears_stored_session() {
        let state = AppState::new();
        state.sign_in(Session {
            token: "t1".to_string(),
            username: "a".to_string(),
        });

        state.sign_out();

        assert!(load_session().is_none());
        assert!(!state.api_client.get_untracked().is_authenticated());
        assert!(state.session.get_untracked().is_none());
        assert_eq!(
            ApiClient::load_from_storage().get_auth_token(),
            None,
            "a reload must not pick the token back up"
        );
    }
}
