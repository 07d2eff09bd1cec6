use crate::models::Session;

pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const THEME_KEY: &str = "theme";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub(crate) fn save_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub(crate) fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// A session exists only when a token is stored; the username is display-only.
pub(crate) fn load_session() -> Option<Session> {
    let token = load_item(TOKEN_KEY).filter(|t| !t.trim().is_empty())?;
    let username = load_item(USERNAME_KEY).unwrap_or_default();
    Some(Session { token, username })
}

pub(crate) fn save_session(session: &Session) {
    save_item(TOKEN_KEY, &session.token);
    save_item(USERNAME_KEY, &session.username);
}

/// Removes the session entries. The theme preference outlives the session.
pub(crate) fn clear_session() {
    remove_item(TOKEN_KEY);
    remove_item(USERNAME_KEY);
}
