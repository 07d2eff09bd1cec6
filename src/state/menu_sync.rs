use crate::api::{ApiClient, ApiError, ApiErrorKind, ApiResult, ImageUpload};
use crate::dialog::Notifier;
use crate::menu::image_after_upload;
use crate::models::MenuItem;
use crate::state::{AppContext, LOGIN_PATH};
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

/// Dashboard controller for the menu: fetches, mutations and their dialogs.
///
/// Every successful mutation is followed by a full refetch with the current search text.
/// Any 401/403 ends the session.
#[derive(Clone, Copy)]
pub(crate) struct MenuSyncController {
    app_state: AppContext,
    notifier: Notifier,
}

impl MenuSyncController {
    pub fn new(app_state: AppContext, notifier: Notifier) -> Self {
        Self {
            app_state,
            notifier,
        }
    }

    /// `GET /menu` for `search`; applies the response unless a newer one already landed.
    pub fn refresh(&self, search: String) {
        let app_state = self.app_state;
        let Some(seq) = app_state.0.menu.try_update(|m| m.begin_fetch(&search)) else {
            return;
        };
        app_state.0.menu_loading.set(true);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.get_menu(&search).await;

            match result {
                Ok(items) => {
                    let count = items.len();
                    let applied = app_state
                        .0
                        .menu
                        .try_update(|m| m.accept(seq, items))
                        .unwrap_or(false);
                    if applied {
                        log!("[menu] #{seq} loaded {count} items (search={search:?})");
                    } else {
                        log!("[menu] #{seq} discarded: a newer response is already shown");
                    }
                }
                Err(e) => {
                    if let Some(Followup::ExpireSession) = Followup::after_fetch_error(&e) {
                        app_state.0.expire_session();
                        return;
                    }
                    error!("[menu] failed to fetch menu: {e}");
                }
            }

            if app_state.0.menu.with_untracked(|m| m.is_latest(seq)) {
                app_state.0.menu_loading.set(false);
            }
        });
    }

    pub fn refresh_current(&self) {
        self.refresh(self.search_text());
    }

    /// Uploads `image` if given, then creates or updates `item`. Returns `true` on success.
    pub async fn save_item(self, mut item: MenuItem, image: Option<web_sys::File>) -> bool {
        let api_client = self.app_state.0.api_client.get_untracked();

        if let Some(file) = image {
            let upload = match read_image(&file).await {
                Ok(upload) => api_client.upload_image(upload).await,
                Err(e) => Err(e),
            };

            if let Some(followup) = Followup::after_upload(&upload) {
                return self.apply(followup).await;
            }
            if let Err(e) = &upload {
                warn!("[menu] image upload failed, keeping previous image: {e}");
            }
            item.image_url = image_after_upload(item.image_url.take(), upload);
        }

        let result = api_client.save_item(&item).await;
        match &result {
            Ok(()) => log!("[menu] item saved (id={:?})", item.id),
            Err(e) => error!("[menu] failed to save item: {:?} {e}", e.status),
        }
        self.apply(Followup::after_save(result, &self.search_text()))
            .await
    }

    /// Asks for confirmation, then `DELETE /menu/{id}` and a full refetch.
    pub fn delete_item(&self, id: i64) {
        let this = *self;
        spawn_local(async move {
            let confirmed = this
                .notifier
                .confirm(
                    "Are you sure you want to delete this item?",
                    "Delete Item",
                    true,
                )
                .await;

            let api_client = this.app_state.0.api_client.get_untracked();
            let Some(request) = delete_if_confirmed(&api_client, id, confirmed) else {
                return;
            };

            let result = ApiClient::dispatch(request).await;
            if let Err(e) = &result {
                error!("[menu] failed to delete item {id}: {e}");
            }
            this.apply(Followup::after_delete(result, &this.search_text()))
                .await;
        });
    }

    pub fn logout(&self) {
        let this = *self;
        spawn_local(async move {
            if this
                .notifier
                .confirm("Are you sure you want to logout?", "Logout", false)
                .await
            {
                this.app_state.0.sign_out();
                let _ = window().location().set_href(LOGIN_PATH);
            }
        });
    }

    fn search_text(&self) -> String {
        self.app_state
            .0
            .menu
            .with_untracked(|m| m.search_text().to_string())
    }

    /// Carries out `followup`. `true` only for a refetch, i.e. the mutation succeeded.
    async fn apply(self, followup: Followup) -> bool {
        match followup {
            Followup::Refetch(search) => {
                self.refresh(search);
                true
            }
            Followup::ExpireSession => {
                self.app_state.0.expire_session();
                false
            }
            Followup::Report { message, title } => {
                self.notifier.notify(message, title).await;
                false
            }
        }
    }
}

/// What the dashboard does once a menu request has settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Followup {
    /// Full refetch with the search text that was active.
    Refetch(String),
    /// 401/403: clear the stored session and go to the login view.
    ExpireSession,
    Report {
        message: String,
        title: &'static str,
    },
}

impl Followup {
    fn after_fetch_error(e: &ApiError) -> Option<Self> {
        e.is_unauthorized().then_some(Self::ExpireSession)
    }

    /// Only an auth failure stops the save; other upload errors keep the previous image.
    fn after_upload(upload: &ApiResult<String>) -> Option<Self> {
        upload.as_ref().err().and_then(Self::after_fetch_error)
    }

    fn after_save(result: ApiResult<()>, search: &str) -> Self {
        match result {
            Ok(()) => Self::Refetch(search.to_string()),
            Err(e) if e.is_unauthorized() => Self::ExpireSession,
            Err(e) if e.kind == ApiErrorKind::Network => Self::Report {
                message: "An error occurred while saving.".to_string(),
                title: "Network Error",
            },
            Err(e) => Self::Report {
                message: format!("Failed to save item: {e}"),
                title: "Error",
            },
        }
    }

    fn after_delete(result: ApiResult<()>, search: &str) -> Self {
        match result {
            Ok(()) => Self::Refetch(search.to_string()),
            Err(e) if e.is_unauthorized() => Self::ExpireSession,
            Err(e) => Self::Report {
                message: format!("Failed to delete item: {}", e.user_message()),
                title: "Error",
            },
        }
    }
}

/// A declined confirmation sends nothing.
fn delete_if_confirmed(
    api_client: &ApiClient,
    id: i64,
    confirmed: bool,
) -> Option<reqwest::RequestBuilder> {
    confirmed.then(|| api_client.delete_request(id))
}

async fn read_image(file: &web_sys::File) -> Result<ImageUpload, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::parse(format!("could not read {}: {e:?}", file.name())))?;

    Ok(ImageUpload {
        file_name: file.name(),
        mime: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuBoard;

    fn client() -> ApiClient {
        let mut c = ApiClient::new("http://localhost:8080".to_string());
        c.set_token("t1".to_string());
        c
    }

    #[test]
    fn test_declined_delete_sends_nothing() {
        assert!(delete_if_confirmed(&client(), 5, false).is_none());
    }

    #[test]
    fn test_confirmed_delete_targets_item() {
        let req = delete_if_confirmed(&client(), 5, true)
            .expect("confirmed delete builds a request")
            .build()
            .expect("request should build");
        assert_eq!(req.method(), reqwest::Method::DELETE);
        assert_eq!(req.url().as_str(), "http://localhost:8080/api/menu/5");
        assert_eq!(
            req.headers().get("Authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer t1")
        );
    }

    #[test]
    fn test_successful_delete_refetches_with_current_search() {
        let mut board = MenuBoard::default();
        board.begin_fetch("soup");
        assert_eq!(
            Followup::after_delete(Ok(()), board.search_text()),
            Followup::Refetch("soup".to_string())
        );
    }

    #[test]
    fn test_auth_failures_expire_session() {
        for status in [401, 403] {
            let e = ApiError::from_status(status, String::new());
            assert_eq!(Followup::after_fetch_error(&e), Some(Followup::ExpireSession));
            assert_eq!(
                Followup::after_upload(&Err(e.clone())),
                Some(Followup::ExpireSession)
            );
            assert_eq!(Followup::after_save(Err(e.clone()), ""), Followup::ExpireSession);
            assert_eq!(Followup::after_delete(Err(e), ""), Followup::ExpireSession);
        }
    }

    #[test]
    fn test_other_failures_keep_session() {
        let e = ApiError::from_status(500, "boom".to_string());
        assert_eq!(Followup::after_fetch_error(&e), None);
        assert_eq!(Followup::after_upload(&Err(e)), None);
        assert_eq!(Followup::after_upload(&Ok("/uploads/a.png".to_string())), None);
    }

    #[test]
    fn test_save_failure_reports() {
        assert_eq!(
            Followup::after_save(Err(ApiError::from_status(400, "bad price".to_string())), ""),
            Followup::Report {
                message: "Failed to save item: bad price".to_string(),
                title: "Error",
            }
        );
        let offline = ApiError {
            kind: ApiErrorKind::Network,
            status: None,
            message: "fetch failed".to_string(),
        };
        assert_eq!(
            Followup::after_save(Err(offline), ""),
            Followup::Report {
                message: "An error occurred while saving.".to_string(),
                title: "Network Error",
            }
        );
    }

    #[test]
    fn test_successful_save_refetches() {
        assert_eq!(
            Followup::after_save(Ok(()), "pizza"),
            Followup::Refetch("pizza".to_string())
        );
    }
}
