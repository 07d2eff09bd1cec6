use crate::dialog::{DialogHost, Notifier};
use crate::pages::{LoginPage, RegistrationPage, RootPage};
use crate::state::{AppContext, AppState};
use crate::theme::apply_theme;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state));
    Notifier::provide();

    Effect::new(move |_| {
        apply_theme(app_state.theme.get());
    });

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("register") view=RegistrationPage />
                <Route path=path!("") view=RootPage />
            </Routes>
        </Router>
        <DialogHost />
    }
}
