mod queue;

use queue::{DialogMode, DialogQueue, DialogRequest};

use crate::components::ui::{Button, ButtonVariant};
use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Matches the overlay's CSS transition; callers resume only after the overlay is gone.
pub(crate) const FADE_OUT_MS: u32 = 300;

/// Handle to the application's single modal overlay.
///
/// Requests are queued and shown one at a time in arrival order. Both `notify` and
/// `confirm` resolve after the fade-out of their dialog.
#[derive(Clone, Copy)]
pub(crate) struct Notifier {
    queue: RwSignal<DialogQueue>,
    closing: RwSignal<bool>,
}

impl Notifier {
    fn new() -> Self {
        Self {
            queue: RwSignal::new(DialogQueue::default()),
            closing: RwSignal::new(false),
        }
    }

    /// Returns the notifier in context, creating and providing it on first use.
    pub fn provide() -> Self {
        if let Some(existing) = use_context::<Notifier>() {
            return existing;
        }
        let notifier = Self::new();
        provide_context(notifier);
        notifier
    }

    fn enqueue(self, request: DialogRequest) -> Option<oneshot::Receiver<bool>> {
        self.queue.try_update(|q| q.push(request))
    }

    /// An empty `title` shows the default one.
    pub async fn notify(self, message: impl Into<String>, title: impl Into<String>) {
        if let Some(rx) = self.enqueue(DialogRequest::notification(message, title)) {
            let _ = rx.await;
        }
    }

    /// `false` on cancel, and when the overlay is torn down before an answer.
    pub async fn confirm(
        self,
        message: impl Into<String>,
        title: impl Into<String>,
        danger: bool,
    ) -> bool {
        match self.enqueue(DialogRequest::confirmation(message, title, danger)) {
            Some(rx) => rx.await.unwrap_or(false),
            None => false,
        }
    }

    fn current(self) -> Option<DialogRequest> {
        self.queue.with(|q| q.current().cloned())
    }

    fn answer(self, id: u64, outcome: bool) {
        if self.closing.get_untracked() {
            return;
        }
        self.closing.set(true);

        spawn_local(async move {
            TimeoutFuture::new(FADE_OUT_MS).await;
            self.queue.update(|q| {
                q.resolve(id, outcome);
            });
            self.closing.set(false);
        });
    }
}

#[component]
pub fn DialogHost() -> impl IntoView {
    let notifier = Notifier::provide();

    view! {
        {move || {
            notifier.current().map(|request| {
                let id = request.id;
                let overlay_class = move || {
                    if notifier.closing.get() {
                        "fixed inset-0 z-[9999] flex items-center justify-center bg-black/50 backdrop-blur-sm transition-opacity duration-300 opacity-0 pointer-events-none"
                    } else {
                        "fixed inset-0 z-[9999] flex items-center justify-center bg-black/50 backdrop-blur-sm transition-opacity duration-300 opacity-100"
                    }
                };

                let actions = match request.mode {
                    DialogMode::Acknowledge => view! {
                        <Button class="flex-1" on:click=move |_| notifier.answer(id, true)>
                            "OK"
                        </Button>
                    }
                    .into_any(),
                    DialogMode::Confirm => {
                        let confirm_variant = if request.danger {
                            ButtonVariant::Destructive
                        } else {
                            ButtonVariant::Default
                        };
                        view! {
                            <Button
                                class="flex-1"
                                variant=ButtonVariant::Secondary
                                on:click=move |_| notifier.answer(id, false)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                class="flex-1"
                                variant=confirm_variant
                                on:click=move |_| notifier.answer(id, true)
                            >
                                "Confirm"
                            </Button>
                        }
                        .into_any()
                    }
                };

                view! {
                    <div data-name="DialogOverlay" class=overlay_class role="dialog" aria-modal="true">
                        <div class="w-[90%] max-w-[400px] rounded-2xl border bg-background p-8 text-center shadow-lg">
                            <h3 class="mb-2 text-lg font-bold">{request.title}</h3>
                            <p class="mb-6 text-sm text-muted-foreground">{request.message}</p>
                            <div class="flex justify-center gap-4">{actions}</div>
                        </div>
                    </div>
                }
            })
        }}
    }
}
