use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardFooter,
    CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::dialog::Notifier;
use crate::menu::{
    render_menu_grid, Debouncer, GridAction, ItemForm, MENU_CATEGORIES, SEARCH_DEBOUNCE_MS,
};
use crate::state::{AppContext, MenuSyncController};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

const TAB_BASE_CLASS: &str = "rounded-full border px-3 py-1 text-xs transition-colors";
const INPUT_CLASS: &str = "border-input flex h-8 w-full rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50";

/// Field signals of the item editor modal.
#[derive(Clone, Copy)]
struct EditorFields {
    open: RwSignal<bool>,
    id: RwSignal<Option<i64>>,
    name: RwSignal<String>,
    description: RwSignal<String>,
    price: RwSignal<String>,
    category: RwSignal<String>,
    image_url: RwSignal<String>,
    error: RwSignal<Option<String>>,
    saving: RwSignal<bool>,
}

impl EditorFields {
    fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    fn load(&self, form: ItemForm) {
        self.id.set(form.id);
        self.name.set(form.name);
        self.description.set(form.description);
        self.price.set(form.price);
        self.category.set(form.category);
        self.image_url.set(form.image_url);
        self.error.set(None);
        self.saving.set(false);
        self.open.set(true);
    }

    fn snapshot(&self) -> ItemForm {
        ItemForm {
            id: self.id.get_untracked(),
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            price: self.price.get_untracked(),
            category: self.category.get_untracked(),
            image_url: self.image_url.get_untracked(),
        }
    }

    fn close(&self) {
        self.open.set(false);
        self.saving.set(false);
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notifier = expect_context::<Notifier>();
    let sync = MenuSyncController::new(app_state, notifier);

    let search_text: RwSignal<String> = RwSignal::new(
        app_state
            .0
            .menu
            .with_untracked(|m| m.search_text().to_string()),
    );
    let debouncer = StoredValue::new_local(Debouncer::new(SEARCH_DEBOUNCE_MS));
    let editor = EditorFields::new();

    // Initial load.
    Effect::new(move |_| {
        sync.refresh_current();
    });

    on_cleanup(move || {
        debouncer.update_value(|d| d.cancel());
    });

    let on_search_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        search_text.set(value.clone());
        debouncer.update_value(|d| d.call(move || sync.refresh(value)));
    };

    let grid_html = Memo::new(move |_| {
        let origin = app_state.0.api_client.with(|c| c.asset_origin().to_string());
        app_state
            .0
            .menu
            .with(|m| render_menu_grid(&m.visible(), &origin))
    });

    let on_grid_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let Ok(Some(button)) = target.closest("[data-action]") else {
            return;
        };
        let action = button.get_attribute("data-action").unwrap_or_default();
        let id = button.get_attribute("data-id");

        match GridAction::parse(&action, id.as_deref()) {
            Some(GridAction::Edit(id)) => {
                let form = app_state
                    .0
                    .menu
                    .with_untracked(|m| m.find(id).map(ItemForm::from_item));
                if let Some(form) = form {
                    editor.load(form);
                }
            }
            Some(GridAction::Delete(id)) => sync.delete_item(id),
            None => {}
        }
    };

    let active_category = move || {
        app_state
            .0
            .menu
            .with(|m| m.filter().category.clone())
    };

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <header class="border-b">
                <div class="mx-auto flex max-w-5xl items-center justify-between gap-3 px-4 py-3">
                    <div class="text-sm font-medium">
                        {move || format!("Hello, {}", app_state.0.username())}
                    </div>
                    <div class="flex items-center gap-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:id="themeToggle"
                            attr:title="Toggle theme"
                            on:click=move |_| app_state.0.toggle_theme()
                        >
                            {move || app_state.0.theme.get().toggle_icon()}
                        </Button>
                        <Button
                            variant=ButtonVariant::Secondary
                            size=ButtonSize::Sm
                            attr:id="logoutBtn"
                            on:click=move |_| sync.logout()
                        >
                            "Logout"
                        </Button>
                    </div>
                </div>
            </header>

            <main class="mx-auto max-w-5xl px-4 py-6">
                <div class="mb-4 flex flex-col gap-3 sm:flex-row sm:items-center sm:justify-between">
                    <input
                        id="searchInput"
                        type="search"
                        class=INPUT_CLASS
                        placeholder="Search menu..."
                        prop:value=move || search_text.get()
                        on:input=on_search_input
                    />
                    <Button
                        size=ButtonSize::Sm
                        attr:id="addItemBtn"
                        on:click=move |_| editor.load(ItemForm::default())
                    >
                        "Add Item"
                    </Button>
                </div>

                <div class="mb-4 flex flex-wrap gap-2" data-name="CategoryTabs">
                    {MENU_CATEGORIES
                        .into_iter()
                        .map(|category| {
                            let tab_class = move || {
                                if active_category() == category {
                                    format!("{TAB_BASE_CLASS} bg-primary text-primary-foreground")
                                } else {
                                    format!("{TAB_BASE_CLASS} hover:bg-accent")
                                }
                            };
                            view! {
                                <button
                                    class=tab_class
                                    data-category=category
                                    on:click=move |_| {
                                        app_state.0.menu.update(|m| m.set_category(category))
                                    }
                                >
                                    {category}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || app_state.0.menu_loading.get() fallback=|| ().into_view()>
                    <div class="mb-3 flex items-center gap-2 text-xs text-muted-foreground">
                        <Spinner />
                        "Loading..."
                    </div>
                </Show>

                <div
                    id="menuGrid"
                    data-name="MenuGrid"
                    class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-3"
                    inner_html=move || grid_html.get()
                    on:click=on_grid_click
                ></div>
            </main>

            <Show when=move || editor.open.get() fallback=|| ().into_view()>
                <ItemEditor editor=editor sync=sync />
            </Show>
        </div>
    }
}

#[component]
fn ItemEditor(editor: EditorFields, sync: MenuSyncController) -> impl IntoView {
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let title = move || {
        ItemForm {
            id: editor.id.get(),
            ..ItemForm::default()
        }
        .title()
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if editor.saving.get_untracked() {
            return;
        }

        let item = match editor.snapshot().to_payload() {
            Ok(item) => item,
            Err(e) => {
                editor.error.set(Some(e.to_string()));
                return;
            }
        };
        let image = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        editor.error.set(None);
        editor.saving.set(true);

        spawn_local(async move {
            if sync.save_item(item, image).await {
                editor.close();
            } else {
                editor.saving.set(false);
            }
        });
    };

    view! {
        <div
            data-name="ItemEditorOverlay"
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4"
            on:click=move |ev: web_sys::MouseEvent| {
                // Only clicks on the backdrop itself close the editor.
                if ev.target() == ev.current_target() {
                    editor.close();
                }
            }
        >
            <Card class="w-full max-w-md">
                <form id="itemForm" on:submit=on_submit>
                    <CardHeader>
                        <div class="flex items-center justify-between">
                            <CardTitle class="text-base">{title}</CardTitle>
                            <button
                                type="button"
                                class="text-muted-foreground hover:text-foreground"
                                aria-label="Close"
                                on:click=move |_| editor.close()
                            >
                                "×"
                            </button>
                        </div>
                    </CardHeader>

                    <CardContent class="flex flex-col gap-3">
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="itemName" class="text-xs">"Name"</Label>
                            <Input id="itemName" bind_value=editor.name required=true class="h-8 text-sm" />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="itemDescription" class="text-xs">"Description"</Label>
                            <textarea
                                id="itemDescription"
                                rows="3"
                                class="border-input w-full rounded-md border bg-transparent px-3 py-2 text-sm shadow-xs outline-none"
                                prop:value=move || editor.description.get()
                                on:input=move |ev| editor.description.set(event_target_value(&ev))
                            ></textarea>
                        </div>

                        <div class="grid grid-cols-2 gap-3">
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="itemPrice" class="text-xs">"Price"</Label>
                                <Input
                                    id="itemPrice"
                                    r#type="number"
                                    step="0.01"
                                    placeholder="0.00"
                                    bind_value=editor.price
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="itemCategory" class="text-xs">"Category"</Label>
                                <select
                                    id="itemCategory"
                                    class=INPUT_CLASS
                                    prop:value=move || editor.category.get()
                                    on:change=move |ev| editor.category.set(event_target_value(&ev))
                                >
                                    {MENU_CATEGORIES[1..]
                                        .iter()
                                        .map(|c| view! { <option value=*c>{*c}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="itemImage" class="text-xs">"Image"</Label>
                            <input
                                id="itemImage"
                                type="file"
                                accept="image/*"
                                class="text-xs"
                                node_ref=file_input
                            />
                            <Show
                                when=move || !editor.image_url.get().is_empty()
                                fallback=|| ().into_view()
                            >
                                <div class="truncate text-xs text-muted-foreground">
                                    {move || format!("Current: {}", editor.image_url.get())}
                                </div>
                            </Show>
                        </div>

                        <Show when=move || editor.error.get().is_some() fallback=|| ().into_view()>
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">
                                    {move || editor.error.get().unwrap_or_default()}
                                </AlertDescription>
                            </Alert>
                        </Show>
                    </CardContent>

                    <CardFooter class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="h-8 rounded-md bg-secondary px-3 text-sm font-medium text-secondary-foreground hover:bg-secondary/80"
                            on:click=move |_| editor.close()
                        >
                            "Cancel"
                        </button>
                        <Button size=ButtonSize::Sm attr:disabled=move || editor.saving.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || editor.saving.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                "Save"
                            </span>
                        </Button>
                    </CardFooter>
                </form>
            </Card>
        </div>
    }
}
