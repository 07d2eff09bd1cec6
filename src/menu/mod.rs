//! Dashboard menu pipeline: cached items, filtering, rendering and the editor form.

mod board;
mod debounce;
mod filter;
mod form;
mod render;

pub(crate) use board::MenuBoard;
pub(crate) use debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
pub(crate) use filter::MENU_CATEGORIES;
pub(crate) use form::{image_after_upload, ItemForm};
pub(crate) use render::{render_menu_grid, GridAction};
