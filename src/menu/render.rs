use crate::models::MenuItem;
use crate::util::{escape_html, format_price};

pub(crate) const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300";

/// Card buttons carry `data-action` + `data-id`; the grid handles clicks by delegation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GridAction {
    Edit(i64),
    Delete(i64),
}

impl GridAction {
    pub fn parse(action: &str, id: Option<&str>) -> Option<Self> {
        let id = id?.trim().parse::<i64>().ok()?;
        match action {
            "edit" => Some(Self::Edit(id)),
            "delete" => Some(Self::Delete(id)),
            _ => None,
        }
    }
}

/// Absolute URLs pass through; relative paths resolve against the backend origin.
pub(crate) fn resolve_image_url(image_url: Option<&str>, asset_origin: &str) -> String {
    let url = image_url.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return PLACEHOLDER_IMAGE_URL.to_string();
    }
    if url.starts_with("http") {
        return url.to_string();
    }

    let origin = asset_origin.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{origin}{url}")
    } else {
        format!("{origin}/{url}")
    }
}

/// Percent-encodes the characters that could end a quoted CSS `url('...')` string.
///
/// Runs before HTML escaping: the browser decodes entities in the `style` attribute
/// before the CSS parser sees the value.
fn css_url_escape(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' | '"' | '(' | ')' | '\\' | '<' | '>' => out.push_str(&format!("%{:02X}", c as u32)),
            c if c.is_whitespace() || c.is_control() => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{b:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

pub(crate) fn render_menu_card(item: &MenuItem, asset_origin: &str) -> String {
    let image = escape_html(&css_url_escape(&resolve_image_url(
        item.image_url.as_deref(),
        asset_origin,
    )));
    let id = item.id.map(|id| id.to_string()).unwrap_or_default();

    format!(
        r#"<div class="menu-card flex flex-col overflow-hidden rounded-xl border bg-card shadow-sm" data-name="MenuCard">
    <div class="card-img h-40 w-full bg-muted bg-cover bg-center" style="background-image: url('{image}')"></div>
    <div class="card-content flex flex-1 flex-col gap-2 p-4">
        <h3 class="card-title text-base font-semibold">{name}</h3>
        <p class="card-desc text-sm text-muted-foreground">{description}</p>
        <div class="card-footer mt-auto flex items-center justify-between">
            <span class="price text-sm font-semibold">{price}</span>
            <div class="action-buttons flex gap-2">
                <button type="button" class="edit-btn rounded-md border px-3 py-1 text-xs" data-action="edit" data-id="{id}">Edit</button>
                <button type="button" class="delete-btn rounded-md bg-destructive px-3 py-1 text-xs text-white" data-action="delete" data-id="{id}">Delete</button>
            </div>
        </div>
    </div>
</div>"#,
        name = escape_html(&item.name),
        description = escape_html(&item.description),
        price = escape_html(&format_price(item.price)),
    )
}

/// HTML for the menu grid. Pure: same items, same markup.
pub(crate) fn render_menu_grid(items: &[MenuItem], asset_origin: &str) -> String {
    if items.is_empty() {
        return r#"<p class="menu-empty col-span-full py-8 text-center text-sm text-muted-foreground">No menu items found.</p>"#
            .to_string();
    }

    items
        .iter()
        .map(|item| render_menu_card(item, asset_origin))
        .collect()
}
