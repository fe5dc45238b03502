use service::item::service::ItemService;

/// Shared handler state: the item service plus the page size used when a
/// request omits `size`.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,
    pub default_page_size: u64,
}

impl AppState {
    pub fn new(items: ItemService, default_page_size: u64) -> Self {
        Self { items, default_page_size }
    }
}
