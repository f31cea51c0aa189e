use leptos::prelude::*;

/// Title and search placeholder of one page.
///
/// Each tab provides its own instance; the page writes it on mount and the
/// tab strip mirrors the title.
#[derive(Clone, Copy)]
pub struct PageContext {
    pub title: RwSignal<String>,
    pub search_placeholder: RwSignal<String>,
}

impl PageContext {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            search_placeholder: RwSignal::new("Search...".to_string()),
        }
    }

    pub fn set(&self, title: &str, search_placeholder: Option<&str>) {
        self.title.set(title.to_string());
        self.search_placeholder
            .set(search_placeholder.unwrap_or("Search...").to_string());
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_page_context() -> PageContext {
    use_context::<PageContext>().expect("PageContext not provided in context")
}
