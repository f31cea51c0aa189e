//! Reference data for selects and pickers (units, categories, products...).

use contracts::domain::common::{CrudEntity, EntityId};
use contracts::shared::api::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::http::{ApiClient, ApiError};
use crate::system::auth::use_api;

/// Lookups read one large page; reference tables stay well below it.
pub const LOOKUP_PAGE_SIZE: usize = 500;

pub async fn fetch_all<E: CrudEntity>(client: &ApiClient) -> Result<Vec<E>, ApiError> {
    let query = ListQuery::new(1, LOOKUP_PAGE_SIZE, None);
    let page = client.get_page::<E>(E::resource(), &query).await?;
    if page.total > page.data.len() {
        log::warn!(
            "{} lookup truncated: {} of {} records",
            E::list_name(),
            page.data.len(),
            page.total
        );
    }
    Ok(page.data)
}

/// `(id, label)` pairs for a select: saved, active records ordered by sort
/// sequence, then name.
pub fn to_options<E: CrudEntity>(items: &[E]) -> Vec<(EntityId, String)> {
    let mut selectable: Vec<&E> = items
        .iter()
        .filter(|item| item.id().is_some() && item.status() != Some(false))
        .collect();
    selectable.sort_by(|a, b| {
        let seq = |e: &E| e.sort_sequence().unwrap_or(i32::MAX);
        seq(a)
            .cmp(&seq(b))
            .then_with(|| a.display_name().to_lowercase().cmp(&b.display_name().to_lowercase()))
    });
    selectable
        .into_iter()
        .filter_map(|item| item.id().map(|id| (id, item.display_name())))
        .collect()
}

/// Loads `E` once when the calling component mounts. Stays empty on failure.
pub fn use_lookup<E: CrudEntity>() -> RwSignal<Vec<E>> {
    let items = RwSignal::new(Vec::new());
    let client = use_api();
    spawn_local(async move {
        match fetch_all::<E>(&client).await {
            Ok(data) => {
                let _ = items.try_set(data);
            }
            Err(e) => log::error!("Failed to load {}: {:?}", E::list_name(), e),
        }
    });
    items
}

pub fn options_signal<E: CrudEntity>(items: RwSignal<Vec<E>>) -> Signal<Vec<(EntityId, String)>> {
    Signal::derive(move || items.with(|list| to_options(list)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_unit::Unit;
    use contracts::domain::a007_product::Product;

    fn unit(id: Option<EntityId>, name: &str, status: bool) -> Unit {
        Unit {
            id,
            name: name.into(),
            short_name: String::new(),
            status,
        }
    }

    #[test]
    fn test_options_skip_inactive_and_unsaved() {
        let items = vec![
            unit(Some(1), "kg", true),
            unit(Some(2), "box", false),
            unit(None, "draft", true),
            unit(Some(3), "Bag", true),
        ];
        assert_eq!(
            to_options(&items),
            vec![(3, "Bag".to_string()), (1, "kg".to_string())]
        );
    }

    #[test]
    fn test_options_follow_sort_sequence() {
        let mut first = Product::create_new();
        first.id = Some(10);
        first.name = "Zinc".into();
        first.sort_sequence = Some(1);
        let mut second = Product::create_new();
        second.id = Some(11);
        second.name = "Apple".into();

        let options = to_options(&[second, first]);
        assert_eq!(options[0].0, 10);
        assert_eq!(options[1].0, 11);
    }
}
