//! List-screen operations, free of any UI. The controller runs them and
//! turns the outcome into state changes and toasts.

use contracts::domain::common::CrudEntity;
use contracts::shared::api::{ListQuery, PaginatedData};

use super::service::CrudService;
use crate::shared::http::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user answered "no" to the confirmation
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

pub async fn load_page<S: CrudService>(
    service: &S,
    query: &ListQuery,
) -> Result<PaginatedData<S::Item>, ApiError> {
    log::debug!(
        "Loading {} page {} (size {})",
        S::Item::list_name(),
        query.page,
        query.per_page
    );
    service.list(query).await
}

/// Capability check, then confirmation, then the request.
///
/// A missing delete capability is reported as `Unsupported` without asking
/// the user or touching the network.
pub async fn delete_item<S, F>(
    service: &S,
    item: &S::Item,
    confirm: F,
) -> Result<DeleteOutcome, ApiError>
where
    S: CrudService,
    F: FnOnce(&str) -> bool,
{
    if !service.capabilities().delete {
        log::error!("{} records cannot be deleted", S::Item::element_name());
        return Err(ApiError::Unsupported(format!(
            "{} records cannot be deleted.",
            S::Item::element_name()
        )));
    }
    let id = item.id().ok_or_else(|| {
        ApiError::Unsupported("This record has not been saved yet.".to_string())
    })?;

    let question = format!(
        "Delete {} \"{}\"? This cannot be undone.",
        S::Item::element_name().to_lowercase(),
        item.display_name()
    );
    if !confirm(&question) {
        return Ok(DeleteOutcome::Cancelled);
    }

    service.delete(id).await?;
    Ok(DeleteOutcome::Deleted)
}

/// Flip the status flag on the server. Returns the new value.
pub async fn toggle_status<S: CrudService>(service: &S, item: &S::Item) -> Result<bool, ApiError> {
    let current = match (service.capabilities().toggle_status, item.status()) {
        (true, Some(current)) => current,
        _ => {
            return Err(ApiError::Unsupported(format!(
                "{} records have no status to change.",
                S::Item::element_name()
            )))
        }
    };
    let id = item.id().ok_or_else(|| {
        ApiError::Unsupported("This record has not been saved yet.".to_string())
    })?;

    service.toggle_status(id).await?;
    Ok(!current)
}

/// Validate locally, then create or update from the write DTO.
pub async fn save_item<S: CrudService>(service: &S, item: &S::Item) -> Result<SaveOutcome, ApiError> {
    item.validate().map_err(ApiError::Invalid)?;
    let dto = item.to_dto();
    match item.id() {
        Some(id) => {
            service.update(id, &dto).await?;
            Ok(SaveOutcome::Updated)
        }
        None => {
            service.create(&dto).await?;
            Ok(SaveOutcome::Created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_unit::{Unit, UnitDto};
    use contracts::domain::common::{Capabilities, EntityId};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    /// In-memory service recording every call it receives.
    struct FakeService {
        capabilities: Capabilities,
        calls: RefCell<Vec<String>>,
        fail_with: Option<ApiError>,
    }

    impl FakeService {
        fn new(capabilities: Capabilities) -> Self {
            Self {
                capabilities,
                calls: RefCell::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(error: ApiError) -> Self {
            Self {
                fail_with: Some(error),
                ..Self::new(Capabilities::FULL)
            }
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl CrudService for FakeService {
        type Item = Unit;

        fn capabilities(&self) -> Capabilities {
            self.capabilities
        }

        async fn list(&self, query: &ListQuery) -> Result<PaginatedData<Unit>, ApiError> {
            self.record(format!("list {} {}", query.page, query.per_page))?;
            Ok(PaginatedData {
                current_page: query.page,
                data: vec![unit(Some(1))],
                from: Some(1),
                to: Some(1),
                last_page: 1,
                per_page: query.per_page,
                total: 1,
            })
        }

        async fn get(&self, id: EntityId) -> Result<Unit, ApiError> {
            self.record(format!("get {}", id))?;
            Ok(unit(Some(id)))
        }

        async fn create(&self, dto: &UnitDto) -> Result<(), ApiError> {
            self.record(format!("create {}", dto.name))
        }

        async fn update(&self, id: EntityId, dto: &UnitDto) -> Result<(), ApiError> {
            self.record(format!("update {} {}", id, dto.name))
        }

        async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
            self.record(format!("delete {}", id))
        }

        async fn toggle_status(&self, id: EntityId) -> Result<(), ApiError> {
            self.record(format!("status {}", id))
        }
    }

    fn unit(id: Option<EntityId>) -> Unit {
        Unit {
            id,
            name: "Box".into(),
            short_name: "bx".into(),
            status: true,
        }
    }

    #[test]
    fn test_load_page_passes_query() {
        let service = FakeService::new(Capabilities::FULL);
        let page = block_on(load_page(&service, &ListQuery::new(2, 10, None))).unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(service.calls(), vec!["list 2 10"]);
    }

    #[test]
    fn test_delete_without_capability_never_asks_or_calls() {
        let service = FakeService::new(Capabilities::NONE);
        let asked = Cell::new(false);
        let result = block_on(delete_item(&service, &unit(Some(1)), |_| {
            asked.set(true);
            true
        }));
        assert!(matches!(result, Err(ApiError::Unsupported(_))));
        assert!(!asked.get());
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_delete_cancelled_by_user() {
        let service = FakeService::new(Capabilities::FULL);
        let result = block_on(delete_item(&service, &unit(Some(4)), |question| {
            assert!(question.contains("\"Box\""));
            false
        }));
        assert_eq!(result, Ok(DeleteOutcome::Cancelled));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_delete_confirmed() {
        let service = FakeService::new(Capabilities::DELETE_ONLY);
        let result = block_on(delete_item(&service, &unit(Some(4)), |_| true));
        assert_eq!(result, Ok(DeleteOutcome::Deleted));
        assert_eq!(service.calls(), vec!["delete 4"]);
    }

    #[test]
    fn test_delete_failure_surfaces_error() {
        let service = FakeService::failing(ApiError::Forbidden);
        let result = block_on(delete_item(&service, &unit(Some(4)), |_| true));
        assert_eq!(result, Err(ApiError::Forbidden));
    }

    #[test]
    fn test_toggle_status_returns_new_value() {
        let service = FakeService::new(Capabilities::FULL);
        assert_eq!(block_on(toggle_status(&service, &unit(Some(7)))), Ok(false));
        assert_eq!(service.calls(), vec!["status 7"]);

        let service = FakeService::new(Capabilities::DELETE_ONLY);
        assert!(matches!(
            block_on(toggle_status(&service, &unit(Some(7)))),
            Err(ApiError::Unsupported(_))
        ));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_save_validates_before_request() {
        let service = FakeService::new(Capabilities::FULL);
        let mut invalid = unit(None);
        invalid.name = "  ".into();
        let result = block_on(save_item(&service, &invalid));
        match result {
            Err(ApiError::Invalid(errors)) => assert!(!errors.field("name").is_empty()),
            other => panic!("expected local validation error, got {:?}", other),
        }
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_save_creates_or_updates() {
        let service = FakeService::new(Capabilities::FULL);
        assert_eq!(block_on(save_item(&service, &unit(None))), Ok(SaveOutcome::Created));
        assert_eq!(block_on(save_item(&service, &unit(Some(3)))), Ok(SaveOutcome::Updated));
        assert_eq!(service.calls(), vec!["create Box", "update 3 Box"]);
    }
}
