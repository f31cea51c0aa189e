use contracts::domain::common::{CrudEntity, EntityId};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use thaw::*;

use super::controller::ListController;
use super::service::CrudService;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::search_bar::SearchBar;
use crate::shared::config::AppConfig;
use crate::shared::http::ApiError;
use crate::shared::icons::icon;
use crate::shared::modal::{use_modal, ModalHandle};
use crate::shared::page_context::use_page_context;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

/// Renders one cell of an entity row for the given column key.
pub type CellRenderer<T> = fn(&T, &'static str) -> AnyView;

/// Renders the fields of the create/edit dialog.
pub type FormRenderer<T> = fn(RwSignal<T>, RwSignal<ValidationErrors>) -> AnyView;

/// Extra per-row buttons rendered before the standard actions.
pub type RowActions<T> = fn(&T) -> AnyView;

pub fn status_badge(active: bool) -> AnyView {
    if active {
        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Active"</Badge> }
            .into_any()
    } else {
        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Inactive"</Badge> }
            .into_any()
    }
}

/// Messages of one field, rendered under its input.
pub fn field_errors(errors: RwSignal<ValidationErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| {
            e.field(field)
                .iter()
                .map(|message| view! { <div class="form-group__error">{message.clone()}</div> })
                .collect_view()
        })
    }
}

/// Paged, searchable table of one entity with create/edit dialog, delete
/// and status toggle as its capabilities allow.
///
/// With `on_open` set, "New" and "Edit" hand the record id (`None` for new)
/// to the caller instead of opening the dialog; documents use this to open
/// their editor in a tab.
#[component]
pub fn CrudPage<S>(
    controller: ListController<S>,
    cell: CellRenderer<S::Item>,
    #[prop(optional)] form: Option<FormRenderer<S::Item>>,
    #[prop(optional)] on_open: Option<Callback<Option<EntityId>>>,
    #[prop(optional)] row_actions: Option<RowActions<S::Item>>,
) -> impl IntoView
where
    S: CrudService + 'static,
{
    let config = AppConfig::get();
    let page_ctx = use_page_context();
    let modal = use_modal();

    let list_name = S::Item::list_name();
    page_ctx.set(
        list_name,
        Some(&format!("Search {}...", list_name.to_lowercase())),
    );

    let entity_key = format!(
        "{}_{}",
        S::Item::aggregate_index(),
        S::Item::element_name().to_lowercase().replace(' ', "_")
    );
    let state = controller.state;
    let capabilities = controller.service().capabilities();
    let ctrl = StoredValue::new_local(controller);
    ctrl.with_value(|c| c.load());

    let open_editor = move |item: S::Item| {
        if let Some(on_open) = on_open {
            on_open.run(item.id());
            return;
        }
        let Some(form) = form else {
            log::warn!("{} has no editor", S::Item::list_name());
            return;
        };
        modal.open(Some("crud-editor-modal"), move |handle| {
            view! { <EditorDialog<S> item=item.clone() ctrl=ctrl form=form handle=handle /> }
                .into_any()
        });
    };

    let columns_menu = move || {
        state.with(|s| {
            s.columns
                .all()
                .iter()
                .map(|column| {
                    let key = column.key;
                    let visible = column.visible;
                    view! {
                        <label class="column-toggle__item">
                            <input
                                type="checkbox"
                                prop:checked=visible
                                on:change=move |_| ctrl.with_value(|c| c.toggle_column(key))
                            />
                            {column.label}
                        </label>
                    }
                })
                .collect_view()
        })
    };

    let rows = move || {
        let (items, keys, colspan) = state.with(|s| {
            (
                s.items.clone(),
                s.columns.visible().map(|c| c.key).collect::<Vec<_>>(),
                s.columns.visible_count(),
            )
        });
        if items.is_empty() {
            let text = if state.with(|s| s.loading) {
                "Loading..."
            } else {
                "No records found"
            };
            return view! {
                <tr>
                    <td class="table__cell table__cell--empty" colspan=colspan.to_string()>{text}</td>
                </tr>
            }
            .into_any();
        }

        items
            .into_iter()
            .map(|item| {
                let cells = keys
                    .iter()
                    .map(|&key| view! { <td class="table__cell">{cell(&item, key)}</td> })
                    .collect_view();
                let status = item.status();
                let edit_item = item.clone();
                let status_item = item.clone();
                let delete_item = item.clone();
                view! {
                    <tr class="table__row">
                        {cells}
                        <td class="table__cell table__cell--actions">
                            {row_actions.map(|actions| actions(&item))}
                            <button
                                class="button button--ghost"
                                title="Edit"
                                on:click=move |_| open_editor(edit_item.clone())
                            >
                                {icon("edit")}
                            </button>
                            {(capabilities.toggle_status && status.is_some()).then(|| view! {
                                <button
                                    class="button button--ghost"
                                    title=if status == Some(true) { "Deactivate" } else { "Activate" }
                                    on:click=move |_| {
                                        let item = status_item.clone();
                                        ctrl.with_value(|c| c.toggle_status(item));
                                    }
                                >
                                    {icon("toggle")}
                                </button>
                            })}
                            {capabilities.delete.then(|| view! {
                                <button
                                    class="button button--ghost button--danger"
                                    title="Delete"
                                    on:click=move |_| {
                                        let item = delete_item.clone();
                                        ctrl.with_value(|c| c.delete(item));
                                    }
                                >
                                    {icon("delete")}
                                </button>
                            })}
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <PageFrame page_id=page_id(&entity_key, PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <PageHeader title=list_name>
                <SearchBar
                    value=Signal::derive(move || state.with(|s| s.search_input.clone()))
                    placeholder=page_ctx.search_placeholder
                    searching=Signal::derive(move || state.with(|s| s.searching))
                    on_input=Callback::new(move |text: String| ctrl.with_value(|c| c.stage_search(text)))
                    on_search=Callback::new(move |_| ctrl.with_value(|c| c.search()))
                    on_clear=Callback::new(move |_| ctrl.with_value(|c| c.clear_search()))
                />
                <details class="column-toggle">
                    <summary class="button button--secondary">{icon("columns")}"Columns"</summary>
                    <div class="column-toggle__menu">{columns_menu}</div>
                </details>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| ctrl.with_value(|c| c.load())
                >
                    {icon("refresh")}
                    "Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_editor(S::Item::create_new())
                >
                    {icon("plus")}
                    {format!("New {}", S::Item::element_name().to_lowercase())}
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || state.with(|s| s.error.clone()).map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                        <button
                            class="warning-box__close"
                            on:click=move |_| ctrl.with_value(|c| c.dismiss_error())
                        >
                            "×"
                        </button>
                    </div>
                })}

                <div class="table" class:table--loading=move || state.with(|s| s.loading)>
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                {move || state.with(|s| {
                                    s.columns
                                        .visible()
                                        .map(|c| view! { <th class="table__header-cell">{c.label}</th> })
                                        .collect_view()
                                })}
                                <th class="table__header-cell table__header-cell--actions">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                </div>

                <PaginationControls
                    paginator=Signal::derive(move || state.with(|s| s.paginator.clone()))
                    page_window=config.list.page_window
                    page_size_options=config.list.page_size_options.clone()
                    on_move=Callback::new(move |step| ctrl.with_value(|c| c.move_page(step)))
                    on_page_size_change=Callback::new(move |size| ctrl.with_value(|c| c.set_page_size(size)))
                />
            </div>
        </PageFrame>
    }
}

/// Create/edit dialog body. Field errors from local validation and from
/// 422 responses are shown next to the inputs.
#[component]
fn EditorDialog<S>(
    item: S::Item,
    ctrl: StoredValue<ListController<S>, LocalStorage>,
    form: FormRenderer<S::Item>,
    handle: ModalHandle,
) -> impl IntoView
where
    S: CrudService + 'static,
{
    let is_new = item.id().is_none();
    let draft = RwSignal::new(item);
    let errors = RwSignal::new(ValidationErrors::new());
    let message = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let title = if is_new {
        format!("New {}", S::Item::element_name().to_lowercase())
    } else {
        format!("Edit {}", S::Item::element_name().to_lowercase())
    };

    let on_save = move |_| {
        let Some(controller) = ctrl.try_get_value() else {
            handle.close();
            return;
        };
        saving.set(true);
        message.set(None);
        errors.set(ValidationErrors::new());
        controller.save(draft.get_untracked(), move |result| {
            saving.set(false);
            match result {
                Ok(_) => handle.close(),
                Err(e) => {
                    if let Some(fields) = e.field_errors() {
                        errors.set(fields.clone());
                    }
                    if !matches!(e, ApiError::Unauthorized) {
                        message.set(Some(e.user_message()));
                    }
                }
            }
        });
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{title}</h3>
            </div>

            {move || message.get().map(|m| view! { <div class="error">{m}</div> })}

            <div class="details-form">{form(draft, errors)}</div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=on_save
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
                <Button on_click=move |_| handle.close()>"Cancel"</Button>
            </div>
        </div>
    }
}
