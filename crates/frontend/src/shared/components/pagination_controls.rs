use crate::shared::icons::icon;
use crate::shared::paginator::{PageMove, Paginator};
use leptos::prelude::*;

/// Reusable pagination bar: first/previous, a window of page numbers,
/// next/last, the row range and a page size selector.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    paginator: Signal<Paginator>,

    /// How many page number buttons to show at most
    page_window: usize,

    on_move: Callback<PageMove>,

    on_page_size_change: Callback<usize>,

    page_size_options: Vec<usize>,
) -> impl IntoView {
    let current = move || paginator.with(|p| p.current_page);

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">{move || paginator.with(|p| p.range_label())}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_move.run(PageMove::First)
                disabled=move || !paginator.with(|p| p.can_go_previous())
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_move.run(PageMove::Previous)
                disabled=move || !paginator.with(|p| p.can_go_previous())
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                paginator
                    .with(|p| p.page_numbers(page_window))
                    .into_iter()
                    .map(|page| {
                        view! {
                            <button
                                class="pagination-btn pagination-btn--number"
                                class:pagination-btn--active=move || current() == page
                                on:click=move |_| on_move.run(PageMove::To(page))
                            >
                                {(page + 1).to_string()}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| on_move.run(PageMove::Next)
                disabled=move || !paginator.with(|p| p.can_go_next())
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_move.run(PageMove::Last)
                disabled=move || !paginator.with(|p| p.can_go_next())
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || paginator.with(|p| p.page_size.to_string())
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option
                            value=size.to_string()
                            selected=move || paginator.with(|p| p.page_size == size)
                        >
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
