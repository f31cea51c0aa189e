use leptos::prelude::*;
use thaw::*;

/// Search box applied on Enter or the Search button, not on every keystroke.
#[component]
pub fn SearchBar(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    placeholder: Signal<String>,
    #[prop(into)]
    searching: Signal<bool>,
    on_input: Callback<String>,
    on_search: Callback<()>,
    on_clear: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="search-bar">
            <input
                type="search"
                class="search-bar__input"
                placeholder=move || placeholder.get()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        on_search.run(());
                    }
                }
            />
            <Button
                appearance=ButtonAppearance::Primary
                size=ButtonSize::Small
                on_click=move |_| on_search.run(())
            >
                "Search"
            </Button>
            <Show when=move || !value.get().is_empty()>
                <Button size=ButtonSize::Small on_click=move |_| on_clear.run(())>
                    "Clear"
                </Button>
            </Show>
            <Show when=move || searching.get()>
                <Spinner size=SpinnerSize::Tiny />
            </Show>
        </div>
    }
}
