use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires one of the given roles
/// Shows fallback if the token carries another role
#[component]
pub fn RequireRole(
    /// Role ids allowed to see the children
    #[prop(into)]
    roles: Vec<i64>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                let state = auth_state.get();
                state.is_authenticated() && roles.iter().any(|role| state.has_role(*role))
            }
            fallback=|| view! { <div class="warning-box">"Access denied. You do not have the required role."</div> }
        >
            {children()}
        </Show>
    }
}
