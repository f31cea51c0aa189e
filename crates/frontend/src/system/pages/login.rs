use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::{do_login, use_api, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (login, set_login) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let client = use_api();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let login_val = login.get().trim().to_string();
        let password_val = password.get();
        if login_val.is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Login and password are required.".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let client = client.clone();
        spawn_local(async move {
            // On success the auth state switches the shell to the main layout
            if let Err(e) = do_login(&client, set_auth_state, login_val, password_val).await {
                set_error_message.set(Some(e));
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Rapid Global"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="login">"Login"</label>
                        <input
                            type="text"
                            id="login"
                            autocomplete="username"
                            prop:value=move || login.get()
                            on:input=move |ev| set_login.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
