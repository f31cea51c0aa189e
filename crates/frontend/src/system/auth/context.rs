use contracts::system::auth::TokenClaims;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::idle::IdleTracker;
use super::session::Session;
use super::storage::LocalStorageStore;
use super::api;
use crate::shared::config::AppConfig;
use crate::shared::http::ApiClient;
use crate::shared::toast::ToastService;

const IDLE_CHECK_INTERVAL_MS: u32 = 15_000;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub claims: Option<TokenClaims>,
}

impl AuthState {
    pub fn from_session(session: &Session) -> Self {
        Self {
            access_token: session.access_token(),
            claims: session.claims(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn has_role(&self, role_id: i64) -> bool {
        self.claims.as_ref().and_then(|c| c.role_id) == Some(role_id)
    }
}

/// What to do with credentials found in storage at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restore {
    Anonymous,
    Valid,
    Refresh,
}

pub fn restore_plan(session: &Session, now_secs: i64) -> Restore {
    if !session.is_authenticated() {
        return Restore::Anonymous;
    }
    if !session.is_access_expired(now_secs) {
        return Restore::Valid;
    }
    if session.refresh_token().is_some() {
        Restore::Refresh
    } else {
        Restore::Anonymous
    }
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn now_secs() -> i64 {
    (now_ms() / 1000.0) as i64
}

/// Auth context provider component
///
/// Owns the `Session` and the `ApiClient` built on it; both are provided as
/// context together with the `AuthState` signal pair.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let config = AppConfig::get();
    let session = Session::new(LocalStorageStore);
    let client = ApiClient::from_config(session.clone(), config);
    let (auth_state, set_auth_state) = signal(AuthState::default());
    let toasts = use_context::<ToastService>();

    // A 401 anywhere lands here once per login
    session.set_unauthorized_hook(move || {
        set_auth_state.set(AuthState::default());
        if let Some(toasts) = toasts {
            toasts.error("Your session has expired. Please log in again.");
        }
    });

    match restore_plan(&session, now_secs()) {
        Restore::Valid => set_auth_state.set(AuthState::from_session(&session)),
        Restore::Anonymous => session.clear(),
        Restore::Refresh => {
            let client = client.clone();
            spawn_local(async move {
                match api::refresh(&client).await {
                    Ok(_) => set_auth_state.set(AuthState::from_session(client.session())),
                    Err(e) => {
                        log::info!("Stored session could not be refreshed: {}", e);
                        client.session().clear();
                    }
                }
            });
        }
    }

    watch_activity(session.clone(), set_auth_state, config.idle_timeout_ms(), toasts);

    provide_context(session);
    provide_context(client);
    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Idle timeout, hidden tab and page unload all end the session locally.
fn watch_activity(
    session: Session,
    set_auth_state: WriteSignal<AuthState>,
    timeout_ms: f64,
    toasts: Option<ToastService>,
) {
    let tracker = StoredValue::new(IdleTracker::new(timeout_ms, now_ms()));
    let touch = move || tracker.update_value(|t| t.touch(now_ms()));

    let _ = window_event_listener(leptos::ev::mousemove, move |_| touch());
    let _ = window_event_listener(leptos::ev::keydown, move |_| touch());
    let _ = window_event_listener(leptos::ev::scroll, move |_| touch());
    let _ = window_event_listener(leptos::ev::click, move |_| touch());

    let end_session = {
        let session = session.clone();
        move |reason: &str| {
            if !session.is_authenticated() {
                return;
            }
            log::info!("Session ended: {}", reason);
            session.clear();
            set_auth_state.set(AuthState::default());
        }
    };

    {
        let end_session = end_session.clone();
        Interval::new(IDLE_CHECK_INTERVAL_MS, move || {
            if tracker.with_value(|t| t.is_idle(now_ms())) {
                end_session("idle timeout");
                if let Some(toasts) = toasts {
                    toasts.info("You were logged out after a period of inactivity.");
                }
                tracker.update_value(|t| t.touch(now_ms()));
            }
        })
        .forget();
    }

    let on_visibility = {
        let end_session = end_session.clone();
        Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let hidden = web_sys::window()
                .and_then(|w| w.document())
                .map(|d| d.hidden())
                .unwrap_or(false);
            if hidden {
                end_session("tab hidden");
            }
        }) as Box<dyn FnMut(_)>)
    };
    let on_unload = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        end_session("page unload");
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                on_visibility.as_ref().unchecked_ref(),
            );
        }
        let _ = window
            .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
    }
    // The provider lives as long as the app
    on_visibility.forget();
    on_unload.forget();
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("AuthProvider not found in component tree")
}

/// Helper: Perform login
pub async fn do_login(
    client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
    login: String,
    password: String,
) -> Result<(), String> {
    api::authenticate(client, login, password)
        .await
        .map_err(|e| e.user_message())?;
    set_auth_state.set(AuthState::from_session(client.session()));
    Ok(())
}

/// Helper: Perform logout
pub fn do_logout(client: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    api::logout(client);
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::claims::make_token;
    use crate::system::auth::storage::MemoryStore;
    use contracts::system::auth::TokenPair;

    fn session_with(exp: i64, with_refresh: bool) -> Session {
        let session = Session::new(MemoryStore::new());
        let access_token = make_token(&format!(r#"{{"exp": {}, "roleId": 2}}"#, exp));
        if with_refresh {
            session.save_tokens(&TokenPair {
                access_token,
                refresh_token: "r".into(),
            });
        } else {
            session.save_access_token(&access_token);
        }
        session
    }

    #[test]
    fn test_restore_plan() {
        assert_eq!(restore_plan(&Session::new(MemoryStore::new()), 100), Restore::Anonymous);
        assert_eq!(restore_plan(&session_with(200, true), 100), Restore::Valid);
        assert_eq!(restore_plan(&session_with(50, true), 100), Restore::Refresh);
        assert_eq!(restore_plan(&session_with(50, false), 100), Restore::Anonymous);
    }

    #[test]
    fn test_unreadable_token_refreshes() {
        let session = Session::new(MemoryStore::new());
        session.save_tokens(&TokenPair {
            access_token: "garbage".into(),
            refresh_token: "r".into(),
        });
        assert_eq!(restore_plan(&session, 100), Restore::Refresh);
    }

    #[test]
    fn test_auth_state_role() {
        let session = session_with(200, true);
        let state = AuthState::from_session(&session);
        assert!(state.is_authenticated());
        assert!(state.has_role(2));
        assert!(!state.has_role(1));
        assert!(!AuthState::default().is_authenticated());
    }
}
