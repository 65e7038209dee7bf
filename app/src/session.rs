use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use worklink_shared::{Profile, SessionUser};
use worklink_stores::session::{Session, AUTHENTICATED_KEY, PROFILE_KEY, USER_KEY};

use crate::api;

/// Reactive session state shared via context. One per app, initialized from
/// session storage at startup and torn down on logout or a global 401.
#[derive(Clone, Copy, Debug)]
pub struct SessionState {
    pub session: RwSignal<Session>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.session.with_untracked(|s| s.is_authenticated)
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.with_untracked(|s| s.user.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.user_id().map(str::to_string))
    }

    pub fn sign_in(&self, user: SessionUser, token: Option<String>) {
        if let Some(token) = token {
            api::set_token(&token);
        }
        self.session.set(Session::authenticated(user));
    }

    pub fn set_profile(&self, profile: Profile) {
        self.session.update(|s| s.set_profile(profile));
    }

    pub fn sign_out(&self) {
        let session = self.session;
        spawn_local(async move {
            // Best effort; the session is cleared locally either way.
            if let Err(e) = api::auth::logout().await {
                log::warn!("logout call failed: {}", e);
            }
            api::clear_persisted_session();
            session.update(|s| s.clear());
        });
    }
}

fn storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

fn rehydrate() -> Session {
    let Some(storage) = storage() else {
        return Session::anonymous();
    };
    let read = |key: &str| storage.get_item(key).ok().flatten();

    let is_authenticated = read(AUTHENTICATED_KEY).as_deref() == Some("true");
    if !is_authenticated {
        return Session::anonymous();
    }
    let Some(user) = read(USER_KEY).and_then(|raw| serde_json::from_str(&raw).ok()) else {
        return Session::anonymous();
    };
    let mut session = Session::authenticated(user);
    if let Some(profile) = read(PROFILE_KEY).and_then(|raw| serde_json::from_str(&raw).ok()) {
        session.set_profile(profile);
    }
    session
}

fn persist(session: &Session) {
    let Some(storage) = storage() else { return };
    if !session.is_authenticated {
        api::clear_persisted_session();
        return;
    }
    if let Some(user) = &session.user {
        if let Ok(raw) = serde_json::to_string(user) {
            let _ = storage.set_item(USER_KEY, &raw);
        }
    }
    match &session.user_profile {
        Some(profile) => {
            if let Ok(raw) = serde_json::to_string(profile) {
                let _ = storage.set_item(PROFILE_KEY, &raw);
            }
        }
        None => {
            let _ = storage.remove_item(PROFILE_KEY);
        }
    }
    let _ = storage.set_item(AUTHENTICATED_KEY, "true");
}

/// Provider component — wraps children with session context.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(rehydrate());
    let state = SessionState { session };
    provide_context(state);

    // Any 401 from any service wrapper drops the in-memory session too.
    api::on_unauthorized(move || {
        session.update(|s| s.clear());
    });

    // Mirror every change back into session storage.
    Effect::new(move |_| {
        session.with(|s| persist(s));
    });

    // Revalidate a rehydrated session against the auth service.
    if session.with_untracked(|s| s.is_authenticated) {
        spawn_local(async move {
            match api::auth::current_user().await {
                Ok(user) => {
                    log::debug!("session revalidated for {}", user.id);
                    session.update(|s| s.user = Some(user));
                }
                Err(e) => {
                    // 401 already cleared everything; other failures keep
                    // the cached session for offline-ish startup.
                    log::warn!("session revalidation failed: {}", e);
                }
            }
        });
    }

    children()
}

/// Nav-corner login/logout control.
#[component]
pub fn SessionControls() -> impl IntoView {
    let state = expect_context::<SessionState>();

    let on_logout = move |_| state.sign_out();

    move || {
        if let Some(user) = state.session.get().user {
            view! {
                <div class="wl-session">
                    <a href={format!("/profile/{}", user.id)} class="wl-username">
                        {user.name.clone()}
                    </a>
                    <button class="wl-btn wl-btn-sm" on:click=on_logout>"Logout"</button>
                </div>
            }
            .into_any()
        } else {
            view! {
                <div class="wl-session">
                    <a class="wl-btn" href="/login">"Login"</a>
                    <a class="wl-btn" href="/signup">"Sign up"</a>
                </div>
            }
            .into_any()
        }
    }
}
