use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;
use worklink_shared::*;

use crate::api;
use crate::session::SessionState;

/// After a successful login/verify: store the session, pull the profile,
/// and route to the feed — or to profile setup when no profile exists yet.
async fn enter_session(
    state: SessionState,
    auth: AuthResponse,
    navigate: impl Fn(&str, leptos_router::NavigateOptions),
) {
    let user_id = auth.user.id.clone();
    state.sign_in(auth.user, auth.token);
    match api::profile::fetch(&user_id).await {
        Ok(profile) => {
            state.set_profile(profile);
            navigate("/", Default::default());
        }
        Err(e) => {
            log::debug!("no profile yet ({}), routing to setup", e);
            navigate("/setup", Default::default());
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submitting.set(true);
        error.set(None);
        let payload = LoginRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::login(&payload).await {
                Ok(auth) => enter_session(state, auth, navigate).await,
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="wl-auth-page">
            <h2>"Log in"</h2>
            <form class="wl-form" on:submit=on_submit>
                <input
                    class="wl-input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="wl-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <Show when=move || error.get().is_some()>
                    <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>
            <p class="wl-hint">
                <a href="/forgot-password">"Forgot password?"</a>
                " | "
                <a href="/signup">"Create an account"</a>
            </p>
        </section>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new("candidate".to_string());
    let otp = RwSignal::new(String::new());
    // false: account form, true: OTP verification step
    let awaiting_otp = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);
    let navigate = use_navigate();

    let on_signup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submitting.set(true);
        error.set(None);
        let payload = SignupRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            role: if role.get_untracked() == "recruiter" {
                Role::Recruiter
            } else {
                Role::Candidate
            },
        };
        spawn_local(async move {
            match api::auth::signup(&payload).await {
                Ok(()) => {
                    awaiting_otp.set(true);
                    notice.set(Some("We sent a verification code to your email.".into()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submitting.set(true);
        error.set(None);
        let payload = VerifyOtpRequest {
            email: email.get_untracked(),
            otp: otp.get_untracked(),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::verify_otp(&payload).await {
                Ok(auth) => enter_session(state, auth, navigate).await,
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let on_resend = move |_| {
        let payload = ResendOtpRequest {
            email: email.get_untracked(),
        };
        spawn_local(async move {
            match api::auth::resend_otp(&payload).await {
                Ok(()) => notice.set(Some("Code resent.".into())),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <section class="wl-auth-page">
            <h2>"Sign up"</h2>
            <Show when=move || notice.get().is_some()>
                <p class="wl-notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || awaiting_otp.get()
                fallback=move || view! {
                    <form class="wl-form" on:submit=on_signup>
                        <input
                            class="wl-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                        <input
                            class="wl-input"
                            type="email"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="wl-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <select
                            class="wl-input"
                            on:change=move |ev| role.set(event_target_value(&ev))
                        >
                            <option value="candidate">"I am looking for a job"</option>
                            <option value="recruiter">"I am hiring"</option>
                        </select>
                        <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Signing up..." } else { "Sign up" }}
                        </button>
                    </form>
                }
            >
                <form class="wl-form" on:submit=on_verify.clone()>
                    <input
                        class="wl-input"
                        type="text"
                        placeholder="Verification code"
                        prop:value=move || otp.get()
                        on:input=move |ev| otp.set(event_target_value(&ev))
                    />
                    <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Verifying..." } else { "Verify" }}
                    </button>
                    <button class="wl-btn wl-btn-sm" type="button" on:click=on_resend>
                        "Resend code"
                    </button>
                </form>
            </Show>
        </section>
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let code_sent = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);
    let navigate = use_navigate();

    let on_request = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submitting.set(true);
        error.set(None);
        let payload = ForgotPasswordRequest {
            email: email.get_untracked(),
        };
        spawn_local(async move {
            match api::auth::forgot_password(&payload).await {
                Ok(()) => {
                    code_sent.set(true);
                    notice.set(Some("Check your email for a reset code.".into()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let on_reset = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submitting.set(true);
        error.set(None);
        let payload = ResetPasswordRequest {
            email: email.get_untracked(),
            otp: otp.get_untracked(),
            new_password: new_password.get_untracked(),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::reset_password(&payload).await {
                Ok(()) => navigate("/login", Default::default()),
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="wl-auth-page">
            <h2>"Reset password"</h2>
            <Show when=move || notice.get().is_some()>
                <p class="wl-notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || code_sent.get()
                fallback=move || view! {
                    <form class="wl-form" on:submit=on_request>
                        <input
                            class="wl-input"
                            type="email"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                            "Send reset code"
                        </button>
                    </form>
                }
            >
                <form class="wl-form" on:submit=on_reset.clone()>
                    <input
                        class="wl-input"
                        type="text"
                        placeholder="Reset code"
                        prop:value=move || otp.get()
                        on:input=move |ev| otp.set(event_target_value(&ev))
                    />
                    <input
                        class="wl-input"
                        type="password"
                        placeholder="New password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| new_password.set(event_target_value(&ev))
                    />
                    <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                        "Reset password"
                    </button>
                </form>
            </Show>
        </section>
    }
}
