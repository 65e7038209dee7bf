mod api;
mod auth;
mod feed;
mod job_form;
mod jobs;
mod lookup;
mod profile;
mod profile_wizard;
mod session;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use session::{SessionProvider, SessionControls};

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::mount_to_body(|| {
        view! {
            <SessionProvider>
                <App />
            </SessionProvider>
        }
    });
}

#[component]
fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="wl-app">
                <nav class="wl-nav">
                    <a class="wl-brand" href="/">"worklink"</a>
                    <a href="/">"Feed"</a>
                    <a href="/jobs">"Jobs"</a>
                    <SessionControls />
                </nav>
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route path=path!("/") view=feed::FeedPage />
                    <Route path=path!("/jobs") view=jobs::JobsPage />
                    <Route path=path!("/jobs/new") view=job_form::JobPostPage />
                    <Route path=path!("/profile/:id") view=profile::ProfilePage />
                    <Route path=path!("/setup") view=profile_wizard::ProfileSetupPage />
                    <Route path=path!("/login") view=auth::LoginPage />
                    <Route path=path!("/signup") view=auth::SignupPage />
                    <Route path=path!("/forgot-password") view=auth::ForgotPasswordPage />
                </Routes>
            </div>
        </Router>
    }
}
