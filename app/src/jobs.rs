use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use worklink_shared::*;
use worklink_stores::jobs::{JobFilter, JobsStore, SubmitStatus};

use crate::api;
use crate::session::SessionState;

#[component]
pub fn JobsPage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let store = RwSignal::new(JobsStore::new());
    let query = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let remote_only = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    // Which job the apply dialog is open for.
    let applying_to: RwSignal<Option<Job>> = RwSignal::new(None);

    spawn_local(async move {
        match api::jobs::list().await {
            Ok(jobs) => store.update(|s| s.set_jobs(jobs)),
            Err(e) => error.set(Some(e.to_string())),
        }
    });
    if let Some(user_id) = state.user_id() {
        spawn_local(async move {
            match api::jobs::candidate_applications(&user_id).await {
                Ok(apps) => store.update(|s| s.set_applications(apps)),
                Err(e) => log::warn!("could not load applications: {}", e),
            }
        });
    }

    // The jobs service has no query support; filtering is all client-side.
    let filtered = move || {
        let filter = JobFilter {
            query: query.get(),
            location: location.get(),
            remote_only: remote_only.get(),
        };
        store.with(|s| s.filtered(&filter))
    };

    let is_recruiter = move || {
        state
            .session
            .get()
            .user
            .map(|u| u.role == Role::Recruiter)
            .unwrap_or(false)
    };

    view! {
        <section class="wl-jobs">
            <div class="wl-job-filters">
                <input
                    class="wl-input"
                    type="search"
                    placeholder="Search title, company or skill"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <input
                    class="wl-input"
                    type="text"
                    placeholder="Location"
                    prop:value=move || location.get()
                    on:input=move |ev| location.set(event_target_value(&ev))
                />
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || remote_only.get()
                        on:change=move |ev| remote_only.set(event_target_checked(&ev))
                    />
                    "Remote only"
                </label>
                <Show when=is_recruiter>
                    <a class="wl-btn" href="/jobs/new">"Post a job"</a>
                </Show>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="wl-job-list">
                <For
                    each=filtered
                    key=|j| j.job_id.clone()
                    let:job
                >
                    <JobCard job=job store=store applying_to=applying_to />
                </For>
            </div>
            {move || {
                applying_to.get().map(|job| view! {
                    <ApplyDialog job=job store=store applying_to=applying_to />
                })
            }}
            <Show when=is_recruiter>
                <RecruiterPanel />
            </Show>
            <Show when=move || !is_recruiter() && state.session.get().is_authenticated>
                <MyApplications store=store />
            </Show>
        </section>
    }
}

#[component]
fn JobCard(
    job: Job,
    store: RwSignal<JobsStore>,
    applying_to: RwSignal<Option<Job>>,
) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let job_id = job.job_id.clone();
    let skills = job.skills();
    let salary = if job.salary_min > 0 || job.salary_max > 0 {
        format!("{} – {}", job.salary_min, job.salary_max)
    } else {
        "Not specified".to_string()
    };

    let already_applied = {
        let job_id = job_id.clone();
        Memo::new(move |_| store.with(|s| s.has_applied(&job_id)))
    };
    let can_apply = move || {
        state
            .session
            .get()
            .user
            .map(|u| u.role == Role::Candidate)
            .unwrap_or(false)
    };

    let job_for_dialog = job.clone();
    view! {
        <article class="wl-job">
            <h3>{job.job_title.clone()}</h3>
            <p class="wl-job-company">
                {job.company_name.clone()}
                " · "
                {if job.remote { "Remote".to_string() } else { job.location.clone() }}
            </p>
            <p class="wl-job-salary">{salary}</p>
            <p class="wl-job-desc">{job.description.clone()}</p>
            <div class="wl-job-skills">
                {skills
                    .into_iter()
                    .map(|s| view! { <span class="wl-skill-tag">{s}</span> })
                    .collect_view()}
            </div>
            <Show when=can_apply>
                {
                    let job = job_for_dialog.clone();
                    view! {
                        <button
                            class="wl-btn"
                            disabled=move || already_applied.get()
                            on:click=move |_| applying_to.set(Some(job.clone()))
                        >
                            {move || if already_applied.get() { "Applied" } else { "Apply" }}
                        </button>
                    }
                }
            </Show>
        </article>
    }
}

/// Blocking application dialog driven by the submission state machine:
/// Idle → Loading → Succeeded | Failed, acknowledged back to Idle.
#[component]
fn ApplyDialog(
    job: Job,
    store: RwSignal<JobsStore>,
    applying_to: RwSignal<Option<Job>>,
) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let resume_url = RwSignal::new(String::new());
    let cover_letter = RwSignal::new(String::new());
    let job_id = job.job_id.clone();

    let status = move || store.with(|s| s.submit.clone());

    let on_submit = {
        let job_id = job_id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(candidate_id) = state.user_id() else {
                return;
            };
            // Refused while a submission is already in flight.
            if !store.try_update(|s| s.begin_submit()).unwrap_or(false) {
                return;
            }
            let payload = CreateApplication {
                job_id: job_id.clone(),
                candidate_id,
                resume_url: resume_url.get_untracked(),
                cover_letter: cover_letter.get_untracked(),
            };
            spawn_local(async move {
                let outcome = api::jobs::apply(&payload)
                    .await
                    .map_err(|e| e.to_string());
                store.update(|s| s.complete_submit(outcome));
            });
        }
    };

    let on_close = move |_| {
        store.update(|s| s.acknowledge());
        applying_to.set(None);
    };

    view! {
        <div class="wl-dialog-backdrop">
            <div class="wl-dialog">
                <h3>{format!("Apply: {} at {}", job.job_title, job.company_name)}</h3>
                {move || match status() {
                    SubmitStatus::Succeeded => view! {
                        <div class="wl-dialog-result">
                            <p class="wl-notice">"Application submitted."</p>
                            <button class="wl-btn" on:click=on_close>"Close"</button>
                        </div>
                    }
                    .into_any(),
                    SubmitStatus::Failed => view! {
                        <div class="wl-dialog-result">
                            <p class="wl-error">
                                {store.with_untracked(|s| s.error.clone().unwrap_or_default())}
                            </p>
                            <button class="wl-btn" on:click=on_close>"Close"</button>
                        </div>
                    }
                    .into_any(),
                    _ => view! {
                        <form class="wl-form" on:submit=on_submit.clone()>
                            <input
                                class="wl-input"
                                type="url"
                                placeholder="Resume URL"
                                prop:value=move || resume_url.get()
                                on:input=move |ev| resume_url.set(event_target_value(&ev))
                            />
                            <textarea
                                class="wl-textarea"
                                placeholder="Cover letter"
                                prop:value=move || cover_letter.get()
                                on:input=move |ev| cover_letter.set(event_target_value(&ev))
                            />
                            <button
                                class="wl-btn"
                                type="submit"
                                disabled=move || status() == SubmitStatus::Loading
                            >
                                {move || if status() == SubmitStatus::Loading {
                                    "Submitting..."
                                } else {
                                    "Submit application"
                                }}
                            </button>
                            <button class="wl-btn wl-btn-sm" type="button" on:click=on_close>
                                "Cancel"
                            </button>
                        </form>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn MyApplications(store: RwSignal<JobsStore>) -> impl IntoView {
    view! {
        <div class="wl-applications">
            <h3>"My applications"</h3>
            <For
                each=move || store.with(|s| s.applications.clone())
                key=|a| (a.job_id.clone(), a.application_id.clone())
                let:app
            >
                <div class="wl-application">
                    <span>{app.job_id.clone()}</span>
                    <span class="wl-application-status">{app.status.clone()}</span>
                </div>
            </For>
        </div>
    }
}

/// The recruiter's own postings with their applications, loaded on expand.
#[component]
fn RecruiterPanel() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let jobs: RwSignal<Vec<Job>> = RwSignal::new(Vec::new());

    if let Some(user_id) = state.user_id() {
        spawn_local(async move {
            match api::jobs::recruiter_jobs(&user_id).await {
                Ok(list) => jobs.set(list),
                Err(e) => log::warn!("could not load recruiter jobs: {}", e),
            }
        });
    }

    view! {
        <div class="wl-recruiter">
            <h3>"Your postings"</h3>
            <For
                each=move || jobs.get()
                key=|j| j.job_id.clone()
                let:job
            >
                <RecruiterJob job=job />
            </For>
        </div>
    }
}

#[component]
fn RecruiterJob(job: Job) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let applications: RwSignal<Vec<Application>> = RwSignal::new(Vec::new());
    let loaded = RwSignal::new(false);
    let job_id = job.job_id.clone();

    let on_toggle = move |_| {
        expanded.update(|v| *v = !*v);
        if expanded.get_untracked() && !loaded.get_untracked() {
            loaded.set(true);
            let job_id = job_id.clone();
            spawn_local(async move {
                match api::jobs::applications_for(&job_id).await {
                    Ok(apps) => applications.set(apps),
                    Err(e) => log::warn!("could not load applications: {}", e),
                }
            });
        }
    };

    view! {
        <div class="wl-recruiter-job">
            <button class="wl-job-toggle" on:click=on_toggle>
                {job.job_title.clone()}
            </button>
            <Show when=move || expanded.get()>
                <For
                    each=move || applications.get()
                    key=|a| (a.candidate_id.clone(), a.application_id.clone())
                    let:app
                >
                    <div class="wl-application">
                        <span>{app.candidate_id.clone()}</span>
                        <a href={app.resume_url.clone()} target="_blank" rel="noopener">
                            "Resume"
                        </a>
                        <span class="wl-application-status">{app.status.clone()}</span>
                    </div>
                </For>
            </Show>
        </div>
    }
}
