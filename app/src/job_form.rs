use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;
use worklink_stores::wizard::{JobWizard, JOB_WIZARD_STEPS};

use crate::api;
use crate::lookup::{self, LookupInput};
use crate::session::SessionState;

/// Three-step job posting form. The draft lives in a `JobWizard` and is
/// assembled into the wire payload only on the final submit.
#[component]
pub fn JobPostPage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let wizard = RwSignal::new(JobWizard::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);
    let skill_draft = RwSignal::new(String::new());
    let company_draft = RwSignal::new(String::new());
    let location_draft = RwSignal::new(String::new());
    let navigate = use_navigate();

    let step = move || wizard.with(|w| w.active_step);

    let on_next = move |_| {
        error.set(None);
        // Lookup drafts flow into the wizard when leaving their step.
        wizard.update(|w| {
            if w.active_step == 0 {
                w.company_name = company_draft.get_untracked();
            }
        });
        if let Some(Err(message)) = wizard.try_update(|w| w.advance()) {
            error.set(Some(message));
        }
    };
    let on_back = move |_| {
        error.set(None);
        wizard.update(|w| w.back());
    };

    let on_add_skill = move |skill: String| {
        wizard.update(|w| w.add_skill(&skill));
        skill_draft.set(String::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.user_id().is_none() {
            error.set(Some("Log in as a recruiter to post jobs".into()));
            return;
        }
        wizard.update(|w| w.location = location_draft.get_untracked());
        // Final-step required fields run through the same validation.
        if let Some(Err(message)) = wizard.try_update(|w| w.advance()) {
            error.set(Some(message));
            return;
        }
        submitting.set(true);
        let payload = wizard.with_untracked(|w| w.build_payload());
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::jobs::create(&payload).await {
                Ok(_) => navigate("/jobs", Default::default()),
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="wl-job-form">
            <h2>"Post a job"</h2>
            <p class="wl-step-indicator">
                {move || format!("Step {} of {}", step() + 1, JOB_WIZARD_STEPS)}
            </p>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <form class="wl-form" on:submit=on_submit>
                <Show when=move || step() == 0>
                    <input
                        class="wl-input"
                        type="text"
                        placeholder="Job title"
                        prop:value=move || wizard.with(|w| w.job_title.clone())
                        on:input=move |ev| wizard.update(|w| w.job_title = event_target_value(&ev))
                    />
                    <LookupInput
                        placeholder="Company"
                        value=company_draft
                        lookup=lookup::companies
                    />
                </Show>
                <Show when=move || step() == 1>
                    <textarea
                        class="wl-textarea"
                        placeholder="Role description"
                        prop:value=move || wizard.with(|w| w.description.clone())
                        on:input=move |ev| {
                            wizard.update(|w| w.description = event_target_value(&ev))
                        }
                    />
                    <LookupInput
                        placeholder="Add a required skill"
                        value=skill_draft
                        lookup=lookup::skills
                        on_pick=Callback::new(on_add_skill)
                    />
                    <div class="wl-job-skills">
                        <For
                            each=move || wizard.with(|w| w.skills.clone())
                            key=|s| s.clone()
                            let:skill
                        >
                            <span class="wl-skill-tag">{skill.clone()}</span>
                        </For>
                    </div>
                </Show>
                <Show when=move || step() == 2>
                    <LookupInput
                        placeholder="Location"
                        value=location_draft
                        lookup=lookup::locations
                    />
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || wizard.with(|w| w.remote)
                            on:change=move |ev| {
                                wizard.update(|w| w.remote = event_target_checked(&ev))
                            }
                        />
                        "Remote position"
                    </label>
                    <input
                        class="wl-input"
                        type="number"
                        placeholder="Salary min"
                        prop:value=move || wizard.with(|w| w.salary_min.clone())
                        on:input=move |ev| {
                            wizard.update(|w| w.salary_min = event_target_value(&ev))
                        }
                    />
                    <input
                        class="wl-input"
                        type="number"
                        placeholder="Salary max"
                        prop:value=move || wizard.with(|w| w.salary_max.clone())
                        on:input=move |ev| {
                            wizard.update(|w| w.salary_max = event_target_value(&ev))
                        }
                    />
                </Show>
                <div class="wl-wizard-nav">
                    <Show when=move || { step() > 0 }>
                        <button class="wl-btn wl-btn-sm" type="button" on:click=on_back>
                            "Back"
                        </button>
                    </Show>
                    <Show
                        when=move || wizard.with(|w| w.is_last_step())
                        fallback=move || view! {
                            <button class="wl-btn" type="button" on:click=on_next>
                                "Next"
                            </button>
                        }
                    >
                        <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Posting..." } else { "Post job" }}
                        </button>
                    </Show>
                </div>
            </form>
        </section>
    }
}
