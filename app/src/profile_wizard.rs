use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;
use worklink_shared::{EducationEntry, ExperienceEntry};
use worklink_stores::wizard::{ProfileWizard, PROFILE_WIZARD_STEPS};

use crate::api;
use crate::lookup::{self, LookupInput};
use crate::session::SessionState;

/// Four-step profile setup, shown after first login. The draft lives in a
/// `ProfileWizard`; the whole thing is submitted as one request at the end.
#[component]
pub fn ProfileSetupPage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let wizard = RwSignal::new(ProfileWizard::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);
    let location_draft = RwSignal::new(String::new());
    let skill_draft = RwSignal::new(String::new());
    let navigate = use_navigate();

    let step = move || wizard.with(|w| w.active_step);

    let on_next = move |_| {
        error.set(None);
        wizard.update(|w| {
            if w.active_step == 1 {
                w.location = location_draft.get_untracked();
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
        let Some(user_id) = state.user_id() else {
            error.set(Some("Log in to set up your profile".into()));
            return;
        };
        submitting.set(true);
        error.set(None);
        let request = wizard.with_untracked(|w| w.build_request(&user_id));
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::profile::create(&request).await {
                Ok(profile) => {
                    state.set_profile(profile);
                    navigate(&format!("/profile/{}", user_id), Default::default());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="wl-setup">
            <h2>"Set up your profile"</h2>
            <p class="wl-step-indicator">
                {move || format!("Step {} of {}", step() + 1, PROFILE_WIZARD_STEPS)}
            </p>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <form class="wl-form" on:submit=on_submit>
                <Show when=move || step() == 0>
                    <input
                        class="wl-input"
                        type="text"
                        placeholder="Professional headline"
                        prop:value=move || wizard.with(|w| w.headline.clone())
                        on:input=move |ev| wizard.update(|w| w.headline = event_target_value(&ev))
                    />
                    <textarea
                        class="wl-textarea"
                        placeholder="Tell people a bit about yourself"
                        prop:value=move || wizard.with(|w| w.bio.clone())
                        on:input=move |ev| wizard.update(|w| w.bio = event_target_value(&ev))
                    />
                </Show>
                <Show when=move || step() == 1>
                    <LookupInput
                        placeholder="Where are you based?"
                        value=location_draft
                        lookup=lookup::locations
                    />
                    <LookupInput
                        placeholder="Add a skill"
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
                            <span class="wl-skill-tag">
                                {skill.clone()}
                                <button
                                    class="wl-tag-remove"
                                    type="button"
                                    on:click={
                                        let skill = skill.clone();
                                        move |_| wizard.update(|w| w.remove_skill(&skill))
                                    }
                                >
                                    "×"
                                </button>
                            </span>
                        </For>
                    </div>
                </Show>
                <Show when=move || step() == 2>
                    <ExperienceStep wizard=wizard />
                </Show>
                <Show when=move || step() == 3>
                    <EducationStep wizard=wizard />
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
                            {move || if submitting.get() { "Saving..." } else { "Finish" }}
                        </button>
                    </Show>
                </div>
            </form>
        </section>
    }
}

#[component]
fn ExperienceStep(wizard: RwSignal<ProfileWizard>) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let on_add = move |_| {
        if title.get_untracked().trim().is_empty() {
            return;
        }
        let end = end_date.get_untracked();
        wizard.update(|w| {
            w.experience.push(ExperienceEntry {
                title: title.get_untracked(),
                company: company.get_untracked(),
                start_date: start_date.get_untracked(),
                end_date: (!end.trim().is_empty()).then_some(end.clone()),
                description: description.get_untracked(),
            })
        });
        title.set(String::new());
        company.set(String::new());
        start_date.set(String::new());
        end_date.set(String::new());
        description.set(String::new());
    };

    view! {
        <div class="wl-wizard-step">
            <For
                each=move || wizard.with(|w| w.experience.clone())
                key=|e| format!("{}@{}", e.title, e.company)
                let:entry
            >
                <p class="wl-profile-entry">{format!("{} at {}", entry.title, entry.company)}</p>
            </For>
            <input
                class="wl-input"
                type="text"
                placeholder="Title"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <LookupInput placeholder="Company" value=company lookup=lookup::companies />
            <input
                class="wl-input"
                type="month"
                placeholder="Start"
                prop:value=move || start_date.get()
                on:input=move |ev| start_date.set(event_target_value(&ev))
            />
            <input
                class="wl-input"
                type="month"
                placeholder="End (blank if current)"
                prop:value=move || end_date.get()
                on:input=move |ev| end_date.set(event_target_value(&ev))
            />
            <textarea
                class="wl-textarea"
                placeholder="What did you do there?"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            />
            <button class="wl-btn wl-btn-sm" type="button" on:click=on_add>
                "Add experience"
            </button>
        </div>
    }
}

#[component]
fn EducationStep(wizard: RwSignal<ProfileWizard>) -> impl IntoView {
    let school = RwSignal::new(String::new());
    let degree = RwSignal::new(String::new());
    let field_of_study = RwSignal::new(String::new());
    let start_year = RwSignal::new(String::new());
    let end_year = RwSignal::new(String::new());

    let on_add = move |_| {
        if school.get_untracked().trim().is_empty() {
            return;
        }
        let end = end_year.get_untracked();
        wizard.update(|w| {
            w.education.push(EducationEntry {
                school: school.get_untracked(),
                degree: degree.get_untracked(),
                field_of_study: field_of_study.get_untracked(),
                start_year: start_year.get_untracked(),
                end_year: (!end.trim().is_empty()).then_some(end.clone()),
            })
        });
        school.set(String::new());
        degree.set(String::new());
        field_of_study.set(String::new());
        start_year.set(String::new());
        end_year.set(String::new());
    };

    view! {
        <div class="wl-wizard-step">
            <For
                each=move || wizard.with(|w| w.education.clone())
                key=|e| format!("{}@{}", e.school, e.degree)
                let:entry
            >
                <p class="wl-profile-entry">{format!("{}, {}", entry.school, entry.degree)}</p>
            </For>
            <LookupInput placeholder="School" value=school lookup=lookup::universities />
            <input
                class="wl-input"
                type="text"
                placeholder="Degree"
                prop:value=move || degree.get()
                on:input=move |ev| degree.set(event_target_value(&ev))
            />
            <input
                class="wl-input"
                type="text"
                placeholder="Field of study"
                prop:value=move || field_of_study.get()
                on:input=move |ev| field_of_study.set(event_target_value(&ev))
            />
            <input
                class="wl-input"
                type="text"
                placeholder="Start year"
                prop:value=move || start_year.get()
                on:input=move |ev| start_year.set(event_target_value(&ev))
            />
            <input
                class="wl-input"
                type="text"
                placeholder="End year (blank if current)"
                prop:value=move || end_year.get()
                on:input=move |ev| end_year.set(event_target_value(&ev))
            />
            <button class="wl-btn wl-btn-sm" type="button" on:click=on_add>
                "Add education"
            </button>
        </div>
    }
}
