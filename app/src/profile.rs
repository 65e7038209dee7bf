use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use wasm_bindgen_futures::spawn_local;
use worklink_shared::*;

use crate::api;
use crate::feed::UserFeed;
use crate::lookup::{self, LookupInput};
use crate::session::SessionState;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let params = use_params_map();
    let profile: RwSignal<Option<Profile>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let user_id = Memo::new(move |_| params.get().get("id").unwrap_or_default());

    Effect::new(move |_| {
        let id = user_id.get();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::profile::fetch(&id).await {
                Ok(p) => profile.set(Some(p)),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    let is_own = move || {
        state.session.get().user.map(|u| u.id) == Some(user_id.get())
    };

    view! {
        <section class="wl-profile">
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                profile.get().map(|p| view! {
                    <div class="wl-profile-card">
                        <h2>{p.headline.clone()}</h2>
                        <p class="wl-profile-bio">{p.bio.clone()}</p>
                        <p class="wl-profile-location">{p.location.clone()}</p>
                        <div class="wl-job-skills">
                            {p.skills
                                .iter()
                                .map(|s| view! { <span class="wl-skill-tag">{s.clone()}</span> })
                                .collect_view()}
                        </div>
                        <ExperienceList entries=p.experience.clone() />
                        <EducationList entries=p.education.clone() />
                    </div>
                })
            }}
            <Show when=is_own>
                <ProfileEditor profile=profile />
            </Show>
            {move || {
                let id = user_id.get();
                (!id.is_empty()).then(|| view! { <UserFeed user_id=id /> })
            }}
        </section>
    }
}

#[component]
fn ExperienceList(entries: Vec<ExperienceEntry>) -> impl IntoView {
    view! {
        <div class="wl-profile-section">
            <h3>"Experience"</h3>
            {entries
                .into_iter()
                .map(|e| view! {
                    <div class="wl-profile-entry">
                        <strong>{e.title.clone()}</strong>
                        <span>{format!(" at {}", e.company)}</span>
                        <span class="wl-dates">
                            {format!(
                                " ({} – {})",
                                e.start_date,
                                e.end_date.clone().unwrap_or_else(|| "present".into())
                            )}
                        </span>
                        <p>{e.description.clone()}</p>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn EducationList(entries: Vec<EducationEntry>) -> impl IntoView {
    view! {
        <div class="wl-profile-section">
            <h3>"Education"</h3>
            {entries
                .into_iter()
                .map(|e| view! {
                    <div class="wl-profile-entry">
                        <strong>{e.school.clone()}</strong>
                        <span>{format!(" — {} in {}", e.degree, e.field_of_study)}</span>
                        <span class="wl-dates">
                            {format!(
                                " ({} – {})",
                                e.start_year,
                                e.end_year.clone().unwrap_or_else(|| "present".into())
                            )}
                        </span>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

/// Inline editors shown only on the viewer's own profile. Every save goes
/// straight to the profile service and the returned canonical profile
/// replaces local state (and the session mirror).
#[component]
fn ProfileEditor(profile: RwSignal<Option<Profile>>) -> impl IntoView {
    view! {
        <div class="wl-profile-edit">
            <h3>"Edit profile"</h3>
            <FieldEditor field="headline" placeholder="Professional headline" profile=profile />
            <FieldEditor field="bio" placeholder="Bio" profile=profile />
            <FieldEditor field="location" placeholder="Location" profile=profile />
            <SkillsEditor profile=profile />
            <ExperienceEditor profile=profile />
            <EducationEditor profile=profile />
        </div>
    }
}

fn apply_saved(state: SessionState, profile: RwSignal<Option<Profile>>, saved: Profile) {
    state.set_profile(saved.clone());
    profile.set(Some(saved));
}

#[component]
fn FieldEditor(
    field: &'static str,
    placeholder: &'static str,
    profile: RwSignal<Option<Profile>>,
) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let draft = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let saving = RwSignal::new(false);

    // Seed the draft once the profile arrives.
    Effect::new(move |_| {
        if let Some(p) = profile.get() {
            draft.set(match field {
                "headline" => p.headline,
                "bio" => p.bio,
                _ => p.location,
            });
        }
    });

    let on_save = move |_| {
        let Some(user_id) = profile.with_untracked(|p| p.as_ref().map(|p| p.user_id.clone()))
        else {
            return;
        };
        saving.set(true);
        error.set(None);
        let value = draft.get_untracked();
        spawn_local(async move {
            match api::profile::update_field(&user_id, field, &value).await {
                Ok(saved) => apply_saved(state, profile, saved),
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="wl-field-edit">
            <input
                class="wl-input"
                type="text"
                placeholder=placeholder
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button class="wl-btn wl-btn-sm" on:click=on_save disabled=move || saving.get()>
                "Save"
            </button>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

#[component]
fn SkillsEditor(profile: RwSignal<Option<Profile>>) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let skill_draft = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let save = move |skills: Vec<String>| {
        let Some(user_id) = profile.with_untracked(|p| p.as_ref().map(|p| p.user_id.clone()))
        else {
            return;
        };
        error.set(None);
        spawn_local(async move {
            match api::profile::set_skills(&user_id, &skills).await {
                Ok(saved) => apply_saved(state, profile, saved),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let on_add = move |skill: String| {
        let skill = skill.trim().to_string();
        if skill.is_empty() {
            return;
        }
        let mut skills =
            profile.with_untracked(|p| p.as_ref().map(|p| p.skills.clone()).unwrap_or_default());
        if !skills.contains(&skill) {
            skills.push(skill);
            save(skills);
        }
        skill_draft.set(String::new());
    };

    let on_remove = move |skill: String| {
        let mut skills =
            profile.with_untracked(|p| p.as_ref().map(|p| p.skills.clone()).unwrap_or_default());
        skills.retain(|s| s != &skill);
        save(skills);
    };

    view! {
        <div class="wl-skills-edit">
            <LookupInput
                placeholder="Add a skill"
                value=skill_draft
                lookup=lookup::skills
                on_pick=Callback::new(on_add)
            />
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="wl-job-skills">
                <For
                    each=move || {
                        profile.with(|p| p.as_ref().map(|p| p.skills.clone()).unwrap_or_default())
                    }
                    key=|s| s.clone()
                    let:skill
                >
                    <span class="wl-skill-tag">
                        {skill.clone()}
                        <button
                            class="wl-tag-remove"
                            on:click={
                                let skill = skill.clone();
                                move |_| on_remove(skill.clone())
                            }
                        >
                            "×"
                        </button>
                    </span>
                </For>
            </div>
        </div>
    }
}

#[component]
fn ExperienceEditor(profile: RwSignal<Option<Profile>>) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let title = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(user_id) = profile.with_untracked(|p| p.as_ref().map(|p| p.user_id.clone()))
        else {
            return;
        };
        if title.get_untracked().trim().is_empty() {
            error.set(Some("Please enter the job title".into()));
            return;
        }
        error.set(None);
        let end = end_date.get_untracked();
        let mut entries = profile
            .with_untracked(|p| p.as_ref().map(|p| p.experience.clone()).unwrap_or_default());
        entries.push(ExperienceEntry {
            title: title.get_untracked(),
            company: company.get_untracked(),
            start_date: start_date.get_untracked(),
            end_date: (!end.trim().is_empty()).then_some(end),
            description: description.get_untracked(),
        });
        spawn_local(async move {
            match api::profile::set_experience(&user_id, &entries).await {
                Ok(saved) => {
                    apply_saved(state, profile, saved);
                    title.set(String::new());
                    company.set(String::new());
                    start_date.set(String::new());
                    end_date.set(String::new());
                    description.set(String::new());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <form class="wl-entry-form" on:submit=on_add>
            <h4>"Add experience"</h4>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
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
            <button class="wl-btn wl-btn-sm" type="submit">"Add"</button>
        </form>
    }
}

#[component]
fn EducationEditor(profile: RwSignal<Option<Profile>>) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let school = RwSignal::new(String::new());
    let degree = RwSignal::new(String::new());
    let field_of_study = RwSignal::new(String::new());
    let start_year = RwSignal::new(String::new());
    let end_year = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(user_id) = profile.with_untracked(|p| p.as_ref().map(|p| p.user_id.clone()))
        else {
            return;
        };
        if school.get_untracked().trim().is_empty() {
            error.set(Some("Please enter the school name".into()));
            return;
        }
        error.set(None);
        let end = end_year.get_untracked();
        let mut entries = profile
            .with_untracked(|p| p.as_ref().map(|p| p.education.clone()).unwrap_or_default());
        entries.push(EducationEntry {
            school: school.get_untracked(),
            degree: degree.get_untracked(),
            field_of_study: field_of_study.get_untracked(),
            start_year: start_year.get_untracked(),
            end_year: (!end.trim().is_empty()).then_some(end),
        });
        spawn_local(async move {
            match api::profile::set_education(&user_id, &entries).await {
                Ok(saved) => {
                    apply_saved(state, profile, saved);
                    school.set(String::new());
                    degree.set(String::new());
                    field_of_study.set(String::new());
                    start_year.set(String::new());
                    end_year.set(String::new());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <form class="wl-entry-form" on:submit=on_add>
            <h4>"Add education"</h4>
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
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
            <button class="wl-btn wl-btn-sm" type="submit">"Add"</button>
        </form>
    }
}
