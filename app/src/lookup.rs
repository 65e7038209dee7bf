use std::future::Future;
use std::pin::Pin;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use worklink_stores::lookup::LookupGuard;

use crate::api;

const DEBOUNCE_MS: u32 = 350;
const MIN_QUERY_LEN: usize = 2;

pub type Suggestions = Pin<Box<dyn Future<Output = Vec<String>>>>;
pub type LookupFn = fn(String) -> Suggestions;

pub fn universities(query: String) -> Suggestions {
    Box::pin(async move {
        api::lookups::universities(&query)
            .await
            .into_iter()
            .map(|u| u.name)
            .collect()
    })
}

pub fn companies(query: String) -> Suggestions {
    Box::pin(async move {
        api::lookups::companies(&query)
            .await
            .into_iter()
            .map(|c| c.name)
            .collect()
    })
}

pub fn locations(query: String) -> Suggestions {
    Box::pin(async move {
        api::lookups::locations(&query)
            .await
            .into_iter()
            .map(|l| l.display_name)
            .collect()
    })
}

pub fn skills(query: String) -> Suggestions {
    Box::pin(async move { api::lookups::skills(&query).await })
}

/// Text input with debounced, best-effort autocomplete.
///
/// Responses are guarded by a generation counter: only the reply to the
/// most recently issued request is applied, so a slow early response can
/// never overwrite a later one.
#[component]
pub fn LookupInput(
    placeholder: &'static str,
    value: RwSignal<String>,
    lookup: LookupFn,
    #[prop(optional, into)] on_pick: Option<Callback<String>>,
) -> impl IntoView {
    let suggestions: RwSignal<Vec<String>> = RwSignal::new(Vec::new());
    let guard = StoredValue::new(LookupGuard::new());
    // Timer handles are JS values; dropping one cancels it.
    let pending = StoredValue::new_local(None::<Timeout>);

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        value.set(text.clone());

        let timeout = Timeout::new(DEBOUNCE_MS, move || {
            if text.trim().len() < MIN_QUERY_LEN {
                suggestions.set(Vec::new());
                return;
            }
            let generation = guard.try_update_value(|g| g.issue()).unwrap_or_default();
            let fut = lookup(text);
            spawn_local(async move {
                let results = fut.await;
                if guard.with_value(|g| g.admit(generation)) {
                    suggestions.set(results);
                } else {
                    log::debug!("dropping stale lookup response");
                }
            });
        });
        // Replacing the handle cancels the previous window.
        pending.set_value(Some(timeout));
    };

    let on_pick_item = move |item: String| {
        value.set(item.clone());
        suggestions.set(Vec::new());
        if let Some(cb) = on_pick {
            cb.run(item);
        }
    };

    view! {
        <div class="wl-lookup">
            <input
                class="wl-input"
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=on_input
            />
            <Show when=move || !suggestions.get().is_empty()>
                <ul class="wl-suggestions">
                    <For
                        each=move || suggestions.get()
                        key=|s| s.clone()
                        let:item
                    >
                        <li
                            class="wl-suggestion"
                            on:click={
                                let item = item.clone();
                                move |_| on_pick_item(item.clone())
                            }
                        >
                            {item.clone()}
                        </li>
                    </For>
                </ul>
            </Show>
        </div>
    }
}
