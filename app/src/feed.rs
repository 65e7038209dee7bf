use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use worklink_shared::*;
use worklink_stores::feed::{FeedScope, FeedStore};
use worklink_stores::FetchStatus;

use crate::api;
use crate::session::SessionState;

pub const PAGE_SIZE: u32 = 10;

/// Fetch one page of a feed list into the store. The reducer methods own
/// the merge rules; this just drives the request.
fn load_page(store: RwSignal<FeedStore>, scope: FeedScope, page: u32) {
    store.update(|s| s.list_mut(&scope).begin_fetch());
    spawn_local(async move {
        let result = match &scope {
            FeedScope::Global => api::feed::page(page, PAGE_SIZE).await,
            FeedScope::User(id) => api::feed::user_page(id, page, PAGE_SIZE).await,
        };
        match result {
            Ok(fetched) => store.update(|s| {
                s.list_mut(&scope).apply_page(page, fetched.posts, fetched.last)
            }),
            Err(e) => store.update(|s| s.list_mut(&scope).fail(e.to_string())),
        }
    });
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let state = expect_context::<SessionState>();
    let store = RwSignal::new(FeedStore::new());

    load_page(store, FeedScope::Global, 0);

    let on_load_more = move |_| {
        let page = store.with_untracked(|s| s.feed.next_page());
        load_page(store, FeedScope::Global, page);
    };

    view! {
        <section class="wl-feed">
            <Show when=move || state.session.get().is_authenticated>
                <NewPostForm store=store />
            </Show>
            <Show when=move || store.with(|s| s.feed.status == FetchStatus::Failed)>
                <p class="wl-error">
                    {move || store.with(|s| s.feed.error.clone().unwrap_or_default())}
                </p>
            </Show>
            <div class="wl-post-list">
                <For
                    each=move || store.with(|s| s.feed.posts.clone())
                    key=|p| p.post_id.clone()
                    let:post
                >
                    <PostCard post=post store=store scope=FeedScope::Global />
                </For>
            </div>
            <Show when=move || store.with(|s| s.feed.status == FetchStatus::Loading)>
                <p class="wl-loading">"Loading..."</p>
            </Show>
            <Show when=move || store.with(|s| s.feed.has_more && s.feed.status != FetchStatus::Loading)>
                <button class="wl-btn" on:click=on_load_more>"Load more"</button>
            </Show>
        </section>
    }
}

/// A user's own posts, paginated independently of the global feed.
#[component]
pub fn UserFeed(user_id: String) -> impl IntoView {
    let store = RwSignal::new(FeedStore::new());
    let scope = FeedScope::User(user_id);

    load_page(store, scope.clone(), 0);

    let posts = {
        let scope = scope.clone();
        move || {
            store.with(|s| {
                s.list(&scope).map(|l| l.posts.clone()).unwrap_or_default()
            })
        }
    };
    let has_more = {
        let scope = scope.clone();
        move || store.with(|s| s.list(&scope).map(|l| l.has_more).unwrap_or(false))
    };
    let on_load_more = {
        let scope = scope.clone();
        move |_| {
            let page = store.with_untracked(|s| {
                s.list(&scope).map(|l| l.next_page()).unwrap_or(0)
            });
            load_page(store, scope.clone(), page);
        }
    };

    view! {
        <div class="wl-user-feed">
            <h3>"Posts"</h3>
            <div class="wl-post-list">
                <For each=posts key=|p| p.post_id.clone() let:post>
                    <PostCard post=post store=store scope=scope.clone() />
                </For>
            </div>
            <Show when=has_more>
                <button class="wl-btn wl-btn-sm" on:click=on_load_more.clone()>"Load more"</button>
            </Show>
        </div>
    }
}

/// Compose a new post, with an optional image uploaded out-of-band to the
/// media host before the post itself is created.
#[component]
fn NewPostForm(store: RwSignal<FeedStore>) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let content = RwSignal::new(String::new());
    // File handles are JS values; keep them in arena-local storage.
    let image = RwSignal::new_local(None::<web_sys::File>);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);

    let on_file = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        image.set(input.files().and_then(|files| files.get(0)));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = content.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        let Some(user_id) = state.user_id() else {
            return;
        };
        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            let mut image_url = None;
            if let Some(file) = image.get_untracked() {
                match api::feed::upload_image(&file).await {
                    Ok(uploaded) => image_url = Some(uploaded.url),
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        submitting.set(false);
                        return;
                    }
                }
            }
            let payload = CreatePost {
                content: text,
                image_url,
            };
            match api::feed::create_post(&user_id, &payload).await {
                Ok(post) => {
                    store.update(|s| s.feed.posts.insert(0, post));
                    content.set(String::new());
                    image.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <form class="wl-post-form" on:submit=on_submit>
            <textarea
                class="wl-textarea"
                placeholder="Share something..."
                prop:value=move || content.get()
                on:input=move |ev| content.set(event_target_value(&ev))
            />
            <input class="wl-input" type="file" accept="image/*" on:change=on_file />
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="wl-btn" type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "Posting..." } else { "Post" }}
            </button>
        </form>
    }
}

/// Single post with like button and a collapsible comment section.
///
/// Like and comment counts are both applied optimistically and rolled back
/// if the server rejects the call.
#[component]
pub fn PostCard(post: Post, store: RwSignal<FeedStore>, scope: FeedScope) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let post_id = post.post_id.clone();
    let show_comments = RwSignal::new(false);

    // Render from the store, not the snapshot, so optimistic updates show.
    let current = {
        let pid = post_id.clone();
        let scope = scope.clone();
        Memo::new(move |_| {
            store
                .with(|s| s.list(&scope).and_then(|l| l.get(&pid).cloned()))
                .unwrap_or_else(|| post.clone())
        })
    };

    let on_like = {
        let pid = post_id.clone();
        let scope = scope.clone();
        move |_| {
            if !state.is_authenticated() {
                return;
            }
            let pid = pid.clone();
            let scope = scope.clone();
            // Optimistic flip; a second toggle with the same id is the rollback.
            let applied = store
                .try_update(|s| s.list_mut(&scope).toggle_like(&pid))
                .flatten()
                .is_some();
            if !applied {
                return;
            }
            spawn_local(async move {
                if let Err(e) = api::feed::like(&pid).await {
                    log::warn!("like failed, rolling back: {}", e);
                    store.update(|s| {
                        s.list_mut(&scope).toggle_like(&pid);
                    });
                }
            });
        }
    };

    let pid = post_id.clone();
    view! {
        <article class="wl-post">
            <div class="wl-post-header">
                {move || {
                    let p = current.get();
                    view! {
                        <a href={format!("/profile/{}", p.author.user_id)}>
                            <strong>{p.author.name.clone()}</strong>
                        </a>
                        <span class="wl-post-headline">{p.author.headline.clone()}</span>
                        <time>{p.created_at.clone()}</time>
                    }
                }}
            </div>
            <p class="wl-post-body">{move || current.get().content}</p>
            {move || {
                current.get().image_url.map(|url| view! {
                    <img class="wl-post-image" src={url} alt="" />
                })
            }}
            <div class="wl-post-actions">
                <button
                    class="wl-like-btn"
                    class:active=move || current.get().is_liked
                    on:click=on_like
                    disabled=move || !state.session.get().is_authenticated
                >
                    {move || format!("\u{2764} {}", current.get().likes_count)}
                </button>
                <button
                    class="wl-comment-btn"
                    on:click=move |_| show_comments.update(|v| *v = !*v)
                >
                    {move || format!("\u{1F4AC} {}", current.get().comments_count)}
                </button>
            </div>
            <Show when=move || show_comments.get()>
                <CommentSection post_id=pid.clone() store=store scope=scope.clone() />
            </Show>
        </article>
    }
}

#[component]
fn CommentSection(
    post_id: String,
    store: RwSignal<FeedStore>,
    scope: FeedScope,
) -> impl IntoView {
    let state = expect_context::<SessionState>();
    let comments: RwSignal<Vec<PostComment>> = RwSignal::new(Vec::new());
    let draft = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);

    {
        let post_id = post_id.clone();
        spawn_local(async move {
            match api::feed::comments(&post_id).await {
                Ok(list) => comments.set(list),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }

    let on_submit = {
        let pid = post_id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let text = draft.get_untracked();
            if text.trim().is_empty() || !state.is_authenticated() {
                return;
            }
            submitting.set(true);
            error.set(None);
            let pid = pid.clone();
            let scope = scope.clone();
            // Count goes up before the server answers, down again if it says no.
            store.update(|s| s.list_mut(&scope).comment_added(&pid));
            spawn_local(async move {
                let payload = CreateComment { content: text };
                match api::feed::comment(&pid, &payload).await {
                    Ok(comment) => {
                        comments.update(|list| list.push(comment));
                        draft.set(String::new());
                    }
                    Err(e) => {
                        store.update(|s| s.list_mut(&scope).comment_removed(&pid));
                        error.set(Some(e.to_string()));
                    }
                }
                submitting.set(false);
            });
        }
    };

    view! {
        <div class="wl-comments">
            <Show when=move || error.get().is_some()>
                <p class="wl-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <For
                each=move || comments.get()
                key=|c| c.comment_id.clone()
                let:comment
            >
                <div class="wl-comment">
                    <strong>{comment.author.name.clone()}</strong>
                    <p>{comment.content.clone()}</p>
                    <time>{comment.created_at.clone()}</time>
                </div>
            </For>
            <Show when=move || state.session.get().is_authenticated>
                <form class="wl-comment-form" on:submit=on_submit.clone()>
                    <input
                        class="wl-input"
                        type="text"
                        placeholder="Write a comment..."
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button class="wl-btn wl-btn-sm" type="submit" disabled=move || submitting.get()>
                        "Comment"
                    </button>
                </form>
            </Show>
        </div>
    }
}
