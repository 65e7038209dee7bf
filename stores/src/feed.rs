use std::collections::{HashMap, HashSet};

use worklink_shared::Post;

use crate::FetchStatus;

/// One ordered, de-duplicated, page-at-a-time list of posts.
///
/// Likes and comment counts are applied optimistically before the server
/// call; on failure the caller rolls back with the same toggle/revert
/// methods. Both mutation paths share these semantics.
#[derive(Debug, Clone, Default)]
pub struct FeedList {
    pub posts: Vec<Post>,
    pub page: u32,
    pub has_more: bool,
    pub status: FetchStatus,
    pub error: Option<String>,
}

impl FeedList {
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Default::default()
        }
    }

    /// The page to request next. Page 0 always restarts the list.
    pub fn next_page(&self) -> u32 {
        if self.posts.is_empty() {
            0
        } else {
            self.page + 1
        }
    }

    pub fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// Merge a fetched page. Page 0 replaces the list; later pages append
    /// only posts whose id is not already present, preserving arrival order.
    /// `page` advances exactly once per successful fetch. (The original
    /// client advanced it twice, duplicating requests; that defect is not
    /// reproduced here.)
    pub fn apply_page(&mut self, page: u32, fetched: Vec<Post>, last: bool) {
        if page == 0 {
            self.posts = fetched;
        } else {
            let seen: HashSet<String> =
                self.posts.iter().map(|p| p.post_id.clone()).collect();
            self.posts
                .extend(fetched.into_iter().filter(|p| !seen.contains(&p.post_id)));
        }
        self.page = page;
        self.has_more = !last;
        self.status = FetchStatus::Succeeded;
        self.error = None;
    }

    /// Record a failed fetch. The list itself is left untouched.
    pub fn fail(&mut self, message: String) {
        self.status = FetchStatus::Failed;
        self.error = Some(message);
    }

    /// Return the fetch machine to `Idle` once the outcome has been consumed.
    pub fn settle(&mut self) {
        self.status = FetchStatus::Idle;
    }

    /// Flip `is_liked` and adjust `likes_count`. Returns the new liked state,
    /// or `None` if the post is not in this list. Calling it twice restores
    /// the original state, which is exactly how a rollback is performed.
    pub fn toggle_like(&mut self, post_id: &str) -> Option<bool> {
        let post = self.posts.iter_mut().find(|p| p.post_id == post_id)?;
        post.is_liked = !post.is_liked;
        post.likes_count += if post.is_liked { 1 } else { -1 };
        Some(post.is_liked)
    }

    pub fn comment_added(&mut self, post_id: &str) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.post_id == post_id) {
            post.comments_count += 1;
        }
    }

    /// Rollback for `comment_added` when the server rejects the comment.
    pub fn comment_removed(&mut self, post_id: &str) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.post_id == post_id) {
            post.comments_count = (post.comments_count - 1).max(0);
        }
    }

    pub fn get(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }
}

/// Which list a feed operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    Global,
    User(String),
}

/// The global feed plus one independently paginated list per viewed user.
///
/// The lists share nothing but `post_id`s: a like applied in one is not
/// mirrored into the other. That matches the backend's separate endpoints
/// and how the app has always behaved.
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    pub feed: FeedList,
    pub user_feeds: HashMap<String, FeedList>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self {
            feed: FeedList::new(),
            user_feeds: HashMap::new(),
        }
    }

    pub fn user_feed(&mut self, user_id: &str) -> &mut FeedList {
        self.user_feeds
            .entry(user_id.to_string())
            .or_insert_with(FeedList::new)
    }

    pub fn list(&self, scope: &FeedScope) -> Option<&FeedList> {
        match scope {
            FeedScope::Global => Some(&self.feed),
            FeedScope::User(id) => self.user_feeds.get(id),
        }
    }

    pub fn list_mut(&mut self, scope: &FeedScope) -> &mut FeedList {
        match scope {
            FeedScope::Global => &mut self.feed,
            FeedScope::User(id) => self.user_feed(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklink_shared::PostAuthor;

    fn post(id: &str) -> Post {
        Post {
            post_id: id.into(),
            author: PostAuthor {
                user_id: "u1".into(),
                name: "Ada".into(),
                headline: String::new(),
                avatar_url: None,
            },
            content: format!("post {}", id),
            image_url: None,
            likes_count: 5,
            comments_count: 2,
            is_liked: false,
            created_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn page_one_appends_without_duplicates_and_after_page_zero() {
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a"), post("b")], false);
        // Server pages overlap: "b" comes back again on page 1.
        list.apply_page(1, vec![post("b"), post("c"), post("d")], true);

        let ids: Vec<&str> = list.posts.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(!list.has_more);
    }

    #[test]
    fn page_zero_replaces_the_list() {
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a"), post("b")], false);
        list.apply_page(0, vec![post("c")], false);
        assert_eq!(list.posts.len(), 1);
        assert_eq!(list.posts[0].post_id, "c");
        assert_eq!(list.page, 0);
    }

    #[test]
    fn page_advances_exactly_once_per_fetch() {
        // The original client incremented `page` twice per fetch; this pins
        // the corrected behavior.
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a")], false);
        assert_eq!(list.page, 0);
        assert_eq!(list.next_page(), 1);
        list.apply_page(1, vec![post("b")], false);
        assert_eq!(list.page, 1);
        assert_eq!(list.next_page(), 2);
    }

    #[test]
    fn failed_fetch_leaves_posts_untouched() {
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a")], false);
        list.begin_fetch();
        list.fail("connection reset".into());

        assert_eq!(list.posts.len(), 1);
        assert_eq!(list.page, 0);
        assert!(list.has_more);
        assert_eq!(list.status, FetchStatus::Failed);
        assert_eq!(list.error.as_deref(), Some("connection reset"));
    }

    #[test]
    fn fetch_status_walks_idle_loading_outcome_idle() {
        let mut list = FeedList::new();
        assert_eq!(list.status, FetchStatus::Idle);
        list.begin_fetch();
        assert_eq!(list.status, FetchStatus::Loading);
        list.apply_page(0, vec![], true);
        assert_eq!(list.status, FetchStatus::Succeeded);
        list.settle();
        assert_eq!(list.status, FetchStatus::Idle);
    }

    #[test]
    fn double_toggle_like_restores_original_state() {
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a")], true);

        assert_eq!(list.toggle_like("a"), Some(true));
        assert_eq!(list.get("a").unwrap().likes_count, 6);
        assert_eq!(list.toggle_like("a"), Some(false));

        let p = list.get("a").unwrap();
        assert_eq!(p.likes_count, 5);
        assert!(!p.is_liked);
    }

    #[test]
    fn toggle_like_unknown_post_is_a_noop() {
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a")], true);
        assert_eq!(list.toggle_like("zzz"), None);
        assert_eq!(list.get("a").unwrap().likes_count, 5);
    }

    #[test]
    fn comment_add_then_rollback_restores_count() {
        let mut list = FeedList::new();
        list.apply_page(0, vec![post("a")], true);
        list.comment_added("a");
        assert_eq!(list.get("a").unwrap().comments_count, 3);
        list.comment_removed("a");
        assert_eq!(list.get("a").unwrap().comments_count, 2);
    }

    #[test]
    fn user_feed_is_independent_of_global_feed() {
        let mut store = FeedStore::new();
        store.feed.apply_page(0, vec![post("a")], true);
        store.user_feed("u1").apply_page(0, vec![post("a")], true);

        store.feed.toggle_like("a");
        // Same postId, separate list: not mirrored.
        assert!(!store.user_feeds.get("u1").unwrap().get("a").unwrap().is_liked);
    }
}
