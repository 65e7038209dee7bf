use std::cell::RefCell;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::window;
use worklink_shared::SessionUser;
use worklink_stores::session::{AUTHENTICATED_KEY, PROFILE_KEY, TOKEN_KEY, USER_KEY};
use worklink_stores::ApiError;

/// The backend services this app talks to. Each has its own deployment and
/// its own base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Auth,
    Profile,
    Jobs,
    Feed,
}

impl Service {
    fn meta_name(self) -> &'static str {
        match self {
            Service::Auth => "worklink-auth-api",
            Service::Profile => "worklink-profile-api",
            Service::Jobs => "worklink-jobs-api",
            Service::Feed => "worklink-feed-api",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            Service::Auth => "http://localhost:8081",
            Service::Profile => "http://localhost:8082",
            Service::Jobs => "http://localhost:8083",
            Service::Feed => "http://localhost:8084",
        }
    }
}

fn base(service: Service) -> String {
    // Read from a meta tag set by the host page, falling back to localhost
    // for dev
    let document = window().unwrap().document().unwrap();
    let selector = format!("meta[name='{}']", service.meta_name());
    if let Some(el) = document.query_selector(&selector).ok().flatten() {
        if let Some(url) = el.get_attribute("content") {
            if !url.is_empty() {
                return url;
            }
        }
    }
    service.fallback().to_string()
}

// ── Session storage ──

fn storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

pub fn get_token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok()?
}

pub fn set_token(token: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

fn stored_user_id() -> Option<String> {
    let raw = storage()?.get_item(USER_KEY).ok()??;
    let user: SessionUser = serde_json::from_str(&raw).ok()?;
    Some(user.id)
}

/// Wipe every persisted session key. Used on logout and by the 401 path.
pub fn clear_persisted_session() {
    if let Some(storage) = storage() {
        for key in [USER_KEY, PROFILE_KEY, AUTHENTICATED_KEY, TOKEN_KEY] {
            let _ = storage.remove_item(key);
        }
    }
}

// ── 401 interceptor ──

thread_local! {
    static UNAUTHORIZED_HANDLER: RefCell<Option<Box<dyn Fn()>>> = RefCell::new(None);
}

/// Register the hook the session provider uses to drop its in-memory state
/// when any wrapped call comes back 401.
pub fn on_unauthorized(handler: impl Fn() + 'static) {
    UNAUTHORIZED_HANDLER.with(|h| *h.borrow_mut() = Some(Box::new(handler)));
}

fn handle_unauthorized() {
    log::debug!("401 from backend, clearing session");
    clear_persisted_session();
    UNAUTHORIZED_HANDLER.with(|h| {
        if let Some(handler) = h.borrow().as_ref() {
            handler();
        }
    });
}

// ── Request plumbing ──

fn attach(mut req: RequestBuilder) -> RequestBuilder {
    // The four services run on distinct origins, so session cookies only
    // travel if the fetch is made with credentials included.
    req = req.credentials(web_sys::RequestCredentials::Include);
    if let Some(token) = get_token() {
        req = req.header("Authorization", &format!("Bearer {}", token));
    }
    if let Some(user_id) = stored_user_id() {
        req = req.header("X-User-Id", &user_id);
    }
    req
}

async fn check<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if resp.status() == 401 {
        handle_unauthorized();
        return Err(ApiError::Unauthorized);
    }
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::from_status_body(resp.status(), &body));
    }
    resp.json().await.map_err(|e| ApiError::Network(e.to_string()))
}

async fn check_unit(resp: Response) -> Result<(), ApiError> {
    if resp.status() == 401 {
        handle_unauthorized();
        return Err(ApiError::Unauthorized);
    }
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::from_status_body(resp.status(), &body));
    }
    Ok(())
}

pub async fn get<T: DeserializeOwned>(service: Service, path: &str) -> Result<T, ApiError> {
    let url = format!("{}{}", base(service), path);
    let resp = attach(Request::get(&url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(resp).await
}

async fn send_json<B: Serialize>(
    req: RequestBuilder,
    body: &B,
) -> Result<Response, ApiError> {
    let req = req
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(body).map_err(|e| ApiError::Network(e.to_string()))?)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    req.send().await.map_err(|e| ApiError::Network(e.to_string()))
}

pub async fn post<T: DeserializeOwned, B: Serialize>(
    service: Service,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let url = format!("{}{}", base(service), path);
    let resp = send_json(attach(Request::post(&url)), body).await?;
    check(resp).await
}

pub async fn post_unit<B: Serialize>(
    service: Service,
    path: &str,
    body: &B,
) -> Result<(), ApiError> {
    let url = format!("{}{}", base(service), path);
    let resp = send_json(attach(Request::post(&url)), body).await?;
    check_unit(resp).await
}

/// POST with an empty body (like toggles, logout).
pub async fn post_empty(service: Service, path: &str) -> Result<(), ApiError> {
    let url = format!("{}{}", base(service), path);
    let resp = attach(Request::post(&url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_unit(resp).await
}

pub async fn patch<T: DeserializeOwned, B: Serialize>(
    service: Service,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let url = format!("{}{}", base(service), path);
    let resp = send_json(attach(Request::patch(&url)), body).await?;
    check(resp).await
}

pub async fn put<T: DeserializeOwned, B: Serialize>(
    service: Service,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let url = format!("{}{}", base(service), path);
    let resp = send_json(attach(Request::put(&url)), body).await?;
    check(resp).await
}

fn urlencode(s: &str) -> String {
    web_sys::js_sys::encode_uri_component(s)
        .as_string()
        .unwrap_or_default()
}

// ── Typed surfaces, one module per service ──

pub mod auth {
    use super::*;
    use worklink_shared::*;

    pub async fn login(req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        post(Service::Auth, "/auth/login", req).await
    }

    pub async fn signup(req: &SignupRequest) -> Result<(), ApiError> {
        post_unit(Service::Auth, "/auth/signup", req).await
    }

    pub async fn verify_otp(req: &VerifyOtpRequest) -> Result<AuthResponse, ApiError> {
        post(Service::Auth, "/auth/verify-otp", req).await
    }

    pub async fn resend_otp(req: &ResendOtpRequest) -> Result<(), ApiError> {
        post_unit(Service::Auth, "/auth/resend-otp", req).await
    }

    pub async fn forgot_password(req: &ForgotPasswordRequest) -> Result<(), ApiError> {
        post_unit(Service::Auth, "/auth/forgot-password", req).await
    }

    pub async fn reset_password(req: &ResetPasswordRequest) -> Result<(), ApiError> {
        post_unit(Service::Auth, "/auth/reset-password", req).await
    }

    pub async fn current_user() -> Result<SessionUser, ApiError> {
        get(Service::Auth, "/auth/current-user").await
    }

    pub async fn logout() -> Result<(), ApiError> {
        post_empty(Service::Auth, "/auth/logout").await
    }
}

pub mod profile {
    use super::*;
    use worklink_shared::*;

    pub async fn fetch(user_id: &str) -> Result<Profile, ApiError> {
        get(Service::Profile, &format!("/user/{}", urlencode(user_id))).await
    }

    /// PATCH one scalar field: `headline`, `bio` or `location`.
    pub async fn update_field(
        user_id: &str,
        field: &str,
        value: &str,
    ) -> Result<Profile, ApiError> {
        let body = UpdateFieldRequest {
            value: value.to_string(),
        };
        patch(
            Service::Profile,
            &format!("/{}/{}", urlencode(user_id), field),
            &body,
        )
        .await
    }

    pub async fn set_skills(user_id: &str, skills: &[String]) -> Result<Profile, ApiError> {
        put(
            Service::Profile,
            &format!("/me/skills/{}", urlencode(user_id)),
            &skills,
        )
        .await
    }

    pub async fn set_experience(
        user_id: &str,
        experience: &[ExperienceEntry],
    ) -> Result<Profile, ApiError> {
        put(
            Service::Profile,
            &format!("/me/experience/{}", urlencode(user_id)),
            &experience,
        )
        .await
    }

    pub async fn set_education(
        user_id: &str,
        education: &[EducationEntry],
    ) -> Result<Profile, ApiError> {
        put(
            Service::Profile,
            &format!("/me/education/{}", urlencode(user_id)),
            &education,
        )
        .await
    }

    pub async fn create(req: &AddProfileRequest) -> Result<Profile, ApiError> {
        post(Service::Profile, "/addprofile", req).await
    }
}

pub mod jobs {
    use super::*;
    use worklink_shared::*;

    pub async fn list() -> Result<Vec<Job>, ApiError> {
        get(Service::Jobs, "/api/jobs").await
    }

    pub async fn recruiter_jobs(recruiter_id: &str) -> Result<Vec<Job>, ApiError> {
        get(
            Service::Jobs,
            &format!("/api/jobs/recruiter/{}", urlencode(recruiter_id)),
        )
        .await
    }

    pub async fn create(req: &CreateJob) -> Result<Job, ApiError> {
        post(Service::Jobs, "/api/jobs", req).await
    }

    pub async fn applications_for(job_id: &str) -> Result<Vec<Application>, ApiError> {
        get(
            Service::Jobs,
            &format!("/api/jobs/{}/applications", urlencode(job_id)),
        )
        .await
    }

    pub async fn apply(req: &CreateApplication) -> Result<Application, ApiError> {
        post(Service::Jobs, "/api/applications", req).await
    }

    pub async fn candidate_applications(candidate_id: &str) -> Result<Vec<Application>, ApiError> {
        get(
            Service::Jobs,
            &format!("/api/applications/candidate/{}", urlencode(candidate_id)),
        )
        .await
    }
}

pub mod feed {
    use super::*;
    use worklink_shared::*;

    pub async fn page(page: u32, size: u32) -> Result<FeedPage, ApiError> {
        get(Service::Feed, &format!("/api/feed?page={}&size={}", page, size)).await
    }

    pub async fn user_page(user_id: &str, page: u32, size: u32) -> Result<FeedPage, ApiError> {
        get(
            Service::Feed,
            &format!(
                "/api/feed/user/{}?page={}&size={}",
                urlencode(user_id),
                page,
                size
            ),
        )
        .await
    }

    pub async fn create_post(user_id: &str, req: &CreatePost) -> Result<Post, ApiError> {
        post(
            Service::Feed,
            &format!("/api/feed/user/{}", urlencode(user_id)),
            req,
        )
        .await
    }

    pub async fn like(post_id: &str) -> Result<(), ApiError> {
        post_empty(
            Service::Feed,
            &format!("/api/feed/post/{}/like", urlencode(post_id)),
        )
        .await
    }

    pub async fn comment(post_id: &str, req: &CreateComment) -> Result<PostComment, ApiError> {
        post(
            Service::Feed,
            &format!("/api/feed/post/{}/comment", urlencode(post_id)),
            req,
        )
        .await
    }

    pub async fn comments(post_id: &str) -> Result<Vec<PostComment>, ApiError> {
        get(
            Service::Feed,
            &format!("/api/feed/post/{}/comments", urlencode(post_id)),
        )
        .await
    }

    pub async fn upload_image(file: &web_sys::File) -> Result<ImageUploadResponse, ApiError> {
        let form = web_sys::FormData::new().map_err(|_| {
            ApiError::Network("could not build multipart form".to_string())
        })?;
        form.append_with_blob("image", file)
            .map_err(|_| ApiError::Network("could not attach image".to_string()))?;

        let url = format!("{}/api/feed/upload/image", base(Service::Feed));
        let req = attach(Request::post(&url))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(resp).await
    }
}

/// Third-party enrichment lookups. Best-effort only: every failure path
/// collapses to an empty list, logged at warn, never surfaced to the user.
pub mod lookups {
    use super::*;
    use worklink_shared::{CompanyHit, LocationHit, University};

    async fn fetch_list<T: DeserializeOwned>(label: &str, url: String) -> Vec<T> {
        let resp = match Request::get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("{} lookup failed: {}", label, e);
                return Vec::new();
            }
        };
        if !resp.ok() {
            log::warn!("{} lookup returned {}", label, resp.status());
            return Vec::new();
        }
        match resp.json().await {
            Ok(list) => list,
            Err(e) => {
                log::warn!("{} lookup returned malformed body: {}", label, e);
                Vec::new()
            }
        }
    }

    pub async fn universities(query: &str) -> Vec<University> {
        let url = format!(
            "http://universities.hipolabs.com/search?name={}",
            urlencode(query)
        );
        fetch_list("university", url).await
    }

    pub async fn companies(query: &str) -> Vec<CompanyHit> {
        let url = format!(
            "https://autocomplete.clearbit.com/v1/companies/suggest?query={}",
            urlencode(query)
        );
        fetch_list("company", url).await
    }

    pub async fn locations(query: &str) -> Vec<LocationHit> {
        let url = format!(
            "https://nominatim.openstreetmap.org/search?q={}&format=json&limit=5",
            urlencode(query)
        );
        fetch_list("location", url).await
    }

    pub async fn skills(query: &str) -> Vec<String> {
        let url = format!("https://api.apilayer.com/skills?q={}", urlencode(query));
        fetch_list("skill", url).await
    }
}
