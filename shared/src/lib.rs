use serde::{Deserialize, Serialize};

// ── Auth ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Returned by login and signup-verify. The token may be absent when the
/// auth service runs cookie-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: SessionUser,
    #[serde(default)]
    pub token: Option<String>,
}

/// Server validation errors carry a single message field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
}

// ── Profile ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_year: String,
    #[serde(default)]
    pub end_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Creation payload for `POST /addprofile`. The profile service expects the
/// array-valued sub-fields pre-serialized: skills comma-joined, experience
/// and education as JSON strings. Do not change this shape without changing
/// the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProfileRequest {
    pub user_id: String,
    pub headline: String,
    pub bio: String,
    pub location: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    pub value: String,
}

// ── Feed ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: String,
    pub author: PostAuthor,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: String,
}

/// One page of the feed. `last` is the server's last-page flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub page: u32,
    pub last: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub comment_id: String,
    pub author: PostAuthor,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub url: String,
}

// ── Jobs ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub remote: bool,
    /// JSON-string-encoded array, e.g. `"[\"Go\",\"SQL\"]"` — the jobs
    /// service stores it that way.
    #[serde(default)]
    pub skills_required: String,
    #[serde(default)]
    pub salary_min: i64,
    #[serde(default)]
    pub salary_max: i64,
    #[serde(default)]
    pub status: String,
    pub created_at: String,
    pub recruiter_id: String,
}

impl Job {
    /// Decode the embedded skills array. Malformed input yields no skills
    /// rather than an error; the field is display-only on this side.
    pub fn skills(&self) -> Vec<String> {
        serde_json::from_str(&self.skills_required).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    pub job_title: String,
    pub company_name: String,
    pub description: String,
    pub location: String,
    pub remote: bool,
    pub skills_required: String,
    pub salary_min: i64,
    pub salary_max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub application_id: Option<String>,
    pub job_id: String,
    pub candidate_id: String,
    pub resume_url: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    pub job_id: String,
    pub candidate_id: String,
    pub resume_url: String,
    pub cover_letter: String,
}

// ── Third-party lookups ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHit {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Nominatim search hit; the geocoder's wire format is snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationHit {
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_fields_are_camel_case() {
        let post = Post {
            post_id: "p1".into(),
            author: PostAuthor {
                user_id: "u1".into(),
                name: "Ada".into(),
                headline: String::new(),
                avatar_url: None,
            },
            content: "hello".into(),
            image_url: None,
            likes_count: 3,
            comments_count: 0,
            is_liked: true,
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&post).unwrap();
        assert!(json.contains("\"postId\":\"p1\""));
        assert!(json.contains("\"likesCount\":3"));
        assert!(json.contains("\"isLiked\":true"));
    }

    #[test]
    fn job_skills_decodes_embedded_json_array() {
        let job = Job {
            job_id: "j1".into(),
            job_title: "Backend Developer".into(),
            company_name: "Acme".into(),
            description: String::new(),
            location: "Berlin".into(),
            remote: false,
            skills_required: "[\"Go\",\"SQL\"]".into(),
            salary_min: 0,
            salary_max: 0,
            status: "open".into(),
            created_at: "2026-01-01".into(),
            recruiter_id: "r1".into(),
        };
        assert_eq!(job.skills(), vec!["Go".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn job_skills_tolerates_malformed_input() {
        let mut job: Job = serde_json::from_str(
            r#"{"jobId":"j1","jobTitle":"t","companyName":"c","createdAt":"d","recruiterId":"r"}"#,
        )
        .unwrap();
        job.skills_required = "not json".into();
        assert!(job.skills().is_empty());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Recruiter).unwrap(), "\"recruiter\"");
    }
}
