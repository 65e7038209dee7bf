use worklink_shared::{Profile, SessionUser};

/// Storage keys the session is mirrored under. The app crate wipes all of
/// them wholesale on logout or 401.
pub const USER_KEY: &str = "user";
pub const PROFILE_KEY: &str = "userProfile";
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const TOKEN_KEY: &str = "token";

/// The signed-in user, their profile, and the auth flag. Created on
/// login/signup-verify, mutated on profile edits, destroyed on logout or a
/// 401 from any service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub user_profile: Option<Profile>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            user_profile: None,
            is_authenticated: true,
        }
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.user_profile = Some(profile);
    }

    pub fn clear(&mut self) {
        *self = Self::anonymous();
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklink_shared::Role;

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::Candidate,
        }
    }

    #[test]
    fn clear_resets_all_three_fields() {
        let mut session = Session::authenticated(user());
        session.set_profile(Profile {
            user_id: "u1".into(),
            headline: "Engineer".into(),
            bio: String::new(),
            location: String::new(),
            skills: vec![],
            experience: vec![],
            education: vec![],
            avatar_url: None,
        });

        session.clear();
        assert_eq!(session.user, None);
        assert_eq!(session.user_profile, None);
        assert!(!session.is_authenticated);
    }

    #[test]
    fn authenticated_session_exposes_user_id() {
        let session = Session::authenticated(user());
        assert!(session.is_authenticated);
        assert_eq!(session.user_id(), Some("u1"));
        assert!(session.user_profile.is_none());
    }
}
