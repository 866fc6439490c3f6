use axum_helpers::CurrentUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Stored user.
///
/// `nickname` is the identifier events reference as `owner` and in
/// `attendants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// ObjectId hex string
    pub id: String,
    pub email: String,
    pub nickname: String,
    /// Argon2 PHC string
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

/// Fields storage needs to create a user; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub hashed_password: String,
}

impl User {
    pub fn new(id: impl Into<String>, new_user: NewUser) -> Self {
        Self {
            id: id.into(),
            email: new_user.email,
            nickname: new_user.nickname,
            hashed_password: new_user.hashed_password,
            is_active: true,
            is_superuser: false,
            is_verified: false,
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRead {
    #[schema(example = "65f1c0ffee0000000000cafe")]
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        }
    }
}

impl From<CurrentUser> for UserRead {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        }
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        }
    }
}

/// Registration body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 100))]
    pub nickname: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    pub password: String,
}

/// Partial profile update. The flags are honoured on the superuser
/// endpoint only.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100))]
    pub nickname: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_verified: Option<bool>,
}

/// `application/x-www-form-urlencoded` login form; `username` holds the e-mail.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BearerToken {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl BearerToken {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    pub message: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(nickname: &str) -> User {
        User::new(
            "65f1c0ffee0000000000cafe",
            NewUser {
                email: format!("{nickname}@example.com"),
                nickname: nickname.to_string(),
                hashed_password: "hash".to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = fixtures::user("alice");
        assert!(user.is_active);
        assert!(!user.is_superuser);
        assert!(!user.is_verified);
    }

    #[test]
    fn test_user_read_hides_password() {
        let read = UserRead::from(fixtures::user("alice"));
        let json = serde_json::to_value(&read).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["nickname"], "alice");
    }

    #[test]
    fn test_user_create_validation() {
        let ok = UserCreate {
            nickname: "alice".into(),
            email: "alice@example.com".into(),
            password: "pass".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = UserCreate {
            email: "not-an-email".into(),
            ..ok
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_current_user_from_user() {
        let current = CurrentUser::from(fixtures::user("bob"));
        assert_eq!(current.nickname, "bob");
        assert_eq!(current.email, "bob@example.com");
    }
}
