//! User Service - registration, token flows and profile management

use axum_helpers::{JwtAuth, JwtClaims};
use chrono::Duration;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{BearerToken, NewUser, User, UserCreate, UserUpdate};
use crate::password;
use crate::repository::UserRepository;

/// Audience of login tokens
pub const AUTH_AUDIENCE: &str = "events:auth";
pub const RESET_PASSWORD_AUDIENCE: &str = "events:reset";
pub const VERIFY_AUDIENCE: &str = "events:verify";

/// Lifetime of password-reset and verification tokens.
pub const ACTION_TOKEN_LIFETIME_SECS: i64 = 3600;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    #[instrument(skip(self, input), fields(nickname = %input.nickname))]
    pub async fn register(&self, input: UserCreate) -> UserResult<User> {
        password::check_policy(&input.password, &input.email)
            .map_err(UserError::InvalidPassword)?;

        if self.repository.get_by_email(&input.email).await?.is_some()
            || self.repository.get_by_nickname(&input.nickname).await?.is_some()
        {
            return Err(UserError::AlreadyExists);
        }

        let new_user = NewUser {
            email: input.email,
            nickname: input.nickname,
            hashed_password: password::hash_password(&input.password)?,
        };

        let user = self
            .repository
            .create(new_user)
            .await
            .map_err(|e| match e {
                UserError::Duplicate => UserError::AlreadyExists,
                other => other,
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check e-mail and password of an active user.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(UserError::BadCredentials)?;

        if !password::verify_password(password, &user.hashed_password)? || !user.is_active {
            return Err(UserError::BadCredentials);
        }

        Ok(user)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> UserResult<BearerToken> {
        let user = self.authenticate(email, password).await?;
        let claims = JwtClaims::new(&user.id, AUTH_AUDIENCE, self.jwt.lifetime());

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(BearerToken::new(self.jwt.encode(&claims)?))
    }

    /// Resolve a login token to an active user.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> UserResult<User> {
        let claims = self.jwt.decode(token, AUTH_AUDIENCE).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            UserError::Unauthorized
        })?;

        match self.repository.get(&claims.sub).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(UserError::Unauthorized),
        }
    }

    /// Issue a reset token for an active user. Unknown or inactive
    /// addresses yield `None` so callers cannot probe for accounts.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> UserResult<Option<String>> {
        let Some(user) = self.repository.get_by_email(email).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }

        let claims = JwtClaims::new(
            &user.id,
            RESET_PASSWORD_AUDIENCE,
            Duration::seconds(ACTION_TOKEN_LIFETIME_SECS),
        )
        .with_password_fingerprint(password::fingerprint(&user.hashed_password));
        let token = self.jwt.encode(&claims)?;

        tracing::debug!(user_id = %user.id, %token, "Password reset requested");
        Ok(Some(token))
    }

    #[instrument(skip(self, token, new_password))]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> UserResult<User> {
        let claims = self
            .jwt
            .decode(token, RESET_PASSWORD_AUDIENCE)
            .map_err(|_| UserError::ResetPasswordBadToken)?;

        let mut user = self
            .repository
            .get(&claims.sub)
            .await?
            .ok_or(UserError::ResetPasswordBadToken)?;

        let current = password::fingerprint(&user.hashed_password);
        if !user.is_active || claims.password_fgpt.as_deref() != Some(current.as_str()) {
            return Err(UserError::ResetPasswordBadToken);
        }

        password::check_policy(new_password, &user.email)
            .map_err(UserError::ResetPasswordInvalidPassword)?;

        user.hashed_password = password::hash_password(new_password)?;
        self.save(&user).await?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(user)
    }

    /// Issue a verification token for an active, unverified user.
    #[instrument(skip(self))]
    pub async fn request_verify(&self, email: &str) -> UserResult<Option<String>> {
        let Some(user) = self.repository.get_by_email(email).await? else {
            return Ok(None);
        };
        if !user.is_active || user.is_verified {
            return Ok(None);
        }

        let claims = JwtClaims::new(
            &user.id,
            VERIFY_AUDIENCE,
            Duration::seconds(ACTION_TOKEN_LIFETIME_SECS),
        )
        .with_email(&user.email);
        let token = self.jwt.encode(&claims)?;

        tracing::debug!(user_id = %user.id, %token, "Verification requested");
        Ok(Some(token))
    }

    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &str) -> UserResult<User> {
        let claims = self
            .jwt
            .decode(token, VERIFY_AUDIENCE)
            .map_err(|_| UserError::VerifyBadToken)?;
        let email = claims.email.ok_or(UserError::VerifyBadToken)?;

        let mut user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::VerifyBadToken)?;

        if user.id != claims.sub {
            return Err(UserError::VerifyBadToken);
        }
        if user.is_verified {
            return Err(UserError::AlreadyVerified);
        }

        user.is_verified = true;
        self.save(&user).await?;

        tracing::info!(user_id = %user.id, "User verified");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> UserResult<User> {
        self.repository.get(id).await?.ok_or(UserError::NotFound)
    }

    /// Apply a partial update. With `safe` set the account flags in
    /// `update` are ignored.
    #[instrument(skip(self, user, update), fields(user_id = %user.id))]
    pub async fn update(&self, mut user: User, update: UserUpdate, safe: bool) -> UserResult<User> {
        if let Some(email) = update.email {
            if !email.eq_ignore_ascii_case(&user.email) {
                if self.repository.get_by_email(&email).await?.is_some() {
                    return Err(UserError::UpdateEmailAlreadyExists);
                }
                user.email = email;
                user.is_verified = false;
            }
        }

        if let Some(nickname) = update.nickname {
            if nickname != user.nickname {
                if self.repository.get_by_nickname(&nickname).await?.is_some() {
                    return Err(UserError::UpdateNicknameAlreadyExists);
                }
                user.nickname = nickname;
            }
        }

        if let Some(new_password) = update.password {
            password::check_policy(&new_password, &user.email)
                .map_err(UserError::UpdateInvalidPassword)?;
            user.hashed_password = password::hash_password(&new_password)?;
        }

        if !safe {
            if let Some(is_active) = update.is_active {
                user.is_active = is_active;
            }
            if let Some(is_superuser) = update.is_superuser {
                user.is_superuser = is_superuser;
            }
            if let Some(is_verified) = update.is_verified {
                user.is_verified = is_verified;
            }
        }

        self.save(&user).await.map_err(|e| match e {
            UserError::Duplicate => UserError::UpdateEmailAlreadyExists,
            other => other,
        })?;
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound);
        }
        Ok(())
    }

    async fn save(&self, user: &User) -> UserResult<()> {
        if self.repository.update(user).await? {
            Ok(())
        } else {
            Err(UserError::NotFound)
        }
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}
