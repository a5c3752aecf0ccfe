use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    models::users::{RegisterUserDto, User},
    repositories::{user_repo::UserRepository, SqliteRepo},
    Error, Result,
};

#[derive(Clone)]
pub struct AuthService {
    repo: SqliteRepo,
    jwt_secret: String,
    jwt_maxage: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

impl AuthService {
    pub fn new(repo: SqliteRepo, jwt_secret: String, jwt_maxage: i64) -> Self {
        Self {
            repo,
            jwt_secret,
            jwt_maxage,
        }
    }

    pub async fn register(&self, new_user: RegisterUserDto) -> Result<User> {
        if self
            .repo
            .user_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(Error::BadRequest("Username already taken".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)?
            .to_string();

        self.repo
            .create_user(
                &new_user.username,
                &new_user.email,
                &new_user.first_name,
                &new_user.last_name,
                &password_hash,
            )
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .repo
            .user_by_username(username)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        let argon2 = Argon2::default();
        let parsed_hash =
            PasswordHash::new(&user.password).map_err(|_| Error::InternalServerError)?;
        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| Error::InvalidCredentials)?;

        let token = self.generate_token(user.id)?;
        Ok((user, token))
    }

    pub fn generate_token(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.jwt_maxage)).timestamp() as usize;
        let iat = now.timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| Error::InternalServerError)
    }

    pub fn decode_token<T: Into<String>>(&self, token: T) -> Result<i64> {
        let decoded = decode::<Claims>(
            &token.into(),
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| Error::Unauthenticated)?;

        decoded
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| Error::Unauthenticated)
    }
}
