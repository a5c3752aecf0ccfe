use crate::{
    models::users::{UpdateProfileDto, User},
    repositories::{user_repo::UserRepository, SqliteRepo},
    Error, Result,
};

#[derive(Clone)]
pub struct UsersService {
    repo: SqliteRepo,
}

impl UsersService {
    pub fn new(repo: SqliteRepo) -> Self {
        Self { repo }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        let user = self.repo.user_by_id(user_id).await?;
        user.ok_or(Error::NotFound)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User> {
        let user = self.repo.user_by_username(username).await?;
        user.ok_or(Error::NotFound)
    }

    pub async fn update_profile(&self, user_id: i64, update: UpdateProfileDto) -> Result<User> {
        if let Some(username) = &update.username {
            if let Some(existing) = self.repo.user_by_username(username).await? {
                if existing.id != user_id {
                    return Err(Error::BadRequest("Username already taken".to_string()));
                }
            }
        }
        self.repo.update_profile(user_id, &update).await
    }
}
