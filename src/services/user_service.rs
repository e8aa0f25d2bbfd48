use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, SqlErr};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_user_profile(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn update_user_profile(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        validate_update(&request)?;

        let mut model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            .into_active_model();

        if let Some(username) = request.username {
            model.username = Set(username.trim().to_string());
        }
        if let Some(first_name) = request.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = request.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = request.email {
            model.email = Set(email.trim().to_string());
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&self.pool).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::ValidationError("Username or email is already in use".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        log::info!("User {user_id} updated profile");
        Ok(UserResponse::from(updated))
    }
}

fn validate_update(request: &UpdateUserRequest) -> AppResult<()> {
    if request.is_empty() {
        return Err(AppError::ValidationError("No fields to update".to_string()));
    }
    if let Some(username) = &request.username {
        let len = username.trim().chars().count();
        if !(2..=20).contains(&len) {
            return Err(AppError::ValidationError(
                "Username length must be between 2 and 20 characters".to_string(),
            ));
        }
    }
    if let Some(email) = &request.email
        && !email.contains('@')
    {
        return Err(AppError::ValidationError("Invalid email".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update() {
        assert!(validate_update(&UpdateUserRequest::default()).is_err());

        let req = UpdateUserRequest {
            username: Some("a".into()),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());

        let req = UpdateUserRequest {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());

        let req = UpdateUserRequest {
            username: Some("ada".into()),
            email: Some("ada@example.com".into()),
            ..Default::default()
        };
        assert!(validate_update(&req).is_ok());
    }
}
