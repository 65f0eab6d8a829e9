use crate::domain::{
    Name, UserId,
    user::{User, UserWithHistory, partition_history},
};

use super::dependencies::ServiceDependencies;
use super::errors::{LibraryApplicationError, Result};

/// 全利用者を取得する
///
/// 一覧では貸出履歴を含めない。
pub async fn list_users(deps: &ServiceDependencies) -> Result<Vec<User>> {
    deps.user_repository
        .list()
        .await
        .map_err(LibraryApplicationError::UserRepositoryError)
}

/// 利用者を貸出履歴付きで取得する
///
/// 返却済み（past）と貸出中（present）に振り分ける。
pub async fn get_user(deps: &ServiceDependencies, user_id: UserId) -> Result<UserWithHistory> {
    let user = deps
        .user_repository
        .find_by_id(user_id)
        .await
        .map_err(LibraryApplicationError::UserRepositoryError)?
        .ok_or(LibraryApplicationError::UserNotFound)?;

    let entries = deps
        .user_repository
        .find_borrow_history(user_id)
        .await
        .map_err(LibraryApplicationError::UserRepositoryError)?;

    Ok(UserWithHistory {
        user,
        books: partition_history(entries),
    })
}

/// 利用者を登録する
pub async fn create_user(deps: &ServiceDependencies, name: Option<String>) -> Result<User> {
    let name = Name::parse(name)?;

    let user = deps
        .user_repository
        .create(name)
        .await
        .map_err(LibraryApplicationError::UserRepositoryError)?;

    tracing::info!(user_id = user.id.value(), "user created");
    Ok(user)
}
