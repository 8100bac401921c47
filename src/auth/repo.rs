use time::OffsetDateTime;

use super::repo_types::User;
use crate::store::{generate_id, Store, StoreError};

pub async fn find_by_email(store: &dyn Store, email: &str) -> Result<Option<User>, StoreError> {
    let doc = store.load().await?;
    Ok(doc.users.into_iter().find(|u| u.email == email))
}

pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<Option<User>, StoreError> {
    let doc = store.load().await?;
    Ok(doc.users.into_iter().find(|u| u.id == id))
}

/// Persist a new user. Uniqueness of the email is the caller's check;
/// the store only appends.
pub async fn create(
    store: &dyn Store,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, StoreError> {
    let user = User {
        id: generate_id(),
        name: name.to_string(),
        email: email.to_string(),
        password: password_hash.to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    let record = user.clone();
    store
        .update(Box::new(move |doc| doc.users.push(record)))
        .await?;
    Ok(user)
}
