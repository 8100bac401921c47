use time::OffsetDateTime;

use super::repo_types::Quote;
use crate::store::{generate_id, Store, StoreError};

pub async fn list_all(store: &dyn Store) -> Result<Vec<Quote>, StoreError> {
    let doc = store.load().await?;
    Ok(doc.quotes)
}

pub async fn create(
    store: &dyn Store,
    text: String,
    author: String,
    submitted_by: &str,
    submitted_by_name: &str,
) -> Result<Quote, StoreError> {
    let quote = Quote {
        id: generate_id(),
        text,
        author,
        submitted_by: submitted_by.to_string(),
        submitted_by_name: submitted_by_name.to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    let record = quote.clone();
    store
        .update(Box::new(move |doc| doc.quotes.push(record)))
        .await?;
    Ok(quote)
}
