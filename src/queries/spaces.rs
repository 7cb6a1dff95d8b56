use crate::error::{Error, Result};
use crate::models::spaces::Space;
use crate::store::{Document, DocumentStore, FieldValue};

/// Gets a single space by id. Expects the space to exist.
pub async fn get_space(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<Space> {
    get_space_optional(store, collection, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Space {} not found", id)))
}

/// Gets a single space by id. The space may not exist.
pub async fn get_space_optional(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<Option<Space>> {
    match store.get(collection, id).await? {
        Some(doc) => Ok(Some(doc.decode()?)),
        None => Ok(None),
    }
}

/// Lists spaces in the collection, newest first by `createdAt`.
///
/// With `visible_only`, records soft-hidden via `visible = false` are
/// skipped; a record with no `visible` field counts as visible.
pub async fn list_spaces(
    store: &dyn DocumentStore,
    collection: &str,
    visible_only: bool,
) -> Result<Vec<Space>> {
    let mut spaces = Vec::new();
    for (_, doc) in store.list(collection).await? {
        let space: Space = doc.decode()?;
        if visible_only && space.visible == Some(false) {
            continue;
        }
        spaces.push(space);
    }
    spaces.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(spaces)
}

/// Writes a space document, stamping `createdAt`/`updatedAt` with the
/// store's server-assigned instant.
pub async fn create_space_document(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    fields: Document,
) -> Result<()> {
    let mut fields = fields;
    fields.insert("id", FieldValue::Text(id.to_string()));
    fields.insert("createdAt", FieldValue::ServerTimestamp);
    fields.insert("updatedAt", FieldValue::ServerTimestamp);
    store.set_merge(collection, id, fields).await
}

/// Merge-writes a partial edit, advancing `updatedAt` on the server clock.
/// Fields absent from `fields` are preserved.
pub async fn update_space_document(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    fields: Document,
) -> Result<()> {
    let mut fields = fields;
    fields.insert("updatedAt", FieldValue::ServerTimestamp);
    store.set_merge(collection, id, fields).await
}
