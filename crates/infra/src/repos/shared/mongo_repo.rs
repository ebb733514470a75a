use anyhow::Result;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, to_document, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": *oid
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn bulk_insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entities: &[E],
) -> Result<()> {
    // The driver refuses to insert an empty batch
    if entities.is_empty() {
        return Ok(());
    }
    let docs = entities
        .iter()
        .map(entity_to_persistence::<E, D>)
        .collect::<Result<Vec<_>>>()?;
    collection.insert_many(docs, None).await?;
    Ok(())
}

pub async fn save<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = to_document(&raw)?;
    collection.replace_one(filter, doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Result<Option<E>> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Option<E>> {
    match collection.find_one(filter, None).await? {
        Some(doc) => Ok(Some(persistence_to_entity::<E, D>(doc)?)),
        None => Ok(None),
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, None).await?;
    let docs: Vec<Document> = cursor.try_collect().await?;
    docs.into_iter()
        .map(persistence_to_entity::<E, D>)
        .collect()
}

pub async fn find_one_and_delete_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Option<E>> {
    match collection.find_one_and_delete(filter, None).await? {
        Some(doc) => Ok(Some(persistence_to_entity::<E, D>(doc)?)),
        None => Ok(None),
    }
}

/// Applies `update` to the document matching `filter`. Returns whether a
/// document matched.
pub async fn update_one_by(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<bool> {
    let res = collection.update_one(filter, update, None).await?;
    Ok(res.matched_count > 0)
}

/// Applies `update` to the document matching `filter` and returns it as updated
pub async fn find_one_and_update_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<Option<E>> {
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();
    match collection
        .find_one_and_update(filter, update, options)
        .await?
    {
        Some(doc) => Ok(Some(persistence_to_entity::<E, D>(doc)?)),
        None => Ok(None),
    }
}
