use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    point_id::PointIdOptions, value::Kind, CreateCollectionBuilder, DeletePointsBuilder, Distance,
    GetPointsBuilder, PointId, PointStruct, ScrollPointsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tracing::info;

use crate::domain::entities::blog_post::{BlogPostPayload, Embedding};
use crate::ports::{BlogPostRepository, BlogPostRepositoryError};

/// Repository for blog post points persisted in Qdrant
pub struct BlogPostQdrantRepository {
    client: Qdrant,
    collection_name: String,
}

impl BlogPostQdrantRepository {
    /// Creates the collection if it does not exist yet.
    ///
    /// The collection is never migrated or resized: a dimension change
    /// requires dropping it manually.
    #[tracing::instrument(
        name = "Initializing the Qdrant blog post collection",
        skip(client)
    )]
    pub async fn try_new(
        client: Qdrant,
        collection_name: &str,
        collection_distance: &str,
        collection_vector_size: u64,
    ) -> Result<Self, BlogPostRepositoryError> {
        let collection_distance = Distance::from_str_name(collection_distance).ok_or_else(|| {
            BlogPostRepositoryError::ConfigurationError(format!(
                "Invalid Qdrant distance: {}",
                collection_distance
            ))
        })?;

        let exists = client
            .collection_exists(collection_name)
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        if !exists {
            client
                .create_collection(
                    CreateCollectionBuilder::new(collection_name).vectors_config(
                        VectorParamsBuilder::new(collection_vector_size, collection_distance),
                    ),
                )
                .await
                .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

            info!(collection_name, "Created collection");
        }

        Ok(Self {
            client,
            collection_name: collection_name.to_string(),
        })
    }
}

#[async_trait]
impl BlogPostRepository for BlogPostQdrantRepository {
    #[tracing::instrument(name = "Probing the collection for emptiness", skip(self))]
    async fn is_empty(&self) -> Result<bool, BlogPostRepositoryError> {
        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection_name)
                    .limit(1)
                    .with_payload(false)
                    .with_vectors(false),
            )
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(response.result.is_empty())
    }

    #[tracing::instrument(name = "Upserting a blog post point", skip(self, vector, payload))]
    async fn upsert(
        &self,
        id: &str,
        vector: Embedding,
        payload: BlogPostPayload,
    ) -> Result<(), BlogPostRepositoryError> {
        let point = PointStruct::new(
            id.to_string(),
            vector,
            HashMap::<String, Value>::from(payload),
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, vec![point]).wait(true))
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Upserting a batch of blog post points", skip(self, points), fields(nb_points = points.len()))]
    async fn upsert_batch(
        &self,
        points: Vec<(String, Embedding, BlogPostPayload)>,
    ) -> Result<(), BlogPostRepositoryError> {
        let points: Vec<PointStruct> = points
            .into_iter()
            .map(|(id, vector, payload)| {
                PointStruct::new(id, vector, HashMap::<String, Value>::from(payload))
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points).wait(true))
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving a blog post point", skip(self))]
    async fn get_by_id(
        &self,
        id: &str,
    ) -> Result<Option<BlogPostPayload>, BlogPostRepositoryError> {
        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(
                    &self.collection_name,
                    vec![PointId::from(id.to_string())],
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .next()
            .map(|point| payload_from_qdrant(&point.payload)))
    }

    #[tracing::instrument(name = "Deleting a blog post point", skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<(), BlogPostRepositoryError> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection_name)
                    .points(vec![PointId::from(id.to_string())])
                    .wait(true),
            )
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Scrolling all blog post points", skip(self))]
    async fn list_all(
        &self,
        limit: u32,
    ) -> Result<Vec<(String, BlogPostPayload)>, BlogPostRepositoryError> {
        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection_name)
                    .limit(limit)
                    .with_payload(true)
                    .with_vectors(false),
            )
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| {
                let id = point.id.as_ref().and_then(point_id_to_string)?;
                Some((id, payload_from_qdrant(&point.payload)))
            })
            .collect())
    }

    #[tracing::instrument(name = "Querying nearest blog post points", skip(self, vector))]
    async fn query(
        &self,
        vector: Embedding,
        limit: u64,
    ) -> Result<Vec<(String, BlogPostPayload, f32)>, BlogPostRepositoryError> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection_name, vector, limit).with_payload(true),
            )
            .await
            .map_err(|e| BlogPostRepositoryError::StoreUnavailable(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| {
                let id = point.id.as_ref().and_then(point_id_to_string)?;
                Some((id, payload_from_qdrant(&point.payload), point.score))
            })
            .collect())
    }
}

impl From<BlogPostPayload> for HashMap<String, Value> {
    fn from(payload: BlogPostPayload) -> Self {
        HashMap::from([
            ("title".into(), Value::from(payload.title)),
            ("content".into(), Value::from(payload.content)),
            ("topic".into(), Value::from(payload.topic)),
        ])
    }
}

/// Missing or non-string fields default to an empty string
fn payload_from_qdrant(payload: &HashMap<String, Value>) -> BlogPostPayload {
    BlogPostPayload {
        title: string_field(payload, "title"),
        content: string_field(payload, "content"),
        topic: string_field(payload, "topic"),
    }
}

fn string_field(payload: &HashMap<String, Value>, key: &str) -> String {
    match payload.get(key).and_then(|value| value.kind.as_ref()) {
        Some(Kind::StringValue(s)) => s.clone(),
        _ => String::new(),
    }
}

fn point_id_to_string(point_id: &PointId) -> Option<String> {
    match &point_id.point_id_options {
        Some(PointIdOptions::Uuid(uuid)) => Some(uuid.clone()),
        Some(PointIdOptions::Num(num)) => Some(num.to_string()),
        None => None,
    }
}
