use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::data::post_store::{NewPost, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::infrastructure::gcp_auth::MetadataTokenProvider;
use crate::infrastructure::settings::Settings;

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com";

pub(crate) struct FirestorePostStore {
    client: Client,
    documents_url: String,
    auth: Option<MetadataTokenProvider>,
}

impl FirestorePostStore {
    pub(crate) fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        // The emulator speaks the same REST surface, unauthenticated.
        let (host, auth) = match &settings.firestore_emulator_host {
            Some(emulator_host) => (format!("http://{emulator_host}"), None),
            None => (
                FIRESTORE_HOST.to_string(),
                Some(MetadataTokenProvider::new(client.clone())),
            ),
        };

        let documents_url = format!(
            "{host}/v1/projects/{}/databases/(default)/documents/{}",
            settings.gcp_project_id, settings.firestore_collection,
        );

        Ok(Self {
            client,
            documents_url,
            auth,
        })
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, DomainError> {
        match &self.auth {
            Some(provider) => {
                let token = provider
                    .access_token()
                    .await
                    .map_err(|err| DomainError::Store(err.to_string()))?;
                Ok(request.bearer_auth(token))
            }
            None => Ok(request),
        }
    }
}

#[async_trait]
impl PostStore for FirestorePostStore {
    async fn insert(&self, input: NewPost) -> Result<String, DomainError> {
        let payload = encode_new_post(&input);
        let request = self.authorize(self.client.post(&self.documents_url)).await?;
        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(map_store_error)?
            .error_for_status()
            .map_err(map_store_error)?;

        let document: StoredDocument = response.json().await.map_err(map_store_error)?;
        Ok(document_id(&document.name).to_string())
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let request = self.authorize(self.client.get(&self.documents_url)).await?;
        let response = request
            .send()
            .await
            .map_err(map_store_error)?
            .error_for_status()
            .map_err(map_store_error)?;

        let body: ListDocumentsResponse = response.json().await.map_err(map_store_error)?;
        body.documents.into_iter().map(decode_document).collect()
    }
}

#[derive(Debug, Serialize)]
struct DocumentPayload {
    fields: DocumentFields,
}

#[derive(Debug, Deserialize)]
struct StoredDocument {
    name: String,
    fields: DocumentFields,
}

// The `documents` key is absent when the collection is empty.
#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<StoredDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DocumentFields {
    #[serde(rename = "authorID")]
    author_id: TypedString,
    date: TypedInteger,
    title: TypedString,
    content: TypedString,
}

#[derive(Debug, Serialize, Deserialize)]
struct TypedString {
    #[serde(rename = "stringValue")]
    string_value: String,
}

// Firestore encodes int64 values as JSON strings.
#[derive(Debug, Serialize, Deserialize)]
struct TypedInteger {
    #[serde(rename = "integerValue")]
    integer_value: String,
}

fn encode_new_post(input: &NewPost) -> DocumentPayload {
    DocumentPayload {
        fields: DocumentFields {
            author_id: TypedString {
                string_value: input.author_id.clone(),
            },
            date: TypedInteger {
                integer_value: input.date.to_string(),
            },
            title: TypedString {
                string_value: input.title.clone(),
            },
            content: TypedString {
                string_value: input.content.clone(),
            },
        },
    }
}

fn decode_document(document: StoredDocument) -> Result<Post, DomainError> {
    let date = document
        .fields
        .date
        .integer_value
        .parse::<i64>()
        .map_err(|_| DomainError::Store(format!("non-integer date in {}", document.name)))?;

    Ok(Post {
        id: document_id(&document.name).to_string(),
        author_id: document.fields.author_id.string_value,
        title: document.fields.title.string_value,
        content: document.fields.content.string_value,
        date,
    })
}

// A document name is `projects/…/documents/<collection>/<id>`.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn map_store_error(err: reqwest::Error) -> DomainError {
    DomainError::Store(err.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FirestorePostStore, ListDocumentsResponse, StoredDocument, encode_new_post};
    use crate::data::post_store::NewPost;
    use crate::domain::error::DomainError;
    use crate::infrastructure::settings::Settings;

    fn sample_settings(emulator_host: Option<&str>) -> Settings {
        Settings {
            gcp_project_id: "double-willow-379721".to_string(),
            firestore_collection: "test-blog".to_string(),
            firestore_emulator_host: emulator_host.map(str::to_string),
            web_app_origin: "https://blog.example.com".to_string(),
            gateway_domain: "gateway.example.com".to_string(),
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            http_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 1024 * 1024,
            http_concurrency_limit: 256,
        }
    }

    #[test]
    fn production_store_targets_firestore_with_auth() {
        let store = FirestorePostStore::new(&sample_settings(None)).expect("store must build");

        assert_eq!(
            store.documents_url,
            "https://firestore.googleapis.com/v1/projects/double-willow-379721/databases/(default)/documents/test-blog"
        );
        assert!(store.auth.is_some());
    }

    #[test]
    fn emulator_store_is_plain_http_without_auth() {
        let store = FirestorePostStore::new(&sample_settings(Some("localhost:8686")))
            .expect("store must build");

        assert_eq!(
            store.documents_url,
            "http://localhost:8686/v1/projects/double-willow-379721/databases/(default)/documents/test-blog"
        );
        assert!(store.auth.is_none());
    }

    #[test]
    fn encode_new_post_uses_typed_firestore_values() {
        let payload = encode_new_post(&NewPost {
            author_id: "alice".to_string(),
            date: 1690000000000,
            title: "Hi".to_string(),
            content: "World".to_string(),
        });

        let value = serde_json::to_value(&payload).expect("payload must serialize");
        assert_eq!(
            value,
            json!({
                "fields": {
                    "authorID": { "stringValue": "alice" },
                    "date": { "integerValue": "1690000000000" },
                    "title": { "stringValue": "Hi" },
                    "content": { "stringValue": "World" },
                }
            })
        );
    }

    #[test]
    fn decode_document_extracts_trailing_id_and_date() {
        let document: StoredDocument = serde_json::from_value(json!({
            "name": "projects/double-willow-379721/databases/(default)/documents/test-blog/aB3x9",
            "fields": {
                "authorID": { "stringValue": "alice" },
                "date": { "integerValue": "1690000000000" },
                "title": { "stringValue": "Hi" },
                "content": { "stringValue": "World" },
            },
            "createTime": "2023-07-22T05:46:40Z",
            "updateTime": "2023-07-22T05:46:40Z",
        }))
        .expect("document must deserialize");

        let post = super::decode_document(document).expect("document must decode");
        assert_eq!(post.id, "aB3x9");
        assert_eq!(post.author_id, "alice");
        assert_eq!(post.title, "Hi");
        assert_eq!(post.content, "World");
        assert_eq!(post.date, 1690000000000);
    }

    #[test]
    fn decode_document_rejects_non_integer_date() {
        let document: StoredDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/test-blog/doc1",
            "fields": {
                "authorID": { "stringValue": "alice" },
                "date": { "integerValue": "not-a-number" },
                "title": { "stringValue": "Hi" },
                "content": { "stringValue": "World" },
            },
        }))
        .expect("document must deserialize");

        let err = super::decode_document(document).expect_err("date must be rejected");
        assert!(matches!(err, DomainError::Store(_)));
    }

    #[test]
    fn empty_collection_decodes_to_no_documents() {
        let body: ListDocumentsResponse =
            serde_json::from_value(json!({})).expect("empty response must deserialize");
        assert!(body.documents.is_empty());
    }
}
