//! Object storage addressing for uploaded recipe images and avatars
//!
//! Uploading is handled by the storage provider's own SDK; this module only
//! knows how to turn a stored file id into the public view URL the backend
//! expects in `imageUri` fields.

use serde::{Deserialize, Serialize};

/// Object storage location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage endpoint, e.g. `https://cloud.appwrite.io/v1`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Project the bucket belongs to
    #[serde(default)]
    pub project_id: String,
    /// Bucket holding recipe images and avatars
    #[serde(default)]
    pub bucket_id: String,
}

fn default_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project_id: String::new(),
            bucket_id: String::new(),
        }
    }
}

impl StorageConfig {
    /// Public view URL for a stored file
    ///
    /// `https://<host>/v1/storage/buckets/<bucket>/files/<file>/view?project=<project>`
    pub fn public_url(&self, file_id: &str) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        let endpoint = if endpoint.ends_with("/v1") {
            endpoint.to_string()
        } else {
            format!("{endpoint}/v1")
        };

        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            endpoint,
            urlencoding::encode(&self.bucket_id),
            urlencoding::encode(file_id),
            urlencoding::encode(&self.project_id)
        )
    }
}
