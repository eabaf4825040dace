//! HTTP API Models
//!
//! APIのJSON応答とフォームフィールド

use serde::{Deserialize, Serialize};

use crate::domain::entities::completion_manifest::CompletionManifest;
use crate::domain::repositories::upload_repository::{
    CompleteResponse, InitResponse, PartUploadResponse,
};

/// Response of the init endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitResponseJson {
    pub status_code: i64,
    pub upload_id: Option<String>,
}

/// Response of the uploadPart endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartResponseJson {
    pub status_code: i64,
    #[serde(rename = "partMD5")]
    pub part_md5: Option<String>,
    pub part_key: Option<String>,
}

/// Response of the complete endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResponseJson {
    pub status_code: i64,
}

impl From<InitResponseJson> for InitResponse {
    fn from(json: InitResponseJson) -> Self {
        InitResponse {
            status_code: json.status_code,
            upload_id: json.upload_id,
        }
    }
}

impl From<PartResponseJson> for PartUploadResponse {
    fn from(json: PartResponseJson) -> Self {
        PartUploadResponse {
            status_code: json.status_code,
            part_checksum: json.part_md5,
            part_key: json.part_key,
        }
    }
}

impl From<CompleteResponseJson> for CompleteResponse {
    fn from(json: CompleteResponseJson) -> Self {
        CompleteResponse {
            status_code: json.status_code,
        }
    }
}

/// Form fields of the complete request: `uploadId`, `part<N>`..., `catalogId`
pub fn complete_form_fields(
    upload_id: &str,
    catalog_id: &str,
    manifest: &CompletionManifest,
) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(manifest.len() + 2);
    fields.push(("uploadId".to_string(), upload_id.to_string()));
    fields.extend(
        manifest
            .iter()
            .map(|(part_number, key)| (format!("part{}", part_number), key.to_string())),
    );
    fields.push(("catalogId".to_string(), catalog_id.to_string()));
    fields
}
