//! Folder operations of the media library.
//!
//! Moving and copying run as bulk jobs on the server, they answer with a
//! [`JobIdResponse`] that can be polled with [`ImageKit::bulk_job_status`].

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::{ImageKit, Response, Result};

const FOLDER_ENDPOINT: &str = "folder";
const MOVE_FOLDER_ENDPOINT: &str = "bulkJobs/moveFolder";
const COPY_FOLDER_ENDPOINT: &str = "bulkJobs/copyFolder";
const BULK_JOBS_ENDPOINT: &str = "bulkJobs/";

/// Parameters of [`ImageKit::create_folder`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderParam {
    /// The name of the new folder.
    #[validate(length(min = 1, message = "folder_name must not be empty"))]
    pub folder_name: String,
    /// The folder to create `folder_name` in, `/` for the root.
    #[validate(length(min = 1, message = "parent_folder_path must not be empty"))]
    pub parent_folder_path: String,
}

impl CreateFolderParam {
    /// Create `folder_name` inside `parent_folder_path`.
    pub fn new(folder_name: impl Into<String>, parent_folder_path: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            parent_folder_path: parent_folder_path.into(),
        }
    }
}

/// Parameters of [`ImageKit::delete_folder`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFolderParam {
    /// The full path of the folder to delete, e.g. `/animals/cats`.
    #[validate(length(min = 1, message = "folder_path must not be empty"))]
    pub folder_path: String,
}

impl DeleteFolderParam {
    /// Delete the folder at `folder_path`.
    pub fn new(folder_path: impl Into<String>) -> Self {
        Self {
            folder_path: folder_path.into(),
        }
    }
}

/// Parameters of [`ImageKit::move_folder`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveFolderParam {
    /// The full path of the folder to move.
    #[validate(length(min = 1, message = "source_folder_path must not be empty"))]
    pub source_folder_path: String,
    /// The folder to move the source folder into.
    #[validate(length(min = 1, message = "destination_path must not be empty"))]
    pub destination_path: String,
}

impl MoveFolderParam {
    /// Move `source_folder_path` into `destination_path`.
    pub fn new(source_folder_path: impl Into<String>, destination_path: impl Into<String>) -> Self {
        Self {
            source_folder_path: source_folder_path.into(),
            destination_path: destination_path.into(),
        }
    }
}

/// Parameters of [`ImageKit::copy_folder`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CopyFolderParam {
    /// The full path of the folder to copy.
    #[validate(length(min = 1, message = "source_folder_path must not be empty"))]
    pub source_folder_path: String,
    /// The folder to copy the source folder into.
    #[validate(length(min = 1, message = "destination_path must not be empty"))]
    pub destination_path: String,
    /// Also copy the previous versions of every file. Defaults to `false`.
    #[serde(default)]
    pub include_versions: bool,
}

impl CopyFolderParam {
    /// Copy `source_folder_path` into `destination_path`, without previous file versions.
    pub fn new(source_folder_path: impl Into<String>, destination_path: impl Into<String>) -> Self {
        Self {
            source_folder_path: source_folder_path.into(),
            destination_path: destination_path.into(),
            include_versions: false,
        }
    }

    /// Set [`Self::include_versions`].
    pub fn include_versions(mut self, include_versions: bool) -> Self {
        self.include_versions = include_versions;
        self
    }
}

/// Parameters of [`ImageKit::bulk_job_status`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkJobParam {
    /// The id returned by a folder operation.
    #[validate(length(min = 1, message = "job_id must not be empty"))]
    pub job_id: String,
}

impl BulkJobParam {
    /// Look up the job `job_id`.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

/// The handle of a bulk job started by a folder operation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIdResponse {
    /// Pass it to [`ImageKit::bulk_job_status`] to follow the job.
    pub job_id: String,
}

/// The state of a bulk job.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkJobStatus {
    /// The id of the job.
    pub job_id: String,
    /// `COPY_FOLDER` or `MOVE_FOLDER`.
    #[serde(rename = "type")]
    pub job_type: String,
    /// `Pending` or `Completed`.
    pub status: String,
}

impl BulkJobStatus {
    /// Whether the job has finished.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }
}

impl ImageKit {
    /// Create a new folder in the media library.
    ///
    /// # Errors
    ///
    /// If a field is empty, nothing is sent. Any answer other than `201 Created`
    /// is returned as [`crate::api::Error::Remote`].
    pub async fn create_folder(&self, param: CreateFolderParam) -> Result<Response<()>> {
        param.validate()?;

        let url = self.endpoint(FOLDER_ENDPOINT)?;
        let response = self.post(url, &param, StatusCode::CREATED).await?;
        Ok(response.into_empty())
    }

    /// Delete a folder and everything inside it.
    ///
    /// # Errors
    ///
    /// If `folder_path` is empty, nothing is sent. Any answer other than `204 No Content`
    /// is returned as [`crate::api::Error::Remote`].
    pub async fn delete_folder(&self, param: DeleteFolderParam) -> Result<Response<()>> {
        param.validate()?;

        let url = self.endpoint(FOLDER_ENDPOINT)?;
        let response = self.delete(url, &param, StatusCode::NO_CONTENT).await?;
        Ok(response.into_empty())
    }

    /// Move a folder to a new path, as a bulk job.
    ///
    /// # Errors
    ///
    /// If a path is empty, nothing is sent. Any answer other than `200 OK`
    /// is returned as [`crate::api::Error::Remote`].
    pub async fn move_folder(&self, param: MoveFolderParam) -> Result<Response<JobIdResponse>> {
        param.validate()?;

        let url = self.endpoint(MOVE_FOLDER_ENDPOINT)?;
        self.post(url, &param, StatusCode::OK).await?.decode()
    }

    /// Copy a folder to a new path, as a bulk job.
    ///
    /// # Errors
    ///
    /// If a path is empty, nothing is sent. Any answer other than `200 OK`
    /// is returned as [`crate::api::Error::Remote`].
    pub async fn copy_folder(&self, param: CopyFolderParam) -> Result<Response<JobIdResponse>> {
        param.validate()?;

        let url = self.endpoint(COPY_FOLDER_ENDPOINT)?;
        self.post(url, &param, StatusCode::OK).await?.decode()
    }

    /// Get the state of a bulk job started by [`Self::move_folder`] or [`Self::copy_folder`].
    ///
    /// # Errors
    ///
    /// If `job_id` is empty, nothing is sent. Any answer other than `200 OK`
    /// is returned as [`crate::api::Error::Remote`].
    pub async fn bulk_job_status(&self, param: BulkJobParam) -> Result<Response<BulkJobStatus>> {
        param.validate()?;

        let mut url = self.endpoint(BULK_JOBS_ENDPOINT)?;
        // push as a single segment, so `job_id` is percent-encoded
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(&param.job_id);
        let request = self.request(Method::GET, url);
        self.dispatch(request, StatusCode::OK).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{any, body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::tests::{client_for, AUTHORIZATION};
    use crate::api::Error;

    /// A server that fails the test if it receives any request.
    async fn untouched_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_illegal_params() {
        CreateFolderParam::new("", "/").validate().unwrap_err();
        CreateFolderParam::new("cats", "").validate().unwrap_err();
        CreateFolderParam::new("cats", "/").validate().unwrap();

        DeleteFolderParam::new("").validate().unwrap_err();
        MoveFolderParam::new("", "/dogs").validate().unwrap_err();
        MoveFolderParam::new("/cats", "").validate().unwrap_err();
        CopyFolderParam::new("/cats", "").validate().unwrap_err();
        BulkJobParam::new("").validate().unwrap_err();
    }

    #[test]
    fn test_params_wire_shape() {
        let param = CopyFolderParam::new("/cats", "/backup")
            .include_versions(true);
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(
            value,
            json!({
                "sourceFolderPath": "/cats",
                "destinationPath": "/backup",
                "includeVersions": true,
            })
        );
        let decoded: CopyFolderParam = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, param);

        // `includeVersions` may be omitted
        let param: CopyFolderParam =
            serde_json::from_str(r#"{"sourceFolderPath": "/a", "destinationPath": "/b"}"#)
                .unwrap();
        assert!(!param.include_versions);

        let param = CreateFolderParam::new("cats", "/animals");
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(
            value,
            json!({"folderName": "cats", "parentFolderPath": "/animals"})
        );
        let decoded: CreateFolderParam = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, param);

        let param = MoveFolderParam::new("/cats", "/animals");
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(
            value,
            json!({"sourceFolderPath": "/cats", "destinationPath": "/animals"})
        );
        let decoded: MoveFolderParam = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, param);

        let param = DeleteFolderParam::new("/animals/cats");
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value, json!({"folderPath": "/animals/cats"}));
        let decoded: DeleteFolderParam = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, param);

        let param = BulkJobParam::new("abc123");
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value, json!({"jobId": "abc123"}));
        let decoded: BulkJobParam = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, param);
    }

    #[tokio::test]
    async fn test_create_folder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/folder"))
            .and(header("authorization", AUTHORIZATION))
            .and(body_json(json!({
                "folderName": "cats",
                "parentFolderPath": "/animals"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .create_folder(CreateFolderParam::new("cats", "/animals"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, b"{}");
    }

    #[tokio::test]
    async fn test_create_folder_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/folder"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "Your request contains invalid parentFolderPath parameter.",
                "help": "For support kindly contact us at support@imagekit.io ."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_folder(CreateFolderParam::new("cats", "animals"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        let payload = err.payload().unwrap();
        assert_eq!(
            payload.message,
            "Your request contains invalid parentFolderPath parameter."
        );
        assert!(payload.help.is_some());
    }

    #[tokio::test]
    async fn test_create_folder_unexpected_success_status() {
        // only `201` means created
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/folder"))
            .respond_with(ResponseTemplate::new(200).set_body_string("already there"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_folder(CreateFolderParam::new("cats", "/"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::OK));
        assert_eq!(err.payload().unwrap().message, "already there");
    }

    #[tokio::test]
    async fn test_create_folder_missing_field_sends_nothing() {
        let server = untouched_server().await;
        let err = client_for(&server)
            .create_folder(CreateFolderParam::new("", "/"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_folder() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/folder"))
            .and(header("authorization", AUTHORIZATION))
            .and(body_json(json!({"folderPath": "/animals/cats"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .delete_folder(DeleteFolderParam::new("/animals/cats"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_delete_folder_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/folder"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "No folder found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_folder(DeleteFolderParam::new("/nope"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.payload().unwrap().message, "No folder found");
    }

    #[tokio::test]
    async fn test_delete_folder_missing_field_sends_nothing() {
        let server = untouched_server().await;
        let err = client_for(&server)
            .delete_folder(DeleteFolderParam::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_move_folder() {
        let server = MockServer::start().await;
        let body = json!({"jobId": "abc123"});
        Mock::given(method("POST"))
            .and(path("/v1/bulkJobs/moveFolder"))
            .and(body_json(json!({
                "sourceFolderPath": "/cats",
                "destinationPath": "/animals"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .move_folder(MoveFolderParam::new("/cats", "/animals"))
            .await
            .unwrap();
        assert_eq!(response.data.job_id, "abc123");
    }

    #[tokio::test]
    async fn test_move_folder_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/bulkJobs/moveFolder"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .move_folder(MoveFolderParam::new("/cats", "/animals"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_move_folder_missing_field_sends_nothing() {
        let server = untouched_server().await;
        let err = client_for(&server)
            .move_folder(MoveFolderParam::new("/cats", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_copy_folder() {
        let server = MockServer::start().await;
        let body = json!({"jobId": "job_42"});
        Mock::given(method("POST"))
            .and(path("/v1/bulkJobs/copyFolder"))
            .and(body_json(json!({
                "sourceFolderPath": "/cats",
                "destinationPath": "/backup",
                "includeVersions": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .copy_folder(CopyFolderParam::new("/cats", "/backup"))
            .await
            .unwrap();
        assert_eq!(response.data.job_id, "job_42");
    }

    #[tokio::test]
    async fn test_copy_folder_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/bulkJobs/copyFolder"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "No files & folders found at sourceFolderPath /cats",
                "help": "For support kindly contact us at support@imagekit.io ."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .copy_folder(CopyFolderParam::new("/cats", "/backup"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            err.payload().unwrap().message,
            "No files & folders found at sourceFolderPath /cats"
        );
    }

    #[tokio::test]
    async fn test_copy_folder_missing_field_sends_nothing() {
        let server = untouched_server().await;
        let client = client_for(&server);

        let err = client
            .copy_folder(CopyFolderParam::new("", "/backup"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = client
            .copy_folder(CopyFolderParam::new("/cats", "").include_versions(true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_bulk_job_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/bulkJobs/abc123"))
            .and(header("authorization", AUTHORIZATION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobId": "abc123",
                "type": "MOVE_FOLDER",
                "status": "Completed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .bulk_job_status(BulkJobParam::new("abc123"))
            .await
            .unwrap();
        assert_eq!(response.data.job_type, "MOVE_FOLDER");
        assert!(response.data.is_completed());
    }

    #[tokio::test]
    async fn test_bulk_job_status_missing_id_sends_nothing() {
        let server = untouched_server().await;
        let err = client_for(&server)
            .bulk_job_status(BulkJobParam::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
