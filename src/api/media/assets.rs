//! List media library assets.
//!
//! See <https://docs.imagekit.io/api-reference/media-api/list-and-search-files>.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::{ImageKit, Response, Result};

const ASSETS_ENDPOINT: &str = "files";

/// The default and maximum number of assets per request.
pub const DEFAULT_LIMIT: u32 = 1000;

/// The kind of a media library entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    /// The current version of a file.
    #[default]
    File,
    /// A previous version of a file.
    FileVersion,
    /// A folder.
    Folder,
}

/// The sort order of the listed assets.
///
/// Every variant has its own wire value, e.g. `DescCreated` is `"DESC_CREATED"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sort {
    /// Name, `A` to `Z`.
    AscName,
    /// Name, `Z` to `A`.
    DescName,
    /// Oldest first.
    #[default]
    AscCreated,
    /// Newest first.
    DescCreated,
    /// Shortest first.
    AscHeight,
    /// Tallest first.
    DescHeight,
    /// Narrowest first.
    AscWidth,
    /// Widest first.
    DescWidth,
    /// Smallest first.
    AscSize,
    /// Largest first.
    DescSize,
}

/// Filter the assets by file type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    /// Every file, only meaningful as a filter.
    #[default]
    All,
    /// Images.
    Image,
    /// Everything else, e.g. videos and PDFs.
    NonImage,
}

/// Filter and pagination options of [`ImageKit::assets`].
///
/// Every field is optional. [`Self::with_defaults`] fills `asset_type`, `sort`,
/// `file_type`, `limit` and `skip`; `path` and `search_query` stay unset
/// and are left out of the query string.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetsParams {
    /// The kind of entries to list, defaults to [`AssetType::File`].
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,
    /// Defaults to [`Sort::AscCreated`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// Only list the assets in this folder, e.g. `/animals/cats`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// A Lucene-like query, e.g. `createdAt > "7d"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Defaults to [`FileType::All`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    /// The page size, defaults to [`DEFAULT_LIMIT`]. Range: `1..=1000`.
    #[validate(range(min = 1, max = 1000, message = "limit must be in 1..=1000"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// The number of assets to skip, defaults to `0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

impl AssetsParams {
    /// No filter set, same as [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every unset defaulted field.
    pub fn with_defaults(self) -> Self {
        Self {
            asset_type: Some(self.asset_type.unwrap_or_default()),
            sort: Some(self.sort.unwrap_or_default()),
            file_type: Some(self.file_type.unwrap_or_default()),
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
            skip: Some(self.skip.unwrap_or(0)),
            ..self
        }
    }

    /// Set [`Self::asset_type`].
    pub fn asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    /// Set [`Self::sort`].
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set [`Self::path`].
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set [`Self::search_query`].
    pub fn search_query(mut self, search_query: impl Into<String>) -> Self {
        self.search_query = Some(search_query.into());
        self
    }

    /// Set [`Self::file_type`].
    pub fn file_type(mut self, file_type: FileType) -> Self {
        self.file_type = Some(file_type);
        self
    }

    /// Set [`Self::limit`].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set [`Self::skip`].
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }
}

/// One entry of the media library.
///
/// File entries carry the `file_*` and image fields, folder entries carry
/// `folder_id` and `folder_path`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// File, file version or folder.
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// The file or folder name.
    pub name: String,
    /// The unique id of a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// The full path of a file, e.g. `/cats/cat.jpg`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// The public URL of a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The thumbnail URL of an image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// [`FileType::Image`] or [`FileType::NonImage`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    /// The size of a file in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// The height of an image in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// The width of an image in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// The tags attached to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Whether the file can only be accessed with a signed URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private_file: Option<bool>,
    /// The custom metadata of a file, as set on the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<serde_json::Value>,
    /// The unique id of a folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// The full path of a folder, e.g. `/cats/kittens`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    /// Creation time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ImageKit {
    /// List media library assets. Unset filters use [`AssetsParams::with_defaults`].
    ///
    /// # Errors
    ///
    /// If `limit` is out of `1..=1000`, nothing is sent and [`crate::api::Error::Validation`]
    /// is returned. Otherwise the request must answer `200 OK` with a JSON array.
    pub async fn assets(&self, params: AssetsParams) -> Result<Response<Vec<Asset>>> {
        let params = params.with_defaults();
        params.validate()?;

        let url = self.endpoint(ASSETS_ENDPOINT)?;
        self.get(url, &params, StatusCode::OK).await?.decode()
    }
}
