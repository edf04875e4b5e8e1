//! A core module for command line interface.
//!
//! See [`Cli`] for more information.

use std::path::PathBuf;

use clap::builder::{PathBufValueParser, TypedValueParser};
use clap::Subcommand;
pub use clap::{CommandFactory, Parser};
use serde_json::Value;

use crate::api::media::{
    AssetType, AssetsParams, BulkJobParam, CopyFolderParam, CreateFolderParam, DeleteFolderParam,
    FileType, MoveFolderParam, Sort,
};
use crate::api::ImageKit;
use crate::config::ApiConfig;

/// [`clap`] command line interface.
///
/// The keys are read from the `PRIVATE_KEY`, `PUBLIC_KEY` and `URL_ENDPOINT`
/// environment variables, see [`crate::config::Credentials::from_env`].
///
/// # Example
///
/// ```no_run
/// use imagekit::cli::{Cli, Parser as _};
///
/// let cli = Cli::parse();
/// ```
#[non_exhaustive]
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// The TOML config file to use.
    ///
    /// If `None`, the default [`ApiConfig`] is used.
    #[arg(long, value_name = "PATH")]
    #[arg(value_parser = PathBufValueParser::new().try_map(Self::parse_config_from_filepath))]
    pub config: Option<ApiConfig>,

    /// The remote operation to run.
    #[command(subcommand)]
    pub operation: Operation,
}

impl Cli {
    #[inline]
    fn parse_config_from_filepath(path: PathBuf) -> anyhow::Result<ApiConfig> {
        let config = std::fs::read_to_string(path)?;
        Ok(ApiConfig::from_toml_str(&config)?)
    }
}

/// One remote operation per subcommand.
#[non_exhaustive]
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Operation {
    /// List media library assets.
    Assets {
        /// Only list the assets in this folder.
        #[arg(long)]
        path: Option<String>,
        /// Only list this kind of entry, `file` if unset.
        #[arg(long = "type", value_enum)]
        asset_type: Option<AssetType>,
        /// Sort order, `asc-created` if unset.
        #[arg(long, value_enum)]
        sort: Option<Sort>,
        /// An ImageKit.io search query, e.g. `size > "1mb"`.
        #[arg(long)]
        search_query: Option<String>,
        /// Only list images or non-images.
        #[arg(long, value_enum)]
        file_type: Option<FileType>,
        /// Maximum number of entries. Range: `1..=1000`.
        #[arg(long)]
        limit: Option<u32>,
        /// Number of entries to skip.
        #[arg(long)]
        skip: Option<u32>,
    },
    /// Create a folder.
    CreateFolder {
        /// Name of the new folder.
        folder_name: String,
        /// Folder to create it in.
        #[arg(default_value = "/")]
        parent_folder_path: String,
    },
    /// Delete a folder and everything inside it.
    DeleteFolder {
        /// Full path of the folder to delete.
        folder_path: String,
    },
    /// Move a folder, prints the bulk job id.
    MoveFolder {
        /// Full path of the folder to move.
        source_folder_path: String,
        /// Folder to move it into.
        destination_path: String,
    },
    /// Copy a folder, prints the bulk job id.
    CopyFolder {
        /// Full path of the folder to copy.
        source_folder_path: String,
        /// Folder to copy it into.
        destination_path: String,
        /// Also copy every file version.
        #[arg(long)]
        include_versions: bool,
    },
    /// Show the state of a bulk job.
    JobStatus {
        /// Id returned by `move-folder` or `copy-folder`.
        job_id: String,
    },
}

impl Operation {
    /// A short description for progress messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Assets { .. } => "Listing assets",
            Self::CreateFolder { .. } => "Creating folder",
            Self::DeleteFolder { .. } => "Deleting folder",
            Self::MoveFolder { .. } => "Moving folder",
            Self::CopyFolder { .. } => "Copying folder",
            Self::JobStatus { .. } => "Fetching job status",
        }
    }

    /// Run the operation, and return the decoded payload if the operation has one.
    ///
    /// # Errors
    ///
    /// See the corresponding [`ImageKit`] method.
    pub async fn execute(self, client: &ImageKit) -> anyhow::Result<Option<Value>> {
        let value = match self {
            Self::Assets {
                path,
                asset_type,
                sort,
                search_query,
                file_type,
                limit,
                skip,
            } => {
                let params = AssetsParams {
                    asset_type,
                    sort,
                    path,
                    search_query,
                    file_type,
                    limit,
                    skip,
                };
                let assets = client.assets(params).await?.data;
                Some(serde_json::to_value(assets)?)
            }
            Self::CreateFolder {
                folder_name,
                parent_folder_path,
            } => {
                client
                    .create_folder(CreateFolderParam::new(folder_name, parent_folder_path))
                    .await?;
                None
            }
            Self::DeleteFolder { folder_path } => {
                client
                    .delete_folder(DeleteFolderParam::new(folder_path))
                    .await?;
                None
            }
            Self::MoveFolder {
                source_folder_path,
                destination_path,
            } => {
                let param = MoveFolderParam::new(source_folder_path, destination_path);
                let job = client.move_folder(param).await?.data;
                Some(serde_json::to_value(job)?)
            }
            Self::CopyFolder {
                source_folder_path,
                destination_path,
                include_versions,
            } => {
                let param = CopyFolderParam::new(source_folder_path, destination_path)
                    .include_versions(include_versions);
                let job = client.copy_folder(param).await?.data;
                Some(serde_json::to_value(job)?)
            }
            Self::JobStatus { job_id } => {
                let param = BulkJobParam::new(job_id);
                let status = client.bulk_job_status(param).await?.data;
                Some(serde_json::to_value(status)?)
            }
        };
        Ok(value)
    }
}
