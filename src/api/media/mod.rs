//! Media library operations.
//!
//! - [`assets`]: list files, file versions and folders.
//! - [`folder`]: create, delete, move and copy folders, and poll the bulk jobs
//!   started by moving or copying.

pub mod assets;
pub mod folder;

pub use assets::{Asset, AssetType, AssetsParams, FileType, Sort};
pub use folder::{
    BulkJobParam, BulkJobStatus, CopyFolderParam, CreateFolderParam, DeleteFolderParam,
    JobIdResponse, MoveFolderParam,
};
