#![warn(missing_docs)]

//! <div class="warning">
//!
//! Note: API is unstable, and may change in `0.x` versions.
//!
//! </div>
//!
//! An async client for the [ImageKit.io](https://imagekit.io) media library API.
//!
//! # As a library
//!
//! Build an [`api::ImageKit`] from [`config::Credentials`] and [`config::ApiConfig`],
//! then call one method per remote operation, see [`api::media`].
//!
//! See [`api#example`] for example.
//!
//! # As a binary
//!
//! Enable the `cli` feature to build the `imagekit` command,
//! see `main.rs` to know how [`cli`] drives [`api`].

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
