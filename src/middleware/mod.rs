// ABOUTME: Request middleware for the HTTP surface
// ABOUTME: Currently hosts the bearer-token authentication extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request middleware

pub mod auth;

pub use auth::AuthedUser;
