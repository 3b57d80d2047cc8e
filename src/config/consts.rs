// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Top-level key every engine response must carry
pub const RESULT_KEY: &str = "Response";
/// Payload of the deliberate not-implemented stub
pub const NOT_IMPLEMENTED: &str = "Not implemented";
/// Status value of the uniform error envelope
pub const STATUS_ERROR: &str = "error";
/// Object name of a staged package inside the artefacts area
pub const ARTEFACT_PACKAGE_NAME: &str = "package.zip";
/// Canned ACL applied to every staged artefact
pub const ACL_BUCKET_OWNER_FULL_CONTROL: &str = "bucket-owner-full-control";
/// Server-side encryption applied to every staged artefact
pub const SSE_AES256: &str = "AES256";
