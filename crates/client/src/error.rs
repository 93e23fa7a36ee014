// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors produced by the remote trip API client.
///
/// The store does not distinguish between these: any client error means
/// "remote unreachable" and triggers the local-only fallback.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be built, sent, or its body decoded.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// The HTTP status code received.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// The remote answered with something other than JSON.
    #[error("unexpected content type '{content_type}' from {url}")]
    UnexpectedContentType {
        /// The content type received.
        content_type: String,
        /// The request URL.
        url: String,
    },
}
