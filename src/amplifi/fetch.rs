// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Full status download

use reqwest::StatusCode;

use crate::error::{AppError, Result, Stage};

use super::session::{RouterSession, read_body};

impl RouterSession {
    /// Requests the `full` status dump and returns the raw JSON body
    ///
    /// # Errors
    ///
    /// Returns a transport error on connection failure or timeout, and a status
    /// error (with the body) when the router does not answer 200.
    pub async fn fetch_full_info(&self, token: &str) -> Result<String> {
        tracing::trace!("Requesting full status from {}", self.endpoints.info_async);
        let response = self
            .client
            .post(self.endpoints.info_async.clone())
            .form(&[("token", token), ("do", "full")])
            .send()
            .await
            .map_err(|e| AppError::transport(Stage::FullInfo, e))?;

        let (status, body) = read_body(Stage::FullInfo, response).await?;
        if status != StatusCode::OK {
            return Err(AppError::status(Stage::FullInfo, status.as_u16(), &body));
        }
        tracing::trace!("Received {} bytes of status JSON", body.len());
        Ok(body)
    }
}
