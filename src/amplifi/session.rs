// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Authenticated session against the AmpliFi web UI
//!
//! Login is a CSRF-protected form post that leaves a session cookie behind. Status
//! requests additionally need an info token scraped from `/info.php`. Both are cached
//! until [`RouterSession::reset_auth`] is called, which every failed poll does.

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::{Client, Response, StatusCode, Url, redirect};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::error::{AppError, Result, Stage};

use super::scrape::{RegexScraper, TokenScraper};

/// Timeout applied to every request sent to the router
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cookie jar that can be emptied in place
///
/// `reqwest`'s jar has no way to forget cookies, so the inner jar is swapped out instead.
#[derive(Default)]
struct SessionCookies {
    jar: RwLock<Jar>,
}

impl SessionCookies {
    fn clear(&self) {
        let mut jar = self.jar.write().unwrap_or_else(PoisonError::into_inner);
        *jar = Jar::default();
    }
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cookies(url)
    }
}

/// Router pages used by the exporter
#[derive(Debug, Clone)]
pub(super) struct Endpoints {
    pub(super) login: Url,
    pub(super) info: Url,
    pub(super) info_async: Url,
}

impl Endpoints {
    fn new(base_url: &Url) -> Result<Self> {
        let join = |path: &str| {
            base_url
                .join(path)
                .map_err(|e| AppError::Config(format!("Invalid router URL '{base_url}': {e}")))
        };
        Ok(Self {
            login: join("/login.php")?,
            info: join("/info.php")?,
            info_async: join("/info-async.php")?,
        })
    }
}

/// Session state for one router
pub struct RouterSession {
    base_url: Url,
    password: SecretString,
    scraper: Box<dyn TokenScraper>,
    cookies: Arc<SessionCookies>,
    pub(super) client: Client,
    pub(super) endpoints: Endpoints,
    info_token: Option<String>,
    authenticated: bool,
}

impl RouterSession {
    /// Creates an unauthenticated session using the default token scraper
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(base_url: Url, password: SecretString) -> Result<Self> {
        Self::with_scraper(base_url, password, Box::new(RegexScraper))
    }

    /// Creates an unauthenticated session with a custom token scraper
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn with_scraper(
        base_url: Url,
        password: SecretString,
        scraper: Box<dyn TokenScraper>,
    ) -> Result<Self> {
        Self::build(base_url, password, scraper, REQUEST_TIMEOUT)
    }

    /// Session with a non-default per-request timeout
    #[cfg(test)]
    pub(crate) fn with_timeout(
        base_url: Url,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        Self::build(base_url, password, Box::new(RegexScraper), timeout)
    }

    fn build(
        base_url: Url,
        password: SecretString,
        scraper: Box<dyn TokenScraper>,
        timeout: Duration,
    ) -> Result<Self> {
        let cookies = Arc::new(SessionCookies::default());
        // Redirects are not followed: a 302 after login is the success signal, and a
        // redirect on a status page means the session went stale.
        let client = Client::builder()
            .cookie_provider(cookies.clone())
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;
        let endpoints = Endpoints::new(&base_url)?;

        Ok(Self {
            base_url,
            password,
            scraper,
            cookies,
            client,
            endpoints,
            info_token: None,
            authenticated: false,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// True once a login succeeded and its cookie is still held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.has_session_cookie()
    }

    fn has_session_cookie(&self) -> bool {
        self.cookies.cookies(&self.base_url).is_some()
    }

    /// Logs in unless a session cookie is already held
    ///
    /// Cookie freshness is not checked; a stale cookie shows up as a failed request
    /// later in the cycle.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, parse or authentication error. The session is
    /// reset before the error is returned.
    pub async fn ensure_session(&mut self) -> Result<()> {
        if self.has_session_cookie() {
            tracing::trace!("Reusing router session for {}", self.base_url);
            return Ok(());
        }

        match self.login().await {
            Ok(()) => {
                self.authenticated = true;
                tracing::debug!("Logged in to router at {}", self.base_url);
                Ok(())
            }
            Err(e) => {
                self.reset_auth();
                Err(e)
            }
        }
    }

    async fn login(&self) -> Result<()> {
        tracing::trace!("Fetching login page {}", self.endpoints.login);
        let response = self
            .client
            .get(self.endpoints.login.clone())
            .send()
            .await
            .map_err(|e| AppError::transport(Stage::LoginPage, e))?;
        let (status, page) = read_body(Stage::LoginPage, response).await?;
        if status != StatusCode::OK {
            return Err(AppError::status(Stage::LoginPage, status.as_u16(), &page));
        }

        let csrf = self.scraper.csrf_token(&page).ok_or_else(|| {
            AppError::parse(Stage::LoginPage, "no input named 'token' on login page")
        })?;
        tracing::trace!("Found CSRF token ({} chars)", csrf.len());

        let response = self
            .client
            .post(self.endpoints.login.clone())
            .form(&[
                ("token", csrf.as_str()),
                ("password", self.password.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| AppError::transport(Stage::Login, e))?;

        let status = response.status();
        if status == StatusCode::OK || status.is_redirection() {
            return Ok(());
        }
        let (_, body) = read_body(Stage::Login, response).await?;
        Err(AppError::authentication(
            Stage::Login,
            format!("router answered {}: {body}", status.as_u16()),
        ))
    }

    /// Returns the info token, fetching it on first use after login
    ///
    /// # Errors
    ///
    /// Returns a transport or status error when `/info.php` cannot be loaded and a
    /// parse error when the page carries no token.
    pub async fn info_token(&mut self) -> Result<String> {
        if let Some(token) = &self.info_token {
            return Ok(token.clone());
        }

        tracing::trace!("Fetching info page {}", self.endpoints.info);
        let response = self
            .client
            .get(self.endpoints.info.clone())
            .send()
            .await
            .map_err(|e| AppError::transport(Stage::InfoPage, e))?;
        let (status, page) = read_body(Stage::InfoPage, response).await?;
        if status != StatusCode::OK {
            return Err(AppError::status(Stage::InfoPage, status.as_u16(), &page));
        }

        let token = self
            .scraper
            .info_token(&page)
            .ok_or_else(|| AppError::parse(Stage::InfoPage, "no hex token in info page script"))?;
        tracing::debug!("Cached info token for {}", self.base_url);
        self.info_token = Some(token.clone());
        Ok(token)
    }

    /// Drops cookies and the cached info token so the next cycle logs in again
    pub fn reset_auth(&mut self) {
        if self.authenticated || self.info_token.is_some() {
            tracing::debug!("Resetting router session for {}", self.base_url);
        }
        self.cookies.clear();
        self.info_token = None;
        self.authenticated = false;
    }
}

pub(super) async fn read_body(stage: Stage, response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::transport(stage, e))?;
    Ok((status, body))
}
