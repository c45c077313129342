//! Adaptive theme state with superseded-request suppression.
//!
//! Each distinct image source gets exactly one classification request, tagged
//! with a monotonically increasing token. A completion is applied only if its
//! token is still the latest issued; anything older is discarded.

use super::brightness::Classification;
use super::palette::{theme, ThemeTokens};

/// A classification the caller must run and report back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub token: u64,
    pub source: String,
}

/// Current background source and its classification
#[derive(Debug, Clone, Default)]
pub struct AdaptiveTheme {
    source: Option<String>,
    latest_token: u64,
    classification: Classification,
}

impl AdaptiveTheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the theme at a new image source.
    ///
    /// Resets to "not analyzed" immediately. A blank source resolves to dark
    /// on the spot and returns `None`; the same source twice in a row is a
    /// no-op.
    pub fn set_source(&mut self, source: &str) -> Option<ClassificationRequest> {
        if self.source.as_deref() == Some(source) {
            return None;
        }

        self.source = Some(source.to_string());
        self.latest_token += 1;
        self.classification = Classification::pending();

        if source.trim().is_empty() {
            self.classification = Classification::dark();
            log::debug!("[Theme] No background image, using dark theme");
            return None;
        }

        log::debug!("[Theme] Classification #{} requested for {}", self.latest_token, source);
        Some(ClassificationRequest {
            token: self.latest_token,
            source: source.to_string(),
        })
    }

    /// Report a finished classification; returns whether it was applied
    pub fn complete(&mut self, token: u64, classification: Classification) -> bool {
        if token != self.latest_token {
            log::debug!(
                "[Theme] Discarding stale classification #{} (latest #{})",
                token,
                self.latest_token
            );
            return false;
        }
        self.classification = Classification {
            is_analyzed: true,
            ..classification
        };
        log::info!(
            "[Theme] Background classified as {}",
            if self.classification.is_light { "light" } else { "dark" }
        );
        true
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn tokens(&self) -> ThemeTokens {
        theme(self.classification)
    }
}
