//! Language hook - current UI language, persisted across sessions
//!
//! Changing the language invalidates every cached query whose key carries the
//! previous language code (questions, results).

use std::sync::{Arc, PoisonError, RwLock};

use quirkverse_player_ports::outbound::storage_keys;

use crate::application::context::ClientContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[LanguageOption] = &[
    LanguageOption {
        code: "en",
        name: "English",
        native_name: "English",
        flag: "🇺🇸",
    },
    LanguageOption {
        code: "es",
        name: "Spanish",
        native_name: "Español",
        flag: "🇪🇸",
    },
];

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("Unsupported language: {0}")]
    Unsupported(String),
}

fn find(code: &str) -> Option<&'static LanguageOption> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}

#[derive(Clone)]
pub struct LanguageHook {
    ctx: ClientContext,
    current: Arc<RwLock<String>>,
}

impl LanguageHook {
    /// Restore the stored preference, falling back to English
    pub fn load(ctx: &ClientContext) -> Self {
        let stored = ctx.storage.load(storage_keys::LANGUAGE);
        let code = match stored.as_deref().and_then(find) {
            Some(lang) => lang.code,
            None => {
                if let Some(unknown) = stored.as_deref() {
                    tracing::warn!(language = unknown, "Ignoring unsupported stored language");
                }
                DEFAULT_LANGUAGE
            }
        };

        Self {
            ctx: ctx.clone(),
            current: Arc::new(RwLock::new(code.to_string())),
        }
    }

    pub fn current_language_code(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_language(&self) -> &'static LanguageOption {
        find(&self.current_language_code()).unwrap_or(&SUPPORTED_LANGUAGES[0])
    }

    pub fn languages(&self) -> &'static [LanguageOption] {
        SUPPORTED_LANGUAGES
    }

    /// Switch language. A no-op when `code` is already current.
    pub fn change_language(&self, code: &str) -> Result<(), LanguageError> {
        let lang = find(code).ok_or_else(|| LanguageError::Unsupported(code.to_string()))?;

        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if *current == lang.code {
                return Ok(());
            }
            std::mem::replace(&mut *current, lang.code.to_string())
        };

        self.ctx.storage.save(storage_keys::LANGUAGE, lang.code);
        let invalidated = self
            .ctx
            .queries
            .invalidate_where(|key| key.len() > 1 && key.contains(&previous));
        tracing::info!(from = %previous, to = lang.code, invalidated, "Language changed");
        Ok(())
    }
}
