//! Scalar settings groups and their enumerated values.
//!
//! # Responsibility
//! - Hold the compiled-in defaults of every persisted scalar setting.
//! - Map enumerated settings to and from their document tokens.
//!
//! # Invariants
//! - Every `as_str()` token is listed in the matching `TOKENS` vocabulary,
//!   so rendering then parsing yields the same value.

use crate::model::time_scope::TimeScope;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_UI_HTML_CSS_THEME: &str = "qrc:/html-css/dark.css";
pub const DEFAULT_EDITOR_FONT: &str = "Monospace,10";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

pub const DEFAULT_FONT_POINT_SIZE: i64 = 10;
pub const MIN_FONT_POINT_SIZE: i64 = 4;
pub const MAX_FONT_POINT_SIZE: i64 = 72;
pub const DEFAULT_EDITOR_TAB_WIDTH: i64 = 4;
pub const MIN_EDITOR_TAB_WIDTH: i64 = 1;
pub const MAX_EDITOR_TAB_WIDTH: i64 = 16;
pub const DEFAULT_NAVIGATOR_MAX_NODES: i64 = 150;
pub const MIN_NAVIGATOR_MAX_NODES: i64 = 1;
pub const MAX_NAVIGATOR_MAX_NODES: i64 = 1000;
pub const DEFAULT_DISTRIBUTOR_SLEEP_MS: i64 = 3000;
pub const MIN_DISTRIBUTOR_SLEEP_MS: i64 = 500;
pub const MAX_DISTRIBUTOR_SLEEP_MS: i64 = 60_000;

/// Desired (persisted) or current (runtime) state of the mind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MindState {
    #[default]
    Thinking,
    Sleeping,
}

impl MindState {
    pub const TOKENS: &'static [&'static str] = &["think", "sleep"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thinking => "think",
            Self::Sleeping => "sleep",
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "think" => Self::Thinking,
            _ => Self::Sleeping,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
    Native,
    Black,
}

impl UiTheme {
    pub const TOKENS: &'static [&'static str] = &["dark", "light", "native", "black"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Native => "native",
            Self::Black => "black",
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "light" => Self::Light,
            "native" => Self::Native,
            "black" => Self::Black,
            _ => Self::Dark,
        }
    }

    /// Strict lookup used for user-supplied overrides.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::TOKENS
            .iter()
            .find(|token| **token == normalized)
            .map(|token| Self::from_token(token))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKeyBinding {
    Emacs,
    Vim,
    #[default]
    Windows,
}

impl EditorKeyBinding {
    pub const TOKENS: &'static [&'static str] = &["emacs", "vim", "windows"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emacs => "emacs",
            Self::Vim => "vim",
            Self::Windows => "windows",
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "emacs" => Self::Emacs,
            "vim" => Self::Vim,
            _ => Self::Windows,
        }
    }
}

/// View shown right after the application starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupView {
    Dashboard,
    #[default]
    Outlines,
    Tags,
    Recent,
    Home,
}

impl StartupView {
    pub const TOKENS: &'static [&'static str] = &["dashboard", "outlines", "tags", "recent", "home"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Outlines => "outlines",
            Self::Tags => "tags",
            Self::Recent => "recent",
            Self::Home => "home",
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "dashboard" => Self::Dashboard,
            "tags" => Self::Tags,
            "recent" => Self::Recent,
            "home" => Self::Home,
            _ => Self::Outlines,
        }
    }
}

/// Large language model backend used by the Wingman assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[default]
    None,
    OpenAi,
    Ollama,
}

impl LlmProvider {
    pub const TOKENS: &'static [&'static str] = &["openai", "ollama", "none"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "openai" => Self::OpenAi,
            "ollama" => Self::Ollama,
            _ => Self::None,
        }
    }
}

/// Settings persisted in the `Mind` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindSettings {
    pub desired_mind_state: MindState,
    pub time_scope: TimeScope,
    /// Empty set disables the tags scope.
    pub tags_scope: BTreeSet<String>,
    pub autolinking: bool,
    pub autolinking_case_insensitive: bool,
    pub distributor_sleep_interval_ms: i64,
}

impl Default for MindSettings {
    fn default() -> Self {
        Self {
            desired_mind_state: MindState::default(),
            time_scope: TimeScope::default(),
            tags_scope: BTreeSet::new(),
            autolinking: false,
            autolinking_case_insensitive: true,
            distributor_sleep_interval_ms: DEFAULT_DISTRIBUTOR_SLEEP_MS,
        }
    }
}

/// Settings persisted in the `Application` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub ui_theme: UiTheme,
    pub ui_html_css_path: String,
    pub ui_font_point_size: i64,
    pub ui_startup_view: StartupView,
    pub ui_show_toolbar: bool,
    pub ui_show_notebook_edit_button: bool,
    pub save_reads_metadata: bool,
    pub ui_nerd_menu: bool,
    pub ui_expert_mode: bool,
    pub ui_double_click_note_view_to_edit: bool,
    pub ui_live_notes_preview: bool,
    pub ui_navigator_max_nodes: i64,
    pub md_quote_sections: bool,
    pub md_math: bool,
    pub md_diagrams: bool,
    pub md_code_highlighting: bool,
    pub md_allow_online_javascript_libs: bool,
    pub editor_key_binding: EditorKeyBinding,
    pub editor_font: String,
    pub editor_syntax_highlighting: bool,
    pub editor_autocomplete: bool,
    pub editor_smart_enter: bool,
    pub editor_show_line_numbers: bool,
    pub editor_spell_check_live: bool,
    /// Empty string disables spell checking dictionaries.
    pub editor_spell_check_language: String,
    pub editor_tab_width: i64,
    pub editor_spaces_for_tab: bool,
    pub editor_autosave: bool,
    /// Empty string means the built-in editor is used.
    pub editor_external_command: String,
    pub wingman_provider: LlmProvider,
    /// Empty string disables the OpenAI provider.
    pub openai_api_key: String,
    pub openai_model: String,
    /// Empty string disables the Ollama provider.
    pub ollama_url: String,
    pub ollama_model: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            ui_theme: UiTheme::default(),
            ui_html_css_path: DEFAULT_UI_HTML_CSS_THEME.to_string(),
            ui_font_point_size: DEFAULT_FONT_POINT_SIZE,
            ui_startup_view: StartupView::default(),
            ui_show_toolbar: true,
            ui_show_notebook_edit_button: true,
            save_reads_metadata: true,
            ui_nerd_menu: false,
            ui_expert_mode: false,
            ui_double_click_note_view_to_edit: true,
            ui_live_notes_preview: false,
            ui_navigator_max_nodes: DEFAULT_NAVIGATOR_MAX_NODES,
            md_quote_sections: false,
            md_math: false,
            md_diagrams: false,
            md_code_highlighting: true,
            md_allow_online_javascript_libs: false,
            editor_key_binding: EditorKeyBinding::default(),
            editor_font: DEFAULT_EDITOR_FONT.to_string(),
            editor_syntax_highlighting: true,
            editor_autocomplete: true,
            editor_smart_enter: true,
            editor_show_line_numbers: true,
            editor_spell_check_live: false,
            editor_spell_check_language: String::new(),
            editor_tab_width: DEFAULT_EDITOR_TAB_WIDTH,
            editor_spaces_for_tab: true,
            editor_autosave: false,
            editor_external_command: String::new(),
            wingman_provider: LlmProvider::default(),
            openai_api_key: String::new(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            ollama_url: String::new(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorKeyBinding, LlmProvider, MindState, StartupView, UiTheme};

    #[test]
    fn every_token_maps_back_to_itself() {
        for token in UiTheme::TOKENS {
            assert_eq!(UiTheme::from_token(token).as_str(), *token);
        }
        for token in EditorKeyBinding::TOKENS {
            assert_eq!(EditorKeyBinding::from_token(token).as_str(), *token);
        }
        for token in StartupView::TOKENS {
            assert_eq!(StartupView::from_token(token).as_str(), *token);
        }
        for token in LlmProvider::TOKENS {
            assert_eq!(LlmProvider::from_token(token).as_str(), *token);
        }
        for token in MindState::TOKENS {
            assert_eq!(MindState::from_token(token).as_str(), *token);
        }
    }

    #[test]
    fn theme_override_parse_is_strict() {
        assert_eq!(UiTheme::parse(" Light "), Some(UiTheme::Light));
        assert_eq!(UiTheme::parse("solarized"), None);
    }
}
