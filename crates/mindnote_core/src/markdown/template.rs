//! Ordered settings template of the global configuration document.
//!
//! Table order is both the rendering order and the parser's matching
//! priority. New settings are appended at the end of their section so that
//! older documents stay diff-friendly.

use super::setting::{Setting, SettingKind, SettingValue};
use crate::config::settings::{
    EditorKeyBinding, LlmProvider, MindState, StartupView, UiTheme, MAX_DISTRIBUTOR_SLEEP_MS,
    MAX_EDITOR_TAB_WIDTH, MAX_FONT_POINT_SIZE, MAX_NAVIGATOR_MAX_NODES, MIN_DISTRIBUTOR_SLEEP_MS,
    MIN_EDITOR_TAB_WIDTH, MIN_FONT_POINT_SIZE, MIN_NAVIGATOR_MAX_NODES,
};
use crate::model::organizer::{tags_from_string, tags_to_string};
use crate::model::time_scope::TimeScope;

const YES_NO: &[&str] = &["Examples: yes, no"];

pub static MIND_SETTINGS: &[Setting] = &[
    Setting {
        label: "Mind state",
        kind: SettingKind::Choice(MindState::TOKENS),
        help: &["Examples: sleep, think"],
        get: |c| SettingValue::Choice(c.mind.desired_mind_state.as_str()),
        set: |c, v| c.mind.desired_mind_state = MindState::from_token(v.as_str()),
    },
    Setting {
        label: "Time scope",
        kind: SettingKind::Text,
        help: &["Examples: 2y0m0d0h0m (recent 2 years), 0y3m15d0h0m (recent 3 months and 15 days)"],
        get: |c| SettingValue::Text(c.mind.time_scope.to_string()),
        set: |c, v| c.mind.time_scope = v.as_str().parse::<TimeScope>().unwrap_or_default(),
    },
    Setting {
        label: "Tags scope",
        kind: SettingKind::Text,
        help: &[
            "Tags separated by ,, - only knowledge with these tags is shown",
            "Examples: important,,work (empty disables tags scope)",
        ],
        get: |c| SettingValue::Text(tags_to_string(&c.mind.tags_scope)),
        set: |c, v| c.mind.tags_scope = tags_from_string(v.as_str()),
    },
    Setting {
        label: "Autolinking",
        kind: SettingKind::Flag,
        help: &[
            "Inject links to Notebooks and Notes with matching names when rendering HTML",
            "Examples: yes, no",
        ],
        get: |c| SettingValue::Flag(c.mind.autolinking),
        set: |c, v| c.mind.autolinking = v.as_flag(),
    },
    Setting {
        label: "Autolinking case insensitive",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.mind.autolinking_case_insensitive),
        set: |c, v| c.mind.autolinking_case_insensitive = v.as_flag(),
    },
    Setting {
        label: "Distributor sleep interval",
        kind: SettingKind::Integer {
            min: MIN_DISTRIBUTOR_SLEEP_MS,
            max: MAX_DISTRIBUTOR_SLEEP_MS,
        },
        help: &["Milliseconds between background association refreshes (500 - 60000)"],
        get: |c| SettingValue::Integer(c.mind.distributor_sleep_interval_ms),
        set: |c, v| c.mind.distributor_sleep_interval_ms = v.as_integer(),
    },
];

pub static APPLICATION_SETTINGS: &[Setting] = &[
    Setting {
        label: "Theme",
        kind: SettingKind::Choice(UiTheme::TOKENS),
        help: &["Examples: dark, light, native, black"],
        get: |c| SettingValue::Choice(c.app.ui_theme.as_str()),
        set: |c, v| c.app.ui_theme = UiTheme::from_token(v.as_str()),
    },
    Setting {
        label: "HTML CSS theme",
        kind: SettingKind::Text,
        help: &[
            "Normal themes (dark, light) style HTML generated from Markdown,",
            "  while raw theme shows syntax-highlighted Markdown only. You can",
            "  also specify path to any CSS file to be used.",
            "Examples: qrc:/html-css/light.css, qrc:/html-css/dark.css, raw, /home/user/my-style.css",
        ],
        get: |c| SettingValue::Text(c.app.ui_html_css_path.clone()),
        set: |c, v| c.app.ui_html_css_path = v.as_str().to_string(),
    },
    Setting {
        label: "Font size",
        kind: SettingKind::Integer {
            min: MIN_FONT_POINT_SIZE,
            max: MAX_FONT_POINT_SIZE,
        },
        help: &["Application font point size (4 - 72)", "Examples: 10, 12"],
        get: |c| SettingValue::Integer(c.app.ui_font_point_size),
        set: |c, v| c.app.ui_font_point_size = v.as_integer(),
    },
    Setting {
        label: "Startup view",
        kind: SettingKind::Choice(StartupView::TOKENS),
        help: &["Examples: dashboard, outlines, tags, recent, home"],
        get: |c| SettingValue::Choice(c.app.ui_startup_view.as_str()),
        set: |c, v| c.app.ui_startup_view = StartupView::from_token(v.as_str()),
    },
    Setting {
        label: "Show toolbar",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.ui_show_toolbar),
        set: |c, v| c.app.ui_show_toolbar = v.as_flag(),
    },
    Setting {
        label: "Show Notebook edit button",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.ui_show_notebook_edit_button),
        set: |c, v| c.app.ui_show_notebook_edit_button = v.as_flag(),
    },
    Setting {
        label: "Save reads metadata",
        kind: SettingKind::Flag,
        help: &[
            "Count Notebook and Note reads and store them in metadata",
            "Examples: yes, no",
        ],
        get: |c| SettingValue::Flag(c.app.save_reads_metadata),
        set: |c, v| c.app.save_reads_metadata = v.as_flag(),
    },
    Setting {
        label: "Nerd menu",
        kind: SettingKind::Flag,
        help: &["Show menu with nerd terminology", "Examples: yes, no"],
        get: |c| SettingValue::Flag(c.app.ui_nerd_menu),
        set: |c, v| c.app.ui_nerd_menu = v.as_flag(),
    },
    Setting {
        label: "Expert mode",
        kind: SettingKind::Flag,
        help: &["Skip confirmation and hint dialogs", "Examples: yes, no"],
        get: |c| SettingValue::Flag(c.app.ui_expert_mode),
        set: |c, v| c.app.ui_expert_mode = v.as_flag(),
    },
    Setting {
        label: "Double click Note view to edit",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.ui_double_click_note_view_to_edit),
        set: |c, v| c.app.ui_double_click_note_view_to_edit = v.as_flag(),
    },
    Setting {
        label: "Live Notes preview",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.ui_live_notes_preview),
        set: |c, v| c.app.ui_live_notes_preview = v.as_flag(),
    },
    Setting {
        label: "Navigator max graph nodes",
        kind: SettingKind::Integer {
            min: MIN_NAVIGATOR_MAX_NODES,
            max: MAX_NAVIGATOR_MAX_NODES,
        },
        help: &["Maximum number of nodes shown by knowledge graph navigator (1 - 1000)"],
        get: |c| SettingValue::Integer(c.app.ui_navigator_max_nodes),
        set: |c, v| c.app.ui_navigator_max_nodes = v.as_integer(),
    },
    Setting {
        label: "Markdown quote sections",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.md_quote_sections),
        set: |c, v| c.app.md_quote_sections = v.as_flag(),
    },
    Setting {
        label: "Markdown math",
        kind: SettingKind::Flag,
        help: &["Render LaTeX math in HTML preview", "Examples: yes, no"],
        get: |c| SettingValue::Flag(c.app.md_math),
        set: |c, v| c.app.md_math = v.as_flag(),
    },
    Setting {
        label: "Markdown diagrams",
        kind: SettingKind::Flag,
        help: &["Render diagrams in HTML preview", "Examples: yes, no"],
        get: |c| SettingValue::Flag(c.app.md_diagrams),
        set: |c, v| c.app.md_diagrams = v.as_flag(),
    },
    Setting {
        label: "Markdown code highlighting",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.md_code_highlighting),
        set: |c, v| c.app.md_code_highlighting = v.as_flag(),
    },
    Setting {
        label: "Allow online JavaScript libraries",
        kind: SettingKind::Flag,
        help: &[
            "Allow downloading of JavaScript libraries for math and diagram rendering in HTML",
            "Examples: yes, no",
        ],
        get: |c| SettingValue::Flag(c.app.md_allow_online_javascript_libs),
        set: |c, v| c.app.md_allow_online_javascript_libs = v.as_flag(),
    },
    Setting {
        label: "Editor key binding",
        kind: SettingKind::Choice(EditorKeyBinding::TOKENS),
        help: &["Examples: emacs, vim, windows"],
        get: |c| SettingValue::Choice(c.app.editor_key_binding.as_str()),
        set: |c, v| c.app.editor_key_binding = EditorKeyBinding::from_token(v.as_str()),
    },
    Setting {
        label: "Editor font",
        kind: SettingKind::Text,
        help: &["Examples: Monospace,10, Ubuntu Mono,12"],
        get: |c| SettingValue::Text(c.app.editor_font.clone()),
        set: |c, v| c.app.editor_font = v.as_str().to_string(),
    },
    Setting {
        label: "Editor syntax highlighting",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.editor_syntax_highlighting),
        set: |c, v| c.app.editor_syntax_highlighting = v.as_flag(),
    },
    Setting {
        label: "Editor autocomplete",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.editor_autocomplete),
        set: |c, v| c.app.editor_autocomplete = v.as_flag(),
    },
    Setting {
        label: "Editor smart Enter",
        kind: SettingKind::Flag,
        help: &["Continue lists and indentation on Enter", "Examples: yes, no"],
        get: |c| SettingValue::Flag(c.app.editor_smart_enter),
        set: |c, v| c.app.editor_smart_enter = v.as_flag(),
    },
    Setting {
        label: "Editor line numbers",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.editor_show_line_numbers),
        set: |c, v| c.app.editor_show_line_numbers = v.as_flag(),
    },
    Setting {
        label: "Editor live spell check",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.editor_spell_check_live),
        set: |c, v| c.app.editor_spell_check_live = v.as_flag(),
    },
    Setting {
        label: "Editor spell check language",
        kind: SettingKind::Text,
        help: &["Examples: en_US, de_DE (empty disables dictionaries)"],
        get: |c| SettingValue::Text(c.app.editor_spell_check_language.clone()),
        set: |c, v| c.app.editor_spell_check_language = v.as_str().to_string(),
    },
    Setting {
        label: "Editor tab width",
        kind: SettingKind::Integer {
            min: MIN_EDITOR_TAB_WIDTH,
            max: MAX_EDITOR_TAB_WIDTH,
        },
        help: &["Examples: 4, 8"],
        get: |c| SettingValue::Integer(c.app.editor_tab_width),
        set: |c, v| c.app.editor_tab_width = v.as_integer(),
    },
    Setting {
        label: "Editor spaces for tab",
        kind: SettingKind::Flag,
        help: YES_NO,
        get: |c| SettingValue::Flag(c.app.editor_spaces_for_tab),
        set: |c, v| c.app.editor_spaces_for_tab = v.as_flag(),
    },
    Setting {
        label: "Editor autosave",
        kind: SettingKind::Flag,
        help: &["Save Note on editor close without asking", "Examples: yes, no"],
        get: |c| SettingValue::Flag(c.app.editor_autosave),
        set: |c, v| c.app.editor_autosave = v.as_flag(),
    },
    Setting {
        label: "External editor",
        kind: SettingKind::Text,
        help: &["Command used to edit Notes outside (empty uses built-in editor)", "Examples: emacs, gvim"],
        get: |c| SettingValue::Text(c.app.editor_external_command.clone()),
        set: |c, v| c.app.editor_external_command = v.as_str().to_string(),
    },
    Setting {
        label: "Wingman LLM provider",
        kind: SettingKind::Choice(LlmProvider::TOKENS),
        help: &["Examples: none, openai, ollama"],
        get: |c| SettingValue::Choice(c.app.wingman_provider.as_str()),
        set: |c, v| c.app.wingman_provider = LlmProvider::from_token(v.as_str()),
    },
    Setting {
        label: "OpenAI API key",
        kind: SettingKind::Text,
        help: &["Empty disables OpenAI provider"],
        get: |c| SettingValue::Text(c.app.openai_api_key.clone()),
        set: |c, v| c.app.openai_api_key = v.as_str().to_string(),
    },
    Setting {
        label: "OpenAI LLM model",
        kind: SettingKind::Text,
        help: &["Examples: gpt-4o-mini, gpt-4o"],
        get: |c| SettingValue::Text(c.app.openai_model.clone()),
        set: |c, v| c.app.openai_model = v.as_str().to_string(),
    },
    Setting {
        label: "Ollama URL",
        kind: SettingKind::Text,
        help: &["Empty disables Ollama provider", "Examples: http://localhost:11434"],
        get: |c| SettingValue::Text(c.app.ollama_url.clone()),
        set: |c, v| c.app.ollama_url = v.as_str().to_string(),
    },
    Setting {
        label: "Ollama LLM model",
        kind: SettingKind::Text,
        help: &["Examples: llama3.2, mistral"],
        get: |c| SettingValue::Text(c.app.ollama_model.clone()),
        set: |c, v| c.app.ollama_model = v.as_str().to_string(),
    },
];

/// Looks a setting up by label across both sections.
pub fn setting_by_label(label: &str) -> Option<&'static Setting> {
    MIND_SETTINGS
        .iter()
        .chain(APPLICATION_SETTINGS.iter())
        .find(|setting| setting.label == label)
}

#[cfg(test)]
mod tests {
    use super::{setting_by_label, APPLICATION_SETTINGS, MIND_SETTINGS};
    use std::collections::BTreeSet;

    #[test]
    fn labels_are_unique() {
        let mut labels = BTreeSet::new();
        for setting in MIND_SETTINGS.iter().chain(APPLICATION_SETTINGS.iter()) {
            assert!(labels.insert(setting.label), "duplicate label {}", setting.label);
        }
    }

    #[test]
    fn every_default_round_trips_through_its_own_codec() {
        for setting in MIND_SETTINGS.iter().chain(APPLICATION_SETTINGS.iter()) {
            let default = setting.default_value();
            let encoded = setting.encode(&default);
            let first_line = encoded
                .lines()
                .next()
                .expect("encoded setting should have a value line");
            assert_eq!(setting.decode(first_line), Some(default), "{}", setting.label);
        }
    }

    #[test]
    fn save_reads_metadata_lives_in_application_section() {
        assert!(APPLICATION_SETTINGS
            .iter()
            .any(|setting| setting.label == "Save reads metadata"));
        assert!(!MIND_SETTINGS
            .iter()
            .any(|setting| setting.label == "Save reads metadata"));
    }

    #[test]
    fn lookup_by_label() {
        assert!(setting_by_label("Theme").is_some());
        assert!(setting_by_label("Mind state").is_some());
        assert!(setting_by_label("Color").is_none());
    }
}
