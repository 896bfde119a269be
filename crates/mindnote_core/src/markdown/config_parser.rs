//! Global configuration document parser.
//!
//! # Responsibility
//! - Dispatch lexed sections by title and apply recognized setting lines.
//! - Register (and activate) storage locations from the `Repositories` section.
//!
//! # Invariants
//! - The target configuration is cleared before parsing.
//! - Lines written by newer versions (unknown labels) are skipped silently.
//! - An unresolvable location skips only its own line.

use super::setting::{strip_setting_label, Setting};
use super::template::{APPLICATION_SETTINGS, MIND_SETTINGS};
use super::{SECTION_APPLICATION, SECTION_MIND, SECTION_REPOSITORIES};
use crate::config::configuration::Configuration;
use crate::config::location_resolver::LocationResolver;
use crate::document::Section;
use log::{debug, warn};

pub const LABEL_ACTIVE_REPOSITORY: &str = "Active repository";
pub const LABEL_REPOSITORY: &str = "Repository";

/// Parses `sections` into `config`, consuming the AST.
pub fn parse_configuration(
    sections: Vec<Section>,
    config: &mut Configuration,
    resolver: &dyn LocationResolver,
) {
    config.clear();

    for section in sections {
        // The untitled preamble carries no settings.
        let Some(title) = section.title.as_deref() else {
            continue;
        };
        match title {
            SECTION_MIND => apply_settings(&section.body, MIND_SETTINGS, config),
            SECTION_APPLICATION => apply_settings(&section.body, APPLICATION_SETTINGS, config),
            SECTION_REPOSITORIES => parse_repositories(&section.body, config, resolver),
            other => debug!(
                "event=config_parse module=markdown status=skip section={}",
                other
            ),
        }
    }
}

fn apply_settings(body: &[String], settings: &[Setting], config: &mut Configuration) {
    for line in body.iter().filter(|line| line.starts_with('*')) {
        // First label match wins; unmatched lines come from other versions.
        let _ = settings.iter().any(|setting| setting.apply(line, config));
    }
}

fn parse_repositories(body: &[String], config: &mut Configuration, resolver: &dyn LocationResolver) {
    for line in body.iter().filter(|line| line.starts_with('*')) {
        if let Some(path) = strip_setting_label(line, LABEL_ACTIVE_REPOSITORY) {
            if let Some(key) = register_location(path, config, resolver) {
                if let Err(err) = config.set_active_location(&key) {
                    warn!(
                        "event=config_parse module=markdown status=error section=Repositories error={}",
                        err
                    );
                }
            }
        } else if let Some(path) = strip_setting_label(line, LABEL_REPOSITORY) {
            let _ = register_location(path, config, resolver);
        }
    }
}

fn register_location(
    path: &str,
    config: &mut Configuration,
    resolver: &dyn LocationResolver,
) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        warn!("event=location_resolve module=markdown status=skip reason=empty_path");
        return None;
    }
    match resolver.resolve(path) {
        Some(location) => Some(config.add_location(location)),
        None => {
            warn!(
                "event=location_resolve module=markdown status=skip reason=not_found path={}",
                path
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_configuration;
    use crate::config::configuration::Configuration;
    use crate::config::location_resolver::LocationResolver;
    use crate::config::settings::{EditorKeyBinding, UiTheme};
    use crate::document::lex_sections;
    use crate::model::location::{Location, LocationKind};

    struct KnownPaths(&'static [&'static str]);

    impl LocationResolver for KnownPaths {
        fn resolve(&self, path: &str) -> Option<Location> {
            self.0
                .iter()
                .any(|known| *known == path)
                .then(|| Location::repository(path, LocationKind::MindNote))
        }
    }

    fn parse(text: &str, known: &'static [&'static str]) -> Configuration {
        let mut config = Configuration::with_home(None);
        parse_configuration(lex_sections(text), &mut config, &KnownPaths(known));
        config
    }

    #[test]
    fn applies_settings_by_section() {
        let config = parse(
            "# MindNote Configuration\nintro\n\n# Application\n* Theme: light\n    * Examples: dark, light\n* Editor key binding: emacs\n",
            &[],
        );
        assert_eq!(config.app.ui_theme, UiTheme::Light);
        assert_eq!(config.app.editor_key_binding, EditorKeyBinding::Emacs);
    }

    #[test]
    fn settings_in_wrong_section_are_ignored() {
        let config = parse("# Mind\n* Theme: light\n", &[]);
        assert_eq!(config.app.ui_theme, UiTheme::Dark);
    }

    #[test]
    fn unknown_lines_do_not_disturb_following_ones() {
        let config = parse(
            "# Application\n* Hologram mode: yes\nnot a bullet\n* Font size: 14\n",
            &[],
        );
        assert_eq!(config.app.ui_font_point_size, 14);
    }

    #[test]
    fn active_repository_is_registered_and_activated() {
        let config = parse(
            "# Repositories\n* Active repository: /kb\n* Repository: /kb\n* Repository: /other\n* Repository: /missing\n* Repository: \n",
            &["/kb", "/other"],
        );
        assert_eq!(config.locations().len(), 2);
        assert_eq!(config.active_location_key(), Some("/kb"));
    }

    #[test]
    fn later_active_repository_replaces_earlier() {
        let config = parse(
            "# Repositories\n* Active repository: /kb\n* Active repository: /other\n",
            &["/kb", "/other"],
        );
        assert_eq!(config.active_location_key(), Some("/other"));
        assert_eq!(config.locations().len(), 2);
    }

    #[test]
    fn unresolved_active_repository_leaves_none_active() {
        let config = parse("# Repositories\n* Active repository: /missing\n", &[]);
        assert!(!config.has_active_location());
        assert!(config.locations().is_empty());
    }

    #[test]
    fn parse_clears_previous_state() {
        let mut config = Configuration::with_home(None);
        config.app.ui_theme = UiTheme::Black;
        parse_configuration(lex_sections("# Mind\n"), &mut config, &KnownPaths(&[]));
        assert_eq!(config.app.ui_theme, UiTheme::Dark);
    }
}
