//! Single-line setting codecs.
//!
//! # Responsibility
//! - Recognize a setting line by its exact label prefix.
//! - Convert the remainder into a typed value, falling back to the
//!   documented default instead of failing.
//! - Render a value as its label line followed by help lines.
//!
//! # Invariants
//! - Labels match only from column zero (`* <Label>:`); indented help lines
//!   never match.
//! - Decoding never fails once the label matched.

use crate::config::configuration::Configuration;
use once_cell::sync::Lazy;
use std::fmt::{Display, Formatter};

/// Bullet that starts every parsed setting line.
pub const BULLET: &str = "* ";
/// Indentation of non-parsed help lines.
pub const HELP_INDENT: &str = "    * ";

static DEFAULTS: Lazy<Configuration> = Lazy::new(|| Configuration::with_home(None));

/// Value shape and validation rule of one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// `yes` anywhere in the value means true.
    Flag,
    /// Decimal integer within an inclusive range.
    Integer { min: i64, max: i64 },
    /// First vocabulary token contained in the value.
    Choice(&'static [&'static str]),
    /// Verbatim value; empty string is valid.
    Text,
}

/// Decoded setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Integer(i64),
    Choice(&'static str),
    Text(String),
}

impl SettingValue {
    pub fn as_flag(&self) -> bool {
        matches!(self, Self::Flag(true))
    }

    pub fn as_integer(&self) -> i64 {
        match self {
            Self::Integer(value) => *value,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Choice(token) => token,
            Self::Text(text) => text.as_str(),
            Self::Flag(_) | Self::Integer(_) => "",
        }
    }
}

impl Display for SettingValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("yes"),
            Self::Flag(false) => f.write_str("no"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Choice(token) => f.write_str(token),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Descriptor of one persisted setting.
///
/// `get`/`set` bind the descriptor to a `Configuration` field; the default is
/// whatever `get` returns for a freshly constructed configuration.
pub struct Setting {
    pub label: &'static str,
    pub kind: SettingKind,
    pub help: &'static [&'static str],
    pub get: fn(&Configuration) -> SettingValue,
    pub set: fn(&mut Configuration, SettingValue),
}

impl Setting {
    pub fn default_value(&self) -> SettingValue {
        (self.get)(&DEFAULTS)
    }

    /// Decodes `line` when it carries this setting's label.
    pub fn decode(&self, line: &str) -> Option<SettingValue> {
        let rest = strip_setting_label(line, self.label)?;
        let value = match self.kind {
            SettingKind::Flag => SettingValue::Flag(decode_flag(rest)),
            SettingKind::Integer { min, max } => {
                let default = self.default_value().as_integer();
                SettingValue::Integer(decode_integer(rest, min, max, default))
            }
            SettingKind::Choice(vocabulary) => {
                let default = match self.default_value() {
                    SettingValue::Choice(token) => token,
                    _ => vocabulary.first().copied().unwrap_or(""),
                };
                SettingValue::Choice(decode_choice(rest, vocabulary, default))
            }
            SettingKind::Text => SettingValue::Text(decode_text(rest)),
        };
        Some(value)
    }

    /// Decodes `line` and applies it to `config`; returns whether it matched.
    pub fn apply(&self, line: &str, config: &mut Configuration) -> bool {
        match self.decode(line) {
            Some(value) => {
                (self.set)(config, value);
                true
            }
            None => false,
        }
    }

    /// Renders the label line and help lines, each terminated by `\n`.
    pub fn encode(&self, value: &SettingValue) -> String {
        let mut out = setting_line(self.label, value.to_string().as_str());
        for help in self.help {
            out.push_str(HELP_INDENT);
            out.push_str(help);
            out.push('\n');
        }
        out
    }
}

/// Decodes `line` against `setting`; `None` when the label does not match.
pub fn decode(line: &str, setting: &Setting) -> Option<SettingValue> {
    setting.decode(line)
}

/// `yes` anywhere in the remainder decodes to true.
pub fn decode_flag(rest: &str) -> bool {
    rest.contains("yes")
}

/// Parses an integer; parse failure or out-of-range yields `default`.
pub fn decode_integer(rest: &str, min: i64, max: i64, default: i64) -> i64 {
    match rest.trim().parse::<i64>() {
        Ok(value) if (min..=max).contains(&value) => value,
        _ => default,
    }
}

/// Returns the first vocabulary token contained in the remainder, else `default`.
pub fn decode_choice(
    rest: &str,
    vocabulary: &'static [&'static str],
    default: &'static str,
) -> &'static str {
    vocabulary
        .iter()
        .find(|token| rest.contains(**token))
        .copied()
        .unwrap_or(default)
}

/// Verbatim remainder (empty allowed).
pub fn decode_text(rest: &str) -> String {
    rest.to_string()
}

/// Strips `* <label>:` plus one separating space.
pub(crate) fn strip_setting_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(BULLET)?;
    strip_label(rest, label)
}

/// Strips `<label>:` plus one separating space.
pub(crate) fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(label)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Renders `* <label>: <value>\n`; line breaks in the value are flattened.
pub(crate) fn setting_line(label: &str, value: &str) -> String {
    let value = value.replace(['\n', '\r'], " ");
    format!("{BULLET}{label}: {value}\n")
}

#[cfg(test)]
mod tests {
    use super::{
        decode_choice, decode_flag, decode_integer, strip_setting_label, Setting, SettingKind,
        SettingValue,
    };
    use crate::config::configuration::Configuration;

    const FONT_SIZE: Setting = Setting {
        label: "Font size",
        kind: SettingKind::Integer { min: 4, max: 72 },
        help: &["Examples: 10, 12"],
        get: |c| SettingValue::Integer(c.app.ui_font_point_size),
        set: |c, v| c.app.ui_font_point_size = v.as_integer(),
    };

    #[test]
    fn label_must_start_at_column_zero() {
        assert_eq!(strip_setting_label("* Theme: dark", "Theme"), Some("dark"));
        assert_eq!(strip_setting_label("* Theme:", "Theme"), Some(""));
        assert_eq!(strip_setting_label("    * Theme: dark", "Theme"), None);
        assert_eq!(strip_setting_label("* HTML CSS Theme: dark", "Theme"), None);
        assert_eq!(strip_setting_label("* Theme dark", "Theme"), None);
    }

    #[test]
    fn flag_is_true_only_with_yes_token() {
        assert!(decode_flag("yes"));
        assert!(decode_flag("oh yes please"));
        assert!(!decode_flag("no"));
        assert!(!decode_flag("YES"));
        assert!(!decode_flag(""));
    }

    #[test]
    fn integer_falls_back_to_default_outside_range_or_on_garbage() {
        assert_eq!(decode_integer("12", 4, 72, 10), 12);
        assert_eq!(decode_integer(" 72 ", 4, 72, 10), 72);
        assert_eq!(decode_integer("-5", 4, 72, 10), 10);
        assert_eq!(decode_integer("73", 4, 72, 10), 10);
        assert_eq!(decode_integer("twelve", 4, 72, 10), 10);
    }

    #[test]
    fn choice_takes_first_contained_token() {
        const VOCABULARY: &[&str] = &["emacs", "vim", "windows"];
        assert_eq!(decode_choice("vim", VOCABULARY, "windows"), "vim");
        assert_eq!(decode_choice("emacs or vim", VOCABULARY, "windows"), "emacs");
        assert_eq!(decode_choice("nano", VOCABULARY, "windows"), "windows");
    }

    #[test]
    fn setting_decodes_and_encodes_with_help_lines() {
        assert_eq!(FONT_SIZE.default_value(), SettingValue::Integer(10));
        assert_eq!(
            FONT_SIZE.decode("* Font size: -5"),
            Some(SettingValue::Integer(10))
        );
        assert_eq!(FONT_SIZE.decode("* Editor font: x"), None);
        assert_eq!(
            FONT_SIZE.encode(&SettingValue::Integer(14)),
            "* Font size: 14\n    * Examples: 10, 12\n"
        );

        let mut config = Configuration::with_home(None);
        assert!(FONT_SIZE.apply("* Font size: 16", &mut config));
        assert_eq!(config.app.ui_font_point_size, 16);
        assert!(!FONT_SIZE.apply("* Theme: light", &mut config));
    }

    #[test]
    fn text_values_are_flattened_on_encode() {
        let setting = Setting {
            label: "Editor font",
            kind: SettingKind::Text,
            help: &[],
            get: |c| SettingValue::Text(c.app.editor_font.clone()),
            set: |c, v| c.app.editor_font = v.as_str().to_string(),
        };
        assert_eq!(
            setting.encode(&SettingValue::Text("a\nb".to_string())),
            "* Editor font: a b\n"
        );
    }
}
