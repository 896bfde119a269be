//! Environment lookups and well-known file names.

use std::env;
use std::path::{Path, PathBuf};

pub const ENV_VAR_HOME: &str = "HOME";
/// Default storage location path.
pub const ENV_VAR_REPOSITORY: &str = "MINDNOTE_REPOSITORY";
/// External editor command.
pub const ENV_VAR_EDITOR: &str = "MINDNOTE_EDITOR";

pub const FILENAME_CONFIGURATION: &str = ".mindnote.md";
pub const FILENAME_REPOSITORY_CONFIGURATION: &str = "repository-configuration.md";
pub const DIRNAME_DEFAULT_REPOSITORY: &str = "mindnote-repository";
/// Default location as written into the factory document.
pub const DEFAULT_REPOSITORY_PATH: &str = "~/mindnote-repository";

pub fn user_home() -> Option<PathBuf> {
    non_blank_var(ENV_VAR_HOME).map(PathBuf::from)
}

pub fn repository_from_env() -> Option<String> {
    non_blank_var(ENV_VAR_REPOSITORY)
}

pub fn editor_from_env() -> Option<String> {
    non_blank_var(ENV_VAR_EDITOR)
}

/// `$HOME/.mindnote.md`, or `.mindnote.md` in the working directory without a home.
pub fn default_config_file_path(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) => home.join(FILENAME_CONFIGURATION),
        None => PathBuf::from(FILENAME_CONFIGURATION),
    }
}

/// `$HOME/mindnote-repository`.
pub fn default_repository_path(home: Option<&Path>) -> Option<PathBuf> {
    home.map(|home| home.join(DIRNAME_DEFAULT_REPOSITORY))
}

/// Expands a leading `~/` (or a lone `~`) using `home`.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (_, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        _ => PathBuf::from(path),
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{default_config_file_path, expand_home};
    use std::path::{Path, PathBuf};

    #[test]
    fn expands_tilde_prefix_only() {
        let home = Path::new("/home/ada");
        assert_eq!(
            expand_home("~/mindnote-repository", Some(home)),
            PathBuf::from("/home/ada/mindnote-repository")
        );
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/ada"));
        assert_eq!(expand_home("/srv/~x", Some(home)), PathBuf::from("/srv/~x"));
        assert_eq!(expand_home("~/kb", None), PathBuf::from("~/kb"));
    }

    #[test]
    fn config_file_lives_in_home() {
        assert_eq!(
            default_config_file_path(Some(Path::new("/home/ada"))),
            PathBuf::from("/home/ada/.mindnote.md")
        );
    }
}
