//! Configuration file lookup.
//!
//! Order of precedence:
//!
//! 1. `--config` flag or `DISPOSE_LINT_CONFIG`
//! 2. `dispose-lint.toml` or `.dispose-lint.toml` in the working directory
//!    or the nearest ancestor that has one
//! 3. `config.toml` in the global directory (`~/.dispose-lint/`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line.
    Explicit(PathBuf),
    /// Found next to the models being checked.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the file to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Whether this is the per-user fallback.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["dispose-lint.toml", ".dispose-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

const GLOBAL_DIR_ENV: &str = "DISPOSE_LINT_CONFIG_DIR";

/// Resolves the configuration for a run started in `start_dir`.
#[must_use]
pub fn resolve(start_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(start_dir, explicit, global_config_dir())
}

fn resolve_inner(
    start_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // Explicit paths are not checked here; loading reports a missing file.
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(start_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// The per-user config directory: `$DISPOSE_LINT_CONFIG_DIR`, else `~/.dispose-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(GLOBAL_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".dispose-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").expect("write config");
    }

    fn canonical(dir: &TempDir) -> PathBuf {
        dir.path().canonicalize().expect("canonical temp dir")
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("dispose-lint.toml"));

        let result = resolve_inner(tmp.path(), Some(Path::new("/missing.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/missing.toml")));
    }

    #[test]
    fn plain_name_preferred_over_dotfile() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("dispose-lint.toml"));
        touch(&tmp.path().join(".dispose-lint.toml"));

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join("dispose-lint.toml"))
        );
    }

    #[test]
    fn dotfile_found() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join(".dispose-lint.toml"));

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join(".dispose-lint.toml"))
        );
    }

    #[test]
    fn nearest_ancestor_config_found() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("dispose-lint.toml"));
        let nested = tmp.path().join("build").join("models");
        fs::create_dir_all(&nested).expect("create nested dir");

        let result = resolve_inner(&nested, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join("dispose-lint.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().expect("temp dir");
        let global = TempDir::new().expect("temp dir");
        touch(&global.path().join("config.toml"));

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
        assert!(result.is_global());

        touch(&project.path().join("dispose-lint.toml"));
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_means_defaults() {
        let project = TempDir::new().expect("temp dir");
        let global = TempDir::new().expect("temp dir");

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
        assert!(!result.is_global());
    }
}
