use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

use super::DeserializationSettings;

const PROFILE_ENV_VAR: &str = "APP_PROFILE";
const ENV_PREFIX: &str = "APP_";
const BASE_FILE: &str = "base.yml";

#[derive(Clone, Debug)]
/// Read [`DeserializationSettings`] out of YAML files and environment variables.
///
/// Sources are merged in the following order, later sources winning over earlier ones:
///
/// 1. `{directory}/base.yml`
/// 2. `{directory}/{profile}.yml`, if a profile was selected
/// 3. `APP_*` environment variables, with `__` separating nested keys
///    (e.g. `APP_BODY_SIZE_LIMIT__MAX_SIZE="1 MiB"`)
///
/// Missing files are skipped. When nothing is found, the default settings are returned.
///
/// # Example
///
/// ```rust,no_run
/// use request_params::Configuration;
/// use request_params::configuration::SettingsLoader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SettingsLoader::new("configuration")
///     .profile_from_env()?
///     .section("request_params")
///     .load()?;
/// let configuration = Configuration::configure(|c| {
///     c.settings(settings);
/// });
/// # Ok(())
/// # }
/// ```
pub struct SettingsLoader {
    directory: PathBuf,
    profile: Option<String>,
    section: Option<String>,
}

impl SettingsLoader {
    /// Look for settings files in `directory`.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            profile: None,
            section: None,
        }
    }

    /// Layer `{profile}.yml` on top of `base.yml`.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Select the profile using the `APP_PROFILE` environment variable.
    ///
    /// Nothing changes if the variable isn't set.
    pub fn profile_from_env(mut self) -> Result<Self, errors::LoadSettingsError> {
        match std::env::var(PROFILE_ENV_VAR) {
            Ok(profile) => {
                self.profile = Some(profile);
                Ok(self)
            }
            Err(std::env::VarError::NotPresent) => Ok(self),
            Err(std::env::VarError::NotUnicode(_)) => {
                Err(errors::LoadSettingsError::NonUnicodeProfile)
            }
        }
    }

    /// Read the settings from the `key` section of each source, rather than from the top level.
    ///
    /// Useful when the settings share their files with the rest of the application configuration.
    /// Environment variables must then be namespaced too, e.g. `APP_REQUEST_PARAMS__BODY_SIZE_LIMIT__MAX_SIZE`.
    pub fn section(mut self, key: impl Into<String>) -> Self {
        self.section = Some(key.into());
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn load(self) -> Result<DeserializationSettings, errors::LoadSettingsError> {
        let span = tracing::info_span!(
            "Loading deserialization settings",
            settings.directory = %self.directory.display(),
            settings.profile = self.profile.as_deref(),
            settings.section = self.section.as_deref(),
        );
        let _guard = span.enter();

        let mut figment = Figment::new().merge(Yaml::file(self.directory.join(BASE_FILE)));
        if let Some(profile) = &self.profile {
            if profile.is_empty() || profile.contains(['/', '\\', '.']) {
                return Err(errors::LoadSettingsError::InvalidProfile {
                    profile: profile.clone(),
                });
            }
            figment = figment.merge(Yaml::file(self.directory.join(format!("{profile}.yml"))));
        }
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .ignore(&[PROFILE_ENV_VAR.trim_start_matches(ENV_PREFIX)]),
        );
        if let Some(section) = &self.section {
            figment = figment.focus(section);
        }

        let settings: DeserializationSettings =
            figment
                .extract()
                .map_err(|e| errors::LoadSettingsError::Invalid {
                    directory: self.directory.clone(),
                    source: Box::new(e),
                })?;
        tracing::debug!(
            body_size_limit = ?settings.body_size_limit,
            content_types = settings.content_types.len(),
            "Deserialization settings loaded"
        );
        Ok(settings)
    }
}

/// Errors that can occur when loading [`DeserializationSettings`](super::DeserializationSettings).
pub mod errors {
    use std::path::PathBuf;

    #[derive(Debug, thiserror::Error)]
    #[non_exhaustive]
    /// The error returned by [`SettingsLoader`](super::SettingsLoader).
    pub enum LoadSettingsError {
        #[error("The `APP_PROFILE` environment variable is not valid UTF-8")]
        NonUnicodeProfile,
        #[error("`{profile}` is not a valid settings profile: it must be a non-empty file stem")]
        InvalidProfile { profile: String },
        #[error("Failed to load the deserialization settings from `{}`", directory.display())]
        Invalid {
            directory: PathBuf,
            #[source]
            source: Box<figment::Error>,
        },
    }
}
