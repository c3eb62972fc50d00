use std::future::Future;

use crate::constants::{FALLBACK_BUILDS, PLATFORMS, RELEASES, TARGET_LOAD_ERROR, TARGET_PLACEHOLDER};
use crate::error::TalkResult;
use crate::logging::{log_debug, log_error};
use crate::models::{IssueStatus, Severity};

use super::state::{FilterEffect, FilterField, FilterState};

/// Where the dynamic option lists come from.
pub trait OptionSource {
    fn builds(&self) -> impl Future<Output = TalkResult<Vec<String>>> + Send;
    fn targets(&self, release: &str) -> impl Future<Output = TalkResult<Vec<String>>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOptions {
    /// No release selected.
    Disabled,
    Loading(String),
    Loaded { release: String, targets: Vec<String> },
    /// The last load failed; the field stays disabled.
    Failed(String),
}

impl TargetOptions {
    pub fn is_enabled(&self) -> bool {
        matches!(self, TargetOptions::Loaded { .. })
    }

    /// Text shown in place of the choices when the field is disabled.
    pub fn placeholder(&self) -> &'static str {
        match self {
            TargetOptions::Disabled => TARGET_PLACEHOLDER,
            TargetOptions::Loading(_) => "Loading targets...",
            TargetOptions::Loaded { .. } => "All",
            TargetOptions::Failed(_) => TARGET_LOAD_ERROR,
        }
    }
}

/// Choices offered by each filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub builds: Vec<String>,
    pub platforms: Vec<(String, String)>,
    pub releases: Vec<String>,
    pub targets: TargetOptions,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self {
            builds: Vec::new(),
            platforms: PLATFORMS
                .iter()
                .map(|(code, display)| (code.to_string(), display.to_string()))
                .collect(),
            releases: RELEASES.iter().map(|r| r.to_string()).collect(),
            targets: TargetOptions::Disabled,
        }
    }

    /// Stores the build list, falling back to the built-in one on failure.
    pub fn set_builds(&mut self, result: TalkResult<Vec<String>>) {
        self.builds = match result {
            Ok(builds) => builds,
            Err(e) => {
                log_error(&format!("Failed to load builds, using defaults: {}", e));
                FALLBACK_BUILDS.iter().map(|b| b.to_string()).collect()
            }
        };
    }

    /// Applies the option side of a filter change. Returns the release whose
    /// targets must now be fetched, if any.
    pub fn apply_effect(&mut self, effect: &FilterEffect) -> Option<String> {
        match effect {
            FilterEffect::None => None,
            FilterEffect::ResetTargets => {
                self.targets = TargetOptions::Disabled;
                None
            }
            FilterEffect::ReloadTargets(release) => {
                self.targets = TargetOptions::Loading(release.clone());
                Some(release.clone())
            }
        }
    }

    /// Installs the targets fetched for `release`. The option set becomes
    /// exactly `targets` and a selected target outside it is cleared.
    /// Returns `false` (and changes nothing) when `release` is no longer the
    /// selected release.
    pub fn apply_target_options(
        &mut self,
        filters: &mut FilterState,
        release: &str,
        targets: Vec<String>,
    ) -> bool {
        if filters.release.trim() != release {
            log_debug(&format!("Ignoring targets for stale release {}", release));
            return false;
        }
        filters.retain_target(&targets);
        self.targets = TargetOptions::Loaded {
            release: release.to_string(),
            targets,
        };
        true
    }

    pub fn fail_target_load(&mut self, filters: &mut FilterState, release: &str) -> bool {
        if filters.release.trim() != release {
            return false;
        }
        filters.target.clear();
        self.targets = TargetOptions::Failed(release.to_string());
        true
    }

    /// `(value, label)` choices for a select-style field, starting with the
    /// "All" entry whose value is empty. `None` for free-text fields.
    pub fn choices(&self, field: FilterField) -> Option<Vec<(String, String)>> {
        let all = (String::new(), "All".to_string());
        let values: Vec<(String, String)> = match field {
            FilterField::Search => return None,
            FilterField::Status => IssueStatus::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), s.label().to_string()))
                .collect(),
            FilterField::Severity => Severity::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), s.as_str().to_string()))
                .collect(),
            FilterField::Build => self.builds.iter().map(|b| (b.clone(), b.clone())).collect(),
            FilterField::Platform => self.platforms.clone(),
            FilterField::Release => self.releases.iter().map(|r| (r.clone(), r.clone())).collect(),
            FilterField::Target => match &self.targets {
                TargetOptions::Loaded { targets, .. } => {
                    targets.iter().map(|t| (t.clone(), t.clone())).collect()
                }
                _ => return Some(Vec::new()),
            },
        };
        Some(std::iter::once(all).chain(values).collect())
    }

    /// Label for the value currently held by `field`.
    pub fn display_value(&self, filters: &FilterState, field: FilterField) -> String {
        let value = filters.get(field);
        if field == FilterField::Target && !self.targets.is_enabled() {
            return self.targets.placeholder().to_string();
        }
        if field == FilterField::Search {
            return value.to_string();
        }
        if value.is_empty() {
            return "All".to_string();
        }
        self.choices(field)
            .and_then(|choices| choices.into_iter().find(|(v, _)| v == value))
            .map(|(_, label)| label)
            .unwrap_or_else(|| value.to_string())
    }

    /// Value after moving `step` places through the choices of `field`,
    /// wrapping at both ends.
    pub fn cycle(&self, filters: &FilterState, field: FilterField, step: isize) -> Option<String> {
        if field == FilterField::Target && !self.targets.is_enabled() {
            return None;
        }
        let choices = self.choices(field)?;
        if choices.is_empty() {
            return None;
        }
        let current = filters.get(field);
        let idx = choices.iter().position(|(v, _)| v == current).unwrap_or(0) as isize;
        let len = choices.len() as isize;
        let next = (idx + step).rem_euclid(len) as usize;
        Some(choices[next].0.clone())
    }
}

/// Fetches builds, keeping the fallback list when the backend fails.
pub async fn load_builds<S: OptionSource>(source: &S, options: &mut FilterOptions) {
    let result = source.builds().await;
    options.set_builds(result);
}

/// Fetches targets for `release` and applies them if the release is still
/// selected once the response arrives.
pub async fn load_targets<S: OptionSource>(
    source: &S,
    filters: &mut FilterState,
    options: &mut FilterOptions,
    release: &str,
) -> bool {
    match source.targets(release).await {
        Ok(targets) => options.apply_target_options(filters, release, targets),
        Err(e) => {
            log_error(&format!("Failed to load targets for {}: {}", release, e));
            options.fail_target_load(filters, release)
        }
    }
}
