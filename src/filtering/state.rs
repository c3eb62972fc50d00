use serde::Serialize;

/// One of the seven inputs of the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Search,
    Status,
    Severity,
    Build,
    Platform,
    Release,
    Target,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Search,
        FilterField::Status,
        FilterField::Severity,
        FilterField::Build,
        FilterField::Platform,
        FilterField::Release,
        FilterField::Target,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Search => "Search",
            FilterField::Status => "Status",
            FilterField::Severity => "Severity",
            FilterField::Build => "Build",
            FilterField::Platform => "Platform",
            FilterField::Release => "Release",
            FilterField::Target => "Target",
        }
    }

    pub fn next(&self) -> FilterField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> FilterField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Follow-up work a filter change asks of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEffect {
    None,
    /// Load `/api/targets/{release}` and hand the result to
    /// `FilterOptions::apply_target_options`.
    ReloadTargets(String),
    /// Release was cleared: targets go back to the disabled placeholder.
    ResetTargets,
}

/// Current value of every filter input. An empty string means the filter
/// places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub status: String,
    pub severity: String,
    pub build: String,
    pub platform: String,
    pub release: String,
    pub target: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search_text,
            FilterField::Status => &self.status,
            FilterField::Severity => &self.severity,
            FilterField::Build => &self.build,
            FilterField::Platform => &self.platform,
            FilterField::Release => &self.release,
            FilterField::Target => &self.target,
        }
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) -> FilterEffect {
        let value = value.to_string();
        match field {
            FilterField::Search => self.search_text = value,
            FilterField::Status => self.status = value,
            FilterField::Severity => self.severity = value,
            FilterField::Build => self.build = value,
            FilterField::Platform => self.platform = value,
            FilterField::Target => {
                // The target input is disabled until a release is chosen
                if !self.release.trim().is_empty() {
                    self.target = value;
                }
            }
            FilterField::Release => {
                self.release = value;
                if self.release.trim().is_empty() {
                    self.target.clear();
                    return FilterEffect::ResetTargets;
                }
                return FilterEffect::ReloadTargets(self.release.trim().to_string());
            }
        }
        FilterEffect::None
    }

    /// Drops the target if it is not offered for the current release.
    pub fn retain_target(&mut self, valid: &[String]) {
        if !self.target.is_empty() && !valid.iter().any(|t| t == &self.target) {
            self.target.clear();
        }
    }

    /// Sparse view of the state; empty and whitespace-only values are left out.
    pub fn active_filters(&self) -> ActiveFilters {
        fn non_empty(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        let release = non_empty(&self.release);
        let target = release.as_ref().and_then(|_| non_empty(&self.target));

        ActiveFilters {
            search: non_empty(&self.search_text),
            status: non_empty(&self.status),
            severity: non_empty(&self.severity),
            build: non_empty(&self.build),
            platform: non_empty(&self.platform),
            release,
            target,
        }
    }

    pub fn quick_filter(&self) -> Option<QuickFilter> {
        QuickFilter::from_status(&self.status)
    }

    pub fn apply_quick_filter(&mut self, quick: QuickFilter) {
        self.status = quick.status().to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Body of `POST /api/search`. Absent fields are not serialized at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ActiveFilters {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// `(key, value)` pairs in wire order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("search", &self.search),
            ("status", &self.status),
            ("severity", &self.severity),
            ("build", &self.build),
            ("platform", &self.platform),
            ("release", &self.release),
            ("target", &self.target),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

/// Shortcut buttons above the list. They only ever touch the status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    All,
    Open,
    Resolved,
    Ccr,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::All,
        QuickFilter::Open,
        QuickFilter::Resolved,
        QuickFilter::Ccr,
    ];

    pub fn status(&self) -> &'static str {
        match self {
            QuickFilter::All => "",
            QuickFilter::Open => "open",
            QuickFilter::Resolved => "resolved",
            QuickFilter::Ccr => "ccr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::All => "All",
            QuickFilter::Open => "Open",
            QuickFilter::Resolved => "Resolved",
            QuickFilter::Ccr => "CCR",
        }
    }

    /// `None` when the status has no matching shortcut (e.g. `closed`).
    pub fn from_status(status: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.status() == status.trim())
    }
}
