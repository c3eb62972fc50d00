use std::future::Future;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::multipart::{Form, Part};

use crate::constants::{PLATFORMS, REQUIRED_ISSUE_FIELDS};
use crate::error::{TalkError, TalkResult};
use crate::logging::log_info;
use crate::models::Issue;

lazy_static! {
    static ref TESTCASE_PATH: Regex =
        Regex::new(r"/lan/fed/(etpv|etpv3|etpv5)/release/(251|261|231)/([^/]+)/etautotest/").unwrap();
}

/// Release and platform read out of a test-case path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    pub area: String,
    pub release: String,
    pub platform_code: String,
    pub platform: String,
}

impl PathInfo {
    pub fn summary(&self) -> String {
        format!(
            "Release: {}   Platform: {} ({})",
            self.release, self.platform, self.platform_code
        )
    }
}

pub fn extract_path_info(path: &str) -> Option<PathInfo> {
    let caps = TESTCASE_PATH.captures(path)?;
    let platform_code = caps.get(3)?.as_str().to_string();
    let platform = PLATFORMS
        .iter()
        .find(|(code, _)| *code == platform_code)
        .map(|(_, display)| display.to_string())
        .unwrap_or_else(|| platform_code.clone());

    Some(PathInfo {
        area: caps.get(1)?.as_str().to_string(),
        release: caps.get(2)?.as_str().to_string(),
        platform_code,
        platform,
    })
}

/// Input of the "report issue" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewIssueForm {
    pub testcase_title: String,
    pub testcase_path: String,
    pub severity: String,
    pub description: String,
    pub reporter_name: String,
    pub build: String,
    pub platform: String,
    pub release: String,
    pub target: String,
    pub additional_comments: String,
    /// Comma separated.
    pub tags: String,
    pub files: Vec<PathBuf>,
}

impl NewIssueForm {
    fn required_value(&self, field: &str) -> &str {
        match field {
            "testcase_title" => &self.testcase_title,
            "testcase_path" => &self.testcase_path,
            "severity" => &self.severity,
            "description" => &self.description,
            "reporter_name" => &self.reporter_name,
            _ => "",
        }
    }

    /// Human names of the required fields left blank, e.g. "testcase title".
    pub fn missing_fields(&self) -> Vec<String> {
        REQUIRED_ISSUE_FIELDS
            .iter()
            .filter(|field| self.required_value(field).trim().is_empty())
            .map(|field| field.replacen('_', " ", 1))
            .collect()
    }

    pub fn validate(&self) -> TalkResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TalkError::Validation(missing))
        }
    }

    pub fn path_info(&self) -> Option<PathInfo> {
        extract_path_info(&self.testcase_path)
    }

    /// Fills release and platform from the test-case path when it matches.
    /// A target chosen for another release is dropped.
    pub fn apply_path_info(&mut self) -> Option<PathInfo> {
        let info = self.path_info()?;
        if self.release != info.release {
            self.target.clear();
        }
        self.release = info.release.clone();
        self.platform = info.platform_code.clone();
        Some(info)
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Non-empty text parts of the upload, in form order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let tags = self.tag_list().join(",");
        [
            ("testcase_title", self.testcase_title.trim()),
            ("testcase_path", self.testcase_path.trim()),
            ("severity", self.severity.trim()),
            ("description", self.description.trim()),
            ("reporter_name", self.reporter_name.trim()),
            ("build", self.build.trim()),
            ("platform", self.platform.trim()),
            ("release", self.release.trim()),
            ("target", self.target.trim()),
            ("additional_comments", self.additional_comments.trim()),
            ("tags", tags.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, value.to_string()))
        .collect()
    }

    /// Multipart body of `POST /api/issues`; attachments go in `files` parts.
    pub async fn to_multipart(&self) -> TalkResult<Form> {
        let mut form = Form::new();
        for (key, value) in self.text_fields() {
            form = form.text(key, value);
        }

        for path in &self.files {
            let data = tokio::fs::read(path).await.map_err(|e| {
                TalkError::InvalidInput(format!("Cannot read attachment {}: {}", path.display(), e))
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());
            form = form.part("files", Part::bytes(data).file_name(name));
        }

        Ok(form)
    }
}

/// Accepts a finished issue upload.
pub trait IssueSubmitter {
    fn create_issue(&self, form: Form) -> impl Future<Output = TalkResult<Issue>> + Send;
}

/// Validates the form and uploads it. Nothing is sent when validation fails.
pub async fn submit_new_issue<S: IssueSubmitter>(submitter: &S, form: &NewIssueForm) -> TalkResult<Issue> {
    form.validate()?;
    let multipart = form.to_multipart().await?;
    let issue = submitter.create_issue(multipart).await?;
    log_info(&format!("Created issue #{}", issue.id));
    Ok(issue)
}
