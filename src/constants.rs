pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const SERVER_URL_ENV: &str = "TESTER_TALK_URL";
pub const CONFIG_FILE: &str = ".tester-talk-config.json";
pub const SESSION_FILE: &str = ".tester-talk-session.json";

pub const LOG_LEVEL_ENV: &str = "TESTER_TALK_LOG";
pub const MAX_LOG_FILES: usize = 10;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const ADMIN_ISSUES_PER_PAGE: u32 = 50;
pub const DESCRIPTION_PREVIEW_LEN: usize = 200;
pub const MIN_PASSWORD_LEN: usize = 6;

pub const TARGET_PLACEHOLDER: &str = "Select Release First";
pub const TARGET_LOAD_ERROR: &str = "Error loading targets";

/// Used when `/api/builds` cannot be reached.
pub const FALLBACK_BUILDS: [&str; 3] = ["Weekly", "Daily", "Daily Plus"];

pub const RELEASES: [&str; 3] = ["261", "251", "231"];

/// Platform code and display name.
pub const PLATFORMS: [(&str, &str); 6] = [
    ("lnx86", "Linux"),
    ("LR", "LR"),
    ("RHEL7.6", "RHEL7.6"),
    ("CENTOS7.4", "CENTOS7.4"),
    ("SLES12SP#", "SLES12SP#"),
    ("LOP", "LOP"),
];

pub const REQUIRED_ISSUE_FIELDS: [&str; 5] = [
    "testcase_title",
    "testcase_path",
    "severity",
    "description",
    "reporter_name",
];
