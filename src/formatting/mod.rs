pub mod issues;
pub mod utils;

pub use issues::{
    ccr_badge, description_preview, print_admin_issues, print_comments, print_issues,
    print_single_issue, print_users, resolved_indicator,
};
pub use utils::{
    format_date, format_file_size, format_severity, format_status, parse_timestamp, preview,
    resolution_time, time_ago, time_ago_from, truncate,
};
