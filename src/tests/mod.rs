mod admin_tests;
mod cli_context_tests;
mod dispatcher_tests;
mod error_tests;
mod fixtures;
mod formatting_tests;
mod forms_tests;
mod router_tests;
mod session_tests;
