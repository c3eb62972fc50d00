pub mod dispatcher;

pub use dispatcher::{SearchBackend, SearchDispatcher, SearchOutcome};
