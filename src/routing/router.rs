use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DETAIL_PATH: Regex = Regex::new(r"^/issues/(\d+)$").unwrap();
}

/// Which view a location shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(u64),
    /// Detail path whose digits do not fit an issue id.
    UnknownIssue(String),
}

impl Route {
    /// `/issues/{digits}` is a detail view; every other path is the list.
    pub fn parse(path: &str) -> Route {
        let Some(id) = DETAIL_PATH.captures(path).and_then(|caps| caps.get(1)) else {
            return Route::List;
        };
        match id.as_str().parse::<u64>() {
            Ok(id) => Route::Detail(id),
            Err(_) => Route::UnknownIssue(id.as_str().to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/issues/{}", id),
            Route::UnknownIssue(raw) => format!("/issues/{}", raw),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Route::Detail(_) | Route::UnknownIssue(_))
    }
}

/// Location history with browser-style back and forward.
#[derive(Debug, Clone)]
pub struct Router {
    entries: Vec<String>,
    index: usize,
}

impl Router {
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: vec![initial_path.to_string()],
            index: 0,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn current(&self) -> Route {
        Route::parse(self.current_path())
    }

    /// Pushes `path`, dropping any forward entries.
    pub fn navigate(&mut self, path: &str) -> Route {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
        self.current()
    }

    /// `None` when already at the oldest entry.
    pub fn back(&mut self) -> Option<Route> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<Route> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}
