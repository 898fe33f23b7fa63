/// What the box control shows while a fetch for a new edition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// Keep the previous edition's options until the new response replaces them.
    #[default]
    Retain,
    /// Reset to the placeholder as soon as a non-empty change starts.
    Eager,
}

impl std::fmt::Display for ClearPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClearPolicy::Retain => write!(f, "retain"),
            ClearPolicy::Eager => write!(f, "eager"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub boxes_path: String,
    pub edition_control_id: String,
    pub box_control_id: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub clear_policy: ClearPolicy,
    pub log_level: String,
}
