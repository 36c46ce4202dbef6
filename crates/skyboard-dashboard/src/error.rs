/// Errors from dashboard intents
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("City is not loaded: {0}")]
    CityNotLoaded(String),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl DashboardError {
    /// Returns a user-friendly message suitable for display under the prompt.
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::CityNotLoaded(_) => {
                "That city is not on the dashboard. Load it with `search <city>` first."
            }
            DashboardError::UnknownCommand(_) => "Unknown command. Type `help` for a list.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_error_display() {
        assert!(DashboardError::CityNotLoaded("Oslo".into()).to_string().contains("Oslo"));
        assert!(DashboardError::UnknownCommand("fly".into()).to_string().contains("fly"));
    }

    #[test]
    fn not_loaded_points_at_search() {
        let message = DashboardError::CityNotLoaded("Oslo".into()).user_message();
        assert!(message.contains("search <city>"));
        assert!(!message.contains("spelling"));
    }
}
