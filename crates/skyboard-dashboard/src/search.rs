/// Shown under the search prompt when a blank name is submitted
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";

/// The city search box: pending input plus its validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySearch {
    input: String,
    error: Option<&'static str>,
}

impl CitySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Submit the current input.
    ///
    /// Blank input sets the validation message and yields `None`. Otherwise
    /// the input is returned as typed, and the box is cleared.
    pub fn submit(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_CITY_MESSAGE);
            return None;
        }

        self.error = None;
        Some(std::mem::take(&mut self.input))
    }
}
