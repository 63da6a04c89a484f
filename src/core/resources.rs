//! # Resource Panel
//!
//! The list of support resources shown beside the conversation. Every update
//! replaces the whole list; there is no diffing.

/// Shown in place of an empty list.
pub const EMPTY_PLACEHOLDER: &str = "No resources available for this mood";

/// Fixed list shown by the emergency action, in display order.
pub const CRISIS_RESOURCES: [&str; 4] = [
    "National Suicide Prevention Lifeline: 1-800-273-8255",
    "Crisis Text Line: Text HOME to 741741",
    "Emergency Services: 911",
    "Find a therapist near you",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePanel {
    items: Vec<String>,
}

impl ResourcePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything currently displayed.
    pub fn set_resources<I, S>(&mut self, resources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = resources.into_iter().map(Into::into).collect();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Lines the view should draw: the resources, or the single placeholder.
    pub fn display_lines(&self) -> Vec<&str> {
        if self.items.is_empty() {
            vec![EMPTY_PLACEHOLDER]
        } else {
            self.items.iter().map(String::as_str).collect()
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.items.iter().map(String::as_str).eq(CRISIS_RESOURCES)
    }
}
