/// Key used to select a response handler.
pub type ActionType = String;

/// A tagged message routed by a dispatcher to every registered store.
#[derive(Debug, Clone, PartialEq)]
pub struct Action<P> {
    /// Selects the response handler in each store.
    pub action_type: ActionType,
    /// Payload handed to the response handler.
    pub data: P,
}

impl<P> Action<P> {
    /// Create a new action.
    pub fn new(action_type: impl Into<ActionType>, data: P) -> Self {
        Self {
            action_type: action_type.into(),
            data,
        }
    }
}

/// One or more action types passed to `define_response_to`.
///
/// Converts from a single string or from any list of strings, so callers can
/// write either `"INCREMENT"` or `["INCREMENT", "ADD"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionTypes(Vec<ActionType>);

impl ActionTypes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl IntoIterator for ActionTypes {
    type Item = ActionType;
    type IntoIter = std::vec::IntoIter<ActionType>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for ActionTypes {
    fn from(action_type: &str) -> Self {
        Self(vec![action_type.to_string()])
    }
}

impl From<String> for ActionTypes {
    fn from(action_type: String) -> Self {
        Self(vec![action_type])
    }
}

impl From<&String> for ActionTypes {
    fn from(action_type: &String) -> Self {
        Self(vec![action_type.clone()])
    }
}

impl From<Vec<String>> for ActionTypes {
    fn from(action_types: Vec<String>) -> Self {
        Self(action_types)
    }
}

impl From<Vec<&str>> for ActionTypes {
    fn from(action_types: Vec<&str>) -> Self {
        action_types.as_slice().into()
    }
}

impl From<&[&str]> for ActionTypes {
    fn from(action_types: &[&str]) -> Self {
        Self(action_types.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ActionTypes {
    fn from(action_types: [&str; N]) -> Self {
        action_types.as_slice().into()
    }
}
