use ahash::AHashMap;

/// Built-in selector constants for common form, navigation, and status
/// elements.
const DEFAULT_SELECTORS: &[(&str, &str)] = &[
    // Form elements
    ("LOGIN_USERNAME", "#username"),
    ("LOGIN_PASSWORD", "#password"),
    ("LOGIN_SUBMIT", "#loginButton"),
    ("EMAIL_INPUT", "input[type='email']"),
    ("SEARCH_INPUT", "#searchInput"),
    ("SUBMIT_BUTTON", "button[type='submit']"),
    // Navigation elements
    ("HOME_LINK", "a[href='/']"),
    ("BACK_BUTTON", ".back-button"),
    ("NEXT_BUTTON", ".next-button"),
    ("MENU_TOGGLE", ".menu-toggle"),
    // Common UI elements
    ("MODAL_CLOSE", ".modal-close"),
    ("DROPDOWN_TOGGLE", ".dropdown-toggle"),
    ("CHECKBOX", "input[type='checkbox']"),
    ("RADIO_BUTTON", "input[type='radio']"),
    ("FILE_INPUT", "input[type='file']"),
    // Table elements
    ("TABLE_ROW", "tr"),
    ("TABLE_CELL", "td"),
    ("TABLE_HEADER", "th"),
    // Status elements
    ("SUCCESS_MESSAGE", ".success-message"),
    ("ERROR_MESSAGE", ".error-message"),
    ("WARNING_MESSAGE", ".warning-message"),
    ("LOADING_SPINNER", ".loading-spinner"),
    // Form validation
    ("REQUIRED_FIELD", "[required]"),
    ("INVALID_FIELD", ".invalid"),
    ("VALID_FIELD", ".valid"),
];

/// Registry mapping symbolic selector constants to concrete element selectors.
///
/// Consulted by the resolver for any selector token with the constant lexical
/// shape. Extensible at runtime; `Default` preloads the built-in table.
#[derive(Debug, Clone)]
pub struct SelectorRegistry {
    map: AHashMap<String, String>,
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        Self {
            map: DEFAULT_SELECTORS
                .iter()
                .map(|(constant, selector)| (constant.to_string(), selector.to_string()))
                .collect(),
        }
    }
}

impl SelectorRegistry {
    /// A registry without the built-in table.
    pub fn empty() -> Self {
        Self {
            map: AHashMap::new(),
        }
    }

    /// Whether a token has the lexical shape of a selector constant: non-empty
    /// and composed only of uppercase ASCII letters, digits, and underscores.
    pub fn is_constant(token: &str) -> bool {
        !token.is_empty()
            && token
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
    }

    pub fn get(&self, constant: &str) -> Option<&str> {
        self.map.get(constant).map(String::as_str)
    }

    pub fn insert(&mut self, constant: impl Into<String>, selector: impl Into<String>) {
        self.map.insert(constant.into(), selector.into());
    }

    pub fn remove(&mut self, constant: &str) -> Option<String> {
        self.map.remove(constant)
    }

    pub fn contains(&self, constant: &str) -> bool {
        self.map.contains_key(constant)
    }

    pub fn mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
