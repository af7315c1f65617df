//! Screen identifier enum and its query-channel wire values.

use std::fmt;

/// Identifies each wizard screen. Exactly one is current per render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home,
    ChooseTool,
    Configure,
}

impl ScreenId {
    /// All screens in wizard order.
    pub const ALL: [ScreenId; 3] = [Self::Home, Self::ChooseTool, Self::Configure];

    /// The query-channel value for this screen (`page=` key).
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::ChooseTool => "choose_tool",
            Self::Configure => "configure",
        }
    }

    /// Parse a query-channel value. Unrecognized values fail closed to
    /// `Home` — a bad deep link must never leave the UI in an undefined
    /// screen.
    pub fn from_param(value: &str) -> Self {
        match value {
            "choose_tool" => Self::ChooseTool,
            "configure" => Self::Configure,
            _ => Self::Home,
        }
    }

    /// Human-readable title for the screen header.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "BI4BI",
            Self::ChooseTool => "Select a BI Environment",
            Self::Configure => "Configure",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ScreenId;

    #[test]
    fn param_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_param(screen.as_param()), screen);
        }
    }

    #[test]
    fn unrecognized_param_fails_closed_to_home() {
        assert_eq!(ScreenId::from_param("bogus"), ScreenId::Home);
        assert_eq!(ScreenId::from_param(""), ScreenId::Home);
        assert_eq!(ScreenId::from_param("CHOOSE_TOOL"), ScreenId::Home);
    }

    #[test]
    fn default_is_home() {
        assert_eq!(ScreenId::default(), ScreenId::Home);
    }
}
