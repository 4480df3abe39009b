use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl NavKey {
    pub const ALL: [NavKey; 3] = [NavKey::ArrowLeft, NavKey::ArrowRight, NavKey::Escape];

    pub fn name(self) -> &'static str {
        match self {
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::Escape => "Escape",
        }
    }

    /// Accepts DOM-style key names plus a few short aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "arrowleft" | "left" | "h" => Some(Self::ArrowLeft),
            "arrowright" | "right" | "l" => Some(Self::ArrowRight),
            "escape" | "esc" | "q" => Some(Self::Escape),
            _ => None,
        }
    }
}

impl FromStr for NavKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw).ok_or_else(|| {
            let known = Self::ALL.map(Self::name).join(", ");
            format!("unknown key `{raw}` (expected one of: {known})")
        })
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
