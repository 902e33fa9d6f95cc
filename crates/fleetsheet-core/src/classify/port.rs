use serde::{Deserialize, Serialize};
use std::fmt;

/// Port vocabulary used to classify where a service calls in Manila.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Port {
    #[serde(rename = "MICT + ATI")]
    MictAndAti,
    #[serde(rename = "MICT")]
    Mict,
    #[serde(rename = "ATI")]
    Ati,
    #[serde(rename = "domestic")]
    Domestic,
}

impl Port {
    pub fn as_str(self) -> &'static str {
        match self {
            Port::MictAndAti => "MICT + ATI",
            Port::Mict => "MICT",
            Port::Ati => "ATI",
            Port::Domestic => "domestic",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords checked in priority order; the combined phrase must be tested
/// before its parts.
const PORT_KEYWORDS: [(&str, Port); 3] = [
    ("north and south", Port::MictAndAti),
    ("north", Port::Mict),
    ("south", Port::Ati),
];

/// Classify coverage commentary into a port code. Case-insensitive.
pub fn classify_port(comment: &str) -> Port {
    let lower = comment.to_lowercase();
    PORT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, port)| *port)
        .unwrap_or(Port::Domestic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_and_south() {
        assert_eq!(
            classify_port("vessel called north and south of manila"),
            Port::MictAndAti
        );
        assert_eq!(Port::MictAndAti.as_str(), "MICT + ATI");
    }

    #[test]
    fn test_single_harbour() {
        assert_eq!(classify_port("the North Harbour"), Port::Mict);
        assert_eq!(classify_port("South harbour only"), Port::Ati);
    }

    #[test]
    fn test_domestic_fallback() {
        assert_eq!(classify_port("domestic routes only"), Port::Domestic);
        assert_eq!(classify_port(""), Port::Domestic);
    }

    #[test]
    fn test_south_and_north_is_first_match() {
        // Only the exact combined phrase maps to both ports.
        assert_eq!(classify_port("south and north"), Port::Mict);
    }
}
