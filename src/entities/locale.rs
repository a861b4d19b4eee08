use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Falls back to English for anything unrecognised.
    pub fn from_persisted(value: &Value) -> Self {
        value
            .as_str()
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for Locale {
    type Err = ();

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            _ => Err(()),
        }
    }
}

#[test]
fn locale_rehydration() {
    use serde_json::json;

    assert_eq!(Locale::from_persisted(&json!("es")), Locale::Es);
    assert_eq!(Locale::from_persisted(&json!("tr")), Locale::En);
    assert_eq!(Locale::from_persisted(&json!(7)), Locale::En);
    assert_eq!(serde_json::to_value(Locale::Es).unwrap(), json!("es"));
}
