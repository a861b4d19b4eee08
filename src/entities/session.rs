use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Customer,
    Shop,
    Admin,
}

impl UserType {
    pub fn name(&self) -> String {
        match self {
            Self::Customer => "customer".into(),
            Self::Shop => "shop".into(),
            Self::Admin => "admin".into(),
        }
    }
}

/// The single logged-in identity. Demo only: no token, no expiry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Session {
    pub fn new(user_type: UserType, name: Option<String>) -> Self {
        Self { user_type, name }
    }

    /// `None` for anything that is not a session blob with a known `userType`.
    /// A `name` that is not a string is dropped, the session is kept.
    pub fn from_persisted(value: Value) -> Option<Self> {
        let user_type = serde_json::from_value(value.get("userType")?.clone()).ok()?;
        let name = value.get("name").and_then(Value::as_str).map(String::from);

        Some(Self { user_type, name })
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

#[test]
fn session_round_trips_through_persisted_form() {
    use serde_json::json;

    let session = Session::new(UserType::Shop, Some("ABC Body Shop".into()));
    let value = serde_json::to_value(&session).unwrap();

    assert_eq!(value, json!({"userType": "shop", "name": "ABC Body Shop"}));
    assert_eq!(Session::from_persisted(value), Some(session));
}

#[test]
fn malformed_session_is_ignored() {
    use serde_json::json;

    assert_eq!(Session::from_persisted(json!({"name": "John Doe"})), None);
    assert_eq!(Session::from_persisted(json!({"userType": "root"})), None);
    assert_eq!(Session::from_persisted(json!(null)), None);

    let admin = Session::from_persisted(json!({"userType": "admin"})).unwrap();
    assert!(admin.is_admin());
    assert_eq!(admin.name, None);
}

#[test]
fn session_keeps_user_type_when_name_is_malformed() {
    use serde_json::json;

    assert_eq!(
        Session::from_persisted(json!({"userType": "shop", "name": 42})),
        Some(Session::new(UserType::Shop, None))
    );
    assert_eq!(
        Session::from_persisted(json!({"userType": "customer", "name": null, "extra": true})),
        Some(Session::new(UserType::Customer, None))
    );
}
