use oso::PolarClass;
use serde::{Deserialize, Serialize};

use crate::entities::{Session, UserType};

/// The actor behind a request, derived from the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(user_type: UserType, name: Option<String>) -> Self {
        Self {
            name,
            roles: vec![user_type.name()],
        }
    }

    /// Name a shop's bids are filed under.
    pub fn shop_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn has_role(&self, role: String) -> bool {
        self.roles.iter().any(|x| x == &role)
    }
}

impl From<&Session> for User {
    fn from(session: &Session) -> Self {
        User::new(session.user_type, session.name.clone())
    }
}

impl PolarClass for User {
    fn get_polar_class_builder() -> oso::ClassBuilder<User> {
        oso::Class::builder()
            .name("User")
            .add_attribute_getter("name", |recv: &User| recv.name.clone())
            .add_attribute_getter("roles", |recv: &User| recv.roles.clone())
            .add_method("has_role", User::has_role)
    }

    fn get_polar_class() -> oso::Class {
        let builder = User::get_polar_class_builder();
        builder.build()
    }
}

#[test]
fn user_from_session() {
    let session = Session::new(UserType::Shop, Some("ABC Body Shop".into()));
    let user = User::from(&session);

    assert_eq!(user.roles, vec!["shop".to_string()]);
    assert_eq!(user.shop_name(), Some("ABC Body Shop"));
    assert!(user.has_role("shop".into()));
    assert!(!user.has_role("admin".into()));

    let unnamed = User::new(UserType::Shop, Some("".into()));
    assert_eq!(unnamed.shop_name(), None);
}
