use oso::PolarClass;
use serde::{Deserialize, Serialize};

/// The resource every permission is granted on. There is one marketplace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marketplace {
    pub name: String,
}

impl Marketplace {
    pub fn collision_collect() -> Self {
        Self {
            name: "Collision Collect".into(),
        }
    }
}

impl PolarClass for Marketplace {
    fn get_polar_class_builder() -> oso::ClassBuilder<Marketplace> {
        oso::Class::builder()
            .name("Marketplace")
            .add_attribute_getter("name", |recv: &Marketplace| recv.name.clone())
    }

    fn get_polar_class() -> oso::Class {
        Marketplace::get_polar_class_builder().build()
    }
}
