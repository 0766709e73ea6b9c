use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The places directory as a whole, the resource that place creation is
/// authorized against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Directory {
    id: Uuid,
}

impl Directory {
    pub fn default() -> Self {
        Self { id: Uuid::nil() }
    }
}

impl PolarClass for Directory {
    fn get_polar_class_builder() -> oso::ClassBuilder<Directory> {
        oso::Class::builder()
            .name("Directory")
            .add_attribute_getter("id", |recv: &Directory| recv.id.clone())
            .add_class_method("default", Directory::default)
    }

    fn get_polar_class() -> oso::Class {
        let builder = Directory::get_polar_class_builder();
        builder.build()
    }
}
