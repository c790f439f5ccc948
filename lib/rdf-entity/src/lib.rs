#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod handler;

pub use config::RdfEntityConfig;
pub use handler::RdfFieldHandler;
pub use rdf_entity_model::{MappingError, MappingResult};

pub mod model {
    pub use rdf_entity_model::*;
}

pub mod mapping {
    pub use rdf_entity_mapping::*;
}

pub mod encoding {
    pub use rdf_entity_encoding::*;
}
