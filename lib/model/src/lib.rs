mod data_type;
mod definition;
mod error;
mod format;
mod value;

pub use data_type::*;
pub use definition::*;
pub use error::*;
pub use format::*;
pub use value::*;

// Re-export some oxrdf types.
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeRef, IriParseError, LanguageTagParseError, Literal, LiteralRef, NamedNode,
    NamedNodeRef, Term, TermRef,
};

// Re-export the XML Schema value types used by the native field values.
pub use oxsdatatypes::{Date, DateTime, Decimal, Double, Duration, Time};
