pub mod association;
pub mod fields;
pub mod inflect;
pub mod lookup;
pub mod pipeline;
pub mod presented;
pub mod presenter;
pub mod registry;
pub mod value;

mod error;

pub use association::{AssociationField, AssociationSource, AssociationValue, Related};
pub use error::{Error, Result};
pub use fields::OptionalField;
pub use lookup::{LookupCache, LookupTable};
pub use pipeline::{Pipeline, post_process};
pub use presented::{Field, PresentedStruct};
pub use presenter::{Presenter, Record, Selection};
pub use registry::{PresenterRegistry, RegistryBuilder};
pub use value::{PresentedMap, PresentedValue};
