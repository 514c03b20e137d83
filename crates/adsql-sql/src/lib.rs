mod serializer;
pub use serializer::{Param, ParamStyle, Params, Placeholder, Serializer};

pub use adsql_core::stmt;
