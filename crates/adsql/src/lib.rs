mod coerce;
pub use coerce::Coercion;

mod engine;
pub use engine::{Bind, Engine, Prebound};

mod materialize;
pub use materialize::{combine, parse_time, Fetch, Materializer};

mod query;
pub use query::{Query, Row};

mod settings;
pub use settings::{Settings, TableType};

mod translation;
pub use translation::Translation;

pub use adsql_core::{schema, stmt, Error, Result, Schema};
pub use adsql_sql::{Param, ParamStyle};
