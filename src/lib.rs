pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod query;
pub mod serde_ids;

pub use constants::{DEFAULT_ID_FIELD, DEFAULT_ID_FIELDS, MAX_SAFE_INTEGER};
pub use error::{NormalizerError, Result};
pub use normalize::{
    ensure_array_ids_as_strings, ensure_array_ids_as_strings_default, ensure_ids_as_strings,
    ensure_ids_as_strings_default, id_as_string, id_of, to_id_string, IdFields, LongIdUtils,
};
pub use query::{query_param_as_id, QuerySource, QueryString};
