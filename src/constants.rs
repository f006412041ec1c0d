/// Identifier field names and numeric limits shared across the crate

/// Field read by `id_as_string` when the caller does not name one
pub const DEFAULT_ID_FIELD: &str = "id";

/// Fields treated as identifiers when no explicit set is supplied
pub const DEFAULT_ID_FIELDS: [&str; 8] = [
    "id",
    "orderId",
    "productId",
    "merchantId",
    "storeId",
    "userId",
    "couponId",
    "skuId",
];

/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
/// Upstream ids are snowflake-style 64-bit values and routinely exceed it.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

// Configuration
pub const DEFAULT_CONFIG_PATH: &str = "long-ids.toml";
pub const ENV_ID_FIELDS: &str = "LONG_IDS_FIELDS";
pub const ENV_LOG_DIR: &str = "LONG_IDS_LOG_DIR";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE_NAME: &str = "long-ids.log";
