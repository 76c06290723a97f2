//! Application-wide constants for the logon/logoff ingestor.
//!
//! Parameter names, validation limits and storage conventions are shared by
//! the validator, the key deriver and the persister, so they live here rather
//! than being repeated as literals.

/// Parameter holding the destination bucket name.
pub const PARAM_BUCKET: &str = "/logonlogoff/s3bucket";

/// Parameter holding the object key prefix.
pub const PARAM_PREFIX: &str = "/logonlogoff/prefixkey";

/// Event types accepted by the type check, in the order they are reported.
pub const ALLOWED_TYPES: &[&str] = &["logon", "logoff"];

/// Required payload keys, in the order they are checked and reported.
pub const REQUIRED_FIELDS: &[&str] = &["type", "userid", "timestamp"];

/// Maximum userid length in characters.
pub const USERID_MAX_CHARS: usize = 15;

/// Maximum userid length in encoded bytes. Checked independently of the
/// character rule.
pub const USERID_MAX_BYTES: usize = 15;

/// `chrono` format string for incoming timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable form of [`TIMESTAMP_FORMAT`] used in rejection bodies.
pub const TIMESTAMP_FORMAT_HINT: &str = "YYYY-MM-DD HH:MM:SS";

/// `chrono` format string for partition dates (`yyyyMMdd`).
pub const PARTITION_DATE_FORMAT: &str = "%Y%m%d";

/// Hour of day at which a new business day starts. Events before this hour
/// belong to the previous day's partition.
pub const DAY_BOUNDARY_HOUR: u32 = 5;

/// Content type attached to every stored object.
pub const OBJECT_CONTENT_TYPE: &str = "application/json; charset=cp932";

/// Extension appended to every object key.
pub const OBJECT_EXTENSION: &str = "json";

/// Application display name used in log lines.
pub const APP_NAME: &str = "logonlogoff-ingest";

/// Application version string.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the directory for the persistent log file.
pub const LOG_DIR_ENV: &str = "LOGONLOGOFF_LOG_DIR";

/// Log file name for persistent debug logging.
pub const LOG_FILE_NAME: &str = "logonlogoff.log";

/// Name the log file is moved to when it is rotated.
pub const LOG_FILE_BACKUP_NAME: &str = "logonlogoff.log.old";

/// Maximum log file size in bytes before rotation (5 MB).
pub const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;
