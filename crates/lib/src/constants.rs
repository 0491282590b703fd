//! Well-known names and defaults shared by the library and the binary.

/// Storage key under which the bearer credential is persisted.
pub const CREDENTIAL_KEY: &str = "token";

/// File name of the durable client storage inside the data directory.
pub const STORAGE_FILE: &str = "client-storage.json";

/// Plain role names that mark an administrator.
pub const ADMIN_ROLE_NAMES: [&str; 2] = ["ROLE_ADMIN", "admin"];

/// Role name that marks an administrator when the role is a structured object.
pub const ADMIN_ROLE_OBJECT_NAME: &str = "ROLE_ADMIN";

/// Role requested for every self-service signup.
pub const SIGNUP_ROLE: &str = "customer";

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Default request timeout for backend calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_AUTH_URL: &str = "http://localhost:8081";
pub const DEFAULT_TRANSACTIONS_URL: &str = "http://localhost:8082";
pub const DEFAULT_CREDIT_CARDS_URL: &str = "http://localhost:8083";
pub const DEFAULT_GIFT_CARDS_URL: &str = "http://localhost:8084";
pub const DEFAULT_LOANS_URL: &str = "http://localhost:8085";
pub const DEFAULT_LOCKERS_URL: &str = "http://localhost:8086";
