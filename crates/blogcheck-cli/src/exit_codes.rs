//! Exit codes for blogcheck.
//! These codes are part of the public contract; CI jobs branch on them.

pub const SUCCESS: i32 = 0;
pub const CHECK_FAILED: i32 = 1; // At least one contract check failed
pub const CONFIG_ERROR: i32 = 2; // Bad url, unknown check name, bad flags
pub const CLIENT_ERROR: i32 = 3; // Not found / rejected / validation error
pub const NETWORK_ERROR: i32 = 4; // Unreachable service, timeout, 5xx
pub const INVALID_RESPONSE: i32 = 5; // Body did not decode
