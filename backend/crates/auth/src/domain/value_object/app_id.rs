pub use kernel::id::AppId;

/// Zero is never a valid app; transports use it as "missing"
pub const EMPTY_APP_ID: AppId = AppId::new(0);
