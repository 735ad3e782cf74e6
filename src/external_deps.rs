pub use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
pub use chrono::{DateTime, Local};
pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, Naming, Record,
};
pub use once_cell::sync::Lazy as once_lazy;
pub use thiserror::Error;
