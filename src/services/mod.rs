//! External Services
//!
//! This module contains services that talk to the outside world:
//! - storage: SQLite persistence of accounts and backup settings
//! - otp: OTP code computation
//! - migration: Import payload decoding
//! - backup: Encrypted remote backup jobs
//! - refresh: Periodic refresh scheduler and clocks
//! - worker: Background request/response worker

pub mod backup;
pub mod migration;
pub mod otp;
pub mod refresh;
pub mod storage;
pub mod worker;

// Re-export commonly used types for convenience
pub use refresh::{Clock, ManualClock, RefreshScheduler, SystemClock, Tick};
pub use storage::{AccountDb, Persistence};
pub use worker::{spawn_service_worker, ServiceRequest, ServiceResponse, Services};
