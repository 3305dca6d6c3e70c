//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case.

pub mod balance;
mod doctor;
pub mod logging;
mod program;
pub mod provider;

pub use balance::{BalanceReport, BalanceService};
pub use doctor::{CheckResult, CheckStatus, DoctorResult, DoctorService, DoctorSummary};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use program::{Deployment, ProgramReport, ProgramService};
pub use provider::Provider;
