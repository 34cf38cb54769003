pub mod auditor;
pub mod client;
pub mod types;

pub use auditor::*;
pub use client::*;
pub use types::*;
