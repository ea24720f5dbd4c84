pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{text_log::TextLogSink, toml_config::DojoConfig};
pub use core::{console::Console, store::RecordStore};
pub use domain::model::{BillingPolicy, JuniorStudent, Participant, Rank, RateCard, SeniorStudent, Student};
pub use utils::error::{DojoError, Result};
