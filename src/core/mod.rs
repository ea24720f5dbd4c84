pub mod console;
pub mod store;

pub use crate::domain::model::{Participant, Rank, RateCard, Student};
pub use crate::domain::ports::{ConfigProvider, RecordSink};
pub use crate::utils::error::Result;
