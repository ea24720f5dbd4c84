use crate::domain::model::RateCard;
use crate::utils::error::Result;

/// One-way destination for rendered records. Nothing is ever read back.
pub trait RecordSink {
    /// Marks the start of a save pass.
    fn begin_session(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_record(&mut self, rendered: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn log_path(&self) -> &str;
    fn initial_capacity(&self) -> usize;
    fn rates(&self) -> RateCard;
}
