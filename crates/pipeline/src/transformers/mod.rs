mod filtering;
mod suspicious;

pub use filtering::FilteringTransform;
pub use suspicious::SuspiciousTransform;

use dnstail_domain::{DnsMessage, TransformersConfig};

use crate::errors::PipelineError;

/// Outcome of running a message through the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Drop,
}

/// The transformer chain one sink worker owns.
///
/// Workers each build their own chain so mutable state (downsampling
/// counters) never crosses tasks.
pub struct Transforms {
    filtering: FilteringTransform,
    suspicious: Option<SuspiciousTransform>,
}

impl Transforms {
    pub fn new(config: &TransformersConfig) -> Result<Self, PipelineError> {
        let suspicious = if config.suspicious.enable {
            Some(SuspiciousTransform::new(&config.suspicious)?)
        } else {
            None
        };
        Ok(Self {
            filtering: FilteringTransform::new(&config.filtering)?,
            suspicious,
        })
    }

    pub fn process(&mut self, dm: &mut DnsMessage) -> Verdict {
        if self.filtering.check_if_drop(dm) {
            return Verdict::Drop;
        }
        if let Some(suspicious) = &self.suspicious {
            suspicious.score(dm);
        }
        Verdict::Keep
    }
}
