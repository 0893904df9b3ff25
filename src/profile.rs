pub mod preset;

use crate::{
    process::{ChainedProcess, EmptyProcess, Process},
    stage::Stage,
};
use std::borrow::Cow;
use tracing::trace;

/// A named, statically composed chain of stages.
///
/// ```
/// use stringent::profile::Profile;
/// use stringent::stage::{normalize_eol::NORMALIZE_EOL_CRLF, trim::Trim};
///
/// let dos = Profile::builder("dos").add_stage(Trim).add_stage(NORMALIZE_EOL_CRLF).build();
/// assert_eq!(dos.run("  a\nb  "), "a\r\nb");
/// ```
pub struct Profile<P: Process> {
    name: &'static str,
    pipeline: P,
}

impl<P: Process> Profile<P> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run<'a>(&self, text: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        let text = text.into();
        trace!(profile = self.name, len = text.len(), "running profile");
        self.pipeline.process(text)
    }
}

impl Profile<EmptyProcess> {
    pub fn builder(name: &'static str) -> ProfileBuilder<EmptyProcess> {
        ProfileBuilder::new(name)
    }
}

pub struct ProfileBuilder<P: Process> {
    name: &'static str,
    current: P,
}

impl ProfileBuilder<EmptyProcess> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: EmptyProcess,
        }
    }
}

impl<P: Process> ProfileBuilder<P> {
    pub fn add_stage<S: Stage + 'static>(self, stage: S) -> ProfileBuilder<ChainedProcess<S, P>> {
        ProfileBuilder {
            name: self.name,
            current: ChainedProcess {
                stage,
                previous: self.current,
            },
        }
    }

    pub fn build(self) -> Profile<P> {
        Profile {
            name: self.name,
            pipeline: self.current,
        }
    }
}
