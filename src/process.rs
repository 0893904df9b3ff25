//! Process abstraction
//! ChainedProcess is monomorphised – the compiler knows the concrete
//! type of every stage and inlines the whole chain. Each link asks its
//! stage `needs_apply` first, so already-clean text flows through borrowed.
use crate::stage::Stage;
use std::borrow::Cow;

pub trait Process {
    fn process<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str>;
}

pub struct EmptyProcess;
impl Process for EmptyProcess {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        text
    }
}

pub struct ChainedProcess<S: Stage, P: Process> {
    pub stage: S,
    pub previous: P,
}

impl<S: Stage, P: Process> Process for ChainedProcess<S, P> {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let current = self.previous.process(text);
        if !self.stage.needs_apply(&current) {
            return current;
        }
        self.stage.apply(current)
    }
}
