pub use super::factories::{LoopbackTableFactory, MetaBlockFactory};
pub use super::scripted_scanner::ScriptedRuntime;

use crate::engine::bridge::memory::SharedArena;

pub struct Factory;

impl Factory {
    pub fn meta_block(arena: &SharedArena) -> MetaBlockFactory {
        MetaBlockFactory::new(arena)
    }

    pub fn loopback_table() -> LoopbackTableFactory {
        LoopbackTableFactory::new()
    }

    pub fn scripted_runtime() -> ScriptedRuntime {
        ScriptedRuntime::new()
    }
}
