pub mod loopback_table_factory;
pub mod meta_block_factory;

pub use loopback_table_factory::LoopbackTableFactory;
pub use meta_block_factory::MetaBlockFactory;

#[cfg(test)]
mod meta_block_factory_test;
