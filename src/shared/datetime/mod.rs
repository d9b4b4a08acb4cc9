pub mod packed;

#[cfg(test)]
mod packed_test;
