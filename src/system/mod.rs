pub mod aggregator;
pub mod collector;
pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod platform;
pub mod process;
pub mod snapshot;
