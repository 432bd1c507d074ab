//! Sample tables loaded from exported CSV files.

pub mod parse;
pub mod sample;
pub mod stem;

pub use parse::load_table;
pub use sample::SampleTable;
