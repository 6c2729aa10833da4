pub mod entry;
pub mod overlap;
pub mod textgrid;
pub mod tier;
