pub mod color;
pub mod frame;
pub mod ocr_result;
pub mod parsed_stat;
pub mod rect;
pub mod stat_rule;
