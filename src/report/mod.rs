//! Report assembler: pure markdown construction plus the final write
//!
//! Everything here is a data-to-text transformation; the only I/O is
//! [`write_report`], which overwrites the output path in one shot.

mod markdown;

pub use markdown::{
    assemble_report, make_link, make_profile, make_row, make_table, utc_timestamp, write_report,
    TABLE_HEADER,
};
