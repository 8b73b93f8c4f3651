pub mod misc;
pub mod oid4vci;
