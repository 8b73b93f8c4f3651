pub mod error;
pub mod oid4vci;
pub mod status_list;
