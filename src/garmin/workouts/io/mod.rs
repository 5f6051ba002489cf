pub mod compact;
pub(crate) mod fields;
pub mod remote;
