//! Cart Item Handlers

pub(crate) mod create;
pub(crate) mod decrease;
pub(crate) mod delete;
pub(crate) mod increase;
