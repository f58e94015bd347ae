pub(crate) mod entries;
pub(crate) mod overview;
pub(crate) mod transfer;
