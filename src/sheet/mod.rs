pub(crate) mod document;
pub(crate) mod layout;
pub(crate) mod model;
