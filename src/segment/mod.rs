pub(crate) mod parts;
