pub(crate) mod contiguous;
