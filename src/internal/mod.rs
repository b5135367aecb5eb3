pub(crate) mod skiplist;
pub(crate) mod utils;
