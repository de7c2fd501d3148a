mod mutex_ext;

pub use mutex_ext::LockOrRecover;
