pub mod permissions;
pub mod replace_dir;
pub mod rw;
pub mod symlink;

pub use permissions::make_executable;
pub use replace_dir::replace_dir;
pub use rw::{atomic_read, atomic_write, Options as WriteOptions};
pub use symlink::{atomic_symlink, read_link};
