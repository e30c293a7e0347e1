mod directory;

pub use directory::{Directory, DirectorySnapshot, ViewStatus};
