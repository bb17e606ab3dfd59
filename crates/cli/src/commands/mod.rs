pub mod bisect;
pub mod diff;
pub mod info;
pub mod init;
pub mod resolve;
pub mod util;

pub use bisect::*;
pub use diff::*;
pub use info::*;
pub use init::*;
pub use resolve::*;
pub use util::*;
