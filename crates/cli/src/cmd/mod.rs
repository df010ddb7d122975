mod build;
mod list;
mod spec;

pub use build::cmd_build;
pub use list::cmd_list;
pub use spec::cmd_spec;
