pub mod banner;
pub mod format;
pub mod render;
pub mod state;

pub use banner::{Banner, BannerKind};
pub use state::{Command, EmployeesPage, Focus, Msg, Mutation, SortOrder};
