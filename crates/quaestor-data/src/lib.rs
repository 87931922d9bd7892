// Operations
mod operations;
pub use operations::*;

// Models
mod related;
pub use related::*;

mod members;
pub use members::*;

mod events;
pub use events::*;

mod projects;
pub use projects::*;

mod tasks;
pub use tasks::*;

mod transactions;
pub use transactions::*;

mod contributions;
pub use contributions::*;
