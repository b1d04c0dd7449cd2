pub mod error;
pub mod script;
pub mod state;
pub mod types;
pub mod value;

pub use error::DialogueError;
pub use script::*;
pub use state::*;
pub use types::*;
pub use value::*;
