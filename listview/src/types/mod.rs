pub mod enums;
pub mod envelope;
pub mod identity;
pub mod machine;
pub mod page;
pub mod provider;
pub mod session;

pub use enums::*;
pub use envelope::*;
pub use identity::*;
pub use machine::*;
pub use page::*;
pub use provider::*;
pub use session::*;
