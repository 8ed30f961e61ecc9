pub mod dns;

pub use dns::{DropReason, HandleDatagramUseCase, RequestOutcome};
