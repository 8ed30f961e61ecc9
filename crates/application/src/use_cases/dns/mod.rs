mod handle_datagram;

pub use handle_datagram::{DropReason, HandleDatagramUseCase, RequestOutcome};
