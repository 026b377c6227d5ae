pub mod relay;

pub use relay::{EventRelay, QSC_ACTION, QSC_EXTRA};
