pub mod facade;
pub mod payload;

pub use facade::PrinterFacade;
