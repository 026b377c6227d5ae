pub mod simulated_printer;

pub use simulated_printer::{PrinterCall, SimulatedPrinter};
