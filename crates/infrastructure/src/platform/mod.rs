pub mod broadcasts;
pub mod device_probe;
pub mod in_process_binder;
pub mod scanner;

pub use broadcasts::InProcessBroadcasts;
pub use device_probe::probe_device;
pub use in_process_binder::InProcessBinder;
pub use scanner::RecordingLauncher;
