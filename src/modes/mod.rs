pub mod interval_scheduler;
pub mod play;

pub use interval_scheduler::IntervalScheduler;
pub use play::PlayMode;
