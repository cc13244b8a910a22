pub mod error;
pub mod schedule;
pub mod stop;

pub use error::ScheduleError;
pub use schedule::TrainSchedule;
pub use stop::ScheduleStop;

#[cfg(test)]
mod tests;
