use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid timeline range: start={start}, end={end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
