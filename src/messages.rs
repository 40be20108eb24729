use crate::file::{FileInput, FileReadError};
use crate::state::{Side, Ticket};

/// Response messages from background operations
#[derive(Debug)]
pub enum ResponseMessage {
    FileLoaded {
        side: Side,
        ticket: Ticket,
        result: Result<FileInput, FileReadError>,
    },
}
