mod reminder;
mod retrieval;

pub use reminder::{ReminderList, ReminderTool};
pub use retrieval::{DocumentRetrievalTool, RetrievalArgs, RetrievalHandle};
