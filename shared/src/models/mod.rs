//! Domain Models

pub mod item;
pub mod print_job;
pub mod suggestion;

pub use item::{
    Item, ItemCreate, ItemCreateResponse, ItemImage, ItemPublic, ItemStatus, ItemUpdate,
};
pub use print_job::{LabelSize, PrintJob, PrintJobStatus, PrintRequest, PrintResponse};
pub use suggestion::ItemSuggestions;
