pub mod event;
pub mod requests;

pub use event::{Event, EventStatus, TimeSlot};
pub use requests::{
    CancelRequest, CreateRequest, DeleteRequest, GetParams, ListParams, ListRequest,
    RescheduleRequest, UpdateRequest, MAX_LIST_LIMIT,
};
