pub mod color;
pub mod event;
pub mod event_type;

pub use color::{DEFAULT_COLOR, PALETTE};
pub use event::{Event, NewEvent};
pub use event_type::{EventType, NewEventType, TypeLookup};
