pub mod errors;
pub mod events;
pub mod id;
pub mod payload;

pub use errors::{BindingError, BridgeError, ConfigError, InterceptError};
pub use events::{EmitPolicy, Event, EventBus, EventTarget};
pub use id::{new_id, ListenerId};
pub use payload::{
    Invocation, KeyboardPayload, PointerPayload, KEYBOARD_COMMAND, KEYBOARD_EVENT, PLUGIN_NAME,
    POINTER_COMMAND, POINTER_EVENT,
};

pub type Result<T> = std::result::Result<T, InterceptError>;
