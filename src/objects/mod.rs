pub mod channel;
mod js_error;
pub use js_error::JsError;
