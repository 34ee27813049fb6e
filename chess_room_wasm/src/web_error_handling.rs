use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use chess_room::client::EventError;
use chess_room::lobby::JoinError;


pub type JsResult<T> = Result<T, JsValue>;

thread_local! {
    static PANIC_REPORT: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[wasm_bindgen]
extern "C" {
    type Error;
    #[wasm_bindgen(constructor)]
    fn new() -> Error;
    #[wasm_bindgen(structural, method, getter)]
    fn stack(error: &Error) -> String;
}

// After a panic the module is unusable; the page polls `panic_report` to tell the user.
#[wasm_bindgen]
pub fn set_panic_hook() {
    use std::panic;
    use std::sync::Once;
    static SET_HOOK: Once = Once::new();
    SET_HOOK.call_once(|| {
        panic::set_hook(Box::new(|panic_info| {
            console_error_panic_hook::hook(panic_info);
            let report = format!("{panic_info}\n{}", Error::new().stack());
            PANIC_REPORT.with(|cell| *cell.borrow_mut() = Some(report));
        }));
    });
}

#[wasm_bindgen]
pub fn panic_report() -> Option<String> { PANIC_REPORT.with(|cell| cell.borrow().clone()) }

// Error thrown to JS. `kind` lets the page tell a bad frame from a broken page.
#[wasm_bindgen(getter_with_clone)]
pub struct RustError {
    pub kind: String,
    pub message: String,
}

impl RustError {
    pub fn new(kind: &str, message: String) -> Self { RustError { kind: kind.to_owned(), message } }
}

impl From<EventError> for RustError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::MalformedMessage(message) => RustError::new("malformed-message", message),
            EventError::CannotApplyEvent(message) => RustError::new("cannot-apply-event", message),
        }
    }
}

impl From<JoinError> for RustError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::MalformedResponse(message) => RustError::new("malformed-response", message),
        }
    }
}

#[macro_export]
macro_rules! rust_error {
    ($($arg:tt)*) => {
        wasm_bindgen::JsValue::from(
            $crate::web_error_handling::RustError::new("internal", format!($($arg)*))
        )
    };
}
