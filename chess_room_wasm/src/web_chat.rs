// Chat room page: `#mhistory` is the list of lines, `#textbar` wraps the `#chatm` input and is
// hidden until the socket opens. The list starts with a single "connecting" placeholder.

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use chess_room::chat::{ChatHistory, ChatLine};

use crate::rust_error;
use crate::web_document::web_document;
use crate::web_error_handling::JsResult;


const HISTORY_ID: &str = "mhistory";
const TEXTBAR_ID: &str = "textbar";
const INPUT_ID: &str = "chatm";
const LINE_CLASSES: &str = "px-2 py-1 text-green-500";

#[wasm_bindgen]
pub struct WebChat {
    history: ChatHistory,
}

#[wasm_bindgen]
impl WebChat {
    pub fn new_chat() -> WebChat { WebChat { history: ChatHistory::new() } }

    pub fn on_open(&mut self) -> JsResult<()> {
        info!("Chat connection opened");
        let document = web_document()?;
        let history_node = document.get_existing_element_by_id(HISTORY_ID)?;
        if let Some(placeholder) = history_node.last_child() {
            history_node.remove_child(&placeholder)?;
        }
        let textbar = document
            .get_existing_element_by_id(TEXTBAR_ID)?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| rust_error!("#{} is not an HTML element", TEXTBAR_ID))?;
        textbar.set_hidden(false);
        Ok(())
    }

    // Returns the frame to send, or `None` if there is nothing to send.
    pub fn send_local(&mut self) -> JsResult<Option<String>> {
        let input = web_document()?
            .get_existing_element_by_id(INPUT_ID)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .map_err(|_| rust_error!("#{} is not an input", INPUT_ID))?;
        let Some(outgoing) = self.history.add_local(&input.value()) else {
            return Ok(None);
        };
        input.set_value("");
        if let Some(line) = self.history.last() {
            append_line(line)?;
        }
        let frame = serde_json::to_string(&outgoing).map_err(|err| rust_error!("{}", err))?;
        Ok(Some(frame))
    }

    pub fn receive(&mut self, frame: &str) -> JsResult<()> {
        match self.history.add_incoming(frame) {
            Ok(line) => append_line(&line),
            Err(err) => {
                warn!("Dropping chat frame {frame:?}: {err:?}");
                Ok(())
            }
        }
    }
}

// Text goes in via `textContent`, so whatever the participants type is never parsed as markup.
fn append_line(line: &ChatLine) -> JsResult<()> {
    let document = web_document()?;
    let history_node = document.get_existing_element_by_id(HISTORY_ID)?;
    let item = document.create_element("li")?;
    let text = document.create_element("div")?;
    text.set_class_name(LINE_CLASSES);
    text.set_text_content(Some(&line.to_display_string()));
    item.append_child(&text)?;
    history_node.append_child(&item)?;
    history_node.set_scroll_top(history_node.scroll_height());
    Ok(())
}
