// Markup for board cells. The wasm front end assigns these to `className` / `innerHTML` of the
// board container children; keeping them here makes the exact output testable off-browser.

use crate::board::Cell;
use crate::coord::SquareIdx;


pub const UNSWAPPABLE_CLASS: &str = "unswappable";
pub const PIECE_SIZE_CLASSES: &str = "w-[5dvw] h-[5dvw]";

// The tone class always comes last: drag handlers look it up from the end of the class list.
pub fn cell_class_name(cell: &Cell) -> String {
    let tone = cell.tone.css_class();
    if cell.is_unswappable() {
        format!("{UNSWAPPABLE_CLASS} {PIECE_SIZE_CLASSES} {tone}")
    } else {
        tone
    }
}

// Every cell carries a hidden `square` input with its index; it is disabled for empty cells.
pub fn cell_inner_html(idx: SquareIdx, cell: &Cell) -> String {
    match &cell.piece {
        Some(piece) => format!(
            r#"<input type="hidden" name="square" value="{idx}"/><img src="{}" class="{PIECE_SIZE_CLASSES}">"#,
            html_escape::encode_double_quoted_attribute(&piece.image_url()),
        ),
        None => format!(r#"<input type="hidden" name="square" value="{idx}" disabled/>"#),
    }
}
