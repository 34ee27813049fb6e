// DOM side of the board: a container whose 64 element children are the cells in square order.
//
// Cell nodes are moved rather than rebuilt on swaps so that piece images aren't reloaded. The
// drag layer must therefore leave node positions alone and report the gesture to `WebClient`.

use std::str::FromStr;

use chess_room::board::{Board, Cell, Tone};
use chess_room::coord::{NUM_SQUARES, SquareIdx};
use chess_room::dirty::BoardChange;
use chess_room::display::{cell_class_name, cell_inner_html};
use chess_room::piece::{PIECE_IMAGE_BASE_URL, PieceRef};

use crate::rust_error;
use crate::web_document::web_document;
use crate::web_error_handling::JsResult;


pub const BOARD_ID: &str = "board";
const SQUARE_INPUT_SELECTOR: &str = r#"input[name="square"]"#;

pub fn board_node() -> JsResult<web_sys::Element> {
    web_document()?.get_existing_element_by_id(BOARD_ID)
}

pub fn square_node(board_node: &web_sys::Element, idx: SquareIdx) -> JsResult<web_sys::Element> {
    board_node
        .children()
        .item(idx.to_zero_based().into())
        .ok_or_else(|| rust_error!("Cannot find board square {}", idx))
}

// Exchanges the positions of two nodes without disturbing their siblings. There is no direct
// swap in the DOM, so a marker keeps the original position of `a` while `a` is moved next to
// `b`. This keeps working when the nodes are adjacent, in either order.
pub fn swap_nodes(a: &web_sys::Node, b: &web_sys::Node) -> JsResult<()> {
    if a.is_same_node(Some(b)) {
        return Ok(());
    }
    let a_parent = a.parent_node().ok_or_else(|| rust_error!("Swapped node is detached"))?;
    let b_parent = b.parent_node().ok_or_else(|| rust_error!("Swapped node is detached"))?;
    let marker = web_document()?.create_element("div")?;
    a_parent.insert_before(&marker, Some(a))?;
    b_parent.insert_before(a, Some(b))?;
    a_parent.insert_before(b, Some(&marker))?;
    a_parent.remove_child(&marker)?;
    Ok(())
}

pub fn render_square(
    board_node: &web_sys::Element, board: &Board, idx: SquareIdx,
) -> JsResult<()> {
    let node = square_node(board_node, idx)?;
    let cell = &board[idx];
    node.set_class_name(&cell_class_name(cell));
    node.set_inner_html(&cell_inner_html(idx, cell));
    Ok(())
}

pub fn apply_board_changes(
    board_node: &web_sys::Element, board: &Board, changes: Vec<BoardChange>,
) -> JsResult<()> {
    for change in changes {
        match change {
            BoardChange::Swap(a, b) => {
                let a_node = square_node(board_node, a)?;
                let b_node = square_node(board_node, b)?;
                swap_nodes(&a_node, &b_node)?;
                // Contents travelled with the nodes; the tone, drag filter and square index stay
                // with the square.
                settle_moved_square(&a_node, board, b)?;
                settle_moved_square(&b_node, board, a)?;
            }
            BoardChange::Redraw(idx) => render_square(board_node, board, idx)?,
            BoardChange::RedrawAll => {
                for idx in SquareIdx::all() {
                    render_square(board_node, board, idx)?;
                }
            }
        }
    }
    Ok(())
}

fn settle_moved_square(node: &web_sys::Element, board: &Board, idx: SquareIdx) -> JsResult<()> {
    node.set_class_name(&cell_class_name(&board[idx]));
    if let Some(input) = node.query_selector(SQUARE_INPUT_SELECTOR)? {
        input.set_attribute("value", &idx.to_string())?;
    }
    Ok(())
}

// Reads the server-rendered board. The tone is the last `bg-` class of a cell; the piece is the
// image path below `PIECE_IMAGE_BASE_URL`.
pub fn read_board(board_node: &web_sys::Element) -> JsResult<Board> {
    let children = board_node.children();
    if children.length() as usize != NUM_SQUARES {
        return Err(rust_error!(
            "Expected {} board squares, found {}",
            NUM_SQUARES,
            children.length()
        ));
    }
    let cells = SquareIdx::all()
        .map(|idx| read_cell(&square_node(board_node, idx)?, idx))
        .collect::<JsResult<Vec<_>>>()?;
    let cells = cells.try_into().map_err(|_| rust_error!("Board square count changed"))?;
    Ok(Board::from_cells(cells))
}

fn read_cell(node: &web_sys::Element, idx: SquareIdx) -> JsResult<Cell> {
    let class_list = node.class_list();
    let tone = (0..class_list.length())
        .rev()
        .filter_map(|i| class_list.item(i))
        .find_map(|class| class.strip_prefix("bg-").and_then(|tag| Tone::from_str(tag).ok()))
        .ok_or_else(|| rust_error!("Square {} has no tone class", idx))?;
    let piece = match node.query_selector("img")? {
        Some(img) => {
            let src = img.get_attribute("src").unwrap_or_default();
            let path = src.strip_prefix(PIECE_IMAGE_BASE_URL).unwrap_or(&src);
            PieceRef::from_wire(Some(path.to_owned()))
        }
        None => None,
    };
    Ok(Cell::new(tone, piece))
}
