use wasm_bindgen_test::*;

use chess_room::board::Board;
use chess_room::coord::{NUM_SQUARES, SquareIdx};
use chess_room::dirty::BoardChange;
use chess_room_wasm::web_board::{apply_board_changes, square_node, swap_nodes};
use chess_room_wasm::web_document::web_document;


wasm_bindgen_test_configure!(run_in_browser);

fn row(ids: &[&str]) -> web_sys::Element {
    let document = web_document().unwrap();
    let parent = document.create_element("div").unwrap();
    for id in ids {
        let child = document.create_element("div").unwrap();
        child.set_id(id);
        parent.append_child(&child).unwrap();
    }
    parent
}

fn child(parent: &web_sys::Element, idx: u32) -> web_sys::Element {
    parent.children().item(idx).unwrap()
}

fn order(parent: &web_sys::Element) -> Vec<String> {
    (0..parent.children().length()).map(|idx| child(parent, idx).id()).collect()
}

#[wasm_bindgen_test]
fn swap_distant_nodes() {
    let parent = row(&["a", "b", "c", "d"]);
    swap_nodes(&child(&parent, 0), &child(&parent, 3)).unwrap();
    assert_eq!(order(&parent), vec!["d", "b", "c", "a"]);
}

#[wasm_bindgen_test]
fn swap_adjacent_nodes_both_ways() {
    let parent = row(&["a", "b", "c"]);
    swap_nodes(&child(&parent, 1), &child(&parent, 2)).unwrap();
    assert_eq!(order(&parent), vec!["a", "c", "b"]);
    swap_nodes(&child(&parent, 2), &child(&parent, 1)).unwrap();
    assert_eq!(order(&parent), vec!["a", "b", "c"]);
}

#[wasm_bindgen_test]
fn swap_with_itself() {
    let parent = row(&["a", "b"]);
    swap_nodes(&child(&parent, 0), &child(&parent, 0)).unwrap();
    assert_eq!(order(&parent), vec!["a", "b"]);
    assert_eq!(parent.children().length(), 2);
}

fn square_input_value(node: &web_sys::Element) -> String {
    node.query_selector(r#"input[name="square"]"#).unwrap().unwrap().get_attribute("value").unwrap()
}

#[wasm_bindgen_test]
fn swapped_cells_keep_square_indices_and_tones() {
    let board_node = row(&vec![""; NUM_SQUARES]);
    let mut board = Board::starting_position();
    apply_board_changes(&board_node, &board, vec![BoardChange::RedrawAll]).unwrap();

    let (a, b) = (SquareIdx::from_zero_based(12), SquareIdx::from_zero_based(28));
    let moved_piece = square_node(&board_node, a).unwrap().query_selector("img").unwrap().unwrap();
    board.swap(a, b);
    apply_board_changes(&board_node, &board, vec![BoardChange::Swap(a, b)]).unwrap();

    let a_node = square_node(&board_node, a).unwrap();
    let b_node = square_node(&board_node, b).unwrap();
    assert_eq!(square_input_value(&a_node), "12");
    assert_eq!(square_input_value(&b_node), "28");
    assert_eq!(a_node.class_name(), chess_room::display::cell_class_name(&board[a]));
    assert_eq!(b_node.class_name(), chess_room::display::cell_class_name(&board[b]));
    // The image node itself moved rather than being rebuilt.
    assert!(b_node.query_selector("img").unwrap().unwrap().is_same_node(Some(moved_piece.as_ref())));
    assert!(a_node.query_selector("img").unwrap().is_none());
}
