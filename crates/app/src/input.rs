//! Keyboard page control
//!
//! - Right arrow / Page Down: next page
//! - Left arrow / Page Up: previous page
//! - Home: front cover
//! - End: back cover

use bevy::prelude::*;
use flipbook_scene::{BookSystems, CurrentPage};
use page_curl::{Book, PageStack};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_page_keys.before(BookSystems::Tick));
    }
}

/// Reading position after pressing `key`, or `None` if the key does not turn pages.
pub fn page_for_key(key: KeyCode, current: usize, stack: &PageStack) -> Option<usize> {
    match key {
        KeyCode::ArrowRight | KeyCode::PageDown => Some(stack.step(current, 1)),
        KeyCode::ArrowLeft | KeyCode::PageUp => Some(stack.step(current, -1)),
        KeyCode::Home => Some(0),
        KeyCode::End => Some(stack.page_count()),
        _ => None,
    }
}

fn handle_page_keys(
    key_input: Res<ButtonInput<KeyCode>>,
    book: Res<Book>,
    mut current: ResMut<CurrentPage>,
) {
    for &key in key_input.get_just_pressed() {
        if let Some(page) = page_for_key(key, current.0, book.stack()) {
            current.set_if_neq(CurrentPage(page));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_step_within_book() {
        let stack = PageStack::new(10, 0.003);
        assert_eq!(page_for_key(KeyCode::ArrowRight, 3, &stack), Some(4));
        assert_eq!(page_for_key(KeyCode::ArrowLeft, 3, &stack), Some(2));
        assert_eq!(page_for_key(KeyCode::ArrowLeft, 0, &stack), Some(0));
        assert_eq!(page_for_key(KeyCode::ArrowRight, 10, &stack), Some(10));
    }

    #[test]
    fn test_home_and_end_jump_to_covers() {
        let stack = PageStack::new(10, 0.003);
        assert_eq!(page_for_key(KeyCode::Home, 7, &stack), Some(0));
        assert_eq!(page_for_key(KeyCode::End, 2, &stack), Some(10));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let stack = PageStack::new(10, 0.003);
        assert_eq!(page_for_key(KeyCode::Space, 3, &stack), None);
    }
}
