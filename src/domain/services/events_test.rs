use tui_textarea::Input;
use tui_textarea::Key;

use super::map_input;
use crate::domain::models::Event;

fn ctrl(c: char) -> Input {
    return Input {
        key: Key::Char(c),
        ctrl: true,
        alt: false,
    };
}

fn key(key: Key) -> Input {
    return Input {
        key,
        ctrl: false,
        alt: false,
    };
}

#[test]
fn it_maps_hotkeys() {
    assert!(matches!(map_input(ctrl('c')), Event::KeyboardCTRLC()));
    assert!(matches!(map_input(ctrl('n')), Event::KeyboardCTRLN()));
    assert!(matches!(map_input(ctrl('t')), Event::KeyboardCTRLT()));
    assert!(matches!(map_input(ctrl('b')), Event::KeyboardCTRLB()));
    assert!(matches!(map_input(key(Key::Enter)), Event::KeyboardEnter()));
    assert!(matches!(map_input(key(Key::Esc)), Event::KeyboardEsc()));
    assert!(matches!(map_input(key(Key::Tab)), Event::KeyboardTab()));
}

#[test]
fn it_maps_scrolling() {
    assert!(matches!(map_input(key(Key::Up)), Event::UIScrollUp()));
    assert!(matches!(map_input(key(Key::Down)), Event::UIScrollDown()));
    assert!(matches!(map_input(ctrl('u')), Event::UIScrollPageUp()));
    assert!(matches!(map_input(ctrl('d')), Event::UIScrollPageDown()));
    assert!(matches!(
        map_input(key(Key::PageDown)),
        Event::UIScrollPageDown()
    ));
}

#[test]
fn it_passes_through_typing() {
    match map_input(key(Key::Char('n'))) {
        Event::KeyboardCharInput(input) => assert!(matches!(input.key, Key::Char('n'))),
        _ => panic!("expected char input"),
    }
}
