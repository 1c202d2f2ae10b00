use super::*;
use crate::error::ErrorType;
use crate::normalize::{KeyNormalizer, RawKeyTable};
use crate::term::Position;
use crate::test_utils::{MockTerminal, Op, ScriptedKeys};
use proptest::prelude::*;

fn type_text<T: TerminalBackend>(session: &mut EditSession<'_, T>, text: &str) {
    for c in text.chars() {
        session.process_key(Key::char(c)).unwrap();
    }
}

fn press<T: TerminalBackend>(session: &mut EditSession<'_, T>, control: ControlKey) {
    session.process_key(Key::Control(control)).unwrap();
}

fn config() -> LinerConfig {
    LinerConfig::default()
}

#[test]
fn test_typing_appends() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "hello");

    assert_eq!(session.position(), 5);
    assert_eq!(session.line().len(), 5);
    assert_eq!(session.state(), SessionState::Reading);
    drop(session);

    assert_eq!(term.row_text(0), "hello");
    assert_eq!(term.cursor, Position::new(5, 0));
    assert!(term.cursor_visible);
}

#[test]
fn test_return_terminates() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "ab");
    let state = session.process_key(Key::Control(ControlKey::Return)).unwrap();
    assert_eq!(state, SessionState::Terminating);

    // further keys are ignored
    session.process_key(Key::char('c')).unwrap();
    assert_eq!(session.finish("\n").unwrap(), "ab\n");
}

#[test]
fn test_insert_in_middle_repaints_tail() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "ac");
    press(&mut session, ControlKey::Left);
    session.process_key(Key::char('b')).unwrap();
    assert_eq!(session.position(), 2);
    drop(session);

    assert_eq!(term.row_text(0), "abc");
    assert_eq!(term.cursor, Position::new(2, 0));
}

#[test]
fn test_insert_repaints_only_after_insertion_point() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "abcd");
    press(&mut session, ControlKey::Left);
    press(&mut session, ControlKey::Left);
    let mark = session.terminal.ops.len();
    session.process_key(Key::char('X')).unwrap();
    drop(session);

    assert_eq!(
        term.ops[mark..].to_vec(),
        vec![
            Op::HideCursor,
            Op::Put(CharCell::from('X')),
            Op::Put(CharCell::from('c')),
            Op::Put(CharCell::from('d')),
            Op::SetCursor(Position::new(3, 0)),
            Op::ShowCursor,
        ]
    );
    assert_eq!(term.row_text(0), "abXcd");
}

#[test]
fn test_insert_at_last_column_forces_wrap() {
    let mut term = MockTerminal::new(10, 24).with_cursor(9, 0);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    session.process_key(Key::char('x')).unwrap();
    assert_eq!(session.position(), 1);
    drop(session);

    assert_eq!(
        term.ops,
        vec![
            Op::HideCursor,
            Op::Put(CharCell::from('x')),
            Op::Put(CharCell::from(' ')),
            Op::MoveLeft,
            Op::SetCursor(Position::new(0, 1)),
            Op::ShowCursor,
        ]
    );
    assert_eq!(term.cursor, Position::new(0, 1));
}

#[test]
fn test_editing_across_wrapped_rows() {
    let mut term = MockTerminal::new(5, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "abcdefg");
    for _ in 0..3 {
        press(&mut session, ControlKey::Left);
    }
    assert_eq!(session.position(), 4);
    assert_eq!(session.terminal.cursor, Position::new(4, 0));

    session.process_key(Key::char('X')).unwrap();
    assert_eq!(session.position(), 5);
    drop(session);

    assert_eq!(term.row_text(0), "abcdX");
    assert_eq!(term.row_text(1), "efg");
    assert_eq!(term.cursor, Position::new(0, 1));
}

#[test]
fn test_backspace_in_middle() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "abc");
    press(&mut session, ControlKey::Left);
    press(&mut session, ControlKey::Left);
    press(&mut session, ControlKey::Backspace);
    assert_eq!(session.position(), 0);
    assert_eq!(session.finish("").unwrap(), "bc\n");

    assert_eq!(term.row_text(0), "bc");
    assert_eq!(term.cursor, Position::new(2, 0));
}

#[test]
fn test_backspace_at_start_does_nothing() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    press(&mut session, ControlKey::Backspace);
    assert_eq!(session.position(), 0);
    drop(session);
    assert!(term.ops.is_empty());
}

#[test]
fn test_two_byte_char_then_backspace_is_empty() {
    let mut term = MockTerminal::new(80, 24);
    let mut keys = KeyNormalizer::new(&[0xC3, 0xA9, 127][..], RawKeyTable::Unix);
    let session = EditSession::new(&mut term, &config()).unwrap();
    let outcome = session.run(&mut keys, "").unwrap();

    assert_eq!(outcome.line, "\n");
    assert!(outcome.end_of_input);
    assert_eq!(term.row_text(0), "");
}

#[test]
fn test_run_reads_until_return() {
    let mut term = MockTerminal::new(80, 24);
    let mut keys = KeyNormalizer::new(&b"ab\nleftover"[..], RawKeyTable::Unix);
    let session = EditSession::new(&mut term, &config()).unwrap();
    let outcome = session.run(&mut keys, "\r\n").unwrap();

    assert_eq!(outcome.line, "ab\n");
    assert!(!outcome.end_of_input);
    assert_eq!(keys.next_key().unwrap(), Key::char('l'));
}

#[test]
fn test_left_at_start_does_not_move() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    press(&mut session, ControlKey::Left);
    assert_eq!(session.position(), 0);
    drop(session);
    assert!(term.movements().is_empty());
    assert_eq!(term.cursor, Position::new(0, 0));
}

#[test]
fn test_right_at_end_does_not_move() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    press(&mut session, ControlKey::Right);
    type_text(&mut session, "a");
    let mark = session.terminal.ops.len();
    press(&mut session, ControlKey::Right);
    assert_eq!(session.position(), 1);
    assert_eq!(session.terminal.ops.len(), mark);
}

#[test]
fn test_left_then_right_moves_physical_cursor() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "ab");
    press(&mut session, ControlKey::Left);
    assert_eq!(session.terminal.cursor, Position::new(1, 0));
    press(&mut session, ControlKey::Right);
    assert_eq!(session.terminal.cursor, Position::new(2, 0));
    assert_eq!(session.position(), 2);
}

#[test]
fn test_reserved_and_unhandled_keys_are_noops() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "ab");
    let mark = session.terminal.ops.len();

    for control in [
        ControlKey::SigInt,
        ControlKey::SigStop,
        ControlKey::Eof,
        ControlKey::Up,
        ControlKey::Down,
        ControlKey::Tab,
        ControlKey::Escape,
        ControlKey::Delete,
        ControlKey::RawOther(-40),
    ] {
        let state = session.process_key(Key::Control(control)).unwrap();
        assert_eq!(state, SessionState::Reading);
    }

    assert_eq!(session.position(), 2);
    assert_eq!(session.line().len(), 2);
    assert_eq!(session.terminal.ops.len(), mark);
}

#[test]
fn test_malformed_and_control_cells_are_ignored() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    session
        .process_key(Key::Printable(CharCell::from_bytes(&[0x80])))
        .unwrap();
    session.process_key(Key::char('\u{1}')).unwrap();
    assert_eq!(session.position(), 0);
    assert!(session.line().is_empty());
}

#[test]
fn test_cursor_is_requeried_for_every_insert() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "a");
    assert_eq!(session.terminal.cursor_queries, 2);
    type_text(&mut session, "b");
    assert_eq!(session.terminal.cursor_queries, 4);
}

#[test]
fn test_wide_characters_move_by_their_width() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "漢a");
    press(&mut session, ControlKey::Left);
    press(&mut session, ControlKey::Left);
    assert_eq!(session.terminal.cursor, Position::new(0, 0));

    press(&mut session, ControlKey::Right);
    assert_eq!(session.terminal.cursor, Position::new(2, 0));

    press(&mut session, ControlKey::Backspace);
    assert_eq!(session.terminal.cursor, Position::new(0, 0));
    assert_eq!(session.finish("").unwrap(), "a\n");
    assert_eq!(term.row_text(0), "a");
}

#[test]
fn test_buffer_growth_failure_aborts_without_drawing() {
    let mut term = MockTerminal::new(80, 24);
    let limited = config().with_initial_capacity(2).with_max_capacity(2);
    let mut session = EditSession::new(&mut term, &limited).unwrap();
    type_text(&mut session, "ab");
    let mark = session.terminal.ops.len();

    let err = session.process_key(Key::char('c')).unwrap_err();
    assert_eq!(err.kind, ErrorType::Allocation);
    assert_eq!(session.position(), 2);
    assert_eq!(session.line().len(), 2);
    assert_eq!(session.terminal.ops.len(), mark);
}

#[test]
fn test_finish_parks_cursor_after_line() {
    let mut term = MockTerminal::new(80, 24);
    let mut session = EditSession::new(&mut term, &config()).unwrap();
    type_text(&mut session, "abc");
    press(&mut session, ControlKey::Left);
    press(&mut session, ControlKey::Left);
    let mark = session.terminal.ops.len();
    let line = session.finish("\r\n").unwrap();
    assert_eq!(line, "abc\n");

    assert_eq!(
        term.ops[mark..].to_vec(),
        vec![
            Op::MoveRight,
            Op::MoveRight,
            Op::Put(CharCell::from('\r')),
            Op::Put(CharCell::from('\n')),
        ]
    );
}

#[test]
fn test_run_without_return_reports_end_of_input() {
    let mut term = MockTerminal::new(80, 24);
    let mut keys = ScriptedKeys::typed("ab");
    let session = EditSession::new(&mut term, &config()).unwrap();
    let outcome = session.run(&mut keys, "").unwrap();
    assert_eq!(outcome.line, "ab\n");
    assert!(outcome.end_of_input);
}

#[derive(Debug, Clone)]
enum Action {
    Type(char),
    Left,
    Right,
    Backspace,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => proptest::char::range('a', 'z').prop_map(Action::Type),
        1 => proptest::char::range('α', 'ω').prop_map(Action::Type),
        1 => Just(Action::Left),
        1 => Just(Action::Right),
        1 => Just(Action::Backspace),
    ]
}

proptest! {
    #[test]
    fn prop_session_matches_model(actions in proptest::collection::vec(action(), 0..60)) {
        let mut term = MockTerminal::new(200, 24);
        let mut session = EditSession::new(&mut term, &config()).unwrap();
        let mut model: Vec<char> = Vec::new();
        let mut cursor = 0usize;

        for action in actions {
            let key = match action {
                Action::Type(c) => {
                    model.insert(cursor, c);
                    cursor += 1;
                    Key::char(c)
                }
                Action::Left => {
                    cursor = cursor.saturating_sub(1);
                    Key::Control(ControlKey::Left)
                }
                Action::Right => {
                    cursor = (cursor + 1).min(model.len());
                    Key::Control(ControlKey::Right)
                }
                Action::Backspace => {
                    if cursor > 0 {
                        cursor -= 1;
                        model.remove(cursor);
                    }
                    Key::Control(ControlKey::Backspace)
                }
            };
            session.process_key(key).unwrap();

            prop_assert!(session.position() <= session.line().len());
            prop_assert_eq!(session.position(), cursor);
            prop_assert_eq!(session.terminal.cursor, Position::new(cursor as u16, 0));
        }

        let expected: String = model.iter().collect();
        prop_assert_eq!(session.finish("").unwrap(), format!("{}\n", expected));
        prop_assert_eq!(term.row_text(0), expected);
    }
}
