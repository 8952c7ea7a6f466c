use super::*;

#[test]
fn editing_handles_multibyte_chars() {
    let mut input = Input::default();
    for c in "Åsa".chars() {
        input.insert_char(c);
    }
    assert_eq!(input.buf, "Åsa");
    assert_eq!(input.cursor, 3);

    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "sa");
    assert_eq!(input.cursor, 0);

    input.insert_char('Ö');
    input.delete();
    assert_eq!(input.buf, "Öa");

    input.move_right();
    input.move_right();
    input.move_right();
    assert_eq!(input.cursor, 2);
}

#[test]
fn set_and_clear_move_the_cursor() {
    let mut input = Input::default();
    input.set("040-1234");
    assert_eq!(input.cursor, 8);
    input.backspace();
    assert_eq!(input.buf, "040-123");

    input.clear();
    assert!(input.buf.is_empty());
    assert_eq!(input.cursor, 0);
    input.backspace();
    input.delete();
    assert!(input.buf.is_empty());
}
