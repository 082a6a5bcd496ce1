use crate::contacts::{letter_id, ContactsAdapter};
use crate::text_canvas::TextCanvas;
use stickylist_core::{Canvas, Rect, SectionIndexer, StickyListHeadersAdapter, View};

fn transcript() -> String {
    let mut out = Vec::new();
    crate::run(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn contacts_are_sorted_and_grouped_by_letter() {
    let contacts = ContactsAdapter::new(["bob", "Alice", "anna", "Carl"]);

    let names: Vec<_> = (0..contacts.count()).filter_map(|p| contacts.name(p)).collect();
    assert_eq!(names, ["Alice", "anna", "bob", "Carl"]);
    assert_eq!(contacts.header_id(0), letter_id('A'));
    assert_eq!(contacts.header_id(1), letter_id('A'));
    assert_eq!(contacts.header_id(2), letter_id('B'));
    assert_eq!(contacts.sections(), ["A", "B", "C"]);
    assert_eq!(contacts.position_for_section(2), 3);
    assert_eq!(contacts.section_for_position(1), 0);
}

#[test]
fn added_contact_lands_in_sorted_position() {
    let contacts = ContactsAdapter::new(["Ada", "Barbara", "Claude"]);

    assert_eq!(contacts.add("Barbara Liskov"), 2);
    assert_eq!(contacts.add("Zed"), 4);
    assert_eq!(contacts.name(2).as_deref(), Some("Barbara Liskov"));
}

#[test]
fn text_canvas_clips_and_marks_checked_rows() {
    let mut canvas = TextCanvas::new();
    let row = View::checkable(32.0);
    row.set_label("Ada");
    row.set_checked(true);

    canvas.save();
    canvas.clip_rect(Rect::new(0.0, 10.0, 100.0, 100.0));
    canvas.draw_view(&row, Rect::new(0.0, 0.0, 100.0, 32.0));
    canvas.draw_view(&row, Rect::new(0.0, 200.0, 100.0, 32.0));
    canvas.restore();
    canvas.draw_view(&row, Rect::new(0.0, 200.0, 100.0, 32.0));

    let lines = canvas.take_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("10.0..32.0"));
    assert!(lines[0].ends_with("[x] Ada"));
    assert!(lines[1].contains("200.0..232.0"));
}

#[test]
fn scripted_session_floats_and_collapses_section_a() {
    let transcript = transcript();

    assert!(transcript.contains("-- initial layout --"));
    assert!(transcript.contains("floating: A"));
    assert!(transcript.contains("collapsed A"));
    assert!(transcript.contains("expanded A"));
}

#[test]
fn scripted_session_checks_the_tapped_row() {
    let transcript = transcript();
    let tapped = transcript
        .lines()
        .find_map(|line| line.strip_prefix("tap "))
        .expect("a row is tapped");

    assert!(transcript.contains(&format!("checked: {tapped}")));
    assert!(transcript.contains("added Barbara Liskov at position 4"));
    assert!(transcript.contains("sections: A B C D E F G H I J K L M N R T"));
}
