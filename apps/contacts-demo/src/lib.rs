//! Scripted walk through a sticky, collapsible contacts list.
//!
//! The script drives the list with synthetic touches and renders each frame
//! through [`TextCanvas`], so the whole session can be followed on stdout.

pub mod contacts;
pub mod text_canvas;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use stickylist_core::{AttributeSet, HeaderClick, HeaderId, MotionEvent, StickyListConfig};
use stickylist_expandable::ExpandableStickyList;

use crate::contacts::{letter_id, sample_names, ContactsAdapter, HEADER_HEIGHT};
use crate::text_canvas::TextCanvas;

pub const WIDTH: f32 = 320.0;
pub const HEIGHT: f32 = 240.0;

type ContactsList = ExpandableStickyList<ContactsAdapter>;

pub fn demo_attributes() -> AttributeSet {
    AttributeSet::new()
        .with("paddingTop", "8px")
        .with("divider", "#FFCCCCCC")
        .with("dividerHeight", "1px")
        .with("choiceMode", "single")
}

/// Runs the scripted session, writing every frame to `out`.
pub fn run(out: &mut impl Write) -> anyhow::Result<()> {
    let config = StickyListConfig::from_attributes(&demo_attributes())?;
    let contacts = ContactsAdapter::new(sample_names());

    let mut list = ContactsList::new(config);
    list.set_size(WIDTH, HEIGHT);
    list.set_adapter(Some(contacts.clone()));
    list.layout();

    // Header clicks arrive mid-dispatch; toggles are applied once it returns.
    let pending: Rc<RefCell<Vec<HeaderId>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = pending.clone();
    list.controller_mut()
        .set_on_header_click_listener(Some(Rc::new(move |click: &HeaderClick| {
            log::info!(
                "header {} clicked at position {} (floating: {})",
                click.header.label(),
                click.item_position,
                click.currently_sticky
            );
            sink.borrow_mut().push(click.header_id);
        })));

    print_frame(out, &mut list, "initial layout")?;

    list.scroll_by(40.0);
    print_frame(out, &mut list, "scrolled 40px")?;

    if let Some(header) = list.controller().sticky_header().cloned() {
        let frame = header.frame();
        tap(&mut list, frame.x + 12.0, frame.top() + frame.height / 2.0);
        apply_header_clicks(out, &mut list, &pending)?;
        print_frame(out, &mut list, "after tapping the floating header")?;
    }

    let a = letter_id('A');
    if list.is_header_collapsed(a) {
        list.expand(a);
        writeln!(out, "expanded A")?;
        print_frame(out, &mut list, "section A expanded again")?;
    }

    if let Some((position, y)) = tappable_row(&list) {
        writeln!(
            out,
            "tap {}",
            contacts.name(position).unwrap_or_default()
        )?;
        tap(&mut list, 40.0, y);
        let checked: Vec<String> = list
            .controller()
            .checked_positions()
            .into_iter()
            .filter_map(|position| contacts.name(position))
            .collect();
        writeln!(out, "checked: {}", checked.join(", "))?;
        print_frame(out, &mut list, "after tapping a row")?;
    }

    let added = contacts.add("Barbara Liskov");
    list.layout();
    writeln!(out, "added Barbara Liskov at position {added}")?;
    print_frame(out, &mut list, "after adding a contact")?;

    if let Some(sections) = list.controller().sections() {
        writeln!(out, "sections: {}", sections.join(" "))?;
    }
    Ok(())
}

fn tap(list: &mut ContactsList, x: f32, y: f32) {
    let controller = list.controller_mut();
    controller.dispatch_touch_event(&MotionEvent::down(x, y));
    controller.dispatch_touch_event(&MotionEvent::up(x, y));
}

fn apply_header_clicks(
    out: &mut impl Write,
    list: &mut ContactsList,
    pending: &RefCell<Vec<HeaderId>>,
) -> anyhow::Result<()> {
    let clicked = std::mem::take(&mut *pending.borrow_mut());
    for header_id in clicked {
        list.toggle(header_id);
        let letter = char::from_u32(header_id as u32).unwrap_or('#');
        let state = if list.is_header_collapsed(header_id) {
            "collapsed"
        } else {
            "expanded"
        };
        writeln!(out, "{state} {letter}")?;
    }
    Ok(())
}

/// First row below the floating header that continues its section, with the
/// y of its middle.
fn tappable_row(list: &ContactsList) -> Option<(usize, f32)> {
    let controller = list.controller();
    let floor = controller.sticky_header_top() + HEADER_HEIGHT;
    (0..controller.list_child_count())
        .filter_map(|index| controller.list_child_at(index))
        .find_map(|child| {
            let compound = child.compound()?;
            if compound.has_header() || compound.row().is_gone() || child.top() < floor {
                return None;
            }
            Some((child.position(), (child.top() + child.bottom()) / 2.0))
        })
}

fn print_frame(out: &mut impl Write, list: &mut ContactsList, title: &str) -> anyhow::Result<()> {
    let mut canvas = TextCanvas::new();
    list.controller_mut().dispatch_draw(&mut canvas);
    writeln!(out, "-- {title} --")?;
    for line in canvas.take_lines() {
        writeln!(out, "{line}")?;
    }
    match list.controller().sticky_header() {
        Some(header) => writeln!(out, "floating: {}", header.label())?,
        None => writeln!(out, "floating: none")?,
    }
    writeln!(out)?;
    Ok(())
}
