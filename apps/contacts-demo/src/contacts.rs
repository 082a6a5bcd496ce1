//! Contacts grouped by the first letter of their name.

use std::cell::RefCell;
use std::rc::Rc;

use stickylist_core::{
    DataSetObservable, HeaderId, SectionIndexer, StickyListHeadersAdapter, View,
};

pub const ROW_HEIGHT: f32 = 32.0;
pub const HEADER_HEIGHT: f32 = 24.0;

pub struct ContactsAdapter {
    names: RefCell<Vec<String>>,
    observable: DataSetObservable,
}

impl ContactsAdapter {
    pub fn new<I, S>(names: I) -> Rc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_by_key(|name| name.to_lowercase());
        Rc::new(Self {
            names: RefCell::new(names),
            observable: DataSetObservable::new(),
        })
    }

    pub fn name(&self, position: usize) -> Option<String> {
        self.names.borrow().get(position).cloned()
    }

    /// Inserts a contact in sorted order and notifies the list.
    pub fn add(&self, name: impl Into<String>) -> usize {
        let name = name.into();
        let position = {
            let mut names = self.names.borrow_mut();
            let key = name.to_lowercase();
            let position = names.partition_point(|existing| existing.to_lowercase() <= key);
            names.insert(position, name);
            position
        };
        self.observable.notify_changed();
        position
    }

    fn letter(&self, position: usize) -> char {
        self.names
            .borrow()
            .get(position)
            .and_then(|name| name.chars().next())
            .map_or('#', |c| c.to_ascii_uppercase())
    }

    fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = (0..self.count()).map(|p| self.letter(p)).collect();
        letters.dedup();
        letters
    }
}

/// Section id of a letter.
pub fn letter_id(letter: char) -> HeaderId {
    HeaderId::from(u32::from(letter))
}

impl StickyListHeadersAdapter for ContactsAdapter {
    fn count(&self) -> usize {
        self.names.borrow().len()
    }

    fn row_view(&self, position: usize, convert_view: Option<View>) -> View {
        let view = convert_view.unwrap_or_else(|| View::checkable(ROW_HEIGHT));
        view.set_label(self.name(position).unwrap_or_default());
        view
    }

    fn header_id(&self, position: usize) -> HeaderId {
        letter_id(self.letter(position))
    }

    fn header_view(&self, position: usize, convert_view: Option<View>) -> View {
        let view = convert_view.unwrap_or_else(|| View::new(HEADER_HEIGHT));
        view.set_label(self.letter(position).to_string());
        view
    }

    fn data_set_observable(&self) -> Option<&DataSetObservable> {
        Some(&self.observable)
    }

    fn section_indexer(&self) -> Option<&dyn SectionIndexer> {
        Some(self)
    }
}

impl SectionIndexer for ContactsAdapter {
    fn sections(&self) -> Vec<String> {
        self.letters().into_iter().map(String::from).collect()
    }

    fn position_for_section(&self, section: usize) -> usize {
        let Some(letter) = self.letters().get(section).copied() else {
            return self.count().saturating_sub(1);
        };
        (0..self.count())
            .find(|&position| self.letter(position) == letter)
            .unwrap_or(0)
    }

    fn section_for_position(&self, position: usize) -> usize {
        let letter = self.letter(position);
        self.letters()
            .iter()
            .position(|&candidate| candidate == letter)
            .unwrap_or(0)
    }
}

pub fn sample_names() -> Vec<&'static str> {
    vec![
        "Ada", "Alan", "Alonzo", "Barbara", "Bjarne", "Brian", "Charles", "Claude", "Dennis",
        "Donald", "Edsger", "Frances", "Grace", "Guido", "Hedy", "Ivan", "John", "Ken", "Leslie",
        "Linus", "Margaret", "Niklaus", "Radia", "Robin", "Tony",
    ]
}
