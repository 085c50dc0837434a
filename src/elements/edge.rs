use super::{Class, Classes};

/// Stores properties of an edge.
#[derive(Clone, Debug)]
pub struct Edge<E: Clone> {
    /// Client data
    payload: E,

    hidden: bool,
    classes: Classes,
}

impl<E: Clone> Edge<E> {
    pub fn new(payload: E) -> Self {
        Self {
            payload,
            hidden: false,
            classes: Classes::default(),
        }
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut Classes {
        &mut self.classes
    }

    pub fn faded(&self) -> bool {
        self.classes.contains(Class::Faded)
    }

    pub fn highlighted(&self) -> bool {
        self.classes.contains(Class::Highlighted)
    }
}
