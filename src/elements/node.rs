use egui::Pos2;

use super::{Class, Classes};

/// Stores properties of a node.
#[derive(Clone, Debug)]
pub struct Node<N: Clone> {
    /// Client data
    payload: N,

    label: String,
    location: Pos2,

    hidden: bool,
    selected: bool,
    dragged: bool,

    classes: Classes,
}

impl<N: Clone> Node<N> {
    pub fn new(payload: N) -> Self {
        Self {
            payload,
            label: String::new(),
            location: Pos2::ZERO,
            hidden: false,
            selected: false,
            dragged: false,
            classes: Classes::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_location(mut self, location: Pos2) -> Self {
        self.location = location;
        self
    }

    pub fn payload(&self) -> &N {
        &self.payload
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn set_location(&mut self, location: Pos2) {
        self.location = location;
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn dragged(&self) -> bool {
        self.dragged
    }

    pub fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
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
}
