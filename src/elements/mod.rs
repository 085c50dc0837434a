mod edge;
mod node;

pub use self::edge::Edge;
pub use self::node::Node;

use serde::{Deserialize, Serialize};

/// Visual class an element can carry on top of its base style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    /// Drawn with reduced opacity.
    Faded,
    /// Drawn with the highlighted stroke.
    Highlighted,
}

/// Small set of classes attached to an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classes(Vec<Class>);

impl Classes {
    pub fn contains(&self, class: Class) -> bool {
        self.0.contains(&class)
    }

    pub fn add(&mut self, class: Class) {
        if !self.contains(class) {
            self.0.push(class);
        }
    }

    pub fn remove(&mut self, class: Class) {
        self.0.retain(|c| *c != class);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_behave_like_a_set() {
        let mut classes = Classes::default();
        classes.add(Class::Faded);
        classes.add(Class::Faded);
        assert!(classes.contains(Class::Faded));
        assert!(!classes.contains(Class::Highlighted));

        classes.remove(Class::Faded);
        assert!(classes.is_empty());
    }
}
