mod draw;
mod elements;
mod events;
mod graph;
mod graph_view;
mod metadata;
mod settings;
mod style;

pub mod layouts;

pub use self::elements::{Class, Classes, Edge, Node};
pub use self::events::{Event, ViewCommand};
pub use self::graph::{Graph, Neighborhood};
pub use self::graph_view::GraphView;
pub use self::layouts::{LayoutAlgorithm, LayoutRun};
pub use self::metadata::{fit, CameraAnimation, Metadata};
pub use self::settings::{SettingsInteraction, SettingsNavigation};
pub use self::style::StyleRules;
