/// Represents graph interaction settings.
#[derive(Debug, Clone)]
pub struct SettingsInteraction {
    pub(crate) dragging_enabled: bool,
    pub(crate) node_tapping_enabled: bool,
}

impl Default for SettingsInteraction {
    fn default() -> Self {
        Self {
            dragging_enabled: true,
            node_tapping_enabled: true,
        }
    }
}

impl SettingsInteraction {
    /// Creates new [`SettingsInteraction`] with default values.
    /// ```
    /// use pathway_graph::SettingsInteraction;
    /// let settings = SettingsInteraction::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Node dragging. Dragging moves the node under the pointer; without it
    /// every primary drag pans the view.
    ///
    /// Default: `true`
    pub fn with_dragging_enabled(mut self, enabled: bool) -> Self {
        self.dragging_enabled = enabled;
        self
    }

    /// Emits [`crate::Event::NodeTap`] and [`crate::Event::BackgroundTap`] on clicks.
    ///
    /// Default: `true`
    pub fn with_node_tapping_enabled(mut self, enabled: bool) -> Self {
        self.node_tapping_enabled = enabled;
        self
    }
}

/// Represents graph navigation settings.
#[derive(Debug, Clone)]
pub struct SettingsNavigation {
    pub(crate) zoom_and_pan_enabled: bool,
    pub(crate) zoom_speed: f32,
    pub(crate) min_zoom: f32,
    pub(crate) max_zoom: f32,
    pub(crate) fit_padding: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            zoom_and_pan_enabled: true,
            zoom_speed: 0.1,
            min_zoom: 0.1,
            max_zoom: 4.,
            fit_padding: 50.,
        }
    }
}

impl SettingsNavigation {
    /// Creates new [`SettingsNavigation`] with default values.
    /// ```
    /// use pathway_graph::SettingsNavigation;
    /// let settings = SettingsNavigation::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom with mouse wheel or pinch, pan with mouse drag on the background.
    ///
    /// Default: `true`
    pub fn with_zoom_and_pan_enabled(mut self, enabled: bool) -> Self {
        self.zoom_and_pan_enabled = enabled;
        self
    }

    /// Relative zoom change per wheel step.
    ///
    /// Default: `0.1`
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Zoom range every camera change is clamped to.
    ///
    /// Default: `0.1..=4.0`
    pub fn with_zoom_range(mut self, min: f32, max: f32) -> Self {
        self.min_zoom = min.min(max);
        self.max_zoom = max.max(min);
        self
    }

    /// Padding in screen pixels kept around the graph when fitting it into view.
    ///
    /// Default: `50.0`
    pub fn with_fit_padding(mut self, padding: f32) -> Self {
        self.fit_padding = padding;
        self
    }

    pub fn zoom_range(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn fit_padding(&self) -> f32 {
        self.fit_padding
    }

    pub(crate) fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
