//! Camera focus on a single node.
//!
//! When a node is created or selected the canvas zooms so that the node takes
//! up a comfortable share of the screen and pans so its title sits near the top.

use serde::{Deserialize, Serialize};

use mindtree_core::geometry::{Bounds, Point};

/// Where the camera should move to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusTarget {
    /// World point placed at the center of the screen.
    pub center: Point,
    pub zoom: f32,
}

/// Screen dimensions and the focus rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    screen_width: f32,
    screen_height: f32,
    max_zoom: f32,
    min_focus_zoom: f32,
    target_share: f32,
    top_margin: f32,
    min_node_width: f32,
}

impl Viewport {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            max_zoom: 1.5,
            min_focus_zoom: 0.8,
            target_share: 0.6,
            top_margin: 60.0,
            min_node_width: 600.0,
        }
    }

    /// Zoom used to focus a node `node_width` wide.
    ///
    /// The node should span `target_share` of the screen width, but the zoom
    /// never drops below `min_focus_zoom` and a closer current zoom (up to
    /// `max_zoom`) is kept.
    pub fn focus_zoom(&self, current_zoom: f32, node_width: f32) -> f32 {
        let node_width = node_width.max(self.min_node_width);
        let fitting = (self.screen_width * self.target_share / node_width).min(self.max_zoom);
        current_zoom
            .min(self.max_zoom)
            .max(fitting.max(self.min_focus_zoom))
    }

    /// Camera target that shows `node` with its top edge `top_margin` screen
    /// pixels below the top of the screen.
    pub fn focus(&self, node: Bounds, current_zoom: f32) -> FocusTarget {
        let width = node.width().max(self.min_node_width);
        let zoom = self.focus_zoom(current_zoom, width);
        let center = Point::new(
            node.min_x() + width / 2.0,
            node.min_y() + (self.screen_height / 2.0 - self.top_margin) / zoom,
        );
        FocusTarget { center, zoom }
    }
}
