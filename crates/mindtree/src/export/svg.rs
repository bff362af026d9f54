//! SVG rendering of laid-out mind maps.

use std::{fs, path::PathBuf};

use log::{debug, info};
use svg::{
    self,
    node::{Text as SvgText, element as svg_element, element::path::Data},
};

use mindtree_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    node::NodeContent,
    orientation::Orientation,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{Layout, PositionedNode},
    mindmap::MindMap,
};

const FONT_FAMILY: &str = "sans-serif";
const TITLE_FONT_SIZE: f32 = 18.0;
const BODY_FONT_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 25.0;
const TEXT_INSET: f32 = 16.0;
const CHARS_PER_LINE: usize = 60;

/// SVG exporter.
///
/// Renders one rounded box per node and a curved connector per edge, from the
/// middle of the parent's trailing edge to the child's anchor point.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    node_fill: Color,
    input_fill: Color,
    stroke: Color,
    margin: f32,
    output_path: Option<PathBuf>,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            background: None,
            node_fill: Color::new("#ffffff").unwrap_or_default(),
            input_fill: Color::new("#f3f4f6").unwrap_or_default(),
            stroke: Color::new("#94a3b8").unwrap_or_default(),
            margin: 40.0,
            output_path: None,
        }
    }
}

impl Svg {
    /// Creates an exporter using the colors from `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color is invalid.
    pub fn from_style(style: &StyleConfig) -> Result<Self, Error> {
        let mut svg = Self::default();
        svg.background = style.background_color().map_err(Error::Render)?;
        if let Some(fill) = style.node_color().map_err(Error::Render)? {
            svg.node_fill = fill;
        }
        if let Some(stroke) = style.edge_color().map_err(Error::Render)? {
            svg.stroke = stroke;
        }
        Ok(svg)
    }

    /// Sets the file [`Exporter::export_mind_map`] writes to.
    pub fn set_output_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.output_path = Some(path.into());
        self
    }

    /// Renders the mind map to an SVG document.
    pub fn render_document(&self, map: &MindMap, layout: &Layout) -> svg::Document {
        let content_bounds = layout.bounds().unwrap_or_default();
        let svg_size = Size::new(
            content_bounds.width() + self.margin * 2.0,
            content_bounds.height() + self.margin * 2.0,
        );

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());
        let doc = self.add_background(doc, svg_size);

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                self.margin - content_bounds.min_x(),
                self.margin - content_bounds.min_y()
            ),
        );

        // Connectors first so boxes are drawn over their ends.
        for edge in map.edges() {
            if let (Some(parent), Some(child)) = (layout.get(edge.source()), layout.get(edge.target())) {
                main_group = main_group.add(self.render_connector(parent, child, layout.orientation()));
            }
        }

        for positioned in layout.iter() {
            if let Some(node) = map.get(positioned.id()) {
                main_group = main_group.add(self.render_node(positioned, node.content()));
            }
        }

        debug!(nodes = layout.len(), edges = map.edges().len(); "Rendered SVG document");
        doc.add(main_group)
    }

    /// Renders the mind map to an SVG string.
    pub fn render_string(&self, map: &MindMap, layout: &Layout) -> String {
        self.render_document(map, layout).to_string()
    }

    fn add_background(&self, doc: svg::Document, size: Size) -> svg::Document {
        let Some(color) = &self.background else {
            return doc;
        };
        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", color);
        doc.add(background)
    }

    fn render_connector(
        &self,
        parent: &PositionedNode,
        child: &PositionedNode,
        orientation: Orientation,
    ) -> svg_element::Path {
        let start = parent.trailing_edge();
        let end = child.anchor_point();

        // Leave and enter both nodes along the growth axis.
        let mid = (orientation.growth_of(start) + orientation.growth_of(end)) / 2.0;
        let c1 = orientation.compose(orientation.cross_of(start), mid);
        let c2 = orientation.compose(orientation.cross_of(end), mid);

        let data = Data::new()
            .move_to(vec![start.x(), start.y()])
            .cubic_curve_to(vec![c1.x(), c1.y(), c2.x(), c2.y(), end.x(), end.y()]);

        svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", &self.stroke)
            .set("stroke-width", 2)
    }

    fn render_node(&self, positioned: &PositionedNode, content: &NodeContent) -> svg_element::Group {
        let bounds = positioned.bounds();
        let fill = match content {
            NodeContent::Input => &self.input_fill,
            NodeContent::Answer(_) => &self.node_fill,
        };

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", 8)
            .set("fill", fill)
            .set("stroke", &self.stroke)
            .set("stroke-width", 1.5);
        if matches!(content, NodeContent::Input) {
            rect = rect.set("stroke-dasharray", "6 4");
        }

        let mut group = svg_element::Group::new()
            .set("data-id", positioned.id().to_string())
            .add(rect);

        let title_position = Point::new(
            bounds.min_x() + TEXT_INSET,
            bounds.min_y() + positioned.anchor_offset(),
        );
        match content {
            NodeContent::Input => {
                group = group.add(text_line(title_position, TITLE_FONT_SIZE, "Ask a follow-up question"));
            }
            NodeContent::Answer(answer) => {
                group = group.add(
                    text_line(title_position, TITLE_FONT_SIZE, answer.question())
                        .set("font-weight", "bold"),
                );
                let max_lines = body_line_capacity(bounds);
                for (idx, line) in excerpt(answer.text(), max_lines).iter().enumerate() {
                    let position = title_position.add_point(Point::new(0.0, LINE_HEIGHT * (idx + 1) as f32));
                    group = group.add(text_line(position, BODY_FONT_SIZE, line));
                }
            }
        }

        group
    }
}

impl Exporter for Svg {
    fn export_mind_map(&mut self, map: &MindMap, layout: &Layout) -> Result<(), Error> {
        let path = self
            .output_path
            .clone()
            .ok_or_else(|| Error::Render("No output path set for SVG export".to_string()))?;

        info!(path = path.display().to_string(); "Writing SVG");
        fs::write(&path, self.render_string(map, layout)).map_err(Error::Io)
    }
}

fn text_line(position: Point, font_size: f32, content: &str) -> svg_element::Text {
    svg_element::Text::new("")
        .set("x", position.x())
        .set("y", position.y())
        .set("dominant-baseline", "central")
        .set("font-family", FONT_FAMILY)
        .set("font-size", font_size)
        .add(SvgText::new(content))
}

/// Number of body lines that fit under the title.
fn body_line_capacity(bounds: Bounds) -> usize {
    let free = bounds.height() - LINE_HEIGHT * 2.0;
    if free <= 0.0 {
        0
    } else {
        (free / LINE_HEIGHT) as usize
    }
}

/// Wraps `text` into lines of at most [`CHARS_PER_LINE`] chars, keeping at most
/// `max_lines` and marking a cut with an ellipsis.
fn excerpt(text: &str, max_lines: usize) -> Vec<String> {
    let chars: Vec<char> = text.split_whitespace().collect::<Vec<_>>().join(" ").chars().collect();
    let mut lines: Vec<String> = chars
        .chunks(CHARS_PER_LINE)
        .map(|chunk| chunk.iter().collect())
        .collect();

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}
