//! Node sizes and title anchors.
//!
//! The layout engine only sees a [`LayoutInput`] per node. This module decides
//! what goes into it: a live measurement from a [`MeasurementProvider`] when
//! the renderer has one, otherwise a deterministic estimate from the node's
//! content, plus the per-kind anchor offset from an [`AnchorProvider`].
//!
//! Whether a live measurement is still fresh is up to whoever provides it.

use std::{
    collections::HashMap,
    hash::BuildHasher,
};

use log::trace;
use serde::{Deserialize, Serialize};

use mindtree_core::{
    geometry::Size,
    identifier::Id,
    node::{NodeContent, NodeKind},
};

use crate::{config::SizingConfig, layout::LayoutInput};

/// Source of rendered node sizes.
pub trait MeasurementProvider {
    /// Current rendered size of `id`, or `None` when it has not been measured.
    fn measure(&self, id: Id) -> Option<Size>;
}

impl<S: BuildHasher> MeasurementProvider for HashMap<Id, Size, S> {
    fn measure(&self, id: Id) -> Option<Size> {
        self.get(&id).copied()
    }
}

impl<M: MeasurementProvider + ?Sized> MeasurementProvider for &M {
    fn measure(&self, id: Id) -> Option<Size> {
        (**self).measure(id)
    }
}

/// Provider for when nothing has been rendered yet: every size is estimated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasurements;

impl MeasurementProvider for NoMeasurements {
    fn measure(&self, _id: Id) -> Option<Size> {
        None
    }
}

/// Source of title anchor offsets, one per node kind.
pub trait AnchorProvider {
    fn anchor_offset(&self, kind: NodeKind) -> f32;
}

/// Fixed anchor offsets for the two node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorOffsets {
    input: f32,
    answer: f32,
}

impl AnchorOffsets {
    pub fn new(input: f32, answer: f32) -> Self {
        Self { input, answer }
    }
}

impl Default for AnchorOffsets {
    fn default() -> Self {
        Self {
            input: 25.0,
            answer: 28.0,
        }
    }
}

impl AnchorProvider for AnchorOffsets {
    fn anchor_offset(&self, kind: NodeKind) -> f32 {
        match kind {
            NodeKind::Input => self.input,
            NodeKind::Answer => self.answer,
        }
    }
}

/// Deterministic size estimate for nodes that have not been measured.
///
/// Input nodes get a fixed size. Answer nodes widen with their text up to
/// `answer_max_width`, then grow one line at a time:
///
/// ```text
/// width  = clamp(len * width_per_char, answer_min_width, answer_max_width)
/// height = max(ceil(len / chars_per_line) * line_height + vertical_padding,
///              answer_min_height)
/// ```
///
/// The same kind and length always give the same, strictly positive size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeEstimator {
    input_size: Size,
    answer_min_width: f32,
    answer_max_width: f32,
    width_per_char: f32,
    chars_per_line: usize,
    line_height: f32,
    vertical_padding: f32,
    answer_min_height: f32,
}

impl Default for SizeEstimator {
    fn default() -> Self {
        Self {
            input_size: Size::new(600.0, 150.0),
            answer_min_width: 600.0,
            answer_max_width: 1000.0,
            width_per_char: 8.0,
            chars_per_line: 60,
            line_height: 25.0,
            vertical_padding: 80.0,
            answer_min_height: 150.0,
        }
    }
}

impl SizeEstimator {
    /// Estimates the size of a node of `kind` whose content is `len` chars long.
    pub fn estimate(&self, kind: NodeKind, len: usize) -> Size {
        let size = match kind {
            NodeKind::Input => self.input_size,
            NodeKind::Answer => {
                let width = (len as f32 * self.width_per_char)
                    .max(self.answer_min_width)
                    .min(self.answer_max_width);
                let lines = len.div_ceil(self.chars_per_line.max(1));
                let height = (lines as f32 * self.line_height + self.vertical_padding)
                    .max(self.answer_min_height);
                Size::new(width, height)
            }
        };
        // Never empty, even with a zeroed configuration.
        size.clamp_degenerate(crate::layout::MIN_EXTENT)
    }

    pub fn estimate_content(&self, content: &NodeContent) -> Size {
        self.estimate(content.kind(), content.content_len())
    }
}

/// Turns node content plus an optional live measurement into a [`LayoutInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct SizeResolver {
    estimator: SizeEstimator,
    anchors: AnchorOffsets,
    min_measured: Size,
}

impl Default for SizeResolver {
    fn default() -> Self {
        Self::from_config(&SizingConfig::default())
    }
}

impl SizeResolver {
    /// Live measurements smaller than `min_measured` are raised to it.
    pub fn new(estimator: SizeEstimator, anchors: AnchorOffsets, min_measured: Size) -> Self {
        Self {
            estimator,
            anchors,
            min_measured,
        }
    }

    pub fn from_config(config: &SizingConfig) -> Self {
        Self::new(config.estimator(), config.anchors(), config.min_measured())
    }

    pub fn estimator(&self) -> &SizeEstimator {
        &self.estimator
    }

    pub fn anchors(&self) -> &AnchorOffsets {
        &self.anchors
    }

    /// Size to lay `id` out with: its measurement if `provider` has one,
    /// floored to the minimum measured size, else the content estimate.
    pub fn resolve(
        &self,
        id: Id,
        content: &NodeContent,
        provider: &dyn MeasurementProvider,
    ) -> Size {
        match provider.measure(id) {
            Some(measured) => measured.max(self.min_measured),
            None => {
                let estimate = self.estimator.estimate_content(content);
                trace!(node:% = id, estimate:?; "No measurement, using estimate");
                estimate
            }
        }
    }

    pub fn layout_input(
        &self,
        id: Id,
        content: &NodeContent,
        provider: &dyn MeasurementProvider,
    ) -> LayoutInput {
        let kind = content.kind();
        LayoutInput::new(
            id,
            kind,
            self.resolve(id, content, provider),
            self.anchors.anchor_offset(kind),
        )
    }
}
