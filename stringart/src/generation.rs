use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Segment},
    Float, Grid,
};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Completion {
    /// Every requested line was laid down.
    Finished,
    /// No remaining thread could relieve any darkness.
    Exhausted,
    /// The run was cancelled; the lines laid so far are kept.
    Cancelled,
}

/// A thread between two pins, with its end points in target coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line<S> {
    pub from: usize,
    pub to: usize,
    pub segment: Segment<S>,
}

/// Outcome of a generation run, lines in winding order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation<S> {
    lines: Vec<Line<S>>,
    completion: Completion,
    working: Grid,
    target: Grid,
    pins: Vec<Point<S>>,
}

impl<S> Generation<S> {
    pub(crate) fn new(
        lines: Vec<Line<S>>,
        completion: Completion,
        working: Grid,
        target: Grid,
        pins: Vec<Point<S>>,
    ) -> Self {
        Self {
            lines,
            completion,
            working,
            target,
            pins,
        }
    }

    pub fn lines(&self) -> &[Line<S>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Resolution the search ran on.
    pub fn working_grid(&self) -> &Grid {
        &self.working
    }

    /// Coordinate space of [`Self::lines`] and [`Self::pins`].
    pub fn target_grid(&self) -> &Grid {
        &self.target
    }

    pub fn pins(&self) -> &[Point<S>] {
        &self.pins
    }

    /// Pins visited by the thread, starting pin included.
    pub fn pin_sequence(&self) -> Vec<usize> {
        match self.lines.first() {
            Some(first) => std::iter::once(first.from)
                .chain(self.lines.iter().map(|line| line.to))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl<S: Float> Generation<S> {
    /// Lines as `[[x1, y1], [x2, y2]]` pairs.
    pub fn coordinates(&self) -> Vec<[[S; 2]; 2]> {
        self.lines
            .iter()
            .map(|line| {
                let Segment { start, end } = line.segment;
                [[start.x, start.y], [end.x, end.y]]
            })
            .collect()
    }

    /// Human readable winding steps, one pin per line.
    pub fn build_instructions(&self) -> String {
        let mut instructions = String::new();
        instructions.extend(
            self.pin_sequence()
                .into_iter()
                .enumerate()
                .map(|(step, pin)| match step {
                    0 => format!("start {pin}\n"),
                    _ => format!("{step} {pin}\n"),
                }),
        );
        instructions
    }

    pub fn build_svg(&self, color: &str, thickness: f32) -> svg::Document {
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.target.width, self.target.height),
            )
            .set("preserveAspectRatio", "xMidYMid meet");
        for line in self.lines.iter() {
            let Segment { start, end } = line.segment;
            doc = doc.add(
                svg::node::element::Line::new()
                    .set("x1", format!("{:.4}", start.x))
                    .set("y1", format!("{:.4}", start.y))
                    .set("x2", format!("{:.4}", end.x))
                    .set("y2", format!("{:.4}", end.y))
                    .set("stroke", color)
                    .set("stroke-width", format!("{:.4}", thickness))
                    .set("stroke-linecap", "round"),
            );
        }
        doc
    }
}
