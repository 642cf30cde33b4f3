//! Generation parameters.
//!
//! Counts and weight are kept as the signed integers an outer layer hands
//! over, so nonsensical values can be reported instead of wrapping around.
//! [`Config::validate`] runs every check before any work is done.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{distancer::PinDistancer, error::ParameterError, Grid};

/// Resampling filter used when the image is larger than the working
/// resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<Filter> for image::imageops::FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => Self::Nearest,
            Filter::Triangle => Self::Triangle,
            Filter::CatmullRom => Self::CatmullRom,
            Filter::Gaussian => Self::Gaussian,
            Filter::Lanczos3 => Self::Lanczos3,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "Nearest",
            Self::Triangle => "Triangle",
            Self::CatmullRom => "CatmullRom",
            Self::Gaussian => "Gaussian",
            Self::Lanczos3 => "Lanczos3",
        })
    }
}

/// How the darkness under a candidate thread is turned into a score.
///
/// `Total` is the plain sum of the covered cells. `Average` divides that sum
/// by the number of cells, so every chord of a uniform field ties; it is the
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreMode {
    /// Mean darkness per covered cell. Long and short threads compete on
    /// equal terms.
    #[default]
    Average,
    /// Sum of the darkness of every covered cell. Favours long threads
    /// through the middle of the circle.
    Total,
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Average => "Average",
            Self::Total => "Total",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of pins around the circle.
    pub num_points: i32,
    /// Number of threads to lay down.
    pub num_lines: i32,
    /// Darkness removed from every covered cell each time a thread is chosen.
    pub weight: i32,
    /// Longest side, in pixels, of the grid the search runs on.
    pub max_resolution: u32,
    pub filter: Filter,
    pub score: ScoreMode,
    /// Pins closer than this (by index, around the circle) are never linked.
    pub min_pin_distance: usize,
    /// Coordinate space of the returned lines. Defaults to the decoded
    /// image's own size.
    pub target: Option<Grid>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_points: 200,
            num_lines: 2000,
            weight: 20,
            max_resolution: 512,
            filter: Filter::default(),
            score: ScoreMode::default(),
            min_pin_distance: 0,
            target: None,
        }
    }
}

impl Config {
    pub fn new(num_points: i32, num_lines: i32, weight: i32) -> Self {
        Self {
            num_points,
            num_lines,
            weight,
            ..Default::default()
        }
    }

    pub fn with_max_resolution(mut self, max_resolution: u32) -> Self {
        self.max_resolution = max_resolution;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_score(mut self, score: ScoreMode) -> Self {
        self.score = score;
        self
    }

    pub fn with_min_pin_distance(mut self, min_pin_distance: usize) -> Self {
        self.min_pin_distance = min_pin_distance;
        self
    }

    pub fn with_target(mut self, target: Grid) -> Self {
        self.target = Some(target);
        self
    }

    pub fn validate(&self) -> Result<Params, ParameterError> {
        if self.num_points < 3 {
            return Err(ParameterError::TooFewPoints(self.num_points));
        }
        if self.num_lines < 0 {
            return Err(ParameterError::NegativeLineCount(self.num_lines));
        }
        if self.weight <= 0 {
            return Err(ParameterError::NonPositiveWeight(self.weight));
        }
        if self.max_resolution == 0 {
            return Err(ParameterError::ZeroResolution);
        }
        if self.target.is_some_and(|target| target.is_empty()) {
            return Err(ParameterError::ZeroTarget);
        }
        let num_points = self.num_points as usize;
        Ok(Params {
            num_points,
            num_lines: self.num_lines as usize,
            weight: self.weight as usize,
            distancer: PinDistancer::new(num_points, self.min_pin_distance)?,
        })
    }
}

/// Checked counterpart of [`Config`]; only obtainable through
/// [`Config::validate`].
#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub(crate) num_points: usize,
    pub(crate) num_lines: usize,
    pub(crate) weight: usize,
    pub(crate) distancer: PinDistancer,
}

impl Params {
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    pub fn weight(&self) -> usize {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let params = Config::default().validate().unwrap();
        assert_eq!(params.num_points(), 200);
        assert_eq!(params.num_lines(), 2000);
        assert_eq!(params.weight(), 20);
    }

    #[test]
    fn rejects_too_few_points() {
        assert_eq!(
            Config::new(2, 10, 5).validate().unwrap_err(),
            ParameterError::TooFewPoints(2)
        );
    }

    #[test]
    fn rejects_non_positive_weight() {
        assert_eq!(
            Config::new(10, 10, 0).validate().unwrap_err(),
            ParameterError::NonPositiveWeight(0)
        );
        assert_eq!(
            Config::new(10, 10, -3).validate().unwrap_err(),
            ParameterError::NonPositiveWeight(-3)
        );
    }

    #[test]
    fn rejects_negative_line_count() {
        assert_eq!(
            Config::new(10, -1, 5).validate().unwrap_err(),
            ParameterError::NegativeLineCount(-1)
        );
    }

    #[test]
    fn zero_lines_is_valid() {
        assert_eq!(Config::new(3, 0, 1).validate().unwrap().num_lines(), 0);
    }

    #[test]
    fn rejects_oversized_pin_distance() {
        let err = Config::new(10, 10, 5)
            .with_min_pin_distance(5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ParameterError::PinDistance(_)));
    }

    #[test]
    fn rejects_empty_target_and_resolution() {
        assert_eq!(
            Config::new(10, 10, 5)
                .with_target(Grid::new(0, 10))
                .validate()
                .unwrap_err(),
            ParameterError::ZeroTarget
        );
        assert_eq!(
            Config::new(10, 10, 5)
                .with_max_resolution(0)
                .validate()
                .unwrap_err(),
            ParameterError::ZeroResolution
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"num_points": 64, "score": "Total"}"#).unwrap();
        assert_eq!(config.num_points, 64);
        assert_eq!(config.score, ScoreMode::Total);
        assert_eq!(config.num_lines, 2000);
        assert_eq!(config.filter, Filter::Lanczos3);
    }
}
