pub mod geometry {
    pub mod circle;
    pub mod point;
    pub mod segment;

    pub use circle::Circle;
    pub use point::Point;
    pub use segment::Segment;
}

pub mod assembler;
pub mod cancel;
pub mod config;
pub mod darkness;
pub mod distancer;
pub mod engine;
pub mod error;
pub mod field;
mod float;
pub mod generation;
pub mod grid;
pub mod pins;
pub mod sampler;
pub mod scheduler;
pub mod verboser;

pub use assembler::ResultAssembler;
pub use cancel::CancelToken;
pub use config::{Config, Filter, Params, ScoreMode};
pub use darkness::{Darkness, FlatDarkness};
pub use engine::{Engine, Task};
pub use error::{DecodeError, Error, ParameterError};
pub use field::DarknessField;
pub use float::Float;
pub use generation::{Completion, Generation, Line};
pub use grid::Grid;
pub use pins::PinLayout;
pub use sampler::LineSampler;
pub use scheduler::{GreedyScheduler, RunState, Step};

use num_traits::AsPrimitive;

/// Turns an encoded image into an ordered sequence of threads.
///
/// Every parameter is checked before the image is decoded. The run stops
/// after `config.num_lines` threads, when no thread relieves any remaining
/// darkness, or when `cancel` fires; [`Generation::completion`] tells which.
pub fn generate<S: Float>(
    image: &[u8],
    config: &Config,
    verboser: &mut impl verboser::Verboser,
    cancel: &CancelToken,
) -> Result<Generation<S>, Error>
where
    usize: AsPrimitive<S>,
    u8: AsPrimitive<S>,
{
    let params = config.validate()?;
    let field = DarknessField::build(image, config.max_resolution, config.filter, verboser)?;
    let target = config.target.unwrap_or(*field.source_grid());
    generate_from_field(field, &params, config.score, target, verboser, cancel)
        .map_err(Error::from)
}

/// Runs the search on an already built field.
pub fn generate_from_field<S: Float>(
    mut field: DarknessField<S>,
    params: &Params,
    score: ScoreMode,
    target: Grid,
    verboser: &mut impl verboser::Verboser,
    cancel: &CancelToken,
) -> Result<Generation<S>, ParameterError>
where
    usize: AsPrimitive<S>,
{
    let working = *field.grid();
    tracing::info!(
        pins = params.num_points(),
        lines = params.num_lines(),
        weight = params.weight(),
        width = working.width,
        height = working.height,
        "starting generation"
    );
    let layout = PinLayout::<S>::inscribed(params.num_points(), working, verboser)?;
    let sampler = LineSampler::new(layout.pins(), working, score);
    let mut scheduler = GreedyScheduler::new(
        &sampler,
        params.distancer,
        FlatDarkness(params.weight().as_()),
    );
    let (steps, completion) = scheduler.run(&mut field, params.num_lines(), verboser, cancel);

    let assembler = ResultAssembler::new(working, target);
    let lines = assembler.assemble(&steps, layout.pins());
    tracing::info!(lines = lines.len(), ?completion, "generation done");
    Ok(Generation::new(
        lines,
        completion,
        working,
        target,
        assembler.scale_all(layout.pins()),
    ))
}
