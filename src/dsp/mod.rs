/// Digital Signal Processing (DSP) module.
///
/// Building blocks for the decimation pipeline, operating on streams of
/// complex-valued samples.
///
/// # Modules
/// - `filters`: low-pass FIR design.
/// - `decimator`: stateful decimating FIR filter.
/// - `shifter`: continuous-phase complex frequency shift.
///
/// # Traits
/// - [`DspBlock`]: a generic DSP processing block that operates on slices of
///   complex samples.
use num_complex::Complex;

pub mod decimator;
pub mod filters;
pub mod shifter;

pub trait DspBlock {
    fn process(&mut self, data: &[Complex<f32>]) -> Vec<Complex<f32>>;
}
