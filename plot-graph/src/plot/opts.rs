use plot_compute::numeric::DEFAULT_COMPLEX_TOLERANCE;

/// Options to use when sampling expressions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingOptions {
    /// The number of points to sample a curve at, when the request does not specify a resolution.
    ///
    /// The default value is `800`.
    pub curve_resolution: usize,

    /// The number of points to sample along each axis of a surface, when the request does not
    /// specify a resolution. The surface is sampled on a `n×n` mesh.
    ///
    /// The default value is `200`.
    pub surface_resolution: usize,

    /// The relative tolerance below which the imaginary part of a value is ignored. Points with a
    /// larger imaginary part are discarded as complex.
    ///
    /// The default value is `1e-12`.
    pub complex_tolerance: f64,

    /// Grids with more points than this are split into chunks of this size, which are evaluated
    /// in parallel.
    ///
    /// The default value is `16384`.
    pub parallel_threshold: usize,
}

/// The default options for sampling. Returns a [`SamplingOptions`] with the following values:
///
/// - [`curve_resolution`](SamplingOptions::curve_resolution): `800`
/// - [`surface_resolution`](SamplingOptions::surface_resolution): `200`
/// - [`complex_tolerance`](SamplingOptions::complex_tolerance): `1e-12`
/// - [`parallel_threshold`](SamplingOptions::parallel_threshold): `16384`
impl Default for SamplingOptions {
    fn default() -> SamplingOptions {
        SamplingOptions {
            curve_resolution: 800,
            surface_resolution: 200,
            complex_tolerance: DEFAULT_COMPLEX_TOLERANCE,
            parallel_threshold: 16384,
        }
    }
}

impl SamplingOptions {
    /// Set the default curve resolution. Returns an updated [`SamplingOptions`] for chaining.
    pub fn curve_resolution(mut self, curve_resolution: usize) -> Self {
        self.curve_resolution = curve_resolution;
        self
    }

    /// Set the default surface resolution. Returns an updated [`SamplingOptions`] for chaining.
    pub fn surface_resolution(mut self, surface_resolution: usize) -> Self {
        self.surface_resolution = surface_resolution;
        self
    }

    /// Set the complex tolerance. Returns an updated [`SamplingOptions`] for chaining.
    pub fn complex_tolerance(mut self, complex_tolerance: f64) -> Self {
        self.complex_tolerance = complex_tolerance;
        self
    }

    /// Set the size above which grids are evaluated in parallel chunks. Returns an updated
    /// [`SamplingOptions`] for chaining.
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}
