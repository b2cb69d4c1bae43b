/// Solver parameters for the fluid simulation.
///
/// Rates are deliberately unchecked: negative or zero values are accepted and
/// simply produce non-physical output. See [`SolverParams::non_physical`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Diffusion rate applied to velocity.
    pub viscosity: f64,
    /// Diffusion rate applied to density.
    pub diffusion: f64,
    /// Time step per `step()` call.
    pub time_rate: f64,
    pub diffuse_iter: usize,
    pub project_iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            viscosity: 1.0,
            diffusion: 1.0,
            time_rate: 0.01,
            diffuse_iter: 20,
            project_iter: 20,
        }
    }
}

impl SolverParams {
    pub fn new(diffusion: f64, viscosity: f64, time_rate: f64) -> Self {
        Self {
            viscosity,
            diffusion,
            time_rate,
            ..Self::default()
        }
    }

    /// Names of rate parameters that are negative or non-finite.
    pub fn non_physical(&self) -> Vec<&'static str> {
        [
            ("viscosity", self.viscosity),
            ("diffusion", self.diffusion),
            ("time_rate", self.time_rate),
        ]
        .into_iter()
        .filter(|(_, v)| is_non_physical(*v))
        .map(|(name, _)| name)
        .collect()
    }
}

pub(crate) fn is_non_physical(value: f64) -> bool {
    !value.is_finite() || value < 0.0
}

/// Log a warning for a non-physical value. The value is still used.
pub(crate) fn warn_if_non_physical(name: &str, value: f64) {
    if is_non_physical(value) {
        log::warn!("{} = {} is non-physical; expect unstable output", name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SolverParams::default();
        assert_eq!(params.viscosity, 1.0);
        assert_eq!(params.diffusion, 1.0);
        assert_eq!(params.time_rate, 0.01);
        assert_eq!(params.diffuse_iter, 20);
        assert_eq!(params.project_iter, 20);
    }

    #[test]
    fn test_new_argument_order() {
        let params = SolverParams::new(0.5, 0.25, 0.1);
        assert_eq!(params.diffusion, 0.5);
        assert_eq!(params.viscosity, 0.25);
        assert_eq!(params.time_rate, 0.1);
        assert_eq!(params.diffuse_iter, 20);
    }

    #[test]
    fn test_non_physical_lists_offenders() {
        assert!(SolverParams::default().non_physical().is_empty());
        assert!(SolverParams::new(0.0, 0.0, 0.0).non_physical().is_empty());

        let params = SolverParams::new(-1.0, f64::NAN, f64::INFINITY);
        assert_eq!(params.non_physical(), vec!["viscosity", "diffusion", "time_rate"]);

        let params = SolverParams::new(0.1, 0.1, -0.01);
        assert_eq!(params.non_physical(), vec!["time_rate"]);
    }
}
