//! Parameter access and serializable parameter descriptors.

use crate::stats::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every distribution family provided by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    AliMikhailHaqCopula,
    Arcsine,
    Beta,
    Binomial,
    Burr,
    Chi,
    ChiSquared,
    ClaytonCopula,
    Dirichlet,
    Exponential,
    FisherSnedecor,
    FrankCopula,
    Gamma,
    Geometric,
    Gumbel,
    GumbelCopula,
    InverseNormal,
    Laplace,
    LogNormal,
    LogUniform,
    Logistic,
    NonCentralChiSquared,
    NonCentralStudentT,
    Normal,
    Poisson,
    Rayleigh,
    Rice,
    Triangular,
    TruncatedNormal,
    Uniform,
    Weibull,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Family tag plus flat parameter vector, in the family's parameter order.
///
/// ```
/// use estimr::stats::{Family, Normal, ParameterDescriptor, Parametric};
///
/// let d = Normal::new(1.0, 2.0).unwrap().descriptor();
/// assert_eq!(d.family, Family::Normal);
/// assert_eq!(d.parameters, vec![1.0, 2.0]);
/// let n = Normal::from_descriptor(&d).unwrap();
/// assert_eq!(n.sigma(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Distribution family
    pub family: Family,
    /// Parameter values, ordered as in [`Parametric::parameter_names`]
    pub parameters: Vec<f64>,
}

/// Uniform get/set access to a family's parameters as a flat vector.
pub trait Parametric: Sized {
    /// Family tag used in descriptors.
    const FAMILY: Family;

    /// Current parameters in canonical order.
    fn parameters(&self) -> Vec<f64>;

    /// Parameter names, aligned with [`parameters`](Self::parameters).
    fn parameter_names(&self) -> Vec<String>;

    /// Construct from a flat parameter vector, validating it.
    fn from_parameters(parameters: &[f64]) -> StatsResult<Self>;

    /// Replace every parameter at once.
    ///
    /// On error `self` is left unchanged, and on success every derived
    /// value is recomputed from the new parameters.
    fn set_parameters(&mut self, parameters: &[f64]) -> StatsResult<()> {
        *self = Self::from_parameters(parameters)?;
        Ok(())
    }

    /// Family tag plus current parameters.
    fn descriptor(&self) -> ParameterDescriptor {
        ParameterDescriptor {
            family: Self::FAMILY,
            parameters: self.parameters(),
        }
    }

    /// Rebuild from a descriptor of the same family.
    fn from_descriptor(descriptor: &ParameterDescriptor) -> StatsResult<Self> {
        if descriptor.family != Self::FAMILY {
            return Err(StatsError::invalid_argument(
                format!("{}::from_descriptor", Self::FAMILY),
                format!("descriptor is for family {}", descriptor.family),
            ));
        }
        Self::from_parameters(&descriptor.parameters)
    }
}

/// Check the length of a flat parameter vector.
pub(crate) fn expect_parameter_count(family: Family, parameters: &[f64], expected: usize) -> StatsResult<()> {
    if parameters.len() != expected {
        return Err(StatsError::DimensionMismatch {
            expected,
            got: parameters.len(),
            context: format!("{family} parameters"),
        });
    }
    Ok(())
}

/// Require a finite, strictly positive parameter.
pub(crate) fn require_positive(name: &str, value: f64) -> StatsResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(StatsError::invalid_parameter(name, value, "must be positive and finite"))
    }
}

/// Require a finite parameter.
pub(crate) fn require_finite(name: &str, value: f64) -> StatsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StatsError::invalid_parameter(name, value, "must be finite"))
    }
}

/// Owned names from a static list.
pub(crate) fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
