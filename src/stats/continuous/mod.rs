//! Continuous probability distributions.

mod arcsine;
mod beta;
mod burr;
mod chi;
mod chi_squared;
mod dirichlet;
mod exponential;
mod fisher_snedecor;
mod gamma;
mod gumbel;
mod inverse_normal;
mod laplace;
mod log_uniform;
mod logistic;
mod lognormal;
mod non_central_chi_squared;
mod non_central_student_t;
mod normal;
mod rayleigh;
mod rice;
mod triangular;
mod truncated_normal;
mod uniform;
mod weibull;

pub(crate) mod special;

pub use arcsine::Arcsine;
pub use beta::Beta;
pub use burr::Burr;
pub use chi::Chi;
pub use chi_squared::ChiSquared;
pub use dirichlet::Dirichlet;
pub use exponential::Exponential;
pub use fisher_snedecor::FisherSnedecor;
pub use gamma::Gamma;
pub use gumbel::Gumbel;
pub use inverse_normal::InverseNormal;
pub use laplace::Laplace;
pub use log_uniform::LogUniform;
pub use logistic::Logistic;
pub use lognormal::LogNormal;
pub use non_central_chi_squared::NonCentralChiSquared;
pub use non_central_student_t::NonCentralStudentT;
pub use normal::Normal;
pub use rayleigh::Rayleigh;
pub use rice::Rice;
pub use triangular::Triangular;
pub use truncated_normal::TruncatedNormal;
pub use uniform::Uniform;
pub use weibull::Weibull;
