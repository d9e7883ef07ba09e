//! Article 22 compliance assessment for geostationary satellites against
//! ITU space network filings.

pub mod assessment;
pub mod config;
pub mod diligence;
pub mod error;
pub mod filings;
pub mod identity;
pub mod positions;
pub mod tables;
pub mod telemetry;

pub use assessment::{
    Assessment, AssessmentConfig, AssessmentRecord, AssessmentSnapshot, BatchReport,
    ComplianceAssessor, ShortlistEntry, Verdict, VerdictBasis,
};
pub use error::AppError;
