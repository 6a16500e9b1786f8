//! Analyzer module - site quality scoring engine

pub mod batch;
pub mod contacts;
pub mod engine;
pub mod scoring;
pub mod signals;
pub mod summary;

pub use batch::BatchDriver;
pub use contacts::{extract_contacts, Contacts};
pub use engine::{AnalysisMode, AnalyzerOptions, SiteAnalyzer};
pub use scoring::{final_score, LeadClass, LeadThresholds};
pub use signals::{evaluate, Deduction, Evaluation, SignalContext, SIGNAL_RULES};
pub use summary::BatchSummary;
