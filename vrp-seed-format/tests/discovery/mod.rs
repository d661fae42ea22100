//! Contains tests which run the pipeline on generated problems.
