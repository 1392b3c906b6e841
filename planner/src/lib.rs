pub mod branches;
pub mod command;
pub mod condor;
pub mod config;
pub mod exec;
pub mod paths;
pub mod plan;
pub mod sandbox;
pub mod segments;

#[cfg(test)]
mod condor_test;
#[cfg(test)]
mod segments_test;
