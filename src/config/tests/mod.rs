//! Configuration merging and field resolution.

mod helpers;
