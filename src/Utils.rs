//! different utility modules used throughout the project
/// tiny module to save solution into file
pub mod logger;
/// parse banded matrix and vectors of the SLAE task from text files
pub mod task_parser;
