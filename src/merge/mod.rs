pub mod merge_engine;
