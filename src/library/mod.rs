pub mod indexer;
pub mod matching;
pub mod storage;
