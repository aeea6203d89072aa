// src/lib.rs

//! compwatch: emails a digest of new Kaggle competitions

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
