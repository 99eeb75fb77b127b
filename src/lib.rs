pub mod completion;
pub mod config;
pub mod consts;
pub mod error;
pub mod handler;
pub mod http;
pub mod lookup;
pub mod prompts;
pub mod request;
pub mod solver;
pub mod store;
pub mod subjects;
