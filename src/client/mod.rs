//! Client-side access to the board.
//!
//! [`BoardClient`] validates forms locally, calls a [`BoardBackend`], and
//! keeps a [`BoardCache`] in step with the results. Subscribers observe cache
//! changes through [`BoardCache::subscribe`].

mod backend;
mod board;
pub mod cache;
mod error;

pub use backend::BoardBackend;
pub use board::{BoardClient, ClientResult};
pub use cache::{
    BoardCache, CacheChange, CacheEvent, CacheSnapshot, InvalidateFilter, QueryKey, TaskScope,
};
pub use error::ClientError;
