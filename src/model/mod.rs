//! # Place Graph Model
//!
//! Plain data types shared by the stores, the loader, the engines and the
//! callers: places, edge records, square matrices and routes.
//!
//! Design rule: no I/O, no locking, no async in here.

pub mod place;
pub mod edge;
pub mod matrix;
pub mod route;

pub use place::PlaceId;
pub use edge::EdgeRecord;
pub use matrix::Matrix;
pub use route::{Connectivity, DirectEdge, Route};
