pub mod agent;
pub mod checkpoint;
pub mod collaborators;
pub mod course;
pub mod episode_loop;
pub mod error;
pub mod headless;
pub mod lifecycle;
pub mod observation;
pub mod orientation;
pub mod policy;
pub mod reward;
pub mod smoothing;

pub use agent::*;
pub use collaborators::*;
pub use episode_loop::*;
pub use error::*;
pub use policy::*;
