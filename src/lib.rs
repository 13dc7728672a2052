//! Type-safe packing of Vulkan specialization constants.
//!
//! [`ShaderSpecialization`] checks every access at compile time, [`SpecializationMap`] is
//! its run time counterpart. Both produce a [`vk::SpecializationInfo`](ash::vk::SpecializationInfo)
//! on demand that borrows the packed data.

pub mod error;
pub mod layout;
pub mod map;
pub mod pack;
pub mod packed;
pub mod scalar;

pub use error::{Result, SpecializationError};
pub use map::SpecializationMap;
pub use pack::{Field, ScalarList, ShaderSpecialization};
pub use scalar::{Scalar, ScalarKind};

pub mod prelude {
    pub use crate::error::*;
    pub use crate::map::*;
    pub use crate::pack::*;
    pub use crate::scalar::*;
}
