mod traits;

pub use traits::CharacterPhysicsBackend;

#[cfg(feature = "avian3d")]
pub use crate::avian::Avian3dBackend;
