//! Domain logic - pure versioning rules independent of input handling

pub mod bump;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use bump::BumpClass;
pub use commit::{CommitRecord, CommitType, Footer};
pub use prerelease::{attach_prerelease, Channel, Prerelease, ReleaseChannel};
pub use tag::TagPattern;
pub use version::Version;
