//! Normalized record types for the classroom API.
//!
//! The upstream classroom service returns loosely shaped JSON. Everything in
//! this crate is the *output* side of that normalization:
//! - [`ProfileSummary`]: who a person is (always carries a non-empty id)
//! - [`StatusItem`] and [`Comment`]: the status feed
//! - [`ClassroomMember`]: a profile plus directory contact fields
//!
//! Records are plain values. Two statuses written by the same person carry
//! two equal but independent [`ProfileSummary`] copies.

mod member;
mod profile;
mod status;

pub use member::ClassroomMember;
pub use profile::{ClassroomCompany, ClassroomSchool, ClassroomTeacher, ProfileSummary};
pub use status::{Comment, StatusItem};
