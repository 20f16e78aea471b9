mod breeding;
mod grazing;
mod growth;
mod hunting;

/// Draws spent looking for a free cell next to a parent.
pub(in crate::world) const BIRTH_PLACEMENT_ATTEMPTS: u32 = 8;
