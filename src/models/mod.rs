//! Rostering domain models.
//!
//! Provides the data types the engine consumes and produces. Inputs
//! (`Employee`, `ShiftRequest`, `RoleLocationMatrix`) are supplied by the
//! surrounding staff-management system; `Assignment` is the only type the
//! engine creates.
//!
//! # Domain Mappings
//!
//! | u-roster | Hospital | Meaning |
//! |----------|----------|---------|
//! | Employee | Pegawai | Staff member with role and workload |
//! | ShiftRequest | Permintaan shift | Headcount needed for one shift |
//! | Location | Unit | Ward or department |
//! | ShiftType | PAGI / SIANG / MALAM | Time-of-day block |
//! | Assignment | Jadwal | Employee placed on a shift |

mod assignment;
mod employee;
mod horizon;
mod location;
mod request;
mod shift;

pub use assignment::{Assignment, BookingRef};
pub use employee::{Employee, ShiftRecord};
pub use horizon::{HorizonSpan, PlanningHorizon, ShiftTemplate};
pub use location::{Affinity, Location, Permission, Role, RoleLocationMatrix};
pub use request::{Priority, ShiftRequest};
pub use shift::{ShiftCatalog, ShiftType, ShiftWindow, MINUTES_PER_DAY};
