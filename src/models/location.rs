//! Hospital units, staff roles, and the role–location matrix.
//!
//! The matrix is static configuration owned by the surrounding system.
//! The engine only queries it: a role may staff a location iff the
//! matrix lists that location for the role. The attached [`Affinity`]
//! says how central the role is to the unit, which feeds the fitness score.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A hospital unit that shifts are staffed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    /// Intensive care unit.
    Icu,
    /// Emergency department.
    GawatDarurat,
    /// Inpatient ward.
    RawatInap,
    /// Outpatient clinic.
    RawatJalan,
    /// Operating theatre.
    KamarOperasi,
    /// Clinical laboratory.
    Laboratorium,
    /// Pharmacy.
    Farmasi,
    /// Radiology.
    Radiologi,
    /// Administration office.
    Administrasi,
    /// Unit known only to the surrounding system.
    Custom(String),
}

impl Location {
    /// Units where patient care happens.
    pub const CLINICAL: [Location; 5] = [
        Location::Icu,
        Location::GawatDarurat,
        Location::RawatInap,
        Location::RawatJalan,
        Location::KamarOperasi,
    ];

    /// Support units.
    pub const SUPPORT: [Location; 3] = [
        Location::Laboratorium,
        Location::Farmasi,
        Location::Radiologi,
    ];
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Icu => "ICU",
            Location::GawatDarurat => "Gawat Darurat",
            Location::RawatInap => "Rawat Inap",
            Location::RawatJalan => "Rawat Jalan",
            Location::KamarOperasi => "Kamar Operasi",
            Location::Laboratorium => "Laboratorium",
            Location::Farmasi => "Farmasi",
            Location::Radiologi => "Radiologi",
            Location::Administrasi => "Administrasi",
            Location::Custom(name) => name,
        };
        f.write_str(name)
    }
}

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Physician,
    Nurse,
    GeneralStaff,
    Supervisor,
    Administrator,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Physician,
        Role::Nurse,
        Role::GeneralStaff,
        Role::Supervisor,
        Role::Administrator,
    ];
}

/// How central a role is to a unit's work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    /// The unit's core staff (e.g., nurses in the ICU).
    Primary,
    /// Permitted, but not the unit's core staff.
    Secondary,
}

/// One row of the matrix in its flat, serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub role: Role,
    pub location: Location,
    pub affinity: Affinity,
}

/// Immutable role → permitted-location table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct RoleLocationMatrix {
    table: HashMap<Role, HashMap<Location, Affinity>>,
}

impl RoleLocationMatrix {
    /// Creates an empty matrix (nobody may work anywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// The default hospital mapping.
    ///
    /// | Role | Primary | Secondary |
    /// |------|---------|-----------|
    /// | Physician | clinical units | Laboratorium, Radiologi |
    /// | Nurse | clinical units | - |
    /// | GeneralStaff | support units, Administrasi | Rawat Inap, Rawat Jalan |
    /// | Supervisor | - | clinical units, Administrasi |
    /// | Administrator | Administrasi | Rawat Jalan |
    pub fn hospital_default() -> Self {
        let mut matrix = Self::new();
        for location in Location::CLINICAL {
            matrix = matrix
                .with_permission(Role::Physician, location.clone(), Affinity::Primary)
                .with_permission(Role::Nurse, location.clone(), Affinity::Primary)
                .with_permission(Role::Supervisor, location, Affinity::Secondary);
        }
        for location in Location::SUPPORT {
            matrix = matrix.with_permission(Role::GeneralStaff, location, Affinity::Primary);
        }
        matrix
            .with_permission(Role::Physician, Location::Laboratorium, Affinity::Secondary)
            .with_permission(Role::Physician, Location::Radiologi, Affinity::Secondary)
            .with_permission(Role::GeneralStaff, Location::Administrasi, Affinity::Primary)
            .with_permission(Role::GeneralStaff, Location::RawatInap, Affinity::Secondary)
            .with_permission(Role::GeneralStaff, Location::RawatJalan, Affinity::Secondary)
            .with_permission(Role::Supervisor, Location::Administrasi, Affinity::Secondary)
            .with_permission(Role::Administrator, Location::Administrasi, Affinity::Primary)
            .with_permission(Role::Administrator, Location::RawatJalan, Affinity::Secondary)
    }

    /// Adds (or replaces) a permission.
    pub fn with_permission(mut self, role: Role, location: Location, affinity: Affinity) -> Self {
        self.table.entry(role).or_default().insert(location, affinity);
        self
    }

    /// Affinity of a role for a location, `None` if not permitted.
    pub fn affinity(&self, role: Role, location: &Location) -> Option<Affinity> {
        self.table.get(&role)?.get(location).copied()
    }

    /// Whether the role may staff the location.
    pub fn permits(&self, role: Role, location: &Location) -> bool {
        self.affinity(role, location).is_some()
    }

    /// Whether any role may staff the location.
    pub fn knows_location(&self, location: &Location) -> bool {
        self.table.values().any(|locs| locs.contains_key(location))
    }

    /// Locations a role may staff (unordered).
    pub fn locations_for(&self, role: Role) -> impl Iterator<Item = &Location> {
        self.table.get(&role).into_iter().flat_map(|locs| locs.keys())
    }

    /// Flattens the matrix into permission rows.
    pub fn permissions(&self) -> Vec<Permission> {
        self.table
            .iter()
            .flat_map(|(role, locs)| {
                locs.iter().map(move |(location, affinity)| Permission {
                    role: *role,
                    location: location.clone(),
                    affinity: *affinity,
                })
            })
            .collect()
    }
}

impl From<Vec<Permission>> for RoleLocationMatrix {
    fn from(rows: Vec<Permission>) -> Self {
        rows.into_iter().fold(Self::new(), |m, p| {
            m.with_permission(p.role, p.location, p.affinity)
        })
    }
}

impl From<RoleLocationMatrix> for Vec<Permission> {
    fn from(matrix: RoleLocationMatrix) -> Self {
        matrix.permissions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_clinical() {
        let m = RoleLocationMatrix::hospital_default();
        assert_eq!(m.affinity(Role::Nurse, &Location::Icu), Some(Affinity::Primary));
        assert_eq!(
            m.affinity(Role::Supervisor, &Location::GawatDarurat),
            Some(Affinity::Secondary)
        );
        assert!(!m.permits(Role::Administrator, &Location::Icu));
        assert!(!m.permits(Role::Nurse, &Location::Farmasi));
    }

    #[test]
    fn test_knows_location() {
        let m = RoleLocationMatrix::hospital_default();
        for location in Location::CLINICAL.iter().chain(Location::SUPPORT.iter()) {
            assert!(m.knows_location(location), "{location} should be staffed");
        }
        assert!(m.knows_location(&Location::Administrasi));
        assert!(!m.knows_location(&Location::Custom("Hemodialisa".into())));
    }

    #[test]
    fn test_custom_permission() {
        let hd = Location::Custom("Hemodialisa".into());
        let m =
            RoleLocationMatrix::new().with_permission(Role::Nurse, hd.clone(), Affinity::Primary);
        assert!(m.permits(Role::Nurse, &hd));
        assert!(!m.permits(Role::Physician, &hd));
        assert_eq!(m.locations_for(Role::Nurse).count(), 1);
        assert_eq!(m.locations_for(Role::Physician).count(), 0);
    }

    #[test]
    fn test_matrix_serde_flat_rows() {
        let m = RoleLocationMatrix::new()
            .with_permission(Role::Nurse, Location::Icu, Affinity::Primary)
            .with_permission(Role::Supervisor, Location::Icu, Affinity::Secondary);
        let json = serde_json::to_string(&m).unwrap();
        let back: RoleLocationMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);

        let rows: RoleLocationMatrix = serde_json::from_str(
            r#"[{"role":"physician","location":"GAWAT_DARURAT","affinity":"primary"}]"#,
        )
        .unwrap();
        assert!(rows.permits(Role::Physician, &Location::GawatDarurat));
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::GawatDarurat.to_string(), "Gawat Darurat");
        assert_eq!(Location::Custom("HCU".into()).to_string(), "HCU");
    }
}
