//! Input validation for batch runs.
//!
//! Checks structural integrity of requests and the employee pool before
//! any assignment work starts. Detects:
//! - An empty employee pool
//! - Duplicate employee IDs
//! - Requests with zero headcount
//! - Requests for shift types the catalog cannot resolve
//! - Requests for locations no role may staff
//! - Requests outside the planning horizon
//!
//! All problems are collected so the caller can fix them in one go.

use std::collections::HashSet;

use crate::models::{Employee, PlanningHorizon, RoleLocationMatrix, ShiftCatalog, ShiftRequest};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No employees were supplied.
    EmptyEmployeePool,
    /// Two employees share the same ID.
    DuplicateId,
    /// A request asks for nobody.
    ZeroHeadcount,
    /// A request names a shift type with no registered window.
    UnknownShiftType,
    /// A request names a location absent from the role–location matrix.
    UnknownLocation,
    /// A request falls outside the planning horizon.
    OutsideHorizon,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of one batch run.
///
/// Checks:
/// 1. The employee pool is not empty
/// 2. No duplicate employee IDs
/// 3. Every request has a positive headcount
/// 4. Every request's shift type is registered in `catalog`
/// 5. Every request's location is staffable per `matrix`
/// 6. Every request's date lies within `horizon` (when given)
///
/// Historical shifts are not checked: unknown types there resolve to the
/// full-day fallback instead.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_batch(
    requests: &[ShiftRequest],
    employees: &[Employee],
    matrix: &RoleLocationMatrix,
    catalog: &ShiftCatalog,
    horizon: Option<&PlanningHorizon>,
) -> ValidationResult {
    let mut errors = Vec::new();

    if employees.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyEmployeePool,
            "Employee pool is empty",
        ));
    }

    let mut ids = HashSet::new();
    for e in employees {
        if !ids.insert(e.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
    }

    for (idx, req) in requests.iter().enumerate() {
        if req.headcount == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroHeadcount,
                format!("Request #{idx} ({req}) has zero headcount"),
            ));
        }

        if !catalog.contains(&req.shift_type) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownShiftType,
                format!("Request #{idx} references unknown shift type '{}'", req.shift_type),
            ));
        }

        if !matrix.knows_location(&req.location) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLocation,
                format!("Request #{idx} references unknown location '{}'", req.location),
            ));
        }

        if let Some(h) = horizon {
            if !h.contains(req.date) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OutsideHorizon,
                    format!(
                        "Request #{idx} on {} is outside the horizon {}..={}",
                        req.date,
                        h.start,
                        h.end()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
