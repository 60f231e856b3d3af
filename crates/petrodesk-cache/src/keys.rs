//! Cache key builders for all PetroDesk cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. Keys carry no namespace of
//! their own; the Redis backend prepends the configured `key_prefix`.

use uuid::Uuid;

// ── Employee keys ──────────────────────────────────────────

/// Cache key for the list of all employees.
///
/// Deleted together with the entity key on every employee mutation,
/// including every folder and document change.
pub fn employee_list() -> String {
    "employees:all".to_string()
}

/// Cache key for one employee aggregate by ID.
pub fn employee_by_id(employee_id: Uuid) -> String {
    format!("employees:{employee_id}")
}

// ── Project keys ───────────────────────────────────────────

/// Cache key for the list of all projects.
pub fn project_list() -> String {
    "projects:all".to_string()
}

/// Cache key for one project by ID.
pub fn project_by_id(project_id: Uuid) -> String {
    format!("projects:{project_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_key() {
        let id = Uuid::nil();
        assert_eq!(
            employee_by_id(id),
            "employees:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_list_key() {
        assert_eq!(employee_list(), "employees:all");
    }
}
