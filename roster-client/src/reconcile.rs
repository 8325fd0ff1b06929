//! Record reconciliation
//!
//! Joins basic info and details into listing rows. Basic info is the
//! primary key space: every basic info record yields one row in input
//! order, then every details record without a matching basic info yields a
//! synthetic "Ops" row, in details order.

use shared::models::{BasicInfo, Details, EmployeeRole, EmployeeView, NOT_AVAILABLE};
use std::collections::{HashMap, HashSet};

fn location_or_placeholder(location: &str) -> String {
    if location.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        location.to_string()
    }
}

/// Merge the two collections into listing rows.
///
/// Duplicate details ids resolve to the last one. Details with an empty
/// employee id are ignored.
pub fn merge(basic_info: &[BasicInfo], details: &[Details]) -> Vec<EmployeeView> {
    let by_employee: HashMap<&str, &Details> = details
        .iter()
        .filter(|d| !d.employee_id.is_empty())
        .map(|d| (d.employee_id.as_str(), d))
        .collect();

    let known: HashSet<&str> = basic_info.iter().map(|b| b.employee_id.as_str()).collect();

    let matched = basic_info.iter().map(|basic| {
        let detail = by_employee.get(basic.employee_id.as_str());
        EmployeeView {
            name: basic.full_name.clone(),
            email: basic.email.clone(),
            department: basic.department.clone(),
            role: basic.role,
            location: detail.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |d| location_or_placeholder(&d.office_location),
            ),
            photo: detail.map(|d| d.photo.clone()).unwrap_or_default(),
            employee_id: basic.employee_id.clone(),
        }
    });

    let unmatched = details
        .iter()
        .filter(|d| !d.employee_id.is_empty() && !known.contains(d.employee_id.as_str()))
        .map(|d| EmployeeView {
            name: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            department: NOT_AVAILABLE.to_string(),
            role: EmployeeRole::Ops,
            location: location_or_placeholder(&d.office_location),
            photo: d.photo.clone(),
            employee_id: d.employee_id.clone(),
        });

    matched.chain(unmatched).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::EmploymentType;

    fn basic(id: &str, name: &str) -> BasicInfo {
        BasicInfo {
            id: None,
            full_name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            department: "Engineering".into(),
            role: EmployeeRole::Engineer,
            employee_id: id.into(),
        }
    }

    fn details(id: &str, location: &str) -> Details {
        Details {
            id: None,
            employee_id: id.into(),
            photo: format!("photo-{id}"),
            employment_type: EmploymentType::FullTime,
            office_location: location.into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_matched_rows_take_location_and_photo() {
        let rows = merge(&[basic("ENG-001", "Ann")], &[details("ENG-001", "Depok")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ann");
        assert_eq!(rows[0].location, "Depok");
        assert_eq!(rows[0].photo, "photo-ENG-001");
        assert_eq!(rows[0].role, EmployeeRole::Engineer);
    }

    #[test]
    fn test_basic_without_details_gets_placeholders() {
        let rows = merge(&[basic("ENG-001", "Ann")], &[]);
        assert_eq!(rows[0].location, "N/A");
        assert_eq!(rows[0].photo, "");
    }

    #[test]
    fn test_unmatched_details_become_ops_rows_after_basic_rows() {
        let b = vec![basic("ENG-001", "Ann"), basic("ENG-002", "Bob")];
        let d = vec![
            details("OPS-XYZ", "Surabaya"),
            details("ENG-002", "Jakarta"),
            details("N/A", ""),
        ];
        let rows = merge(&b, &d);

        let ids: Vec<_> = rows.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["ENG-001", "ENG-002", "OPS-XYZ", "N/A"]);

        let synthetic = &rows[2];
        assert_eq!(synthetic.name, "N/A");
        assert_eq!(synthetic.email, "N/A");
        assert_eq!(synthetic.department, "N/A");
        assert_eq!(synthetic.role, EmployeeRole::Ops);
        assert_eq!(synthetic.location, "Surabaya");
        assert_eq!(rows[3].location, "N/A");
    }

    #[test]
    fn test_output_length() {
        let b = vec![basic("A-1", "a"), basic("A-2", "b"), basic("A-3", "c")];
        let d = vec![details("A-2", "x"), details("Z-1", "y"), details("Z-2", "z")];
        // |B| + |{d : d.id not in B}|
        assert_eq!(merge(&b, &d).len(), 3 + 2);
    }

    #[test]
    fn test_duplicate_details_last_wins() {
        let rows = merge(
            &[basic("ENG-001", "Ann")],
            &[details("ENG-001", "Depok"), details("ENG-001", "Jakarta")],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "Jakarta");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let b = vec![basic("ENG-001", "Ann")];
        let d = vec![details("ENG-001", "Depok"), details("OPS-1", "Jakarta")];
        assert_eq!(merge(&b, &d), merge(&b, &d));
    }

    #[test]
    fn test_empty_employee_id_details_are_skipped() {
        let rows = merge(&[], &[details("", "Depok")]);
        assert!(rows.is_empty());
    }
}
